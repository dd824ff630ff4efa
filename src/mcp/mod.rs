//! Model Context Protocol (MCP) server handling and JSON-RPC implementations
//!
//! Provides the JSON-RPC envelope and the method routing for the calculator server.

pub mod rpc;
pub mod server;
