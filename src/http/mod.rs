//! HTTP Transport layer for the Model Context Protocol
//!
//! Provides the external API routing: metadata endpoints, the `/mcp` listener
//! and the `/ws` WebSocket binding.

pub mod handlers;
pub mod ws;
