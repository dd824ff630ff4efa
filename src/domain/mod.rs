//! Calculator operations and their MCP tool integration

pub mod calculator;
pub mod tools;
