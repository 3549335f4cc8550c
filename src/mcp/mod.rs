// MCP protocol surface: wire types, tool registry, formatting and transport
pub mod format;
pub mod handler;
pub mod protocol;
pub mod tools;
pub mod transport;
