//! API Request and Response Types
//!
//! Wire types for the REST API. Field names follow the public contract
//! exactly, including the capitalised `Name` of a search hit.

// Pokemon search and ability types
mod pokemon;
pub use pokemon::*;
