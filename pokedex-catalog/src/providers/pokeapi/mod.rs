//! PokeAPI provider implementation
//!
//! This module provides the HTTP client for https://pokeapi.co.

pub mod client;
pub mod types;

pub use client::{PokeApiClient, PokeApiConfig};
