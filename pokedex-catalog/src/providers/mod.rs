//! Catalog provider implementations
//!
//! This module contains concrete implementations of the CatalogClient
//! trait for upstream catalog services.

pub mod pokeapi;

pub use pokeapi::{PokeApiClient, PokeApiConfig};
