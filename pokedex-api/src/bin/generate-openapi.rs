//! Writes the Pokedex OpenAPI document as JSON to stdout.
//!
//! Usage:
//!   cargo run -p pokedex-api --bin generate-openapi --features openapi > openapi.json

use pokedex_api::ApiDoc;

fn main() {
    match ApiDoc::to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI document: {}", e);
            std::process::exit(1);
        }
    }
}
