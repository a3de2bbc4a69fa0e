//! Service Layer
//!
//! Business logic behind the HTTP handlers. Services own the collaborating
//! clients and return domain values; routes only translate to and from
//! wire types.

mod name_index;

pub use name_index::*;
