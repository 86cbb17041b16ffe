//! Catalog source providers.
//!
//! One provider per marketplace transport. All providers implement
//! [`CatalogSource`]; the sync engine receives them as trait objects
//! built through a [`CatalogSourceFactory`].

mod capabilities;
mod traits;

pub mod gateway;

pub use capabilities::RateLimit;
pub use traits::{CatalogSource, CatalogSourceFactory};
