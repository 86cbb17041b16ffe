//! Minimum-resale-price enforcement.
//!
//! Computes a price floor from source cost, shipping, profit policy and
//! marketplace fee, and pushes corrections externally when automated
//! repricing is enabled.

pub mod repricing_model;
pub mod repricing_service;


pub use repricing_model::*;
pub use repricing_service::RepricingService;
