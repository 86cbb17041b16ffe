pub mod listings_model;
pub mod listings_traits;
pub mod testing;

#[cfg(test)]
mod listings_model_tests;

pub use listings_model::*;
pub use listings_traits::*;
