//! Crosslist server library.
//!
//! Exposes the router and state construction so integration tests can
//! drive the HTTP surface without binding a socket.

pub mod api;
pub mod models;
pub mod state;

pub use api::router;
pub use state::AppState;
