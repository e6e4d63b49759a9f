//! Client-side state core for the resume app: the session and resume stores,
//! the adapters they depend on, and the derived views screens render from.

pub mod config;
pub mod errors;
pub mod models;
pub mod persistence;
pub mod remote;
pub mod state;
pub mod store;
pub mod views;

#[cfg(test)]
mod testing;

pub use errors::StoreError;
pub use state::AppState;
pub use store::{ResumeStore, SessionStore};
