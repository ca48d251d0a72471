//! Local JSON API over the registry.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
