//! Stagebook Library
//!
//! Venue, artist and show listings. Modules are exposed for integration testing.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod seed;
pub mod services;
pub mod state;
pub mod templates;
pub mod test_utils;
