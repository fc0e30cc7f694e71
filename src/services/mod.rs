//! Business logic services.
//!
//! Handlers stay thin; anything beyond a direct query lives here.

/// Dashboard aggregation over transaction lists
pub mod analytics;
