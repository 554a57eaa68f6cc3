//! API v1 Module
//!
//! Re-exports the current prediction API for versioning.
//! The request/response shapes here back the `/predict/*` HTTP routes.

pub use super::predict::*;
