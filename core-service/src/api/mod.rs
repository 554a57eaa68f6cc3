//! API Module
//!
//! Organized with versioning for backward compatibility.
//!
//! Structure:
//! - predict.rs: request validation and response shaping
//! - v1/mod.rs: re-exports predict as the v1 API
//!
//! Usage:
//! - `api::predict::predict_url(&ctx, &req)` - Direct access
//! - `api::v1::predict_url(&ctx, &req)` - Version 1 API

pub mod predict;
pub mod v1;


// Re-export current version as default
pub use predict::*;
