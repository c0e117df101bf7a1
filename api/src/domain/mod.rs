//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models and their validators
//! - `ports`: Trait definitions for storage backends

pub mod entities;
pub mod ports;
