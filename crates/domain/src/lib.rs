//! news-digest domain crate
//!
//! This crate contains the core pipeline logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `filter`: Keyword matching and relevance scoring
//! - `usecases`: Digest run orchestration and rendering

pub mod filter;
pub mod model;
pub mod ports;
pub mod usecases;

pub use model::*;
pub use ports::*;
