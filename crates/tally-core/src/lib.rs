//! # tally-core
//!
//! Record types, validation, and error types for tally.
//!
//! This crate provides the types shared across the tally crates:
//! - `RawMessage` / `NormalizedRecord` for one line of the live data file
//! - `AggregateRow` for one category's mean sentiment
//! - `normalize` for turning decoded JSON into a typed record
//! - `ValidationError` for records that fail coercion

pub mod errors;
pub mod normalize;
pub mod record;

pub use errors::ValidationError;
pub use normalize::normalize;
pub use record::{AggregateRow, NormalizedRecord, RawMessage};
