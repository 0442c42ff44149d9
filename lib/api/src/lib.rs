//! # nutrimatch API
//!
//! REST surface over the extraction, ranking and planning engines.
//! JSON (de)serialization, numeric sanitization (unknown values are
//! `null`, never NaN) and error-to-status mapping all live here; the
//! core crates stay transport-free.

pub mod rest;

pub use rest::{AppState, RestApi};
