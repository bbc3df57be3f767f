//! # Hermes Core
//!
//! Core types for the Hermes HTTP client framework.
//!
//! This crate provides the foundational types used throughout Hermes:
//!
//! - [`Conn`] - Immutable per-request context flowing through the pipeline
//! - [`Method`] - The HTTP verbs a client can dispatch
//! - [`Adapter`] - The terminal transport contract consumed by the pipeline
//! - [`HermesError`] - Standard error types
//!
//! Pipeline composition lives in `hermes-middleware`; the public verb API
//! lives in `hermes-client`.

#![doc(html_root_url = "https://docs.rs/hermes-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapter;
mod conn;
mod error;
pub mod fixtures;
mod method;

pub use adapter::{Adapter, FnAdapter};
pub use conn::Conn;
pub use error::{ErrorCategory, HermesError, HermesResult};
pub use method::Method;
