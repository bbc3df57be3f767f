//! # Hermes Middleware
//!
//! Middleware contract and pipeline compiler for the Hermes HTTP client
//! framework.
//!
//! A pipeline is an ordered list of middleware plus exactly one terminal
//! adapter, compiled once into a single chain and shared read-only by every
//! request:
//!
//! ```text
//! Conn → m1 → m2 → ... → mn → Adapter
//!                                 ↓
//! Conn ← m1 ← m2 ← ... ← mn ←────┘
//! ```
//!
//! The first-registered middleware is outermost: it sees the raw incoming
//! context first and the finished response last. Any step may short-circuit
//! by returning an error, which skips every remaining step and propagates
//! unchanged to the caller.
//!
//! ## Stock stages
//!
//! The [`stages`] module ships middleware that need no body codec: base-URL
//! prefixing, default headers, default query params, bearer/basic auth, and
//! request logging.

#![doc(html_root_url = "https://docs.rs/hermes-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod middleware;
pub mod pipeline;
pub mod stages;

pub use middleware::{FnMiddleware, Middleware, Next};
pub use pipeline::{Pipeline, PipelineBuilder};
