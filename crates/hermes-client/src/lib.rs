//! # Hermes Client
//!
//! The verb dispatch layer for the Hermes HTTP client framework.
//!
//! A [`Client`] owns one compiled pipeline and exposes the public verb API:
//! per call, dispatch constructs and validates a `Conn`, runs the chain, and
//! interprets the result. Every entry point goes through one generic
//! dispatch function parameterized by [`Method`], so the verb contract lives
//! in one place instead of per-verb boilerplate.
//!
//! Two call styles exist per verb:
//!
//! - **Safe form** (`get`, `post`, ...) - returns whatever the pipeline
//!   produced: `Ok(conn)` for any structural success (including a 404), or
//!   the middleware/transport error.
//! - **Strict form** (`get_strict`, ...) - additionally enforces an
//!   acceptable status range (200-299 by default, or an explicit
//!   [`StatusAccept`] list) and re-maps failures into
//!   `StatusMismatch`/`Request` errors carrying the context.
//!
//! [`Method`]: hermes_core::Method

#![doc(html_root_url = "https://docs.rs/hermes-client/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accept;
mod client;
mod target;

pub use accept::StatusAccept;
pub use client::{Client, ClientBuilder};
pub use target::RequestTarget;
