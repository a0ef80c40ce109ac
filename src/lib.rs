//! ComicCrafter site code
//!
//! Turns a short scenario into a captioned six-panel comic strip by
//! sequencing a hosted text model, a hosted image model, and local
//! caption/page compositing.

#![allow(clippy::multiple_crate_versions)]
#![deny(clippy::all)]
#![deny(clippy::await_holding_lock)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::disallowed_methods)]
#![deny(clippy::expect_used)]
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::panic)]
#![deny(clippy::perf)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::unreachable)]
#![deny(clippy::unwrap_used)]
#![deny(warnings)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod compose;
pub mod config;
pub mod constants;
pub mod error;
pub mod genai;
pub mod pipeline;
pub mod script;
pub mod staging;
pub mod style;
pub mod web;
