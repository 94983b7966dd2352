//! Job resolution
//!
//! This module stores validated job templates and expands them into concrete,
//! launchable jobs. Resolution merges parameter defaults across platform
//! variants and caller overrides, validates every resulting value, and
//! substitutes `%name%` placeholders in environment entries and the command
//! line.
//!
//! # Example
//!
//! ```text
//! job perf "Ad Hoc Performance Scenario" {
//!     text runs "10"
//!     platform windows { text profiler "jprofiler" }
//!     platform linux   { text profiler "async-profiler" }
//!     command "gradle perf --runs %runs% --profiler %profiler%"
//! }
//! ```
//!
//! Resolving `perf` for Linux with no overrides yields the command line
//! `gradle perf --runs 10 --profiler async-profiler`.

mod error;
mod registry;
mod resolver;
mod subst;

pub use error::ResolveError;
pub use registry::JobRegistry;
pub use resolver::{effective_params, resolve, resolve_with, ResolvedJob};
pub use subst::substitute;
