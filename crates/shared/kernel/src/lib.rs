//! Kernel utilities shared by the tasks and the command line.
//! Keep this crate lightweight: it turns files and environment into domain types.
//!
//! ## Config loading
//! ```rust,no_run
//! use bix_kernel::config::load_config;
//! use std::path::Path;
//!
//! let cfg = load_config(None, Path::new(".")).unwrap();
//! assert_eq!(cfg.git.remote, "origin");
//! ```
pub mod config;
pub mod project;

pub use bix_domain as domain;
