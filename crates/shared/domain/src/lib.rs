//! # Domain Models
//!
//! Pure types shared by the bix crates: tool configuration, project metadata, registry
//! coordinates and image references. Dependencies stay at `serde` and `strum`;
//! reading files and running commands happen elsewhere.

pub mod config;
pub mod constants;
pub mod project;
pub mod registry;
