//! Command implementations for osgi-target CLI

pub mod clean;
pub mod completions;
pub mod gather;
pub mod index;
pub mod install;
pub mod materialize;
pub mod version;
