//! Subcommand implementations.

pub mod boundary;
pub mod info;
pub mod normalize;
pub mod run;
