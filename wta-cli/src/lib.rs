//! The `wtasim` command line interface: argument parsing, logging setup,
//! orchestration of the collaborator crates around `wta-engine::Simulation`,
//! and the post-run sanity check.

pub mod args;
pub mod cli;
pub mod logger;
mod logging_observer;
mod progress;
mod registries;
mod sanity;
mod shared_observer;

pub use args::Args;
pub use sanity::SanityViolation;
