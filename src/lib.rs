pub mod changelog;
pub mod cli;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod input;
pub mod release_version;
pub mod ui;

pub use error::{ReleaseError, Result};
