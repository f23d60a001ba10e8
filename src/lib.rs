pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod preview;
pub mod registry;
pub mod sink;
pub mod tournament;

pub use error::{ImportError, Result};
