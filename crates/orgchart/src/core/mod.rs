//! Core abstractions for org chart layout
//!
//! Data model, configuration, errors, logging and the traits the layout
//! pipeline is built on.

mod config;
mod database;
mod error;
mod layout;
pub mod logging;
mod types;

pub use config::*;
pub use database::*;
pub use error::*;
pub use layout::*;
pub use logging::*;
pub use types::*;
