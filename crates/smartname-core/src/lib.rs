//! Content-derived file renaming.
//!
//! Files are classified by extension, a bounded sample of their content is
//! extracted and sent to a local model, and the model's suggestion is turned
//! into a sanitized filename in the requested casing style.

pub mod casing;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod rename;
pub mod sanitize;
pub mod scanner;

pub use error::{Error, Result};
