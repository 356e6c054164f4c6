//! Core definitions (error model and verification helpers), relied upon by all dictcol-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
