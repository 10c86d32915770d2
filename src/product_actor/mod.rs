//! Product table: row rules and errors.

pub mod entity;
pub mod error;

pub use error::*;
