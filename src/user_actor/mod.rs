//! Profile, account and role tables.

pub mod entity;
pub mod error;

pub use error::*;
