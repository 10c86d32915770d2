//! Category and college tables. Both are plain id + unique name lists.

pub mod entity;
pub mod error;

pub use entity::LookupEntry;
pub use error::*;
