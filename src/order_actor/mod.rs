//! Order table: row rules, the status action, and errors.

pub mod entity;
pub mod error;

pub use entity::OrderAction;
pub use error::*;
