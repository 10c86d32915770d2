//! Typed clients, one per table. Each wraps a `ResourceClient` and adds the
//! queries that table is used for.

#[macro_use]
mod macros;

pub mod lookup_client;
pub mod order_client;
pub mod product_client;
pub mod role_client;
pub mod user_client;

pub use lookup_client::*;
pub use order_client::*;
pub use product_client::*;
pub use role_client::*;
pub use user_client::*;
