//! Marketplace startup, shutdown and the user-facing workflows.
//!
//! [`MarketplaceSystem`] owns the table actors; [`Marketplace`] is the
//! cloneable set of clients the workflows run against. Workflows that act on
//! behalf of a user take the [`Session`](crate::auth::Session) explicitly.

pub mod accounts;
pub mod admin;
pub mod browsing;
pub mod buying;
mod inline_create;
pub mod logging;
pub mod lookups;
pub mod marketplace;
pub mod seed;
pub mod selling;

pub use accounts::*;
pub use buying::*;
pub use logging::*;
pub use marketplace::*;
pub use seed::*;
pub use selling::*;
