//! Campus Exchange: a student marketplace.
//!
//! Every table (products, orders, profiles, categories, colleges, ...) lives
//! in its own actor task. Typed clients wrap those actors, and
//! [`app_system::Marketplace`] composes them into the browse, sell, buy and
//! admin workflows. [`catalog`] and [`lifecycle`] hold the pure rules: which
//! products a filter shows and how order statuses move.

pub mod actor_framework;
pub mod app_system;
pub mod auth;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod lookup_actor;
pub mod notice;
pub mod order_actor;
pub mod product_actor;
pub mod storage;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;

pub use app_system::{Marketplace, MarketplaceSystem};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
