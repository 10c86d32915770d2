//! Category and college lists.

use tracing::instrument;

use super::Marketplace;
use crate::auth::Session;
use crate::domain::{Category, College};
use crate::error::AppResult;

impl Marketplace {
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.categories.list_all().await?)
    }

    pub async fn list_colleges(&self) -> AppResult<Vec<College>> {
        Ok(self.colleges.list_all().await?)
    }

    /// Adds a category, or returns the one that already has this name.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn add_category(&self, session: &Session, name: &str) -> AppResult<Category> {
        Ok(self.categories.ensure(name).await?.entry)
    }

    /// Adds a college, or returns the one that already has this name.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn add_college(&self, session: &Session, name: &str) -> AppResult<College> {
        Ok(self.colleges.ensure(name).await?.entry)
    }

    /// Whether any product, in any status, is filed under this category.
    pub(crate) async fn category_in_use(&self, category_id: String) -> AppResult<bool> {
        let products = self.products.list_products().await?;
        Ok(products.iter().any(|p| p.category_id == category_id))
    }

    /// Whether any profile names this college.
    pub(crate) async fn college_in_use(&self, college: String) -> AppResult<bool> {
        let profiles = self.profiles.list_profiles().await?;
        Ok(profiles.iter().any(|p| p.college.as_deref() == Some(college.as_str())))
    }
}
