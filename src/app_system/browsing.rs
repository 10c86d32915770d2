//! Read-side queries: the catalog and single product pages.
//!
//! Rows are joined in memory the way the backend's embedded selects return
//! them: each product with its seller's contact card and its category name.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use super::Marketplace;
use crate::domain::{Category, Order, OrderView, Product, ProductListing, Profile};
use crate::error::{AppError, AppResult};

/// Lookup maps used to denormalize product rows.
pub(crate) struct ListingJoin {
    profiles: HashMap<String, Profile>,
    categories: HashMap<String, Category>,
}

impl ListingJoin {
    pub(crate) fn listing(&self, product: Product) -> ProductListing {
        let seller = self.profiles.get(&product.seller_id).map(Profile::contact_card);
        let category_name = self.categories.get(&product.category_id).map(|c| c.name.clone());
        ProductListing { product, seller, category_name }
    }

    pub(crate) fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id)
    }
}

/// Whose contact card an order view carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Counterpart {
    /// Seller dashboard: show the buyer.
    Buyer,
    /// Order history: show the seller.
    Seller,
}

impl Marketplace {
    pub(crate) async fn listing_join(&self) -> AppResult<ListingJoin> {
        let profiles = self.profiles.list_profiles().await?;
        let categories = self.categories.list_all().await?;
        Ok(ListingJoin {
            profiles: profiles.into_iter().map(|p| (p.id.clone(), p)).collect(),
            categories: categories.into_iter().map(|c| (c.id.clone(), c)).collect(),
        })
    }

    /// Joins orders with their product and the counterpart's profile. Order is kept.
    pub(crate) async fn order_views(
        &self,
        orders: Vec<Order>,
        counterpart: Counterpart,
    ) -> AppResult<Vec<OrderView>> {
        let products: HashMap<String, Product> =
            self.products.list_products().await?.into_iter().map(|p| (p.id.clone(), p)).collect();
        let join = self.listing_join().await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                let product = products.get(&order.product_id);
                let other_id = match counterpart {
                    Counterpart::Buyer => &order.buyer_id,
                    Counterpart::Seller => &order.seller_id,
                };
                OrderView {
                    product_title: product.map(|p| p.title.clone()),
                    product_price: product.map(|p| p.price),
                    counterpart: join.profile(other_id).map(Profile::contact_card),
                    order,
                }
            })
            .collect())
    }

    /// Active products with seller and category, newest first.
    #[instrument(skip(self))]
    pub async fn browse_catalog(&self) -> AppResult<Vec<ProductListing>> {
        let products = self.products.list_active().await?;
        let join = self.listing_join().await?;
        let listings: Vec<ProductListing> = products.into_iter().map(|p| join.listing(p)).collect();
        info!(count = listings.len(), "Catalog loaded");
        Ok(listings)
    }

    /// One product in any status.
    #[instrument(skip(self))]
    pub async fn product_details(&self, product_id: &str) -> AppResult<ProductListing> {
        let product = self
            .products
            .get_product(product_id.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {}", product_id)))?;
        debug!(status = product.status.as_str(), "Product found");
        let join = self.listing_join().await?;
        Ok(join.listing(product))
    }
}
