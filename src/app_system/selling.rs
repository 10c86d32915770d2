use tracing::{error, info, instrument, warn};

use super::browsing::Counterpart;
use super::inline_create::with_ensured;
use super::Marketplace;
use crate::auth::Session;
use crate::domain::{
    validate_price, OrderStatus, OrderView, Product, ProductCreate, ProductListing,
};
use crate::error::{AppError, AppResult};
use crate::lifecycle;
use crate::storage::ImageUpload;

/// The category a new listing goes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChoice {
    /// Id of a category picked from the list.
    Existing(String),
    /// A name typed by the seller. Reuses a category with that name, or adds one.
    New(String),
}

/// The sell form.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: CategoryChoice,
    pub images: Vec<ImageUpload>,
}

impl NewListing {
    fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation("Description is required".to_string()));
        }
        validate_price(self.price).map_err(AppError::Validation)?;
        let category = match &self.category {
            CategoryChoice::Existing(id) => id,
            CategoryChoice::New(name) => name,
        };
        if category.trim().is_empty() {
            return Err(AppError::Validation("Please select or enter a category".to_string()));
        }
        Ok(())
    }
}

/// Everything on the seller dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerDashboard {
    pub products: Vec<ProductListing>,
    pub orders: Vec<OrderView>,
}

impl Marketplace {
    /// Puts a product up for sale as the signed-in user.
    #[instrument(
        skip(self, session, listing),
        fields(user_id = %session.user_id, title = %listing.title)
    )]
    pub async fn list_product(&self, session: &Session, listing: NewListing) -> AppResult<Product> {
        self.create_listing(&session.user_id, listing).await
    }

    /// Lists a product on behalf of another user. Admins only.
    #[instrument(
        skip(self, session, listing),
        fields(admin_id = %session.user_id, title = %listing.title)
    )]
    pub async fn admin_create_product(
        &self,
        session: &Session,
        owner_id: &str,
        listing: NewListing,
    ) -> AppResult<Product> {
        self.require_admin(session).await?;
        if self.profiles.get_profile(owner_id.to_string()).await?.is_none() {
            return Err(AppError::NotFound(format!("User {}", owner_id)));
        }
        self.create_listing(owner_id, listing).await
    }

    async fn create_listing(&self, owner_id: &str, listing: NewListing) -> AppResult<Product> {
        listing.validate()?;
        let NewListing { title, description, price, category, images } = listing;

        if let CategoryChoice::Existing(id) = &category {
            if self.categories.get(id).await?.is_none() {
                return Err(AppError::NotFound(format!("Category {}", id)));
            }
        }

        let image_urls = self.images.upload_all(owner_id, images).await?;
        let uploaded = image_urls.clone();
        let params = |category_id: String| ProductCreate {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            price,
            image_urls,
            seller_id: owner_id.to_string(),
            category_id,
        };

        let created = match category {
            CategoryChoice::Existing(id) => {
                self.products.create_product(params(id)).await.map_err(AppError::from)
            }
            CategoryChoice::New(name) => {
                with_ensured(
                    &self.categories,
                    &name,
                    |category| async move {
                        let created = self.products.create_product(params(category.id)).await;
                        created.map_err(AppError::from)
                    },
                    |category| self.category_in_use(category.id),
                )
                .await
            }
        };

        let product = match created {
            Ok(product) => product,
            Err(e) => {
                self.images.remove_all(&uploaded).await;
                return Err(e);
            }
        };

        info!(product_id = %product.id, category_id = %product.category_id, "Product listed");
        Ok(product)
    }

    /// The signed-in user's own listings in any status, newest first.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn my_products(&self, session: &Session) -> AppResult<Vec<ProductListing>> {
        let products = self.products.list_by_seller(&session.user_id).await?;
        let join = self.listing_join().await?;
        Ok(products.into_iter().map(|p| join.listing(p)).collect())
    }

    /// Orders received by `seller_id` with the buyer's contact card, newest first.
    pub async fn seller_orders(&self, seller_id: &str) -> AppResult<Vec<OrderView>> {
        let orders = self.orders.list_by_seller(seller_id).await?;
        self.order_views(orders, Counterpart::Buyer).await
    }

    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn seller_dashboard(&self, session: &Session) -> AppResult<SellerDashboard> {
        let products = self.my_products(session).await?;
        let orders = self.seller_orders(&session.user_id).await?;
        info!(products = products.len(), orders = orders.len(), "Dashboard loaded");
        Ok(SellerDashboard { products, orders })
    }

    /// Sets an order's status as its seller, then returns the seller's
    /// refreshed order list. Any status may follow any other.
    #[instrument(skip(self, session), fields(user_id = %session.user_id, status = %status))]
    pub async fn update_order_status(
        &self,
        session: &Session,
        order_id: &str,
        status: OrderStatus,
    ) -> AppResult<Vec<OrderView>> {
        let order = self
            .orders
            .get_order(order_id.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {}", order_id)))?;

        if let Err(e) = lifecycle::ensure_seller(&order, &session.user_id) {
            warn!(seller_id = %order.seller_id, "Status change refused");
            return Err(e.into());
        }

        match self.orders.set_status(order.id.clone(), status).await {
            Ok(transition) if transition.is_noop() => info!("Status unchanged"),
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Status update failed");
                return Err(e.into());
            }
        }

        self.seller_orders(&session.user_id).await
    }
}
