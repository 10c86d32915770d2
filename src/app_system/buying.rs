use tracing::{error, info, instrument, warn};

use super::browsing::Counterpart;
use super::Marketplace;
use crate::auth::Session;
use crate::domain::{Order, OrderCreate, OrderView, ProductStatus};
use crate::error::{AppError, AppResult};

/// Result of a checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: Order,
    /// `false` when the order was recorded but the product could not be
    /// marked sold. The product then stays listed until someone fixes it.
    pub product_marked_sold: bool,
}

impl Marketplace {
    /// Buys a product for the signed-in user.
    ///
    /// The order insert and the product's switch to `sold` are two separate
    /// requests. If the second one fails the order still stands and the
    /// failure is only logged.
    #[instrument(skip(self, session, delivery_address), fields(buyer_id = %session.user_id))]
    pub async fn place_order(
        &self,
        session: &Session,
        product_id: &str,
        delivery_address: &str,
    ) -> AppResult<PlacedOrder> {
        let delivery_address = delivery_address.trim();
        if delivery_address.is_empty() {
            return Err(AppError::Validation("Please enter a delivery address".to_string()));
        }

        if self.profiles.get_profile(session.user_id.clone()).await?.is_none() {
            warn!("Buyer has no profile");
            let message = "Please complete your profile before buying".to_string();
            return Err(AppError::Validation(message));
        }

        let product = self
            .products
            .get_product(product_id.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {}", product_id)))?;

        if product.seller_id == session.user_id {
            return Err(AppError::Forbidden("You cannot buy your own product".to_string()));
        }
        if product.status != ProductStatus::Active {
            return Err(AppError::Validation("This product is no longer available".to_string()));
        }

        let order = self
            .orders
            .create_order(OrderCreate {
                buyer_id: session.user_id.clone(),
                seller_id: product.seller_id.clone(),
                product_id: product.id.clone(),
                total_amount: product.price,
                delivery_address: delivery_address.to_string(),
            })
            .await?;

        let product_marked_sold = match self.products.mark_sold(product.id.clone()).await {
            Ok(_) => true,
            Err(e) => {
                error!(
                    order_id = %order.id,
                    product_id = %product.id,
                    error = %e,
                    "Order placed but product not marked sold"
                );
                false
            }
        };

        info!(order_id = %order.id, total = order.total_amount, "Order placed");
        Ok(PlacedOrder { order, product_marked_sold })
    }

    /// Orders the signed-in user placed, with the seller's contact card, newest first.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn my_orders(&self, session: &Session) -> AppResult<Vec<OrderView>> {
        let orders = self.orders.list_by_buyer(&session.user_id).await?;
        self.order_views(orders, Counterpart::Seller).await
    }
}
