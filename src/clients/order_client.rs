use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Order, OrderCreate, OrderStatus};
use crate::lifecycle::Transition;
use crate::order_actor::{OrderAction, OrderError};

/// Client for the orders table.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, OrderError, order);

impl OrderClient {
    #[instrument(
        skip(self, params),
        fields(
            buyer_id = %params.buyer_id,
            product_id = %params.product_id,
            total = %params.total_amount
        )
    )]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        let order = self.inner.create(params).await?;
        info!(order_id = %order.id, "Order inserted");
        Ok(order)
    }

    /// Every order, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self.inner.list().await?;
        orders.reverse();
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn list_by_seller(&self, seller_id: &str) -> Result<Vec<Order>, OrderError> {
        let orders = self.list_orders().await?;
        Ok(orders.into_iter().filter(|o| o.seller_id == seller_id).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_by_buyer(&self, buyer_id: &str) -> Result<Vec<Order>, OrderError> {
        let orders = self.list_orders().await?;
        Ok(orders.into_iter().filter(|o| o.buyer_id == buyer_id).collect())
    }

    /// Persists a new status. On failure the stored status is unchanged.
    #[instrument(skip(self), fields(status = %status))]
    pub async fn set_status(
        &self,
        id: String,
        status: OrderStatus,
    ) -> Result<Transition, OrderError> {
        debug!("Sending request");
        let transition = self.inner.perform_action(id, OrderAction::SetStatus(status)).await?;
        info!(from = %transition.from, to = %transition.to, "Order status changed");
        Ok(transition)
    }
}
