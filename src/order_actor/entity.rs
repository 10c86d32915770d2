use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{validate_price, Order, OrderCreate, OrderStatus};
use crate::lifecycle::{self, Transition};

/// Custom actions for Order entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Moves the order to the given status, whatever its current one.
    SetStatus(OrderStatus),
}

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Transition;

    const TABLE: &'static str = "orders";

    /// Creates a pending order. The total is whatever the caller copied from
    /// the product price at checkout.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        validate_price(params.total_amount)?;
        if params.delivery_address.trim().is_empty() {
            return Err("Delivery address is required".to_string());
        }
        Ok(Self {
            id,
            buyer_id: params.buyer_id,
            seller_id: params.seller_id,
            product_id: params.product_id,
            total_amount: params.total_amount,
            delivery_address: params.delivery_address,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Orders are immutable apart from their status.
    fn on_update(&mut self, _update: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<Transition, String> {
        match action {
            OrderAction::SetStatus(target) => Ok(lifecycle::apply(self, target)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(address: &str) -> OrderCreate {
        OrderCreate {
            buyer_id: "user_2".into(),
            seller_id: "user_1".into(),
            product_id: "product_1".into(),
            total_amount: 500.0,
            delivery_address: address.into(),
        }
    }

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::from_create_params("order_1".into(), params("Gate 3")).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 500.0);
    }

    #[test]
    fn test_blank_address_is_rejected() {
        assert!(Order::from_create_params("order_1".into(), params("   ")).is_err());
    }

    #[test]
    fn test_set_status_reports_transition() {
        let mut order = Order::from_create_params("order_1".into(), params("Gate 3")).unwrap();
        let transition = order.handle_action(OrderAction::SetStatus(OrderStatus::Shipped)).unwrap();
        assert_eq!(transition, Transition { from: OrderStatus::Pending, to: OrderStatus::Shipped });
        assert_eq!(order.status, OrderStatus::Shipped);
    }
}
