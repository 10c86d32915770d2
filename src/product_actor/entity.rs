use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{validate_price, Product, ProductCreate, ProductStatus, ProductUpdate};

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Update = ProductUpdate;
    type Action = ();
    type ActionResult = ();

    const TABLE: &'static str = "products";

    /// New products are `active` and stamped with the current time.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        validate_price(params.price)?;
        Ok(Self {
            id,
            title: params.title,
            description: params.description,
            price: params.price,
            image_urls: params.image_urls,
            seller_id: params.seller_id,
            category_id: params.category_id,
            status: ProductStatus::Active,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, update: ProductUpdate) -> Result<(), String> {
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
