use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate, ProductStatus, ProductUpdate};
use crate::product_actor::ProductError;

/// Client for the products table.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(
        skip(self, params),
        fields(title = %params.title, seller_id = %params.seller_id)
    )]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = self.inner.create(params).await?;
        info!(product_id = %product.id, "Product inserted");
        Ok(product)
    }

    /// Every product, newest first.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let mut products = self.inner.list().await?;
        products.reverse();
        Ok(products)
    }

    /// Products still for sale, newest first.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Product>, ProductError> {
        let products = self.list_products().await?;
        Ok(products.into_iter().filter(|p| p.status == ProductStatus::Active).collect())
    }

    /// A seller's products in any status, newest first.
    #[instrument(skip(self))]
    pub async fn list_by_seller(&self, seller_id: &str) -> Result<Vec<Product>, ProductError> {
        let products = self.list_products().await?;
        Ok(products.into_iter().filter(|p| p.seller_id == seller_id).collect())
    }

    /// Changes the fields set in `update`. A rejected update leaves the row as it was.
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: String,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    #[instrument(skip(self))]
    pub async fn mark_sold(&self, id: String) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, ProductUpdate::mark_sold()).await?)
    }
}
