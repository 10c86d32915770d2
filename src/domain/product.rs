use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a product can still be bought.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Sold,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Sold => "sold",
        }
    }
}

/// A listed item.
///
/// `image_urls` holds storage paths (or absolute URLs) in display order; the
/// first one is the cover image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_urls: Vec<String>,
    pub seller_id: String,
    pub category_id: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new product. New products always start `active`.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_urls: Vec<String>,
    pub seller_id: String,
    pub category_id: String,
}

/// Partial update for a product row.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub status: Option<ProductStatus>,
}

impl ProductUpdate {
    pub fn mark_sold() -> Self {
        Self { status: Some(ProductStatus::Sold), ..Self::default() }
    }
}

/// Public contact details of a user as shown next to a product or order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactCard {
    pub full_name: String,
    pub mobile_number: String,
    pub college: Option<String>,
}

/// A product joined with its seller's contact card and its category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    #[serde(flatten)]
    pub product: Product,
    pub seller: Option<ContactCard>,
    pub category_name: Option<String>,
}

impl ProductListing {
    pub fn seller_college(&self) -> Option<&str> {
        self.seller.as_ref().and_then(|seller| seller.college.as_deref())
    }
}

pub(crate) fn validate_price(price: f64) -> Result<(), String> {
    if !price.is_finite() || price < 0.0 {
        return Err(format!("Price must be a non-negative number, got {}", price));
    }
    Ok(())
}
