use tracing::{info, instrument};

use super::Marketplace;
use crate::error::AppResult;

pub const DEMO_CATEGORIES: [&str; 6] =
    ["Books", "Electronics", "Furniture", "Vehicles", "Clothing", "Sports"];

pub const DEMO_COLLEGES: [&str; 4] = ["IIT Madras", "NIT Trichy", "Anna University", "PSG Tech"];

/// Fills the category and college lists. Safe to run more than once.
#[instrument(skip(marketplace))]
pub async fn seed_demo_data(marketplace: &Marketplace) -> AppResult<()> {
    let mut added = 0;
    for name in DEMO_CATEGORIES {
        added += usize::from(marketplace.categories.ensure(name).await?.created);
    }
    for name in DEMO_COLLEGES {
        added += usize::from(marketplace.colleges.ensure(name).await?.created);
    }
    info!(added, "Demo data seeded");
    Ok(())
}
