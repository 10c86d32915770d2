use tracing::{error, info, warn, Instrument};

use campus_exchange::app_system::{
    seed_demo_data, setup_tracing, CategoryChoice, CollegeChoice, MarketplaceSystem, NewListing,
    SignUpForm,
};
use campus_exchange::catalog::FilterState;
use campus_exchange::domain::OrderStatus;
use campus_exchange::notice::Notice;
use campus_exchange::storage::ImageUpload;
use campus_exchange::{AppConfig, AppResult};

#[tokio::main]
async fn main() -> AppResult<()> {
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!(
        bucket = %config.image_bucket,
        buffer = config.channel_buffer,
        "Starting campus exchange"
    );

    let system = MarketplaceSystem::new(&config);
    let market = &system.marketplace;
    if config.seed_demo_data {
        seed_demo_data(market).await?;
    }

    let seller = market
        .sign_up(SignUpForm {
            email: "asha@example.com".to_string(),
            password: "bicycle-42".to_string(),
            full_name: "Asha Rao".to_string(),
            mobile_number: "9876543210".to_string(),
            college: CollegeChoice::Existing("IIT Madras".to_string()),
        })
        .await?;
    let buyer = market
        .sign_up(SignUpForm {
            email: "vikram@example.com".to_string(),
            password: "hostel-b12".to_string(),
            full_name: "Vikram Iyer".to_string(),
            mobile_number: "9123456780".to_string(),
            college: CollegeChoice::New("IIT Madras".to_string()),
        })
        .await?;

    let span = tracing::info_span!("selling", user_id = %seller.user_id);
    let bike = async {
        let listing = NewListing {
            title: "Bike".to_string(),
            description: "Red hybrid bicycle, one year old".to_string(),
            price: 4500.0,
            category: CategoryChoice::New("Vehicles".to_string()),
            images: vec![ImageUpload::new("bike.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])],
        };
        let result = market.list_product(&seller, listing).await;
        info!(notice = ?Notice::for_result(&result, "Product listed successfully"));
        result
    }
    .instrument(span)
    .await?;
    info!(cover = %market.images.cover_url(&bike.image_urls), "Cover image");

    let span = tracing::info_span!("browsing", user_id = %buyer.user_id);
    async {
        let catalog = market.browse_catalog().await?;
        let mut filters = FilterState::default();
        filters.seed_from_profile(&market.my_profile(&buyer).await?);
        filters.set_query("bik");
        for listing in filters.apply(&catalog) {
            let product = &listing.product;
            info!(title = %product.title, price = product.price, "Matching product");
        }
        AppResult::Ok(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("buying", user_id = %buyer.user_id);
    let placed = market.place_order(&buyer, &bike.id, "Hostel B, Room 12").instrument(span).await;
    let order = match placed {
        Ok(placed) => {
            if !placed.product_marked_sold {
                warn!(product_id = %bike.id, "Product still listed after checkout");
            }
            info!(notice = ?Notice::success("Order placed successfully!"));
            placed.order
        }
        Err(e) => {
            error!(notice = ?Notice::from_error(&e), "Checkout failed");
            return Err(e);
        }
    };

    let refused = market.place_order(&seller, &bike.id, "Hostel A").await;
    info!(notice = ?Notice::for_result(&refused, "Order placed successfully!"), "Own product");

    let span = tracing::info_span!("fulfilment", user_id = %seller.user_id);
    async {
        for status in [OrderStatus::Confirmed, OrderStatus::Shipped, OrderStatus::Delivered] {
            let views = market.update_order_status(&seller, &order.id, status).await?;
            info!(
                order_id = %order.id,
                status = %status,
                orders = views.len(),
                "Order status updated successfully"
            );
        }
        AppResult::Ok(())
    }
    .instrument(span)
    .await?;

    for view in market.my_orders(&buyer).await? {
        info!(
            order_id = %view.order.id,
            status = %view.order.status,
            seller = ?view.counterpart.map(|c| c.full_name),
            "Order history"
        );
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
