use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::auth::AuthService;
use crate::clients::{
    AccountClient, CategoryClient, CollegeClient, OrderClient, ProductClient, ProfileClient,
    RoleClient,
};
use crate::config::AppConfig;
use crate::domain::{Account, Category, College, Order, Product, Profile, UserRole};
use crate::error::{AppError, AppResult};
use crate::storage::{ImageStore, StoredObject};

/// Clients for every table, plus the services built on them.
#[derive(Clone)]
pub struct Marketplace {
    pub products: ProductClient,
    pub orders: OrderClient,
    pub profiles: ProfileClient,
    pub accounts: AccountClient,
    pub roles: RoleClient,
    pub categories: CategoryClient,
    pub colleges: CollegeClient,
    pub images: ImageStore,
    pub auth: AuthService,
}

/// Owns the table actors.
///
/// Dropping every clone of the [`Marketplace`] closes the actors' channels;
/// [`MarketplaceSystem::shutdown`] does that for its own copy and then waits
/// for the actor tasks.
pub struct MarketplaceSystem {
    pub marketplace: Marketplace,
    handles: Vec<JoinHandle<()>>,
}

fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

fn spawn_table<T: Entity<Id = String>>(
    buffer: usize,
    id_prefix: &'static str,
    handles: &mut Vec<JoinHandle<()>>,
) -> ResourceClient<T> {
    let (actor, client) = ResourceActor::<T>::new(buffer, sequential_ids(id_prefix));
    handles.push(tokio::spawn(actor.run()));
    client
}

impl MarketplaceSystem {
    pub fn new(config: &AppConfig) -> Self {
        let buffer = config.channel_buffer;
        let mut handles = Vec::new();

        let products = ProductClient::new(spawn_table::<Product>(buffer, "product", &mut handles));
        let orders = OrderClient::new(spawn_table::<Order>(buffer, "order", &mut handles));
        let profiles = ProfileClient::new(spawn_table::<Profile>(buffer, "profile", &mut handles));
        let accounts = AccountClient::new(spawn_table::<Account>(buffer, "user", &mut handles));
        let roles = RoleClient::new(spawn_table::<UserRole>(buffer, "role", &mut handles));
        let categories =
            CategoryClient::new(spawn_table::<Category>(buffer, "category", &mut handles));
        let colleges = CollegeClient::new(spawn_table::<College>(buffer, "college", &mut handles));
        let images = ImageStore::new(
            spawn_table::<StoredObject>(buffer, "object", &mut handles),
            config.image_bucket.clone(),
            config.storage_public_url.clone(),
        );
        let auth = AuthService::new(accounts.clone(), profiles.clone());

        info!(tables = handles.len(), "Marketplace started");

        Self {
            marketplace: Marketplace {
                products,
                orders,
                profiles,
                accounts,
                roles,
                categories,
                colleges,
                images,
                auth,
            },
            handles,
        }
    }

    /// Drops this system's clients and waits for every actor to stop. Clones
    /// of the marketplace held elsewhere must be dropped first.
    pub async fn shutdown(self) -> AppResult<()> {
        info!("Shutting down marketplace...");
        let MarketplaceSystem { marketplace, handles } = self;
        drop(marketplace);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(AppError::TaskFailed(e.to_string()));
            }
        }

        info!("Marketplace shutdown complete.");
        Ok(())
    }
}
