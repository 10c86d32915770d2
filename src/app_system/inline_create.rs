use std::future::Future;

use tracing::{error, info, warn};

use crate::clients::LookupClient;
use crate::error::AppResult;
use crate::lookup_actor::LookupEntry;

/// Resolves `name` against a lookup table, inserting it if missing, then runs
/// `step` with the entry. When the entry was inserted here and `step` fails,
/// the entry is deleted again before the error is returned, unless `in_use`
/// reports that a concurrent caller already refers to it.
pub(crate) async fn with_ensured<T, R, F, Fut, U, UFut>(
    client: &LookupClient<T>,
    name: &str,
    step: F,
    in_use: U,
) -> AppResult<R>
where
    T: LookupEntry,
    F: FnOnce(T) -> Fut,
    Fut: Future<Output = AppResult<R>>,
    U: FnOnce(T) -> UFut,
    UFut: Future<Output = AppResult<bool>>,
{
    let ensured = client.ensure(name).await?;
    let inserted = ensured.created.then(|| ensured.entry.clone());

    let err = match step(ensured.entry).await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    let Some(entry) = inserted else {
        return Err(err);
    };

    let id = entry.id().to_string();
    warn!(table = T::TABLE, id = %id, "Follow-up step failed, removing new entry");
    match in_use(entry).await {
        Ok(false) => match client.delete(&id).await {
            Ok(()) => info!(table = T::TABLE, id = %id, "New entry removed"),
            Err(rollback) => {
                error!(table = T::TABLE, id = %id, error = %rollback, "Rollback failed")
            }
        },
        Ok(true) => info!(table = T::TABLE, id = %id, "New entry already in use, keeping it"),
        Err(check) => {
            error!(table = T::TABLE, id = %id, error = %check, "Usage check failed, keeping entry")
        }
    }
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceActor;
    use crate::app_system::{CategoryChoice, MarketplaceSystem, NewListing};
    use crate::auth::Session;
    use crate::clients::CategoryClient;
    use crate::config::AppConfig;
    use crate::domain::{Category, ProfileCreate};
    use crate::error::AppError;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn start() -> CategoryClient {
        let counter = AtomicU64::new(1);
        let next_id = move || format!("category_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::<Category>::new(10, next_id);
        tokio::spawn(actor.run());
        CategoryClient::new(client)
    }

    async fn failing_step(_: Category) -> AppResult<()> {
        Err(AppError::Validation("boom".into()))
    }

    async fn unused(_: Category) -> AppResult<bool> {
        Ok(false)
    }

    #[tokio::test]
    async fn test_new_entry_removed_when_step_fails() {
        let categories = start();
        let result = with_ensured(&categories, "Musical Instruments", failing_step, unused).await;

        assert!(result.is_err());
        assert!(categories.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_existing_entry_kept_when_step_fails() {
        let categories = start();
        categories.ensure("Books").await.unwrap();

        let result = with_ensured(&categories, " Books ", failing_step, unused).await;

        assert!(result.is_err());
        assert_eq!(categories.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_new_entry_kept_when_usage_unknown() {
        let categories = start();
        let result = with_ensured(&categories, "Bikes", failing_step, |_| async {
            Err::<bool, _>(AppError::TaskFailed("lookup down".into()))
        })
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(categories.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_step_receives_entry() {
        let categories = start();
        let id = with_ensured(
            &categories,
            "Bikes",
            |category| async move { Ok::<_, AppError>(category.id) },
            unused,
        )
        .await
        .unwrap();
        let stored = categories.get(&id).await.unwrap().map(|c| c.name);
        assert_eq!(stored, Some("Bikes".to_string()));
    }

    #[tokio::test]
    async fn test_entry_used_by_another_seller_survives_rollback() {
        let system = MarketplaceSystem::new(&AppConfig::default());
        let market = system.marketplace.clone();
        market
            .profiles
            .create_profile(ProfileCreate {
                id: "user_2".into(),
                full_name: "Vikram Iyer".into(),
                mobile_number: "9000000000".into(),
                college: Some("IIT Madras".into()),
                email: "user_2@example.com".into(),
            })
            .await
            .unwrap();
        let other = Session { user_id: "user_2".into(), email: "user_2@example.com".into() };

        let result = with_ensured(
            &market.categories,
            "Drones",
            |category| {
                let market = market.clone();
                let other = other.clone();
                async move {
                    let listing = NewListing {
                        title: "Quadcopter".into(),
                        description: "Barely flown".into(),
                        price: 9000.0,
                        category: CategoryChoice::Existing(category.id),
                        images: vec![],
                    };
                    market.list_product(&other, listing).await?;
                    Err::<(), _>(AppError::Validation("first seller failed".into()))
                }
            },
            |category| market.category_in_use(category.id),
        )
        .await;

        assert!(result.is_err());
        let drones = market.categories.find_by_name("Drones").await.unwrap();
        assert!(drones.is_some());
        assert_eq!(market.browse_catalog().await.unwrap().len(), 1);
    }
}
