use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Category, College, LookupCreate};
use crate::lookup_actor::{LookupEntry, LookupError};

/// Client for a name list table (categories or colleges).
pub struct LookupClient<T: LookupEntry> {
    inner: ResourceClient<T>,
}

pub type CategoryClient = LookupClient<Category>;
pub type CollegeClient = LookupClient<College>;

impl<T: LookupEntry> Clone for LookupClient<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

/// The outcome of resolving a name against a lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensured<T> {
    pub entry: T,
    /// `true` when the entry did not exist and was inserted by this call.
    pub created: bool,
}

impl<T: LookupEntry> LookupClient<T> {
    pub fn new(inner: ResourceClient<T>) -> Self {
        Self { inner }
    }

    /// All entries ordered by name.
    #[instrument(skip(self), fields(table = T::TABLE))]
    pub async fn list_all(&self) -> Result<Vec<T>, LookupError> {
        debug!("Sending request");
        let mut entries = self.inner.list().await?;
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(entries)
    }

    #[instrument(skip(self), fields(table = T::TABLE))]
    pub async fn get(&self, id: &str) -> Result<Option<T>, LookupError> {
        debug!("Sending request");
        Ok(self.inner.get(id.to_string()).await?)
    }

    #[instrument(skip(self), fields(table = T::TABLE))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<T>, LookupError> {
        debug!("Sending request");
        let name = name.trim();
        let entries = self.inner.list().await?;
        Ok(entries.into_iter().find(|e| e.name() == name))
    }

    /// Returns the entry with this name, inserting it first if it is missing.
    /// A concurrent caller inserting the same name wins the race and both
    /// calls return its entry.
    #[instrument(skip(self), fields(table = T::TABLE))]
    pub async fn ensure(&self, name: &str) -> Result<Ensured<T>, LookupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LookupError::ValidationError("Name is required".to_string()));
        }
        if let Some(entry) = self.find_by_name(name).await? {
            return Ok(Ensured { entry, created: false });
        }

        match self.inner.create(LookupCreate { name: name.to_string() }).await {
            Ok(entry) => {
                info!(id = %entry.id(), name = %entry.name(), "Entry added");
                Ok(Ensured { entry, created: true })
            }
            Err(FrameworkError::Duplicate { .. }) => {
                debug!("Entry added concurrently, reusing it");
                let entry = self.find_by_name(name).await?.ok_or_else(|| LookupError::NotFound {
                    table: T::TABLE,
                    id: name.to_string(),
                })?;
                Ok(Ensured { entry, created: false })
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self), fields(table = T::TABLE))]
    pub async fn delete(&self, id: &str) -> Result<(), LookupError> {
        debug!("Sending request");
        Ok(self.inner.delete(id.to_string()).await?)
    }
}
