//! # Resource actors
//!
//! Every marketplace table (products, orders, profiles, ...) is owned by one
//! [`ResourceActor`] task. Callers talk to it through a cloneable
//! [`ResourceClient`]; each call is a single request answered over a oneshot
//! channel. Requests to one table are handled strictly one at a time.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A row type that can be stored in a [`ResourceActor`].
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Update: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Table name, used in logs and errors.
    const TABLE: &'static str;

    /// Id carried by the create parameters themselves (profiles share the
    /// account id, roles are keyed by user). `None` lets the actor generate one.
    fn preset_id(_params: &Self::CreateParams) -> Option<Self::Id> {
        None
    }

    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    /// A value no two rows of the table may share besides the id (a lookup
    /// name, an account email). Checked by the actor on create and update.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, update: Self::Update) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    /// Handle a table-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Failures raised by the actor plumbing itself, shared by every table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("{table} row not found: {id}")]
    NotFound { table: &'static str, id: String },
    #[error("{table} row already exists: {id}")]
    Duplicate { table: &'static str, id: String },
    #[error("{table} rejected the request: {reason}")]
    Rejected { table: &'static str, reason: String },
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    rows: HashMap<T::Id, T>,
    insertion_order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: HashMap::new(),
            insertion_order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Serve requests until every client has been dropped.
    #[instrument(name = "resource_actor", skip(self), fields(table = T::TABLE))]
    pub async fn run(mut self) {
        info!("Resource actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.rows.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let rows = self
                        .insertion_order
                        .iter()
                        .filter_map(|id| self.rows.get(id).cloned())
                        .collect();
                    let _ = respond_to.send(Ok(rows));
                }
                ResourceRequest::Update { id, update, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, update));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
            }
        }

        info!(rows = self.rows.len(), "Resource actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let id = T::preset_id(&params).unwrap_or_else(|| (self.next_id_fn)());
        if self.rows.contains_key(&id) {
            warn!(id = %id, "Create rejected: duplicate id");
            return Err(FrameworkError::Duplicate { table: T::TABLE, id: id.to_string() });
        }

        let mut row = T::from_create_params(id.clone(), params).map_err(rejected::<T>)?;
        row.on_create().map_err(rejected::<T>)?;
        self.ensure_unique(&id, &row)?;

        self.rows.insert(id.clone(), row.clone());
        self.insertion_order.push(id.clone());
        debug!(id = %id, "Row created");
        Ok(row)
    }

    /// Applies the update to a copy first so a rejected update leaves the stored row untouched.
    fn handle_update(&mut self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let Some(current) = self.rows.get(&id) else {
            return Err(not_found::<T>(&id));
        };

        let mut updated = current.clone();
        updated.on_update(update).map_err(rejected::<T>)?;
        self.ensure_unique(&id, &updated)?;
        self.rows.insert(id.clone(), updated.clone());
        debug!(id = %id, "Row updated");
        Ok(updated)
    }

    /// Fails when a row other than `id` already holds `row`'s unique key.
    fn ensure_unique(&self, id: &T::Id, row: &T) -> Result<(), FrameworkError> {
        let Some(key) = row.unique_key() else {
            return Ok(());
        };
        let taken = self
            .rows
            .iter()
            .any(|(other_id, other)| other_id != id && other.unique_key().as_ref() == Some(&key));
        if taken {
            warn!(key = %key, "Write rejected: duplicate key");
            return Err(FrameworkError::Duplicate { table: T::TABLE, id: key });
        }
        Ok(())
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let Some(row) = self.rows.get(&id) else {
            return Err(not_found::<T>(&id));
        };

        row.on_delete().map_err(rejected::<T>)?;
        self.rows.remove(&id);
        self.insertion_order.retain(|existing| existing != &id);
        debug!(id = %id, "Row deleted");
        Ok(())
    }

    fn handle_action(
        &mut self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let Some(current) = self.rows.get(&id) else {
            return Err(not_found::<T>(&id));
        };

        let mut updated = current.clone();
        let result = updated.handle_action(action).map_err(rejected::<T>)?;
        self.ensure_unique(&id, &updated)?;
        self.rows.insert(id, updated);
        Ok(result)
    }
}

fn not_found<T: Entity>(id: &T::Id) -> FrameworkError {
    FrameworkError::NotFound { table: T::TABLE, id: id.to_string() }
}

fn rejected<T: Entity>(reason: String) -> FrameworkError {
    FrameworkError::Rejected { table: T::TABLE, reason }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Debug)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would require `T: Clone` on the handle itself.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    /// All rows, oldest first.
    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, update, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        body: String,
        pinned: bool,
    }

    #[derive(Debug)]
    struct NoteCreate {
        body: String,
    }

    #[derive(Debug)]
    struct NoteUpdate {
        body: Option<String>,
        pinned: Option<bool>,
    }

    #[derive(Debug)]
    enum NoteAction {
        TogglePin,
    }

    impl Entity for Note {
        type Id = String;
        type CreateParams = NoteCreate;
        type Update = NoteUpdate;
        type Action = NoteAction;
        type ActionResult = bool;

        const TABLE: &'static str = "notes";

        fn from_create_params(id: String, params: NoteCreate) -> Result<Self, String> {
            if params.body.is_empty() {
                return Err("body required".to_string());
            }
            Ok(Self { id, body: params.body, pinned: false })
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.body.clone())
        }

        fn on_update(&mut self, update: NoteUpdate) -> Result<(), String> {
            if let Some(pinned) = update.pinned {
                self.pinned = pinned;
            }
            if let Some(body) = update.body {
                if body.is_empty() {
                    return Err("body required".to_string());
                }
                self.body = body;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: NoteAction) -> Result<bool, String> {
            match action {
                NoteAction::TogglePin => {
                    self.pinned = !self.pinned;
                    Ok(self.pinned)
                }
            }
        }
    }

    fn start() -> ResourceClient<Note> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("note_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order_after_delete() {
        let client = start();
        for body in ["a", "b", "c"] {
            client.create(NoteCreate { body: body.into() }).await.unwrap();
        }

        client.delete("note_2".to_string()).await.unwrap();

        let bodies: Vec<String> =
            client.list().await.unwrap().into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_concurrent_creates_with_same_key_keep_one_row() {
        let client = start();
        let (first, second) = tokio::join!(
            client.create(NoteCreate { body: "same".into() }),
            client.create(NoteCreate { body: "same".into() }),
        );

        assert!(first.is_ok() != second.is_ok());
        let failure = first.err().or(second.err()).unwrap();
        assert_eq!(failure, FrameworkError::Duplicate { table: "notes", id: "same".into() });
        assert_eq!(client.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_onto_taken_key_is_refused() {
        let client = start();
        client.create(NoteCreate { body: "first".into() }).await.unwrap();
        let second = client.create(NoteCreate { body: "second".into() }).await.unwrap();

        let clash = NoteUpdate { body: Some("first".into()), pinned: None };
        let result = client.update(second.id.clone(), clash).await;
        assert!(matches!(result, Err(FrameworkError::Duplicate { .. })));

        let same = NoteUpdate { body: Some("second".into()), pinned: Some(true) };
        let kept = client.update(second.id.clone(), same).await.unwrap();
        assert!(kept.pinned);
        assert_eq!(client.get(second.id).await.unwrap().unwrap().body, "second");
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_stored_row() {
        let client = start();
        let note = client.create(NoteCreate { body: "draft".into() }).await.unwrap();

        let result = client
            .update(note.id.clone(), NoteUpdate { body: Some(String::new()), pinned: Some(true) })
            .await;
        assert!(matches!(result, Err(FrameworkError::Rejected { table: "notes", .. })));

        let stored = client.get(note.id).await.unwrap().unwrap();
        assert_eq!(stored, Note { id: "note_1".into(), body: "draft".into(), pinned: false });
    }

    #[tokio::test]
    async fn test_action_and_missing_rows() {
        let client = start();
        let note = client.create(NoteCreate { body: "x".into() }).await.unwrap();

        assert!(client.perform_action(note.id.clone(), NoteAction::TogglePin).await.unwrap());
        assert!(client.get(note.id).await.unwrap().unwrap().pinned);

        let missing = client.perform_action("note_9".into(), NoteAction::TogglePin).await;
        assert_eq!(missing, Err(FrameworkError::NotFound { table: "notes", id: "note_9".into() }));
        assert!(client.get("note_9".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_create_is_rejected() {
        let client = start();
        let result = client.create(NoteCreate { body: String::new() }).await;
        assert!(matches!(result, Err(FrameworkError::Rejected { .. })));
        assert!(client.list().await.unwrap().is_empty());
    }
}
