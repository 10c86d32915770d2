//! # Mock Framework
//!
//! Stand-ins for table actors in tests.
//!
//! [`create_mock_client`] returns a client and the receiving end of its
//! channel. The `expect_*` helpers pull the next request, check its kind and
//! hand back its payload plus the responder, so a test can answer with a row
//! or inject a failure.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};

pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, update, respond_to }) => Some((id, update, respond_to)),
        _ => None,
    }
}

pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::clients::ProductClient;
    use crate::domain::{Product, ProductStatus};
    use crate::product_actor::ProductError;

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);

        let task = tokio::spawn(async move { client.mark_sold("product_1".to_string()).await });

        let (id, update, responder) =
            expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, "product_1");
        assert_eq!(update.status, Some(ProductStatus::Sold));
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Err(ProductError::Backend(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    async fn test_list_answered_by_mock() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);
        let task = tokio::spawn(async move { client.list_active().await });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        responder.send(Ok(vec![])).unwrap();
        assert_eq!(task.await.unwrap(), Ok(vec![]));
    }

    #[tokio::test]
    async fn test_wrong_request_kind_yields_none() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let task = tokio::spawn(async move { client.list().await });

        assert!(expect_get(&mut receiver).await.is_none());
        assert!(matches!(task.await.unwrap(), Err(FrameworkError::ActorDropped)));
    }
}
