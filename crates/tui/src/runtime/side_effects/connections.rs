//! Connection side effect handlers.

use std::sync::Arc;

use apiconn_client::{ConnectionTest, NewConnection, ResourceId};
use tokio::sync::mpsc::Sender;

use super::{SharedClient, TaskTracker};
use crate::action::Action;

pub async fn handle_load_connections(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        match client.list_connections().await {
            Ok(connections) => {
                let _ = tx.send(Action::ConnectionsLoaded(Ok(connections))).await;
            }
            Err(e) => {
                let _ = tx.send(Action::ConnectionsLoaded(Err(Arc::new(e)))).await;
            }
        }
    });
}

pub async fn handle_create_connection(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
    connection: NewConnection,
) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        let result = client.create_connection(&connection).await.map_err(Arc::new);
        let _ = tx.send(Action::ConnectionCreated(result)).await;
    });
}

/// Test a connection before it is saved. The backend reports failures in
/// the body, so only transport errors come back as `Err`.
pub async fn handle_test_connection(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
    test: ConnectionTest,
) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        let result = client.test_connection(&test).await.map_err(Arc::new);
        let _ = tx.send(Action::ConnectionTested(result)).await;
    });
}

pub async fn handle_delete_connection(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
    id: ResourceId,
) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        let result = client.delete_connection(&id).await.map_err(Arc::new);
        let _ = tx.send(Action::ConnectionDeleted(result)).await;
    });
}
