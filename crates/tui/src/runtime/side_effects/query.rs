//! Natural-language query execution.

use std::sync::Arc;

use apiconn_client::QueryRequest;
use tokio::sync::mpsc::Sender;

use super::{SharedClient, TaskTracker};
use crate::action::Action;

/// Run `request` against its connection.
///
/// No `Loading` toggle: the query screen tracks its own running state.
pub async fn handle_run_query(
    client: SharedClient,
    tx: Sender<Action>,
    task_tracker: TaskTracker,
    request: QueryRequest,
) {
    task_tracker.spawn(async move {
        let result = client.query(&request).await.map_err(Arc::new);
        let _ = tx.send(Action::QueryCompleted(result)).await;
    });
}
