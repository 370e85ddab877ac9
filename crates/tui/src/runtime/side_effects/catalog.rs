//! Read-only loads: dashboard, provider catalog and query history.

use std::sync::Arc;

use tokio::sync::mpsc::Sender;

use super::{SharedClient, TaskTracker};
use crate::action::{Action, DashboardData};

/// Fetch history, connections and providers concurrently for the dashboard.
///
/// The dashboard fails as a whole when any of the three calls fails.
pub async fn handle_load_dashboard(client: SharedClient, tx: Sender<Action>, task_tracker: TaskTracker) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        let (history, connections, providers) = tokio::join!(
            client.list_history(),
            client.list_connections(),
            client.list_providers_with_categories(),
        );
        let result = match (history, connections, providers) {
            (Ok(history), Ok(connections), Ok(providers)) => Ok(DashboardData {
                history,
                connections,
                providers,
            }),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => Err(Arc::new(e)),
        };
        let _ = tx.send(Action::DashboardLoaded(Box::new(result))).await;
    });
}

pub async fn handle_load_providers(client: SharedClient, tx: Sender<Action>, task_tracker: TaskTracker) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        match client.list_providers_with_categories().await {
            Ok(providers) => {
                let _ = tx.send(Action::ProvidersLoaded(Ok(providers))).await;
            }
            Err(e) => {
                let _ = tx.send(Action::ProvidersLoaded(Err(Arc::new(e)))).await;
            }
        }
    });
}

pub async fn handle_load_history(client: SharedClient, tx: Sender<Action>, task_tracker: TaskTracker) {
    let _ = tx.send(Action::Loading(true)).await;
    task_tracker.spawn(async move {
        match client.list_history().await {
            Ok(history) => {
                let _ = tx.send(Action::HistoryLoaded(Ok(history))).await;
            }
            Err(e) => {
                let _ = tx.send(Action::HistoryLoaded(Err(Arc::new(e)))).await;
            }
        }
    });
}
