//! Background task spawning and completion-event processing.
//!
//! Every network call runs in a spawned task holding its own `ApiClient`
//! clone and reports back through the `AppEvent` channel. State mutation
//! happens here, on the UI task, when the event arrives.

use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::app::{App, AppEvent};

/// Apply a background task's completion event to the app state.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::SourcesLoaded(result) => {
            app.on_sources_loaded(result);
            // First feed load runs once the selector state is known. When the
            // source list failed the selection is empty and the server
            // defaults to all sources, so there is still a feed to show.
            spawn_load(app, tx, false);
        }
        AppEvent::PageLoaded {
            generation,
            append,
            result,
        } => {
            app.on_page_loaded(generation, append, result);
        }
        AppEvent::RefreshFinished(result) => {
            app.on_refresh_finished(result);
            // Unconditional follow-up reload from offset 0, success or not.
            spawn_load(app, tx, false);
        }
    }
}

/// Fetch the source list at startup.
pub(super) fn spawn_sources_load(api: ApiClient, tx: &mpsc::Sender<AppEvent>) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.list_sources().await.map_err(|e| e.to_string());
        if tx.send(AppEvent::SourcesLoaded(result)).await.is_err() {
            tracing::warn!("Event channel closed before source list arrived");
        }
    });
}

/// Start a feed load unless one is already pending (then this is a no-op,
/// per the reentrancy guard — the caller re-triggers after completion).
pub(super) fn spawn_load(app: &mut App, tx: &mpsc::Sender<AppEvent>, append: bool) {
    let Some((query, generation)) = app.begin_load(append) else {
        return;
    };

    let api = app.api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.fetch_articles(&query).await.map_err(|e| e.to_string());
        let event = AppEvent::PageLoaded {
            generation,
            append,
            result,
        };
        if tx.send(event).await.is_err() {
            tracing::warn!("Event channel closed before feed page arrived");
        }
    });
}

/// Start a server-side refresh unless something is already in flight.
pub(super) fn spawn_refresh(app: &mut App, tx: &mpsc::Sender<AppEvent>) {
    let Some((sources, limit_per_source)) = app.begin_refresh() else {
        return;
    };

    let api = app.api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api
            .trigger_refresh(&sources, limit_per_source)
            .await
            .map_err(|e| e.to_string());
        if tx.send(AppEvent::RefreshFinished(result)).await.is_err() {
            tracing::warn!("Event channel closed before refresh finished");
        }
    });
}
