//! Route table of the task API.

use axum::{
    Router,
    routing::{MethodRouter, delete, get, patch, post, put},
};
use mockable::Clock;
use tower_http::trace::TraceLayer;

use super::{
    error::ApiErrorResponse,
    handlers::{AppState, create_task, delete_task, fetch_task, list_tasks, toggle_task, update_task},
    operation::Operation,
};
use crate::task::ports::TaskRepository;

/// Builds the router with every task route bound to exactly one verb.
///
/// Other verbs on a bound path get a 405 naming the accepted verb; unbound
/// paths get a JSON 404.
pub fn create_router<R, C>(state: AppState<R, C>) -> Router
where
    R: TaskRepository + ?Sized + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/task", only(Operation::List, get(list_tasks::<R, C>)))
        .route("/task/", only(Operation::List, get(list_tasks::<R, C>)))
        .route("/task/store", only(Operation::Create, post(create_task::<R, C>)))
        .route(
            "/task/edit/{id}",
            only(Operation::FetchOne, get(fetch_task::<R, C>)),
        )
        .route(
            "/task/update/{id}",
            only(Operation::Update, put(update_task::<R, C>)),
        )
        .route(
            "/task/delete/{id}",
            only(Operation::Delete, delete(delete_task::<R, C>)),
        )
        .route(
            "/task/status/{id}",
            only(Operation::ToggleChecked, patch(toggle_task::<R, C>)),
        )
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn only<S>(operation: Operation, route: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.fallback(move || async move { ApiErrorResponse::method_not_allowed(operation) })
}

async fn route_not_found() -> ApiErrorResponse {
    ApiErrorResponse::route_not_found()
}
