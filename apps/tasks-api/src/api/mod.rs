use axum::Router;

pub mod health;
pub mod tasks;

/// API routes without the `/api` prefix; the prefix is added by
/// `create_router`. Sub-routers carry their own state, so the result is a
/// stateless Router.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/tasks", tasks::router(state))
}

/// Router with the `/ready` endpoint performing a live database check.
///
/// Kept separate from the stateless app router because it needs AppState.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
