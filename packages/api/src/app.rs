use axum::{
    middleware,
    response::Redirect,
    routing::{any, get},
    Router,
};

use crate::fruits::{self, FRUITS_PATH};
use crate::gate::require_login;
use crate::method_override::method_override;
use crate::state::AppState;
use crate::users;

/// All application routes. The caller adds the session layer on top.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(FRUITS_PATH) }))
        .nest("/users", users::routes())
        .nest("/fruits", fruits::routes())
        // The nest matches neither this path nor its fallback.
        .route(
            "/fruits/",
            any(|| async { Redirect::to(FRUITS_PATH) })
                .layer(middleware::from_fn(require_login)),
        )
        .with_state(state)
}

/// Wrap `router` so [`method_override`] runs before any route is matched.
/// Middleware added with `Router::layer` runs after routing, which is too late
/// to change the method, hence the outer router with only a fallback.
pub fn with_method_override(router: Router) -> Router {
    Router::new()
        .fallback_service(router)
        .layer(middleware::from_fn(method_override))
}
