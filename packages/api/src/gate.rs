//! Authorization gate for the fruit routes.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::debug;

use crate::auth::current_user;
use crate::error::AppError;
use crate::users::LOGIN_PATH;

/// Let the request through only when the session is logged in, attaching the
/// [`CurrentUser`](crate::auth::CurrentUser) for the handlers. Anyone else is
/// redirected to the login page and the handler never runs.
pub async fn require_login(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user) = current_user(&session).await? else {
        debug!(path = %request.uri().path(), "No active session, redirecting to login");
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
