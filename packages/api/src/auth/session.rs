//! Session fields written on login and read by the authorization gate.

use tower_sessions::{session, Session};

/// Key for the login flag.
pub const SESSION_LOGGED_IN_KEY: &str = "loggedIn";
/// Key for the username of the logged-in user.
pub const SESSION_USERNAME_KEY: &str = "username";

/// Identity of the logged-in user, attached to each request by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}

/// Read the authenticated identity from the session.
///
/// Returns `None` unless the login flag is set and a username is present.
pub async fn current_user(session: &Session) -> Result<Option<CurrentUser>, session::Error> {
    let logged_in: Option<bool> = session.get(SESSION_LOGGED_IN_KEY).await?;
    if logged_in != Some(true) {
        return Ok(None);
    }

    let username: Option<String> = session.get(SESSION_USERNAME_KEY).await?;
    Ok(username.map(|username| CurrentUser { username }))
}

/// Mark the session as logged in for `username`, rotating the session id first.
pub async fn sign_in(session: &Session, username: &str) -> Result<(), session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_LOGGED_IN_KEY, true).await?;
    session.insert(SESSION_USERNAME_KEY, username).await?;
    Ok(())
}
