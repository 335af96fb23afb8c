//! User accounts, mounted under `/users`: sign-up, login and logout.
//!
//! Failures a person can fix (bad input, taken username, wrong password) send the
//! browser back to the form with an `error` query parameter the template turns
//! into a message. Unknown usernames and wrong passwords share one message.
//!
//! Argon2 hashing and verifying run on tokio's blocking pool.

use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use minijinja::context;
use serde::Deserialize;
use store::StoreError;
use tokio::task;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::auth::{hash_password, sign_in, verify_password};
use crate::error::AppError;
use crate::fruits::FRUITS_PATH;
use crate::state::AppState;

/// Login entry point; the authorization gate redirects here.
pub const LOGIN_PATH: &str = "/users/login";

pub const MIN_PASSWORD_LEN: usize = 8;

const SIGNUP_INVALID: &str = "/users/signup?error=invalid_input";
const SIGNUP_TAKEN: &str = "/users/signup?error=username_taken";
const LOGIN_INVALID: &str = "/users/login?error=invalid_credentials";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormError {
    pub error: Option<String>,
}

async fn hash_off_thread(password: String) -> Result<String, AppError> {
    Ok(task::spawn_blocking(move || hash_password(&password)).await??)
}

async fn verify_off_thread(password: String, hash: String) -> Result<bool, AppError> {
    Ok(task::spawn_blocking(move || verify_password(&password, &hash)).await??)
}

pub async fn signup_form(
    State(state): State<AppState>,
    Query(params): Query<FormError>,
) -> Result<Html<String>, AppError> {
    state
        .views
        .render("users/signup.html", context! { error => params.error })
}

pub async fn signup(
    State(state): State<AppState>,
    form: Result<Form<Credentials>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(credentials) = form?;
    let username = credentials.username.trim();
    if username.is_empty() || credentials.password.len() < MIN_PASSWORD_LEN {
        return Ok(Redirect::to(SIGNUP_INVALID));
    }

    let password_hash = hash_off_thread(credentials.password).await?;

    match state.users.create_user(username, &password_hash).await {
        Ok(user) => {
            info!(username = %user.username, "User signed up");
            Ok(Redirect::to(LOGIN_PATH))
        }
        Err(StoreError::Conflict(username)) => {
            warn!(%username, "Sign-up with a taken username");
            Ok(Redirect::to(SIGNUP_TAKEN))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_form(
    State(state): State<AppState>,
    Query(params): Query<FormError>,
) -> Result<Html<String>, AppError> {
    state
        .views
        .render("users/login.html", context! { error => params.error })
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<Credentials>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(credentials) = form?;
    let username = credentials.username.trim();

    let Some(user) = state.users.find_by_username(username).await? else {
        warn!(%username, "Login for unknown user");
        return Ok(Redirect::to(LOGIN_INVALID));
    };

    if !verify_off_thread(credentials.password, user.password_hash.clone()).await? {
        warn!(%username, "Login with wrong password");
        return Ok(Redirect::to(LOGIN_INVALID));
    }

    sign_in(&session, &user.username).await?;

    info!(username = %user.username, "User logged in");
    Ok(Redirect::to(FRUITS_PATH))
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    Ok(Redirect::to("/"))
}
