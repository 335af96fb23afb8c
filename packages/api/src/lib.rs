//! # API crate — HTTP surface of the fruits inventory
//!
//! Everything the `web` binary serves is assembled here. The binary only adds
//! process concerns on top: configuration, logging, the database pool and the
//! session layer.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Argon2id password hashing, the two session fields that mark a login, [`auth::CurrentUser`] |
//! | [`config`] | [`config::Settings`] layered from defaults, `config.toml` and the environment |
//! | [`db`] | PostgreSQL implementations of the `store` traits, pool setup and migrations |
//! | [`error`] | [`error::AppError`] and its single mapping to a JSON error response |
//! | [`fruits`] | The fruit resource routes under `/fruits` |
//! | [`gate`] | Middleware that redirects requests without a logged-in session to the login page |
//! | [`method_override`] | Middleware turning `POST ...?_method=PUT` into `PUT` before routing |
//! | [`state`] | [`state::AppState`], the store and view handles shared by every handler |
//! | [`users`] | Sign-up, login and logout under `/users` |
//! | [`views`] | Embedded minijinja templates |
//!
//! ## Request path
//!
//! method override → session layer → router → authorization gate (fruit routes
//! only) → handler → store → view or redirect.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod fruits;
pub mod gate;
pub mod method_override;
pub mod state;
pub mod users;
pub mod views;

mod app;

pub use app::{routes, with_method_override};
pub use error::AppError;
pub use state::AppState;
