//! # Fruit routes — mounted under `/fruits`
//!
//! | Route | Handler | Result |
//! |-------|---------|--------|
//! | `GET /seed` | [`seed`] | Purges every fruit, stores the five starter fruits, returns them as JSON. |
//! | `GET /` | [`index`] | The logged-in user's fruits. |
//! | `GET /new` | [`new`] | Empty creation form. |
//! | `POST /` | [`create`] | Stores a fruit owned by the logged-in user, redirects to the list. |
//! | `GET /{id}/edit` | [`edit`] | Edit form for one fruit. |
//! | `PUT /{id}` | [`update`] | Replaces the submitted fields, redirects to the list. |
//! | `DELETE /{id}` | [`destroy`] | Removes one fruit, redirects to the list. |
//! | `GET /{id}` | [`show`] | Detail view of one fruit. |
//!
//! Every route sits behind [`require_login`]. Only the list is filtered by owner;
//! the id routes act on any fruit whose id the caller supplies.
//!
//! The `readyToEat` form field follows HTML checkbox semantics: it is sent as `on`
//! when ticked and left out when not. [`checkbox_checked`] maps exactly `"on"` to
//! `true` and anything else, including absence, to `false`.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Extension, Form, Json, Router,
};
use minijinja::context;
use serde::Deserialize;
use serde_json::json;
use store::{Fruit, FruitFilter, FruitId, FruitPatch, NewFruit};
use tracing::{debug, info};

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::gate::require_login;
use crate::state::AppState;

/// Where every successful mutation sends the browser.
pub const FRUITS_PATH: &str = "/fruits";

/// Value a ticked HTML checkbox submits.
pub const CHECKBOX_ON: &str = "on";

const STARTER_FRUITS: [(&str, &str); 5] = [
    ("Orange", "orange"),
    ("Grape", "purple"),
    ("Banana", "orange"),
    ("Strawberry", "red"),
    ("Coconut", "brown"),
];

pub fn routes() -> Router<AppState> {
    // Static segments win over `{id}` in axum's matcher, so /seed and /new stay reachable.
    Router::new()
        .route("/seed", get(seed))
        .route("/", get(index).post(create))
        .route("/new", get(new))
        .route("/{id}/edit", get(edit))
        .route("/{id}", get(show).put(update).delete(destroy))
        .fallback(unknown_route)
        .layer(middleware::from_fn(require_login))
}

/// Fields submitted by the new and edit forms. Anything else in the body
/// (`owner`, `id`, ...) is dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct FruitForm {
    pub name: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "readyToEat")]
    pub ready_to_eat: Option<String>,
}

impl FruitForm {
    fn is_ready(&self) -> bool {
        checkbox_checked(self.ready_to_eat.as_deref())
    }

    /// Build the record to store. The owner always comes from the session.
    pub fn into_new_fruit(self, owner: &str) -> Result<NewFruit, AppError> {
        let ready = self.is_ready();
        let name = self.name.ok_or_else(name_required)?;
        let name = non_blank(name)?;

        Ok(NewFruit::new(name, self.color.unwrap_or_default(), owner).ready_to_eat(ready))
    }

    /// Build the update. `readyToEat` is always set since an unticked box is absent.
    /// A missing `name` keeps the stored one; a blank one is rejected as on create.
    pub fn into_patch(self) -> Result<FruitPatch, AppError> {
        let ready = self.is_ready();
        Ok(FruitPatch {
            name: self.name.map(non_blank).transpose()?,
            color: self.color,
            ready_to_eat: Some(ready),
        })
    }
}

fn name_required() -> AppError {
    AppError::Validation("name is required".to_string())
}

fn non_blank(name: String) -> Result<String, AppError> {
    if name.trim().is_empty() {
        return Err(name_required());
    }
    Ok(name)
}

pub fn checkbox_checked(raw: Option<&str>) -> bool {
    raw == Some(CHECKBOX_ON)
}

/// The fixed seed data, owned by `owner`.
pub fn starter_fruits(owner: &str) -> Vec<NewFruit> {
    STARTER_FRUITS
        .iter()
        .map(|(name, color)| NewFruit::new(*name, *color, owner))
        .collect()
}

fn parse_id(raw: &str) -> Result<FruitId, AppError> {
    raw.parse()
        .map_err(|_| AppError::UnknownId(raw.to_string()))
}

pub async fn seed(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Fruit>>, AppError> {
    let purged = state.fruits.delete_many(&FruitFilter::All).await?;
    let created = state.fruits.create(starter_fruits(&user.username)).await?;

    info!(purged, created = created.len(), by = %user.username, "Reseeded fruits");
    Ok(Json(created))
}

pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    let fruits = state
        .fruits
        .find(&FruitFilter::owned_by(&user.username))
        .await?;

    debug!(count = fruits.len(), owner = %user.username, "Listing fruits");
    state.views.render("fruits/index.html", context! { fruits => fruits })
}

pub async fn new(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.views.render("fruits/new.html", context! {})
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    form: Result<Form<FruitForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;
    let fruit = form.into_new_fruit(&user.username)?;
    let created = state.fruits.create(vec![fruit]).await?;

    if let Some(fruit) = created.first() {
        info!(id = %fruit.id, owner = %fruit.owner, "Created fruit");
    }
    Ok(Redirect::to(FRUITS_PATH))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let fruit = state.fruits.find_by_id(parse_id(&id)?).await?;
    state.views.render("fruits/edit.html", context! { fruit => fruit })
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<FruitForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;
    let id = parse_id(&id)?;
    let fruit = state.fruits.update_by_id(id, form.into_patch()?).await?;

    info!(id = %fruit.id, "Updated fruit");
    Ok(Redirect::to(FRUITS_PATH))
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let fruit = state.fruits.delete_by_id(parse_id(&id)?).await?;

    info!(id = %fruit.id, "Deleted fruit");
    Ok(Redirect::to(FRUITS_PATH))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let fruit = state.fruits.find_by_id(parse_id(&id)?).await?;
    state.views.render("fruits/show.html", context! { fruit => fruit })
}

async fn unknown_route() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
