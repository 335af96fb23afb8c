//! Authentication: password hashing and the session fields that mark a login.

mod password;
mod session;

pub use password::{hash_password, verify_password, PasswordError};
pub use session::{
    current_user, sign_in, CurrentUser, SESSION_LOGGED_IN_KEY, SESSION_USERNAME_KEY,
};
