//! Business logic layer for the URL shortener.
//!
//! Contains registration and login, short link management, redirect
//! resolution, and the code generator they share.

mod helpers;
mod auth;
mod urls;
mod visits;

pub use helpers::hash_password;
#[cfg(test)]
pub use helpers::verify_password;
pub use auth::*;
pub use urls::*;
pub use visits::*;
