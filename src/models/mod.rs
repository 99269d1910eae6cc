//! Data models for the label client.
//!
//! Wire types use the backend's snake_case names; domain types use the camelCase
//! names the views bind to.

mod auth;
mod label;
mod list;

pub use auth::*;
pub use label::*;
pub use list::*;
