//! Label client
//!
//! Data-access and view-state layer for the annotation label API: an HTTP
//! client that carries the session token, repositories that map wire objects
//! to domain objects, and a view-state container for label lists.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod labels;
pub mod models;
pub mod view;

pub use api::ApiClient;
pub use auth::AuthRepository;
pub use config::Config;
pub use db::{MemoryTokenStore, SqliteTokenStore, TokenStore};
pub use errors::{ClientError, Result};
pub use labels::{LabelRepository, LabelType};
pub use models::{Label, LabelListOptions};
pub use view::{LabelList, LabelListState, PopularSource};
