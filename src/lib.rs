/// African Hub Marketplace admin console library
/// Typed REST client, domain records and console helpers for the admin API

pub mod api;
pub mod cache;
pub mod chat;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod storage;

pub use api::AdminApi;
pub use config::ClientConfig;
pub use error::{AdminError, Result};
pub use storage::TokenStore;
