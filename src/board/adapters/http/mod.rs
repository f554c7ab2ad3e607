//! HTTP adapter for the remote task store.

mod client;
mod config;
pub(crate) mod wire;

#[cfg(test)]
pub(crate) use client::auth_headers;
pub use client::HttpTaskStore;
pub use config::{
    API_TOKEN_ENV, API_URL_ENV, HttpStoreConfig, HttpStoreConfigError, REQUEST_TIMEOUT_ENV,
};
