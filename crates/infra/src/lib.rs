//! # Rishta Infra
//!
//! Adapters behind the core's ports:
//! - reqwest HTTP transport and the session-aware request pipeline
//! - endpoint action layer (auth, profile, photos, interests, matches,
//!   chat, search)
//! - credential store backends (keyring, in-memory)
//! - environment-driven client configuration

pub mod api;
pub mod config;
pub mod http;
pub mod storage;

pub use api::{
    ApiClient, ApiClientConfig, AuthApi, ChatApi, InterestsApi, MatchesApi, PhotosApi,
    ProfileApi, RequestOptions, SearchApi,
};
pub use config::ClientConfig;
pub use http::HttpClient;
pub use storage::{KeyringCredentialStore, MemoryCredentialStore};
