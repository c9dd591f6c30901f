//! Session-aware API pipeline and the endpoint action layer on top.
//!
//! The pipeline attaches the current bearer token to every call, times
//! it, and classifies the outcome: answered-with-rejection envelopes
//! resolve, transport and HTTP-level failures reject. The action modules
//! translate one backend capability each into a typed call plus
//! domain-level success/error handling.

mod auth;
mod chat;
mod client;
mod interests;
mod matches;
mod photos;
mod profile;
mod search;

pub use auth::AuthApi;
pub use chat::{ChatApi, MessageKind};
pub use client::{ApiClient, ApiClientConfig, MultipartForm, RequestOptions};
pub use interests::InterestsApi;
pub use matches::MatchesApi;
pub use photos::PhotosApi;
pub use profile::{MyProfileData, ProfileApi};
pub use search::SearchApi;
