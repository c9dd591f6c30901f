//! Wire and client-side data types

pub mod auth;
pub mod envelope;
pub mod permission;
pub mod profile;
pub mod search;
