// ABOUTME: HTTP implementation of the session API for the Parley chat backend
// ABOUTME: Keeps the session cookie in a per-client jar and maps replies onto core types

pub mod client;
pub mod routes;

pub use client::ApiClient;
