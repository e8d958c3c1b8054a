//! HTTP transport boundary
//!
//! The core consumes exactly one capability from the network:
//! `fetch(url, basic_auth) -> RawResponse`. Connection setup, TLS and auth
//! header construction live behind [`HttpClient`]; no retry and no rate
//! limiting — a failed call surfaces once, as an error result.

mod client;

pub use client::{BasicAuth, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RawResponse};

#[cfg(test)]
mod tests;
