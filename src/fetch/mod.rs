//! Transport layer: the [`HttpClient`] seam and its implementations.

mod basic;
mod client;
pub mod auth;

pub use basic::{BasicClient, HTTP_TIMEOUT};
pub use client::HttpClient;
