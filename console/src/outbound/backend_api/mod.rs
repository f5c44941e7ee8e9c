//! Reqwest adapter for the band backend REST API.
//!
//! One client implements the users, instruments and roles ports. It owns
//! transport details only: URL and query building, the bearer and
//! `If-Match` headers, status mapping and JSON decoding.

mod client;
mod dto;
mod instruments;
mod roles;
mod users;

pub use client::BackendApiClient;
