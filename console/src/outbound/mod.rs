//! Outbound adapters implementing the domain ports over HTTP.

pub mod backend_api;
pub mod identity;
