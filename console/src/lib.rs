//! Band administration console.
//!
//! A server-rendered console for managing musicians, instruments, events and
//! surveys against the band backend REST API. Identity is delegated to a
//! Keycloak realm through the OpenID Connect authorization-code flow.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
