//! Authentication: tokens, claims, PKCE helpers and the per-browser session.

mod claims;
mod pkce;
mod session;
mod token;

pub use claims::{Claims, RealmAccess};
pub use pkce::{code_challenge, generate_state, generate_verifier};
pub use session::{AuthSession, AuthStatus, RefreshOutcome, RefreshPolicy, SharedClock};
pub use token::{BearerToken, TokenSet};
