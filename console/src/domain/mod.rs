//! Domain layer: entities, list-page state, authentication, guard decisions
//! and the ports the services drive.
//!
//! Nothing in here speaks HTTP. Inbound adapters translate requests into
//! calls on the services; outbound adapters implement the ports.

pub mod auth;
pub mod error;
pub mod format;
pub mod guard;
mod instrument;
mod instruments_console;
pub mod listing;
pub mod navigation;
pub mod ports;
pub mod role;
pub mod table;
pub mod trace_id;
pub(crate) mod user;
mod users_console;
mod version;

pub use error::{Error, ErrorCode};
pub use instrument::{Instrument, InstrumentDraft, InstrumentDraftError, InstrumentId};
pub use instruments_console::InstrumentsConsole;
pub use role::Role;
pub use trace_id::TraceId;
pub use user::{User, UserDraft, UserDraftError, UserId, UserUpdate};
pub use users_console::UsersConsole;
pub use version::Version;
