//! Driven ports consumed by the console services.

mod macros;
pub(crate) use macros::define_port_error;

mod api_error;
mod identity_provider;
mod instruments_api;
mod roles_api;
mod users_api;

pub use api_error::{ApiError, PRECONDITION_STATUSES};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityError, IdentityProvider, TokenGrant};
#[cfg(test)]
pub use instruments_api::MockInstrumentsApi;
pub use instruments_api::{InstrumentSearch, InstrumentsApi};
#[cfg(test)]
pub use roles_api::MockRolesApi;
pub use roles_api::RolesApi;
#[cfg(test)]
pub use users_api::MockUsersApi;
pub use users_api::{UserSearch, UsersApi};
