//! Consuming side of the external auth service: token verification only.
//! Registration, login and token issuance live elsewhere.

mod claims;
pub(crate) mod extractors;

pub use extractors::AuthUser;
