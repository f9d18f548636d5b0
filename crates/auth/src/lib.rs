//! `lavka-auth` — authentication boundary types.
//!
//! Token *issuance* belongs to the external auth service; this crate only
//! models the claims Lavka expects once a token has been decoded, plus the
//! request-scoped owner identity derived from them. It is intentionally
//! decoupled from HTTP and storage, and holds no ambient session state.

pub mod claims;
pub mod identity;

pub use claims::{OwnerClaims, TokenValidationError, validate_claims};
pub use identity::OwnerIdentity;
