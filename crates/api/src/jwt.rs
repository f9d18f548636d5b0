//! Bearer token decoding (HS256).
//!
//! The external auth service issues the tokens; this module only verifies
//! and maps them onto [`OwnerClaims`]. The decoder sits behind a trait so
//! tests and future asymmetric setups can swap it.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use lavka_auth::OwnerClaims;
use lavka_core::{ShopId, UserId};

/// JWT payload as it appears on the wire (numeric timestamps).
#[derive(Debug, Serialize, Deserialize)]
pub struct WireClaims {
    pub sub: Uuid,
    pub shop_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("token carries an out-of-range timestamp")]
    BadTimestamp,
}

pub trait TokenDecoder: Send + Sync {
    fn decode(&self, token: &str) -> Result<OwnerClaims, TokenDecodeError>;
}

/// HS256 shared-secret decoder.
pub struct HsTokenDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl HsTokenDecoder {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenDecoder for HsTokenDecoder {
    fn decode(&self, token: &str) -> Result<OwnerClaims, TokenDecodeError> {
        let data = jsonwebtoken::decode::<WireClaims>(token, &self.key, &self.validation)?;
        let wire = data.claims;

        let to_datetime = |secs: i64| -> Result<DateTime<Utc>, TokenDecodeError> {
            DateTime::<Utc>::from_timestamp(secs, 0).ok_or(TokenDecodeError::BadTimestamp)
        };

        Ok(OwnerClaims {
            sub: UserId::from_uuid(wire.sub),
            shop_id: ShopId::from_uuid(wire.shop_id),
            issued_at: to_datetime(wire.iat)?,
            expires_at: to_datetime(wire.exp)?,
        })
    }
}
