use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use super::Claims;
use crate::{config::AuthConfig, error::AppError};

pub const INVALID_TOKEN: &str = "Invalid token";

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

pub fn now_unix() -> usize {
    chrono::Utc::now().timestamp().max(0) as usize
}

/// Issues and verifies HS256 bearer tokens whose only subject is a user id.
#[derive(Clone)]
pub struct TokenService {
    keys: JwtKeys,
    ttl_secs: usize,
}

impl TokenService {
    pub fn new(keys: JwtKeys, ttl_secs: u64) -> Self {
        Self {
            keys,
            ttl_secs: ttl_secs as usize,
        }
    }

    pub fn from_config(cfg: &AuthConfig) -> Self {
        Self::new(
            JwtKeys::from_secret(cfg.jwt_secret.as_bytes()),
            cfg.token_ttl_secs,
        )
    }

    pub fn issue(&self, user_id: &Uuid) -> Result<String, AppError> {
        let iat = now_unix();
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp: iat + self.ttl_secs,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".into());
        encode(&header, &claims, &self.keys.enc).map_err(|err| {
            tracing::error!(error = %err, "token signing failed");
            AppError::unauthorized("Could not issue token")
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.keys.dec, &validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "token rejected");
                AppError::unauthorized(INVALID_TOKEN)
            })
    }

    /// Verified subject as a user id.
    pub fn verify_subject(&self, token: &str) -> Result<Uuid, AppError> {
        let claims = self.verify(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| AppError::unauthorized(INVALID_TOKEN))
    }
}
