use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::JsonWebToken;
use super::claims::TokenIdentity;
use super::claims::TokenPayload;
use super::errors::JwtError;
use crate::clock::Clock;
use crate::primitives::Role;

const MIN_SECRET_BYTES: usize = 32;

/// Signing configuration, loaded once at process start and read-only
/// afterwards.
#[derive(Clone)]
pub struct JwtSettings {
    /// HMAC signing key; at least 32 bytes
    pub secret: String,
    /// Expected `sub` claim
    pub subject: String,
    /// Expected `aud` claim
    pub audience: String,
    /// Token lifetime in seconds
    pub lifetime_seconds: i64,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("subject", &self.subject)
            .field("audience", &self.audience)
            .field("lifetime_seconds", &self.lifetime_seconds)
            .finish()
    }
}

/// Token issuer and validator.
///
/// Issues HS512-signed tokens carrying `sub`, `aud`, `iat`, `exp`,
/// `nickname` and `scope`, and validates incoming tokens against the same
/// configuration. Expiry is checked against the injected clock with zero
/// leeway, so `exp <= now` always fails and `exp = now + 1s` always passes.
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    subject: String,
    audience: String,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtManager {
    /// Create a manager from signing configuration.
    ///
    /// # Errors
    /// * `KeyTooShort` - Secret is shorter than 32 bytes; refusing to start
    ///   beats signing with a guessable key
    pub fn new(settings: JwtSettings, clock: Arc<dyn Clock>) -> Result<Self, JwtError> {
        let secret = settings.secret.as_bytes();
        if secret.len() < MIN_SECRET_BYTES {
            return Err(JwtError::KeyTooShort {
                min: MIN_SECRET_BYTES,
                actual: secret.len(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS512);
        validation.set_audience(&[settings.audience.clone()]);
        validation.sub = Some(settings.subject.clone());
        validation.set_required_spec_claims(&["exp", "aud", "sub"]);
        // Expiry is checked against the injected clock, not the library's
        // wall-clock read
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            subject: settings.subject,
            audience: settings.audience,
            lifetime: Duration::seconds(settings.lifetime_seconds),
            clock,
        })
    }

    /// Issue a signed token for an authenticated identity.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, identity: &TokenIdentity) -> Result<JsonWebToken, JwtError> {
        let now = self.clock.now();
        let claims = Claims {
            sub: self.subject.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
            nickname: identity.user_name.clone(),
            scope: identity.role.as_scope().to_string(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map(JsonWebToken::new)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and decode its identity.
    ///
    /// Accepts either a raw compact token or a `Bearer <token>` header
    /// value; stripping the scheme is the codec's job, not the caller's.
    ///
    /// # Errors
    /// * `Malformed` - Not three segments, undecodable, or missing claims
    /// * `InvalidSignature` - Signature does not verify
    /// * `AudienceOrSubjectMismatch` - `sub`/`aud` differ from configuration
    /// * `Expired` - `exp` is at or before the current instant
    pub fn validate(&self, token: &str) -> Result<TokenPayload, JwtError> {
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();

        if token.split('.').count() != 3 {
            return Err(JwtError::Malformed(
                "expected three dot-separated segments".to_string(),
            ));
        }

        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::InvalidAudience | ErrorKind::InvalidSubject => {
                        JwtError::AudienceOrSubjectMismatch
                    }
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;
        let claims = data.claims;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(JwtError::Expired);
        }

        let role = Role::from_scope(&claims.scope)
            .map_err(|e| JwtError::Malformed(e.to_string()))?;

        Ok(TokenPayload {
            user_name: claims.nickname,
            role,
            expires_at: claims.exp,
        })
    }
}
