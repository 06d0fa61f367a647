use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Claim set carried by every session token.
///
/// `roles` is the current array-valued shape; `role` is the singular claim
/// written by an older token format and only read back for compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl Claims {
    /// Role projection with the legacy fallback: a non-empty `roles` array
    /// wins, otherwise a singular `role` claim becomes a one-element list,
    /// otherwise the list is empty.
    #[must_use]
    pub fn role_names(self) -> Vec<String> {
        match self.roles {
            Some(roles) if !roles.is_empty() => roles,
            _ => self.role.map(|role| vec![role]).unwrap_or_default(),
        }
    }
}

/// Issues and verifies HS256 session tokens.
///
/// Built once at startup from the process-wide signing configuration and
/// never mutated afterwards; concurrent issue/verify calls need no
/// coordination.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    lifetime_ms: i64,
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: &SecretString, issuer: &str, lifetime_ms: u64) -> Self {
        let secret = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        // Expiry is checked exactly once, in verify(), so the library check
        // (and its default leeway) stays off.
        validation.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: issuer.to_string(),
            lifetime_ms: i64::try_from(lifetime_ms).unwrap_or(i64::MAX),
        }
    }

    /// Issue a signed token for `subject` carrying `roles`.
    ///
    /// # Errors
    /// Returns an error if the subject is empty or signing fails.
    pub fn issue(&self, subject: &str, roles: &[String]) -> Result<String, Error> {
        self.issue_at(subject, roles, Utc::now())
    }

    fn issue_at(
        &self,
        subject: &str,
        roles: &[String],
        now: DateTime<Utc>,
    ) -> Result<String, Error> {
        if subject.is_empty() {
            return Err(Error::Internal(
                "Refusing to issue a token without a subject".to_string(),
            ));
        }

        let expires_at = now + Duration::milliseconds(self.lifetime_ms);

        let claims = Claims {
            sub: subject.to_string(),
            roles: Some(roles.to_vec()),
            role: None,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|err| Error::Internal(format!("Failed to sign token: {err}")))
    }

    /// Verify signature, issuer and structure, then expiry.
    ///
    /// # Errors
    /// `TokenInvalid` for a bad signature, wrong issuer or malformed input;
    /// `TokenExpired` once the current time reaches the `exp` claim.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| Error::TokenInvalid(err.to_string()))?;

        if Utc::now().timestamp() >= data.claims.exp {
            return Err(Error::TokenExpired);
        }

        Ok(data.claims)
    }

    /// # Errors
    /// Propagates the failures of [`TokenCodec::verify`].
    pub fn extract_username(&self, token: &str) -> Result<String, Error> {
        Ok(self.verify(token)?.sub)
    }

    /// # Errors
    /// Propagates the failures of [`TokenCodec::verify`].
    pub fn extract_roles(&self, token: &str) -> Result<Vec<String>, Error> {
        Ok(self.verify(token)?.role_names())
    }

    /// Boolean gate for request authentication paths.
    ///
    /// Intentionally erases the failure taxonomy: signature mismatch, wrong
    /// issuer, malformed input, expiry and subject mismatch all come back as
    /// `false` instead of surfacing an error kind.
    #[must_use]
    pub fn validate(&self, token: &str, expected_username: &str) -> bool {
        match self.verify(token) {
            Ok(claims) => claims.sub == expected_username,
            Err(_) => false,
        }
    }
}
