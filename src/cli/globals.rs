use secrecy::SecretString;

/// Process-wide signing configuration, read once at startup and immutable
/// for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub secret: SecretString,
    pub issuer: String,
    pub token_lifetime_ms: u64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(secret: SecretString, issuer: String, token_lifetime_ms: u64) -> Self {
        Self {
            secret,
            issuer,
            token_lifetime_ms,
        }
    }
}
