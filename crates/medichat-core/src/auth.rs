//! Credential seam for the external token issuer.
//!
//! Tokens are issued and refreshed by an external auth collaborator; this
//! crate only ever reads the current value and attaches it to requests.

/// Supplies the current bearer credential, if any.
///
/// Returning `None` means the user is logged out; remote calls will fail
/// with `Unauthorized` and the shell redirects to the login screen.
pub trait CredentialProvider: Send + Sync {
    /// Returns the current bearer token, if one is available.
    fn bearer_token(&self) -> Option<String>;
}

/// Credential provider backed by the `MEDICHAT_TOKEN` environment variable.
///
/// Used by the CLI; interactive shells substitute their own provider.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    pub const TOKEN_VAR: &'static str = "MEDICHAT_TOKEN";

    pub fn new() -> Self {
        Self
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(Self::TOKEN_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}
