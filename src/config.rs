use secrecy::{ExposeSecret, SecretString};
use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Process-wide configuration of the relay, loaded once at startup.
pub struct RelayConfig {
    pub port: u16,
    /// Base URL of the GitHub REST API that requests are forwarded to.
    pub github_api_url: Url,
    pub credentials: GithubCredentials,
}

/// Account whose data is relayed and the static token used to access it.
/// Both parts are optional, so that the relay can start without them and
/// report the problem only on endpoints that need them.
#[derive(Clone, Default)]
pub struct GithubCredentials {
    username: Option<String>,
    token: Option<SecretString>,
}

impl GithubCredentials {
    pub fn new(username: Option<String>, token: Option<String>) -> Self {
        // Empty environment variables are treated as unset.
        Self {
            username: username.filter(|name| !name.is_empty()),
            token: token.filter(|token| !token.is_empty()).map(SecretString::new),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.expose_secret().as_str())
    }

    /// Returns the username and token if both of them are configured.
    pub fn complete(&self) -> Option<(&str, &str)> {
        Some((self.username()?, self.token()?))
    }
}

impl std::fmt::Debug for GithubCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubCredentials")
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
