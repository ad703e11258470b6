//! Configuration for the ArangoDB client

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::time::Duration;

/// Default server URL.
pub const DEFAULT_URL: &str = "http://localhost:8529";

/// Default database name.
pub const DEFAULT_DATABASE: &str = "_system";

/// Default ceiling on concurrent outbound connections to the server.
pub const DEFAULT_CONNECTION_LIMIT: usize = 256;

/// Username and password used for Basic authentication.
///
/// The password is wrapped in a [`SecretString`] so it never shows up in
/// `Debug` output.
#[derive(Clone)]
pub struct Credential {
    username: String,
    password: SecretString,
}

impl Credential {
    /// Create a new credential.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for the ArangoDB client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server URL, e.g. `http://localhost:8529`
    pub url: Option<String>,

    /// Database that commands are scoped to
    pub database: Option<String>,

    /// Credential sent with every request
    pub credential: Option<Credential>,

    /// HTTP proxy URL. No proxy is used unless this is set.
    pub proxy: Option<String>,

    /// Maximum number of concurrent outbound connections.
    /// `None` means [`DEFAULT_CONNECTION_LIMIT`].
    pub connection_limit: Option<usize>,

    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: None,
            database: None,
            credential: None,
            proxy: None,
            connection_limit: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with a credential.
    pub fn with_credential(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credential: Some(Credential::new(username, password)),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// This will look for:
    /// - `ARANGO_URL` for the server URL
    /// - `ARANGO_DATABASE` for the database name
    /// - `ARANGO_USERNAME` / `ARANGO_PASSWORD` for the credential
    /// - `ARANGO_PROXY` for an HTTP proxy
    /// - `ARANGO_CONNECTION_LIMIT` for the connection ceiling
    /// - `ARANGO_TIMEOUT` for request timeout (in seconds)
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(url) = env::var("ARANGO_URL") {
            config.url = Some(url);
        }

        if let Ok(database) = env::var("ARANGO_DATABASE") {
            config.database = Some(database);
        }

        if let Ok(username) = env::var("ARANGO_USERNAME") {
            let password = env::var("ARANGO_PASSWORD").unwrap_or_default();
            config.credential = Some(Credential::new(username, password));
        }

        if let Ok(proxy) = env::var("ARANGO_PROXY") {
            config.proxy = Some(proxy);
        }

        if let Ok(limit_str) = env::var("ARANGO_CONNECTION_LIMIT") {
            let limit = limit_str.parse::<usize>().map_err(|_| {
                crate::error::Error::MissingConfig(format!(
                    "ARANGO_CONNECTION_LIMIT must be a positive integer, got '{}'",
                    limit_str
                ))
            })?;
            config.connection_limit = Some(limit);
        }

        if let Ok(timeout_str) = env::var("ARANGO_TIMEOUT") {
            let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
                crate::error::Error::MissingConfig(format!(
                    "ARANGO_TIMEOUT must be a whole number of seconds, got '{}'",
                    timeout_str
                ))
            })?;
            config.timeout = Some(Duration::from_secs(timeout_secs));
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.url.is_some() {
            self.url = other.url;
        }
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.credential.is_some() {
            self.credential = other.credential;
        }
        if other.proxy.is_some() {
            self.proxy = other.proxy;
        }
        if other.connection_limit.is_some() {
            self.connection_limit = other.connection_limit;
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }

        self
    }

    /// Server URL, falling back to [`DEFAULT_URL`].
    pub fn url_or_default(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_URL)
    }

    /// Connection ceiling, falling back to [`DEFAULT_CONNECTION_LIMIT`].
    pub fn connection_limit_or_default(&self) -> usize {
        self.connection_limit.unwrap_or(DEFAULT_CONNECTION_LIMIT)
    }

    /// Database name, falling back to [`DEFAULT_DATABASE`].
    pub fn database_or_default(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = Some(url.into());
        self
    }

    /// Set the database.
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.config.database = Some(database.into());
        self
    }

    /// Set the credential.
    pub fn credential(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credential = Some(Credential::new(username, password));
        self
    }

    /// Set the HTTP proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Set the connection ceiling.
    pub fn connection_limit(mut self, limit: usize) -> Self {
        self.config.connection_limit = Some(limit);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.connection_limit, None);
        assert_eq!(config.connection_limit_or_default(), 256);
        assert!(config.timeout.is_none());
        assert!(config.proxy.is_none());
        assert!(config.credential.is_none());
        assert_eq!(config.url_or_default(), "http://localhost:8529");
        assert_eq!(config.database_or_default(), "_system");
    }

    #[test]
    fn test_credential_debug_redacts_password() {
        let credential = Credential::new("root", "hunter2");
        let debug = format!("{:?}", credential);
        assert!(debug.contains("root"));
        assert!(!debug.contains("hunter2"));
        assert_eq!(credential.password(), "hunter2");
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfigBuilder::new()
            .url("http://db:8529")
            .database("social")
            .credential("root", "secret")
            .proxy("http://proxy:3128")
            .connection_limit(32)
            .timeout(Duration::from_secs(30))
            .build();

        assert_eq!(config.url.as_deref(), Some("http://db:8529"));
        assert_eq!(config.database.as_deref(), Some("social"));
        assert_eq!(config.credential.unwrap().username(), "root");
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:3128"));
        assert_eq!(config.connection_limit, Some(32));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_merge() {
        let config1 = ClientConfigBuilder::new()
            .credential("root", "one")
            .database("social")
            .proxy("http://proxy1:3128")
            .build();
        let config2 = ClientConfigBuilder::new()
            .url("http://db:8529")
            .timeout(Duration::from_secs(5))
            .build();

        let merged = config1.merge(config2);
        assert_eq!(merged.credential.unwrap().password(), "one");
        assert_eq!(merged.database.as_deref(), Some("social"));
        assert_eq!(merged.url.as_deref(), Some("http://db:8529"));
        assert_eq!(merged.timeout, Some(Duration::from_secs(5)));
        // None in the later config does not clear the earlier proxy
        assert_eq!(merged.proxy.as_deref(), Some("http://proxy1:3128"));
        assert_eq!(merged.connection_limit, None);
    }

    #[test]
    fn test_config_merge_explicit_default_limit_overrides() {
        let earlier = ClientConfigBuilder::new().connection_limit(16).build();
        let later = ClientConfigBuilder::new()
            .connection_limit(DEFAULT_CONNECTION_LIMIT)
            .build();

        let merged = earlier.clone().merge(later);
        assert_eq!(merged.connection_limit, Some(256));

        // An unset limit leaves the earlier one alone
        let merged = earlier.merge(ClientConfig::default());
        assert_eq!(merged.connection_limit, Some(16));
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_config_from_env_variables() {
        temp_env::with_vars(
            [
                ("ARANGO_URL", Some("http://env-db:8529")),
                ("ARANGO_DATABASE", Some("envdb")),
                ("ARANGO_USERNAME", Some("envuser")),
                ("ARANGO_PASSWORD", Some("envpass")),
                ("ARANGO_PROXY", Some("http://proxy-env:3128")),
                ("ARANGO_CONNECTION_LIMIT", Some("64")),
                ("ARANGO_TIMEOUT", Some("120")),
            ],
            || {
                let config = ClientConfig::from_env().unwrap();
                assert_eq!(config.url.as_deref(), Some("http://env-db:8529"));
                assert_eq!(config.database.as_deref(), Some("envdb"));
                let credential = config.credential.unwrap();
                assert_eq!(credential.username(), "envuser");
                assert_eq!(credential.password(), "envpass");
                assert_eq!(config.proxy.as_deref(), Some("http://proxy-env:3128"));
                assert_eq!(config.connection_limit, Some(64));
                assert_eq!(config.timeout, Some(Duration::from_secs(120)));
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_config_from_env_rejects_bad_connection_limit() {
        temp_env::with_var("ARANGO_CONNECTION_LIMIT", Some("lots"), || {
            let result = ClientConfig::from_env();
            assert!(matches!(
                result,
                Err(crate::error::Error::MissingConfig(msg)) if msg.contains("lots")
            ));
        });
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_config_from_env_rejects_bad_timeout() {
        temp_env::with_var("ARANGO_TIMEOUT", Some("soon"), || {
            let result = ClientConfig::from_env();
            assert!(matches!(
                result,
                Err(crate::error::Error::MissingConfig(msg)) if msg.contains("soon")
            ));
        });
    }
}
