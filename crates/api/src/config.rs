use castlist_db::repositories::token_store::DEFAULT_RETENTION_SECS;

/// A configuration value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Identity provider settings.
///
/// When `auth0_domain` is set, tokens are verified against the tenant's
/// published key set and `api_audience` is required. Otherwise tokens are
/// verified with the shared `jwt_secret`.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub auth0_domain: Option<String>,
    pub api_audience: Option<String>,
    /// OAuth client id used to build the login redirect.
    pub client_id: Option<String>,
    /// Where the identity provider sends the browser after login.
    pub login_uri: Option<String>,
    /// HS256 secret for local development and tests.
    pub jwt_secret: Option<String>,
}

impl AuthConfig {
    /// The identity provider's authorize URL, if every part is configured.
    pub fn login_redirect_url(&self) -> Option<String> {
        let domain = self.auth0_domain.as_deref()?;
        let audience = self.api_audience.as_deref()?;
        let client_id = self.client_id.as_deref()?;
        let login_uri = self.login_uri.as_deref()?;
        Some(format!(
            "https://{domain}/authorize?audience={audience}&response_type=token\
             &client_id={client_id}&redirect_uri={login_uri}"
        ))
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the auth settings have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// SQLite connection URL.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long a stored session token stays live (default: 10 hours).
    pub token_retention_secs: i64,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `8080`                           |
    /// | `DATABASE_URL`         | `sqlite://castlist.db?mode=rwc`  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `TOKEN_RETENTION_SECS` | `36000`                          |
    /// | `AUTH0_DOMAIN`         | --                               |
    /// | `API_AUDIENCE`         | -- (required with `AUTH0_DOMAIN`)|
    /// | `CLIENT_ID`            | --                               |
    /// | `LOGIN_URI`            | --                               |
    /// | `JWT_SECRET`           | -- (required without `AUTH0_DOMAIN`) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&var, "PORT", "u16", 8080)?;
        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://castlist.db?mode=rwc".into());

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.parse::<axum::http::HeaderValue>().is_err())
        {
            return Err(ConfigError::Invalid {
                name: "CORS_ORIGINS",
                expected: "comma-separated list of origins",
                value: bad.clone(),
            });
        }

        let request_timeout_secs = parse_var(&var, "REQUEST_TIMEOUT_SECS", "u64", 30)?;
        let token_retention_secs: i64 = parse_var(
            &var,
            "TOKEN_RETENTION_SECS",
            "positive i64",
            DEFAULT_RETENTION_SECS,
        )?;
        if token_retention_secs < 1 {
            return Err(ConfigError::Invalid {
                name: "TOKEN_RETENTION_SECS",
                expected: "positive i64",
                value: token_retention_secs.to_string(),
            });
        }

        let auth = AuthConfig {
            auth0_domain: var("AUTH0_DOMAIN"),
            api_audience: var("API_AUDIENCE"),
            client_id: var("CLIENT_ID"),
            login_uri: var("LOGIN_URI"),
            jwt_secret: var("JWT_SECRET"),
        };
        if auth.auth0_domain.is_some() && auth.api_audience.is_none() {
            return Err(ConfigError::Missing("API_AUDIENCE"));
        }
        if auth.auth0_domain.is_none() && auth.jwt_secret.is_none() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            token_retention_secs,
            auth,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match var(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
