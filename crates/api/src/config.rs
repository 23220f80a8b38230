use dishnote_core::allocator::DEFAULT_MAX_ATTEMPTS;
use dishnote_core::credential::CredentialScheme;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`). In-flight storage
    /// calls are dropped when it fires.
    pub request_timeout_secs: u64,
    /// Seconds allowed for closing the database pool after the server stops
    /// accepting connections (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Identifier candidates tried per create before giving up (default: `64`).
    pub id_allocation_max_attempts: u32,
    /// How person credentials are stored and compared (default: `plaintext`).
    pub credential_scheme: CredentialScheme,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`      | `30`                    |
    /// | `ID_ALLOCATION_MAX_ATTEMPTS` | `64`                    |
    /// | `CREDENTIAL_SCHEME`          | `plaintext`             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let id_allocation_max_attempts: u32 = std::env::var("ID_ALLOCATION_MAX_ATTEMPTS")
            .map(|v| v.parse().expect("ID_ALLOCATION_MAX_ATTEMPTS must be a valid u32"))
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        let credential_scheme: CredentialScheme = std::env::var("CREDENTIAL_SCHEME")
            .map(|v| {
                v.parse()
                    .unwrap_or_else(|e| panic!("CREDENTIAL_SCHEME is invalid: {e}"))
            })
            .unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            id_allocation_max_attempts,
            credential_scheme,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            id_allocation_max_attempts: DEFAULT_MAX_ATTEMPTS,
            credential_scheme: CredentialScheme::Plaintext,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        let origins = parse_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }
}
