use super::error::{CouchError, CouchResult};

/// Connection settings for the CouchDB instance holding quiz data.
#[derive(Debug, Clone)]
pub struct CouchConfig {
    pub base_url: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CouchConfig {
    /// Point the configuration at one server and database.
    pub fn new(base_url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            database: database.into(),
            username: None,
            password: None,
        }
    }

    /// Add basic-auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Yield the credential pair, or `None` when either half is missing.
    pub fn credentials(self) -> Option<(String, String)> {
        self.username.zip(self.password)
    }

    /// Assemble the configuration from `COUCH_*` environment variables.
    /// `COUCH_BASE_URL` and `COUCH_DB` are required; `COUCH_USERNAME` and
    /// `COUCH_PASSWORD` are read as a pair when both are present.
    pub fn from_env() -> CouchResult<Self> {
        let mut config = Self::new(require_env("COUCH_BASE_URL")?, require_env("COUCH_DB")?);

        if let (Ok(username), Ok(password)) = (
            std::env::var("COUCH_USERNAME"),
            std::env::var("COUCH_PASSWORD"),
        ) {
            config = config.with_credentials(username, password);
        }

        Ok(config)
    }
}

fn require_env(name: &'static str) -> CouchResult<String> {
    std::env::var(name).map_err(|_| CouchError::Env { name })
}
