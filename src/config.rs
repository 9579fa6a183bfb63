//! Runtime configuration read from the shuttle secret store.

use std::time::Duration;

use shuttle_runtime::SecretStore;

const DEFAULT_CONNECTION_STRING: &str = "mongodb://127.0.0.1:27017/realogy?w=majority&readPreference=primary&retryWrites=true&ssl=false&directConnection=true";
const DEFAULT_DATABASE: &str = "realogy";

/// MongoDB connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub uri: String,
    /// Overrides the database named in `uri`.
    pub database: Option<String>,
    pub server_selection_timeout: Duration,
    pub connect_timeout: Duration,
    pub max_idle_time: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_CONNECTION_STRING.to_owned(),
            database: None,
            server_selection_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(20),
            max_idle_time: Duration::from_secs(10),
        }
    }
}

impl DatabaseConfig {
    /// Build the configuration from `MONGO_CONNECTION_STRING` and `MONGO_DATABASE`,
    /// falling back to a local server.
    pub fn from_secrets(secrets: &SecretStore) -> Self {
        Self::from_lookup(|key| secrets.get(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            uri: lookup("MONGO_CONNECTION_STRING")
                .filter(|uri| !uri.is_empty())
                .unwrap_or(defaults.uri),
            database: lookup("MONGO_DATABASE").filter(|name| !name.is_empty()),
            ..defaults
        }
    }

    /// Pick the database name: explicit override, then the one in the URI.
    pub fn database_name(&self, from_uri: Option<&str>) -> String {
        self.database
            .as_deref()
            .or(from_uri)
            .unwrap_or(DEFAULT_DATABASE)
            .to_owned()
    }
}
