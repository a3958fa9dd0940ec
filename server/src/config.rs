use actix_web::cookie::Key;
use std::env;

pub const DEFAULT_SCHEMA: &str = "ntd";
pub const DEFAULT_TIMEZONE: &str = "Asia/Seoul";

/// Cookie keys shorter than this are rejected by the cookie crate.
const MIN_SESSION_KEY_BYTES: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Connection parameters for the traffic database.
#[derive(Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub schema: String,
    pub timezone: String,
}

impl std::fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("schema", &self.schema)
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}

/// Process configuration, resolved once in `main` and passed down.
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub db: DbSettings,
    pub session_key: Key,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from any variable source. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let db = DbSettings {
            host: required("DB_HOST")?,
            port: parse_port("DB_PORT", &required("DB_PORT")?)?,
            name: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            schema: get("DB_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            timezone: get("DB_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        };
        if !is_identifier(&db.schema) {
            return Err(ConfigError::Invalid {
                name: "DB_SCHEMA",
                reason: format!("'{}' is not a plain identifier", db.schema),
            });
        }

        let host = get("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match get("APP_PORT") {
            Some(raw) => parse_port("APP_PORT", &raw)?,
            None => 8080,
        };

        let session_key = match get("SESSION_KEY_HEX") {
            Some(raw) => session_key_from_hex(&raw)?,
            None => {
                log::info!("SESSION_KEY_HEX not set, generating an ephemeral session key");
                Key::generate()
            }
        };

        Ok(Settings { host, port, db, session_key })
    }
}

fn parse_port(name: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

fn session_key_from_hex(raw: &str) -> Result<Key, ConfigError> {
    let bytes = hex::decode(raw.trim()).map_err(|e| ConfigError::Invalid {
        name: "SESSION_KEY_HEX",
        reason: e.to_string(),
    })?;
    if bytes.len() < MIN_SESSION_KEY_BYTES {
        return Err(ConfigError::Invalid {
            name: "SESSION_KEY_HEX",
            reason: format!("need at least {MIN_SESSION_KEY_BYTES} bytes, got {}", bytes.len()),
        });
    }
    Ok(Key::from(bytes.as_slice()))
}

/// Schema names are spliced into SQL text, so only `[A-Za-z_][A-Za-z0-9_]*` passes.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
