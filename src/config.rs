use anyhow::Context;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use tower_sessions::cookie::Key;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub users_db: String,
    pub content_db: String,
}

impl DatabaseConfig {
    fn connect_options(&self, database: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(database)
    }

    /// Credentials database; also holds the session table.
    pub fn users_options(&self) -> PgConnectOptions {
        self.connect_options(&self.users_db)
    }

    pub fn content_options(&self) -> PgConnectOptions {
        self.connect_options(&self.content_db)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub secure_cookie: bool,
}

impl SessionConfig {
    /// Cookie signing key. `cookie` requires at least 64 bytes of key material.
    pub fn signing_key(&self) -> anyhow::Result<Key> {
        Key::try_from(self.secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("SESSION_SECRET must be at least 64 bytes: {e}"))
    }
}

/// Argon2 cost parameters applied to every new hash.
#[derive(Debug, Clone, Deserialize)]
pub struct HashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub hashing: HashConfig,
    pub assets_dir: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} is not set"));
        let parsed = |key: &str| lookup(key).and_then(|v| v.parse::<u32>().ok());

        let database = DatabaseConfig {
            host: required("DB_HOST")?,
            port: lookup("DB_PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(5432),
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            users_db: required("DB_NAME")?,
            content_db: required("DB_NAME_PLANTEPEDIA")?,
        };

        let session = SessionConfig {
            secret: required("SESSION_SECRET")?,
            secure_cookie: lookup("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };

        let defaults = HashConfig::default();
        let hashing = HashConfig {
            memory_kib: parsed("HASH_MEMORY_KIB").unwrap_or(defaults.memory_kib),
            iterations: parsed("HASH_ITERATIONS").unwrap_or(defaults.iterations),
            parallelism: parsed("HASH_PARALLELISM").unwrap_or(defaults.parallelism),
        };

        Ok(Self {
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: lookup("PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(4000),
            database,
            session,
            hashing,
            assets_dir: lookup("ASSETS_DIR").unwrap_or_else(|| "./assets".into()),
        })
    }
}
