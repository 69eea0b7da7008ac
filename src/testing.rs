//! In-memory stand-ins for the stores and renderer, used by unit and router tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::{json, Value};
use time::OffsetDateTime;
use tower_sessions::{
    session::{Id, Record},
    MemoryStore, SessionStore,
};
use uuid::Uuid;

use crate::auth::{
    password::Hasher,
    repo::UserStore,
    repo_types::{Inserted, NewUser, User},
    services::AuthService,
    session::{SessionUser, SESSION_USER_KEY},
};
use crate::config::{AppConfig, DatabaseConfig, HashConfig, SessionConfig};
use crate::plants::{repo::PlantStore, repo_types::PlantSummary, services::PlantService};
use crate::state::AppState;
use crate::views::{View, ViewRenderer};

pub fn cheap_hasher() -> Hasher {
    Hasher::new(&HashConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("argon2 params")
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    /// Adds a record without the uniqueness check, like rows written before
    /// the email index existed.
    pub fn seed(&self, username: &str, email: &str, password_hash: &str) {
        self.users.lock().unwrap().push(User {
            id: Uuid::new_v4(),
            name: username.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        });
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> anyhow::Result<Inserted> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Ok(Inserted::EmailTaken);
        }
        users.push(User {
            id: Uuid::new_v4(),
            name: user.name,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(Inserted::Created)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email)
            .cloned()
            .collect())
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> anyhow::Result<u64> {
        let mut touched = 0;
        for user in self.users.lock().unwrap().iter_mut() {
            if user.email == email {
                user.password_hash = password_hash.to_string();
                touched += 1;
            }
        }
        Ok(touched)
    }
}

/// Holds raw documents, extra fields included, and projects on read.
#[derive(Default)]
pub struct MemoryPlantStore {
    documents: Vec<Value>,
    unreachable: bool,
}

impl MemoryPlantStore {
    pub fn with_documents(documents: Vec<Value>) -> Self {
        Self {
            documents,
            unreachable: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            documents: Vec::new(),
            unreachable: true,
        }
    }
}

#[async_trait]
impl PlantStore for MemoryPlantStore {
    async fn list_summaries(&self) -> anyhow::Result<Vec<PlantSummary>> {
        if self.unreachable {
            anyhow::bail!("content database unreachable");
        }
        self.documents
            .iter()
            .map(|doc| serde_json::from_value(doc.clone()).map_err(anyhow::Error::from))
            .collect()
    }
}

/// Renders `{"view": <name>, "context": <ctx>}` so tests can inspect what a
/// handler asked for.
pub struct RecordingViews;

impl ViewRenderer for RecordingViews {
    fn render(&self, view: View, ctx: &Value) -> anyhow::Result<String> {
        Ok(json!({ "view": view.name(), "context": ctx }).to_string())
    }
}

pub fn fake_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database: DatabaseConfig {
            host: "localhost".into(),
            port: 5432,
            user: "test".into(),
            password: "test".into(),
            users_db: "test".into(),
            content_db: "test".into(),
        },
        session: SessionConfig {
            secret: "k".repeat(64),
            secure_cookie: false,
        },
        hashing: HashConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        assets_dir: "./assets".into(),
    }
}

pub fn fake_state(plants: MemoryPlantStore) -> (AppState, Arc<MemoryUserStore>) {
    let users = Arc::new(MemoryUserStore::default());
    let state = AppState::from_parts(
        Arc::new(fake_config()),
        AuthService::new(users.clone(), cheap_hasher()),
        PlantService::new(Arc::new(plants)),
        Arc::new(RecordingViews),
    );
    (state, users)
}

/// Writes a signed-in session record straight into `store`, bypassing the
/// login flow, and returns its id.
pub async fn stored_session(
    store: &MemoryStore,
    user: SessionUser,
    expiry_date: OffsetDateTime,
) -> Id {
    let record = Record {
        id: Id::default(),
        data: HashMap::from([(
            SESSION_USER_KEY.to_string(),
            serde_json::to_value(user).expect("session user serializes"),
        )]),
        expiry_date,
    };
    store.save(&record).await.expect("memory store save");
    record.id
}
