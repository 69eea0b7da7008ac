//! Session lifecycle for signed-in users.
//!
//! A session is either anonymous (no [`SessionUser`] stored) or authenticated
//! with a fixed expiry one hour after sign-in. Logging out deletes the record
//! from the store instead of clearing the flag.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tower_sessions::{session, Expiry, Session};
use tracing::debug;

/// Key under which the signed-in user is stored.
pub const SESSION_USER_KEY: &str = "user";

/// Absolute lifetime of an authenticated session; not refreshed on activity.
pub const SESSION_TTL: Duration = Duration::hours(1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub authenticated: bool,
    pub username: String,
    pub email: String,
}

/// Anonymous → Authenticated. The id is cycled so a pre-login cookie cannot
/// be reused.
pub async fn establish(session: &Session, user: SessionUser) -> Result<(), session::Error> {
    session.cycle_id().await?;
    session.set_expiry(Some(Expiry::AtDateTime(
        OffsetDateTime::now_utc() + SESSION_TTL,
    )));
    debug!(username = %user.username, "session established");
    session.insert(SESSION_USER_KEY, user).await
}

/// Signed-in user, if the session is authenticated.
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, session::Error> {
    let user = session.get::<SessionUser>(SESSION_USER_KEY).await?;
    Ok(user.filter(|u| u.authenticated))
}

/// Authenticated → Anonymous. Safe to call on a session that was never saved.
pub async fn destroy(session: &Session) -> Result<(), session::Error> {
    session.flush().await
}
