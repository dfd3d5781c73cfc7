//! Authentication: password hashing, credential checks and bearer-token sessions.
//!
//! Administrators log in with their account username. Referees log in with their last name and
//! either their login UUID (first login) or the password they set afterwards. Every successful
//! login yields an opaque token kept in [`Sessions`] until it has been idle for the configured TTL.

use crate::models::{AccountId, Referee, RefereeId, TournamentId};
use crate::store::{Store, StoreError};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Authentication failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuthError {
    /// A required credential field is blank.
    MissingField(&'static str),
    /// No account and no referee with this name.
    UnknownUser,
    /// Wrong password for an existing user.
    WrongPassword,
    /// No referee has this login UUID.
    UnknownUuid,
    /// The referee already has a password; use update-password instead.
    PasswordAlreadySet,
    /// No bearer token on a request that needs one.
    MissingToken,
    /// Bearer token unknown or expired.
    InvalidToken,
    /// Password hashing failed.
    Hashing(String),
    Store(StoreError),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingField(field) => write!(f, "{} is required", field),
            AuthError::UnknownUser => write!(f, "User not found"),
            AuthError::WrongPassword => write!(f, "Incorrect password"),
            AuthError::UnknownUuid => write!(f, "Unknown login UUID"),
            AuthError::PasswordAlreadySet => write!(f, "This referee already has a password"),
            AuthError::MissingToken => write!(f, "Authentication required"),
            AuthError::InvalidToken => write!(f, "Invalid or expired token"),
            AuthError::Hashing(e) => write!(f, "Password hashing failed: {}", e),
            AuthError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        AuthError::Store(e)
    }
}

/// Hash a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Check a password against a PHC string. A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

/// Who a session belongs to. Returned by login and `/auth/me`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SessionUser {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<TournamentId>,
    pub is_admin: bool,
}

impl SessionUser {
    fn admin(id: AccountId, username: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            first_name: None,
            uuid: None,
            tournament_id: None,
            is_admin: true,
        }
    }

    fn referee(referee: &Referee) -> Self {
        Self {
            id: referee.id,
            username: referee.last_name.clone(),
            first_name: Some(referee.first_name.clone()),
            uuid: Some(referee.login_uuid),
            tournament_id: Some(referee.tournament_id),
            is_admin: false,
        }
    }
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

/// Check credentials: the admin account with this username first, then the first referee
/// with this last name.
pub fn login(store: &Store, username: &str, password: &str) -> Result<SessionUser, AuthError> {
    require(username, "username")?;
    require(password, "password")?;

    if let Some(account) = store.account_by_username(username) {
        if !verify_password(password, &account.password_hash) {
            return Err(AuthError::WrongPassword);
        }
        return Ok(SessionUser::admin(account.id, &account.username));
    }

    let referee = store
        .referee_by_last_name(username)
        .ok_or(AuthError::UnknownUser)?;
    let uuid_matches = password == referee.login_uuid.to_string();
    let password_matches = referee
        .password_hash
        .as_deref()
        .is_some_and(|hash| verify_password(password, hash));
    if !uuid_matches && !password_matches {
        return Err(AuthError::WrongPassword);
    }
    Ok(SessionUser::referee(referee))
}

/// Log a referee in from its login UUID alone (the link handed out by the organiser).
pub fn verify_uuid(store: &Store, uuid: Uuid) -> Result<SessionUser, AuthError> {
    store
        .referee_by_uuid(uuid)
        .map(SessionUser::referee)
        .map_err(|_| AuthError::UnknownUuid)
}

/// Change a referee's password. Until a password is set, the current password is the login UUID.
pub fn update_password(
    store: &mut Store,
    uuid: Uuid,
    current_password: &str,
    new_password: &str,
) -> Result<(), AuthError> {
    require(current_password, "current_password")?;
    require(new_password, "new_password")?;

    let referee = store.referee_by_uuid(uuid)?;
    let valid = match &referee.password_hash {
        Some(hash) => verify_password(current_password, hash),
        None => current_password == referee.login_uuid.to_string(),
    };
    if !valid {
        return Err(AuthError::WrongPassword);
    }
    let id = referee.id;
    let hash = hash_password(new_password)?;
    store.set_referee_password(id, hash)?;
    log::info!("Password updated for referee {}", id);
    Ok(())
}

/// Give a referee without a password its first one.
pub fn create_referee_account(store: &mut Store, referee_id: RefereeId, password: &str) -> Result<(), AuthError> {
    require(password, "password")?;
    let referee = store.referee(referee_id)?;
    if referee.password_hash.is_some() {
        return Err(AuthError::PasswordAlreadySet);
    }
    let hash = hash_password(password)?;
    store.set_referee_password(referee_id, hash)?;
    log::info!("Account created for referee {}", referee_id);
    Ok(())
}

/// Create the administrator account unless one with this username exists already.
pub fn seed_admin(store: &mut Store, username: &str, password: &str) -> Result<AccountId, AuthError> {
    if let Some(account) = store.account_by_username(username) {
        return Ok(account.id);
    }
    require(password, "password")?;
    let hash = hash_password(password)?;
    let account = store.create_account(username, hash)?;
    Ok(account.id)
}

struct Session {
    user: SessionUser,
    last_seen: Instant,
}

/// Live sessions by token. A session expires once idle for longer than the TTL.
pub struct Sessions {
    entries: HashMap<Uuid, Session>,
    ttl: Duration,
}

impl Sessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Open a session and return its token.
    pub fn issue(&mut self, user: SessionUser) -> Uuid {
        let token = Uuid::new_v4();
        self.entries.insert(
            token,
            Session {
                user,
                last_seen: Instant::now(),
            },
        );
        token
    }

    /// Resolve a token, refreshing its activity time. Expired sessions are dropped.
    pub fn touch(&mut self, token: Uuid) -> Result<SessionUser, AuthError> {
        let expired = match self.entries.get(&token) {
            Some(session) => session.last_seen.elapsed() >= self.ttl,
            None => return Err(AuthError::InvalidToken),
        };
        if expired {
            self.entries.remove(&token);
            return Err(AuthError::InvalidToken);
        }
        let session = self
            .entries
            .get_mut(&token)
            .ok_or(AuthError::InvalidToken)?;
        session.last_seen = Instant::now();
        Ok(session.user.clone())
    }

    /// Close a session. Returns whether the token was live.
    pub fn revoke(&mut self, token: Uuid) -> bool {
        self.entries.remove(&token).is_some()
    }

    /// Drop idle sessions; returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, s| s.last_seen.elapsed() < ttl);
        before - self.entries.len()
    }
}
