//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! AppState holds:
//! - **Sessions**: one isolated [`Session`] per form user, keyed by UUID
//! - **Verifier**: the credential check used to unlock sessions
//! - **Metrics handle**: Prometheus renderer, when a recorder is installed
//!
//! Nothing is persisted. Ending a session, or leaving it idle past the
//! configured timeout, drops its entry store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use riskform_workflow::{CredentialVerifier, Session};
use thiserror::Error;
use uuid::Uuid;

use crate::auth;

// -- Session Store ------------------------------------------------------------

/// Sessions kept at most, unless configured otherwise.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;
/// Idle time after which a session is dropped, unless configured otherwise.
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// The store is full and no idle session could be reclaimed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("session limit of {max_sessions} reached, try again later")]
pub struct SessionLimitReached {
    pub max_sessions: usize,
}

#[derive(Debug, Clone)]
struct SessionSlot {
    session: Session,
    last_seen: Instant,
}

/// Thread-safe, cloneable in-memory session map.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not `tokio::sync`)
/// because the lock is never held across `.await` points.
///
/// A session untouched for longer than the idle timeout reads as missing and
/// is dropped. Creation sweeps idle sessions and refuses once `max_sessions`
/// live ones remain.
#[derive(Debug, Clone)]
pub struct SessionStore {
    data: Arc<RwLock<HashMap<Uuid, SessionSlot>>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_TIMEOUT)
    }

    pub fn with_limits(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            data: Arc::default(),
            max_sessions,
            idle_timeout,
        }
    }

    /// Register a session under a fresh ID.
    pub fn create(&self, session: Session) -> Result<Uuid, SessionLimitReached> {
        let now = Instant::now();
        let mut data = self.data.write();
        let before = data.len();
        data.retain(|_, slot| !self.is_idle(slot, now));
        let swept = before - data.len();
        if swept > 0 {
            tracing::debug!(swept, "dropped idle sessions");
        }
        if data.len() >= self.max_sessions {
            return Err(SessionLimitReached {
                max_sessions: self.max_sessions,
            });
        }
        let id = Uuid::new_v4();
        data.insert(
            id,
            SessionSlot {
                session,
                last_seen: now,
            },
        );
        Ok(id)
    }

    /// Snapshot of a session. Counts as activity.
    pub fn get(&self, id: &Uuid) -> Option<Session> {
        self.touch(id, |session| session.clone())
    }

    /// Atomically read-validate-update a session.
    ///
    /// The closure runs under a single write lock, so a request's checks and
    /// mutations cannot interleave with another request on the same session.
    /// Returns `None` if the session doesn't exist or has gone idle.
    pub fn try_update<R, E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut Session) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.touch(id, f)
    }

    /// End a session, dropping its state.
    pub fn remove(&self, id: &Uuid) -> Option<Session> {
        self.data.write().remove(id).map(|slot| slot.session)
    }

    /// Live sessions, not counting idle ones awaiting a sweep.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.data
            .read()
            .values()
            .filter(|slot| !self.is_idle(slot, now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_idle(&self, slot: &SessionSlot, now: Instant) -> bool {
        now.saturating_duration_since(slot.last_seen) >= self.idle_timeout
    }

    fn touch<R>(&self, id: &Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let now = Instant::now();
        let mut data = self.data.write();
        if data.get(id).is_some_and(|slot| self.is_idle(slot, now)) {
            data.remove(id);
            tracing::debug!(session_id = %id, "session expired");
            return None;
        }
        data.get_mut(id).map(|slot| {
            slot.last_seen = now;
            f(&mut slot.session)
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// -- Configuration ------------------------------------------------------------

/// Configuration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}: expected an integer between 0 and 65535")]
    InvalidPort(String),

    #[error("invalid MAX_SESSIONS value {0:?}: expected a positive integer")]
    InvalidMaxSessions(String),

    #[error("invalid SESSION_IDLE_SECS value {0:?}: expected a positive number of seconds")]
    InvalidIdleTimeout(String),
}

/// Application configuration, read from the environment.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Shared secret that unlocks a session.
    /// If `None`, the gate is open and sessions start unlocked.
    pub access_secret: Option<String>,
    /// Upper bound on concurrently held sessions.
    pub max_sessions: usize,
    /// Sessions untouched this long are dropped.
    pub session_idle_timeout: Duration,
}

impl AppConfig {
    /// Read `PORT`, `ACCESS_SECRET`, `MAX_SESSIONS` and `SESSION_IDLE_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8080,
        };
        let access_secret = lookup("ACCESS_SECRET").filter(|s| !s.is_empty());
        let max_sessions = match lookup("MAX_SESSIONS") {
            Some(raw) => parse_positive(&raw).ok_or(ConfigError::InvalidMaxSessions(raw))?,
            None => DEFAULT_MAX_SESSIONS,
        };
        let session_idle_timeout = match lookup("SESSION_IDLE_SECS") {
            Some(raw) => parse_positive(&raw)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidIdleTimeout(raw))?,
            None => DEFAULT_SESSION_IDLE_TIMEOUT,
        };
        Ok(Self {
            port,
            access_secret,
            max_sessions,
            session_idle_timeout,
        })
    }
}

fn parse_positive<T: std::str::FromStr + Default + PartialOrd>(raw: &str) -> Option<T> {
    raw.trim().parse().ok().filter(|v| *v > T::default())
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "access_secret",
                &self.access_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_sessions", &self.max_sessions)
            .field("session_idle_timeout", &self.session_idle_timeout)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            access_secret: None,
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
        }
    }
}

/// Log output format, selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State with default configuration: open gate, no metrics recorder.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let verifier = auth::verifier_for(&config);
        let sessions = SessionStore::with_limits(config.max_sessions, config.session_idle_timeout);
        Self {
            config: Arc::new(config),
            sessions,
            verifier,
            metrics: None,
        }
    }

    /// Attach the Prometheus handle served at `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Whether sessions skip the access gate.
    pub fn gate_open(&self) -> bool {
        self.config.access_secret.is_none()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
