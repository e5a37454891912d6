//! Authentication capability
//!
//! The console has no real user database. Login and registration go through
//! the [`Authenticator`] trait so the view state machine does not care
//! whether credentials are checked locally or by a remote service. The
//! shipped implementation, [`SimulatedAuthenticator`], waits a fixed delay
//! and applies the form rules.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::config::AuthConfig;

/// Authentication outcome shown inline under the form
///
/// The display strings are the exact user-facing messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Login with an empty e-mail or a short password
    #[error("Credenciais inválidas. Senha deve ter no mínimo {min_len} caracteres.")]
    InvalidCredentials {
        /// Minimum password length in effect
        min_len: usize,
    },

    /// Registration with a missing field or a short password
    #[error("Preencha todos os campos corretamente.")]
    IncompleteRegistration,

    /// Failure reported by a remote authentication backend
    #[error("Falha na autenticação: {0}")]
    Backend(String),
}

/// Credentials submitted from the login or register screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    /// Existing account
    Login {
        /// E-mail address
        email: String,
        /// Password
        password: String,
    },
    /// New account
    Register {
        /// Full name
        name: String,
        /// E-mail address
        email: String,
        /// Password
        password: String,
    },
}

impl AuthRequest {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
        }
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Name given at registration, if any
    pub display_name: Option<String>,
    /// E-mail used to sign in
    pub email: String,
}

impl Session {
    /// Name used in the dashboard greeting
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Administrador")
    }

    /// Upper-cased first letter of the greeting name, for the avatar badge
    pub fn initial(&self) -> String {
        self.greeting_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "A".to_string())
    }
}

/// Pluggable authentication backend
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Check credentials and open a session
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] describing why the credentials were rejected
    async fn authenticate(&self, request: AuthRequest) -> std::result::Result<Session, AuthError>;
}

/// Local authenticator with an artificial delay
///
/// Accepts any login with a non-empty e-mail and a long-enough password, and
/// any registration that also carries a name. No network I/O takes place.
///
/// # Examples
///
/// ```
/// use ssmoveis::auth::{AuthRequest, SimulatedAuthenticator};
/// use std::time::Duration;
///
/// let auth = SimulatedAuthenticator::new(Duration::ZERO, 6);
/// let session = auth
///     .check(&AuthRequest::Login {
///         email: "loja@ssmoveis.com".to_string(),
///         password: "segredo".to_string(),
///     })
///     .unwrap();
/// assert_eq!(session.greeting_name(), "Administrador");
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    delay: Duration,
    min_password_len: usize,
}

impl SimulatedAuthenticator {
    /// Create an authenticator with an explicit delay and password rule
    pub fn new(delay: Duration, min_password_len: usize) -> Self {
        Self {
            delay,
            min_password_len,
        }
    }

    /// Create an authenticator from configuration
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(Duration::from_millis(config.delay_ms), config.min_password_len)
    }

    /// Validate a request without waiting
    pub fn check(&self, request: &AuthRequest) -> std::result::Result<Session, AuthError> {
        match request {
            AuthRequest::Login { email, password } => {
                if !email.is_empty() && password_ok(password, self.min_password_len) {
                    Ok(Session {
                        display_name: None,
                        email: email.clone(),
                    })
                } else {
                    Err(AuthError::InvalidCredentials {
                        min_len: self.min_password_len,
                    })
                }
            }
            AuthRequest::Register {
                name,
                email,
                password,
            } => {
                if !name.is_empty()
                    && !email.is_empty()
                    && password_ok(password, self.min_password_len)
                {
                    Ok(Session {
                        display_name: Some(name.clone()),
                        email: email.clone(),
                    })
                } else {
                    Err(AuthError::IncompleteRegistration)
                }
            }
        }
    }
}

fn password_ok(password: &str, min_len: usize) -> bool {
    password.chars().count() >= min_len
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn authenticate(&self, request: AuthRequest) -> std::result::Result<Session, AuthError> {
        tracing::debug!(
            kind = request.kind(),
            delay_ms = self.delay.as_millis() as u64,
            "Simulating authentication"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let outcome = self.check(&request);
        match &outcome {
            Ok(session) => tracing::info!(email = %session.email, "Authentication accepted"),
            Err(e) => tracing::warn!(kind = request.kind(), "Authentication rejected: {}", e),
        }
        outcome
    }
}
