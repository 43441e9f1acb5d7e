use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Status reported in place of a real HTTP code when the request never completed.
pub const FAILURE_SENTINEL: i64 = -1;

/// Process exit code for a completed login that was not answered with 200.
pub const EXIT_REJECTED: i32 = 1;
/// Process exit code for a login that never reached the server (-1 as the OS reports it).
pub const EXIT_UNREACHABLE: i32 = 255;

/// Where to sign in and as whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl ProbeConfig {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Form body of `POST /api/user/login`.
#[derive(Debug, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a ProbeConfig> for LoginForm<'a> {
    fn from(config: &'a ProbeConfig) -> Self {
        Self {
            username: &config.username,
            password: &config.password,
        }
    }
}

/// Status and raw body of the login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReply {
    pub status: u16,
    pub body: String,
}

impl LoginReply {
    /// Decodes the service's JSON envelope, if the body is one.
    pub fn envelope(&self) -> Option<LoginEnvelope> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct LoginEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<TokenBody>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct TokenBody {
    pub token: String,
}

#[derive(Debug)]
pub enum ProbeError {
    /// The HTTP client itself could not be set up.
    Client(reqwest::Error),
    /// Sending the request or reading the response failed.
    Connect {
        endpoint: String,
        source: reqwest::Error,
    },
}

impl Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeError::Client(e) => write!(f, "could not build HTTP client: {}", e),
            ProbeError::Connect { endpoint, source } => {
                write!(f, "request to {} failed: {}", endpoint, source)
            }
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Client(e) => Some(e),
            ProbeError::Connect { source, .. } => Some(source),
        }
    }
}

/// What a single probe run observed.
#[derive(Debug)]
pub enum ProbeOutcome {
    Accepted(LoginReply),
    Rejected(LoginReply),
    Unreachable(ProbeError),
}

impl ProbeOutcome {
    /// The HTTP status seen, or [`FAILURE_SENTINEL`] if there was none.
    pub fn status_code(&self) -> i64 {
        match self {
            ProbeOutcome::Accepted(reply) | ProbeOutcome::Rejected(reply) => {
                i64::from(reply.status)
            }
            ProbeOutcome::Unreachable(_) => FAILURE_SENTINEL,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Accepted(_))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ProbeOutcome::Accepted(_) => 0,
            ProbeOutcome::Rejected(_) => EXIT_REJECTED,
            ProbeOutcome::Unreachable(_) => EXIT_UNREACHABLE,
        }
    }
}
