//! Signs in to a running service once and reports whether the login was accepted.

pub mod data;
pub mod endpoint;
mod probe;

pub use data::{
    LoginEnvelope, LoginForm, LoginReply, ProbeConfig, ProbeError, ProbeOutcome, TokenBody,
    EXIT_REJECTED, EXIT_UNREACHABLE, FAILURE_SENTINEL,
};
pub use endpoint::{login_endpoint, normalize_base_url, origin_header, referer_header};
pub use probe::{build_client, login, probe, run};
