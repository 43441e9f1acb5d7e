use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::header::{ORIGIN, REFERER};
use reqwest::StatusCode;
use std::io::Write;

use crate::data::*;
use crate::endpoint::{login_endpoint, normalize_base_url, origin_header, referer_header};

pub fn build_client() -> Result<Client, ProbeError> {
    Client::builder().build().map_err(ProbeError::Client)
}

/// Posts the credentials once and returns whatever the server answered.
///
/// Writes `signing in to <base>` before the request and
/// `Response: <status>, <body>` after it to `out`.
pub fn login<W: Write>(
    client: &Client,
    config: &ProbeConfig,
    out: &mut W,
) -> Result<LoginReply, ProbeError> {
    let base = normalize_base_url(&config.url);
    // Diagnostics are best-effort; a closed stdout must not change the outcome.
    let _ = writeln!(out, "signing in to {}", base);

    let endpoint = login_endpoint(base);
    info!(target: "login_probe", "POST {} as {}", endpoint, config.username);

    let response = client
        .post(&endpoint)
        .header(ORIGIN, origin_header(base))
        .header(REFERER, referer_header(base))
        .form(&LoginForm::from(config))
        .send()
        .map_err(|source| ProbeError::Connect {
            endpoint: endpoint.clone(),
            source,
        })?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .map_err(|source| ProbeError::Connect { endpoint, source })?;

    let _ = writeln!(out, "Response: {}, {}", status, body);
    Ok(LoginReply { status, body })
}

/// Runs [`login`] and classifies the result. Only an exact 200 counts as accepted.
pub fn probe<W: Write>(client: &Client, config: &ProbeConfig, out: &mut W) -> ProbeOutcome {
    match login(client, config, out) {
        Ok(reply) if reply.status == StatusCode::OK.as_u16() => {
            match reply.envelope().and_then(|e| e.data) {
                Some(_) => {
                    info!(target: "login_probe", "Signed in as {}, token issued.", config.username)
                }
                None => info!(target: "login_probe", "Signed in as {}.", config.username),
            }
            ProbeOutcome::Accepted(reply)
        }
        Ok(reply) => {
            match reply.envelope() {
                Some(envelope) => warn!(
                    target: "login_probe",
                    "Login rejected with status {} (code {}): {}",
                    reply.status,
                    envelope.code,
                    envelope.message.as_deref().unwrap_or("no message")
                ),
                None => warn!(target: "login_probe", "Login rejected with status {}.", reply.status),
            }
            ProbeOutcome::Rejected(reply)
        }
        Err(e) => unreachable_outcome(e, out),
    }
}

/// Builds a client and probes once.
pub fn run<W: Write>(config: &ProbeConfig, out: &mut W) -> ProbeOutcome {
    match build_client() {
        Ok(client) => probe(&client, config, out),
        Err(e) => unreachable_outcome(e, out),
    }
}

fn unreachable_outcome<W: Write>(e: ProbeError, out: &mut W) -> ProbeOutcome {
    warn!(target: "login_probe", "{}", e);
    let _ = writeln!(out, "failed to connect to server");
    ProbeOutcome::Unreachable(e)
}
