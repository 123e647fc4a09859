use std::collections::HashMap;
use std::convert::Infallible;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use ezra_common::Config;

use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

const COOKIE_NAME: &str = "ezra_session";
const SESSION_DURATION_SECS: i64 = 7 * 24 * 3600; // 7 days

/// Return the session signing secret. Prefers SESSION_SECRET;
/// falls back to the login password.
pub fn session_secret(config: &Config) -> &str {
    if config.session_secret.is_empty() {
        &config.login_password
    } else {
        &config.session_secret
    }
}

/// Check a login against the single configured team credential.
///
/// This is a stand-in for a real identity provider. There is one shared
/// account, the password is compared in plain text, and nothing is hashed.
pub fn verify_credentials(config: &Config, email: &str, password: &str) -> bool {
    let email_ok = constant_time_eq(email.as_bytes(), config.login_email.as_bytes());
    let password_ok = constant_time_eq(password.as_bytes(), config.login_password.as_bytes());
    email_ok && password_ok
}

/// Signed-in team member. Extract this in handlers for internal views.
/// A missing or invalid session redirects to /login.
pub struct TeamSession {
    pub email: String,
    pub name: String,
}

impl FromRequestParts<Arc<AppState>> for TeamSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match session_from_parts(parts, state) {
            Some(session) => Ok(session),
            None => Err(Redirect::to("/login").into_response()),
        }
    }
}

/// Session if present. Public views use this to adjust navigation.
pub struct MaybeSession(pub Option<TeamSession>);

impl MaybeSession {
    pub fn is_signed_in(&self) -> bool {
        self.0.is_some()
    }

    pub fn user_name(&self) -> Option<String> {
        self.0.as_ref().map(|s| s.name.clone())
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(session_from_parts(parts, state)))
    }
}

fn session_from_parts(parts: &Parts, state: &AppState) -> Option<TeamSession> {
    let cookie_header = parts
        .headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let value = parse_cookie(cookie_header, COOKIE_NAME)?;
    let email = verify_session(value, session_secret(&state.config))?;

    // A rotated login email invalidates existing sessions.
    if email != state.config.login_email {
        return None;
    }
    Some(TeamSession {
        email,
        name: state.config.login_name.clone(),
    })
}

/// Create a signed session cookie value: `email|expiry|signature`
pub fn create_session(email: &str, secret: &str) -> String {
    let expiry = chrono::Utc::now().timestamp() + SESSION_DURATION_SECS;
    let payload = format!("{email}|{expiry}");
    let sig = sign(&payload, secret);
    format!("{payload}|{sig}")
}

/// Build the Set-Cookie header value.
/// In release builds, adds `Secure` flag to prevent transmission over HTTP.
pub fn session_cookie(email: &str, secret: &str) -> String {
    let value = create_session(email, secret);
    let secure = if cfg!(debug_assertions) { "" } else { "; Secure" };
    format!(
        "{COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_DURATION_SECS}{secure}"
    )
}

pub fn clear_session_cookie() -> String {
    format!("{COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Verify a session cookie value. Returns the email if valid.
fn verify_session(value: &str, secret: &str) -> Option<String> {
    // Split from the right: the email is the only part that could hold a '|'.
    let mut parts = value.rsplitn(3, '|');
    let sig = parts.next()?;
    let expiry_str = parts.next()?;
    let email = parts.next()?;

    let payload = format!("{email}|{expiry_str}");
    let expected_sig = sign(&payload, secret);
    if !constant_time_eq(sig.as_bytes(), expected_sig.as_bytes()) {
        return None;
    }

    let expiry: i64 = expiry_str.parse().ok()?;
    if chrono::Utc::now().timestamp() > expiry {
        return None;
    }

    Some(email.to_string())
}

fn sign(payload: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time comparison to prevent timing attacks.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(name)?.strip_prefix('='))
}

/// Sliding one-hour window. Returns false once `max_per_hour` attempts
/// have been recorded; rejected attempts are not recorded.
pub fn check_rate_limit(entries: &mut Vec<Instant>, now: Instant, max_per_hour: usize) -> bool {
    let cutoff = now.checked_sub(Duration::from_secs(3600));
    entries.retain(|t| cutoff.map_or(true, |c| *t > c));
    if entries.len() >= max_per_hour {
        return false;
    }
    entries.push(now);
    true
}

/// Check and record an attempt from `ip`. Addresses whose attempts have all
/// aged out of the window are dropped from the map.
pub fn record_attempt(
    limiter: &mut HashMap<IpAddr, Vec<Instant>>,
    ip: IpAddr,
    now: Instant,
    max_per_hour: usize,
) -> bool {
    let cutoff = now.checked_sub(Duration::from_secs(3600));
    limiter.retain(|_, entries| {
        entries.retain(|t| cutoff.map_or(true, |c| *t > c));
        !entries.is_empty()
    });
    check_rate_limit(limiter.entry(ip).or_default(), now, max_per_hour)
}
