// Authenticated controller session.
//
// `Session::login` performs the cookie/JWT handshake once and bakes the
// resulting `Cookie` and `X-Csrf-Token` headers into a dedicated
// reqwest client. A session is immutable after construction: callers
// that re-authenticate build a whole new `Session` and swap it in,
// never mutate one in place.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ApiResponse;
use crate::transport::TransportConfig;

/// Name of the session cookie set by the login endpoint.
const TOKEN_COOKIE: &str = "TOKEN";

/// JWT claim carrying the anti-forgery token.
const CSRF_CLAIM: &str = "csrfToken";

/// Site-scoped API prefix behind the UniFi OS proxy.
const SITE_PREFIX: &str = "/proxy/network/api/s/default";

/// An authorized session against one controller.
///
/// Holds an HTTP client whose default headers carry the session cookie
/// and anti-forgery token. Dropped and rebuilt on re-authentication.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    base_url: Url,
}

impl Session {
    /// Authenticate against the controller and build an authorized session.
    ///
    /// `POST /api/auth/login` with `rememberMe: true`. The controller
    /// answers with a `TOKEN` cookie whose JWT payload embeds the
    /// `csrfToken` claim; both are attached as default headers on the
    /// returned session's client. Any shortfall — non-2xx status, no
    /// cookie, undecodable token — is an [`Error::Authentication`] and
    /// the caller must not attempt further controller calls.
    pub async fn login(
        base_url: Url,
        username: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let login_client = transport.build_client()?;
        let url = base_url.join("/api/auth/login").map_err(Error::InvalidUrl)?;

        debug!(%url, "logging in");

        let resp = login_client
            .post(url)
            .json(&json!({
                "username": username,
                "password": password.expose_secret(),
                "rememberMe": true,
            }))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        let token = extract_token_cookie(resp.headers()).ok_or_else(|| Error::Authentication {
            message: format!("login response carried no {TOKEN_COOKIE} cookie"),
        })?;
        let csrf_token = decode_csrf_claim(&token)?;

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, header_value(&format!("{TOKEN_COOKIE}={token}"))?);
        headers.insert("X-Csrf-Token", header_value(&csrf_token)?);

        let http = transport.build_client_with_headers(headers)?;
        debug!("login successful");

        Ok(Self { http, base_url })
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Site-scoped URL: `{base}/proxy/network/api/s/default/{path}`
    pub(crate) fn site_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(&format!("{SITE_PREFIX}/{path}"))
            .map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        parse_envelope(resp).await
    }

    /// Send a PUT request with JSON body and unwrap the envelope.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Vec<T>, Error> {
        debug!("PUT {url}");
        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        parse_envelope(resp).await
    }
}

// ── Login handshake internals ────────────────────────────────────────

/// Pull the `TOKEN` cookie value out of the login response headers.
fn extract_token_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == TOKEN_COOKIE)
        .map(|(_, value)| value.trim().to_owned())
}

/// Decode the `csrfToken` claim from the session token's JWT payload.
fn decode_csrf_claim(token: &str) -> Result<String, Error> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| malformed_token("token is not a three-segment JWT"))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| malformed_token(&format!("payload is not base64url: {e}")))?;

    let claims: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| malformed_token(&format!("payload is not JSON: {e}")))?;

    claims
        .get(CSRF_CLAIM)
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .ok_or_else(|| malformed_token(&format!("payload carries no {CSRF_CLAIM} claim")))
}

fn malformed_token(detail: &str) -> Error {
    Error::Authentication {
        message: format!("session token rejected: {detail}"),
    }
}

fn header_value(value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|e| Error::Authentication {
        message: format!("credential material is not a valid header value: {e}"),
    })
}

// ── Envelope parsing ─────────────────────────────────────────────────

/// Parse the `{ meta, data }` envelope, returning `data` on success or
/// an [`Error::Api`] when `meta.rc != "ok"`.
async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Vec<T>, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication {
            message: "session expired or invalid credentials".into(),
        });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            message: format!("HTTP {status}: {}", preview(&body)),
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;

    let envelope: ApiResponse<T> =
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })?;

    match envelope.meta.rc.as_str() {
        "ok" => Ok(envelope.data),
        _ => Err(Error::Api {
            message: envelope
                .meta
                .msg
                .unwrap_or_else(|| format!("rc={}", envelope.meta.rc)),
        }),
    }
}

/// First 200 bytes of a body, on a char boundary, for error messages.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
