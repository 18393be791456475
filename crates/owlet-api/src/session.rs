// Authenticated session against the Owlet cloud.
//
// Logs in once against the identity endpoint, holds the access/refresh
// token pair, and mediates every device-data call through
// `run_authorized`: inject the current access token, catch a 401, refresh
// once, retry once. The token pair lives behind an async mutex owned by
// the session; nothing else reads or writes it.

use std::fmt;
use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

// Production endpoints and the application keys the vendor app ships with.
const AYLA_USER_URL: &str = "https://user-field.aylanetworks.com/";
const AYLA_ADS_URL: &str = "https://ads-field.aylanetworks.com/apiv1/";
const OWLET_APP_ID: &str = "OWL-id";
const OWLET_APP_SECRET: &str = "OWL-4163742";

/// Endpoint and application settings for a [`Session`].
///
/// Defaults target the production Ayla cloud; tests override the base URLs
/// to point at a mock server.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Identity endpoint base (sign-in and token refresh).
    pub user_url: Url,
    /// Device-data endpoint base (devices, properties, datapoints).
    pub ads_url: Url,
    pub app_id: String,
    pub app_secret: String,
    pub transport: TransportConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_url: Url::parse(AYLA_USER_URL).expect("valid endpoint"),
            ads_url: Url::parse(AYLA_ADS_URL).expect("valid endpoint"),
            app_id: OWLET_APP_ID.to_owned(),
            app_secret: OWLET_APP_SECRET.to_owned(),
            transport: TransportConfig::default(),
        }
    }
}

/// Response shape shared by the sign-in and refresh endpoints.
#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
}

/// The mutable token state. Replaced wholesale on every refresh.
struct TokenPair {
    access: SecretString,
    refresh: SecretString,
}

impl From<LoginResponse> for TokenPair {
    fn from(resp: LoginResponse) -> Self {
        Self {
            access: resp.access_token.into(),
            refresh: resp.refresh_token.into(),
        }
    }
}

/// An authenticated session against the Owlet cloud.
///
/// Created by [`Session::connect`], which performs the login. All data
/// operations ([`list_devices`](Session::list_devices),
/// [`get_properties`](Session::get_properties),
/// [`set_base_station`](Session::set_base_station)) go through
/// [`run_authorized`](Session::run_authorized) and transparently recover
/// from one token expiry per call.
pub struct Session {
    http: reqwest::Client,
    user_url: Url,
    ads_url: Url,
    tokens: Mutex<TokenPair>,
}

impl Session {
    /// Log in with email and password and return a live session.
    ///
    /// `POST {user}/users/sign_in.json` with the application keys from
    /// `config`. A non-2xx response maps to [`Error::Authentication`];
    /// an unreachable endpoint surfaces as [`Error::Transport`]. There is
    /// no retry at this stage.
    pub async fn connect(
        config: SessionConfig,
        email: &str,
        password: &SecretString,
    ) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        let user_url = with_trailing_slash(config.user_url);
        let ads_url = with_trailing_slash(config.ads_url);

        let url = user_url.join("users/sign_in.json")?;
        debug!("logging in at {url}");

        let body = json!({
            "user": {
                "email": email,
                "password": password.expose_secret(),
                "application": {
                    "app_id": config.app_id,
                    "app_secret": config.app_secret,
                },
            }
        });

        let resp = http
            .post(url)
            .json(&body)
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

        let login: LoginResponse = parse_json(resp).await?;
        debug!("login successful");

        Ok(Self {
            http,
            user_url,
            ads_url,
            tokens: Mutex::new(login.into()),
        })
    }

    /// Run one authorized call, refreshing the token pair once on 401.
    ///
    /// `call` receives the `Authorization` header value
    /// (`auth_token <access>`) and performs one outbound request. On
    /// success its result is returned unchanged. On a 401 the session
    /// refreshes its tokens and retries exactly once; a second 401 maps to
    /// [`Error::SessionExpired`]. Every other failure propagates
    /// unmodified. At most one refresh attempt happens per failed call.
    pub async fn run_authorized<T, F, Fut>(&self, call: F) -> Result<T, Error>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let mut retried = false;
        loop {
            let access = self.access_token().await;
            match call(format!("auth_token {access}")).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_unauthorized() => {
                    if retried {
                        return Err(Error::SessionExpired);
                    }
                    self.refresh_tokens(&access).await?;
                    retried = true;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Snapshot of the current access token.
    async fn access_token(&self) -> String {
        self.tokens.lock().await.access.expose_secret().to_owned()
    }

    /// Exchange the refresh token for a new pair.
    ///
    /// Refreshes are serialized: the token mutex is held across the
    /// round-trip, and a caller that finds the stored access token no
    /// longer equals the one its request failed with skips the network
    /// call entirely -- a concurrent caller already refreshed. Concurrent
    /// 401s therefore trigger exactly one refresh.
    async fn refresh_tokens(&self, stale_access: &str) -> Result<(), Error> {
        let mut tokens = self.tokens.lock().await;
        if tokens.access.expose_secret() != stale_access {
            debug!("tokens already refreshed by a concurrent call");
            return Ok(());
        }

        let url = self.user_url.join("users/refresh_token.json")?;
        debug!("refreshing tokens at {url}");

        let body = json!({
            "user": { "refresh_token": tokens.refresh.expose_secret() }
        });

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            // The refresh token itself was rejected; a new login is the
            // only way forward.
            return Err(Error::SessionExpired);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: format!("token refresh failed: {body}"),
            });
        }

        let refreshed: LoginResponse = parse_json(resp).await?;
        *tokens = refreshed.into();
        debug!("token pair replaced");
        Ok(())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// The device-data endpoint base URL (always ends with `/`).
    pub(crate) fn ads_url(&self) -> &Url {
        &self.ads_url
    }

    /// Authorized GET returning deserialized JSON.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        auth: String,
    ) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(Error::Transport)?;

        let resp = check_status(resp).await?;
        parse_json(resp).await
    }

    /// Authorized POST with a JSON body, response discarded.
    pub(crate) async fn post_json<B: serde::Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        auth: String,
    ) -> Result<(), Error> {
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        check_status(resp).await.map(drop)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_url", &self.user_url.as_str())
            .field("ads_url", &self.ads_url.as_str())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Map a non-success response to `Error::Api`, preserving the status.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(Error::Api {
        status: status.as_u16(),
        message: if body.is_empty() {
            status.to_string()
        } else {
            body
        },
    })
}

/// Deserialize a JSON body, keeping the raw text around for diagnostics.
async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// Joining relative paths drops the last segment of a base URL that lacks
/// a trailing slash (`/apiv1` + `devices.json` -> `/devices.json`), so the
/// session normalizes both bases up front.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
