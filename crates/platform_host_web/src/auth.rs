//! Anonymous sign-in over the Identity Toolkit REST API.
//!
//! The credential (uid, id token, refresh token) is kept in memory and mirrored into
//! `localStorage`, so a reload restores the same anonymous user instead of minting a new one.

use std::{cell::RefCell, rc::Rc};

use platform_host::{
    AuthFuture, AuthService, BackendConfig, Listener, ListenerRegistry, Session, Subscription,
};
use serde::{Deserialize, Serialize};

use crate::{
    http::{self, HttpRequest, Method, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE},
    local_store::LocalSlot,
    timers::unix_time_ms_now,
};

const SIGN_UP_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=";
const REFRESH_URL: &str = "https://securetoken.googleapis.com/v1/token?key=";
/// Tokens are refreshed this long before they expire.
const REFRESH_MARGIN_MS: u64 = 60_000;
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3_600;

/// Returns the `localStorage` key for the credential of `app_namespace`.
pub fn credential_storage_key(app_namespace: &str) -> String {
    format!("{app_namespace}.auth.credential.v1")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest {
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

fn lifetime_ms(expires_in: Option<&str>) -> u64 {
    expires_in
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS)
        .saturating_mul(1_000)
}

/// Persisted anonymous credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    /// User id.
    pub uid: String,
    /// Bearer token for document requests.
    pub id_token: String,
    /// Long-lived token exchanged for fresh id tokens.
    pub refresh_token: String,
    /// Id-token expiry, in Unix milliseconds.
    pub expires_at_ms: u64,
}

impl StoredCredential {
    fn from_sign_up(response: SignUpResponse, now_ms: u64) -> Self {
        Self {
            expires_at_ms: now_ms + lifetime_ms(response.expires_in.as_deref()),
            uid: response.local_id,
            id_token: response.id_token,
            refresh_token: response.refresh_token,
        }
    }

    fn refreshed(&self, response: RefreshResponse, now_ms: u64) -> Self {
        Self {
            uid: self.uid.clone(),
            expires_at_ms: now_ms + lifetime_ms(response.expires_in.as_deref()),
            id_token: response.id_token,
            refresh_token: response.refresh_token,
        }
    }

    /// Returns whether the id token is expired or about to expire at `now_ms`.
    pub fn needs_refresh(&self, now_ms: u64) -> bool {
        now_ms.saturating_add(REFRESH_MARGIN_MS) >= self.expires_at_ms
    }

    fn session(&self) -> Session {
        Session::new(self.uid.clone())
    }
}

struct AuthInner {
    api_key: String,
    slot: LocalSlot,
    credential: RefCell<Option<StoredCredential>>,
    listeners: ListenerRegistry<Option<Session>>,
}

#[derive(Clone)]
/// Browser auth service for anonymous users.
pub struct WebAuthService {
    inner: Rc<AuthInner>,
}

impl std::fmt::Debug for WebAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebAuthService")
            .field("slot", &self.inner.slot.key())
            .field("session", &self.current_session())
            .finish()
    }
}

impl WebAuthService {
    /// Creates the service and restores any credential saved for the configured namespace.
    pub fn new(config: &BackendConfig) -> Self {
        let slot = LocalSlot::new(credential_storage_key(&config.app_namespace));
        let restored = slot.load::<StoredCredential>();
        Self {
            inner: Rc::new(AuthInner {
                api_key: config.api_key.clone(),
                slot,
                credential: RefCell::new(restored),
                listeners: ListenerRegistry::default(),
            }),
        }
    }

    fn credential(&self) -> Option<StoredCredential> {
        self.inner.credential.borrow().clone()
    }

    fn store(&self, credential: Option<StoredCredential>) {
        // A failed write only loses persistence across reloads; memory stays authoritative.
        let _ = match &credential {
            Some(credential) => self.inner.slot.save(credential),
            None => self.inner.slot.clear(),
        };
        let session = credential.as_ref().map(StoredCredential::session);
        let changed = self.current_session() != session;
        *self.inner.credential.borrow_mut() = credential;
        if changed {
            self.inner.listeners.emit(session);
        }
    }

    async fn sign_up(&self) -> Result<StoredCredential, String> {
        let url = format!("{SIGN_UP_URL}{}", self.inner.api_key);
        let body = serde_json::to_string(&SignUpRequest {
            return_secure_token: true,
        })
        .map_err(|e| e.to_string())?;
        let response =
            http::send(HttpRequest::with_body(Method::Post, &url, body, JSON_CONTENT_TYPE))
                .await?;
        if !response.is_success() {
            return Err(response.error_message());
        }
        let parsed: SignUpResponse =
            serde_json::from_str(&response.body).map_err(|e| format!("sign-up response: {e}"))?;
        Ok(StoredCredential::from_sign_up(parsed, unix_time_ms_now()))
    }

    async fn refresh(&self, credential: &StoredCredential) -> Result<StoredCredential, String> {
        let url = format!("{REFRESH_URL}{}", self.inner.api_key);
        let body = format!(
            "grant_type=refresh_token&refresh_token={}",
            credential.refresh_token
        );
        let response =
            http::send(HttpRequest::with_body(Method::Post, &url, body, FORM_CONTENT_TYPE))
                .await?;
        if !response.is_success() {
            return Err(response.error_message());
        }
        let parsed: RefreshResponse =
            serde_json::from_str(&response.body).map_err(|e| format!("token response: {e}"))?;
        Ok(credential.refreshed(parsed, unix_time_ms_now()))
    }

    /// Returns a valid id token, refreshing it first when it is close to expiry.
    ///
    /// # Errors
    ///
    /// Returns an error when no user is signed in or the refresh request fails.
    pub async fn id_token(&self) -> Result<String, String> {
        let credential = self
            .credential()
            .ok_or_else(|| "no signed-in user".to_string())?;
        if !credential.needs_refresh(unix_time_ms_now()) {
            return Ok(credential.id_token);
        }
        let refreshed = self.refresh(&credential).await?;
        let token = refreshed.id_token.clone();
        self.store(Some(refreshed));
        Ok(token)
    }
}

impl AuthService for WebAuthService {
    fn sign_in_anonymously<'a>(&'a self) -> AuthFuture<'a, Result<Session, String>> {
        Box::pin(async move {
            if let Some(restored) = self.credential() {
                if !restored.needs_refresh(unix_time_ms_now()) {
                    return Ok(restored.session());
                }
                if let Ok(refreshed) = self.refresh(&restored).await {
                    let session = refreshed.session();
                    self.store(Some(refreshed));
                    return Ok(session);
                }
            }
            let credential = self.sign_up().await?;
            let session = credential.session();
            self.store(Some(credential));
            Ok(session)
        })
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.store(None);
            Ok(())
        })
    }

    fn current_session(&self) -> Option<Session> {
        self.inner
            .credential
            .borrow()
            .as_ref()
            .map(StoredCredential::session)
    }

    fn on_auth_state_changed(&self, listener: Listener<Option<Session>>) -> Subscription {
        listener(self.current_session());
        self.inner.listeners.subscribe(listener)
    }
}
