use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};
use tokio::sync::RwLock;

use crate::error::ProviderError;
use crate::model::CurrentUser;

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "sid";

/// Key-value session persistence: create on login, read per request,
/// destroy on logout. Implementations own the token format.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session for the user and returns the opaque token the
    /// client carries in its cookie.
    async fn create(&self, user: CurrentUser) -> Result<String, ProviderError>;
    /// Resolves a token to its session's user, if the token is valid and
    /// the session is live.
    async fn read(&self, token: &str) -> Option<CurrentUser>;
    /// Destroys the session. Once this returns, the token no longer
    /// resolves.
    async fn destroy(&self, token: &str);
}

/// In-process session store. Tokens are random ids signed with
/// HMAC-SHA256, so a forged cookie is rejected before the map lookup.
pub struct MemorySessionStore {
    key: hmac::Key,
    rng: SystemRandom,
    sessions: RwLock<HashMap<String, CurrentUser>>,
}

impl MemorySessionStore {
    pub fn new(secret: &str) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes()),
            rng: SystemRandom::new(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn sign(&self, id: &str) -> String {
        let tag = hmac::sign(&self.key, id.as_bytes());
        format!("{}.{}", id, URL_SAFE_NO_PAD.encode(tag.as_ref()))
    }

    /// Returns the session id when the token's signature checks out.
    fn verify<'a>(&self, token: &'a str) -> Option<&'a str> {
        let (id, tag) = token.split_once('.')?;
        let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;
        hmac::verify(&self.key, id.as_bytes(), &tag).ok()?;
        Some(id)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user: CurrentUser) -> Result<String, ProviderError> {
        let mut raw = [0u8; 24];
        self.rng
            .fill(&mut raw)
            .map_err(|_| ProviderError::Store("failed to generate a session token".to_string()))?;

        let id = URL_SAFE_NO_PAD.encode(raw);
        self.sessions.write().await.insert(id.clone(), user);
        Ok(self.sign(&id))
    }

    async fn read(&self, token: &str) -> Option<CurrentUser> {
        let id = self.verify(token)?;
        self.sessions.read().await.get(id).cloned()
    }

    async fn destroy(&self, token: &str) {
        if let Some(id) = self.verify(token) {
            self.sessions.write().await.remove(id);
        }
    }
}

/// Pulls the session token out of a request's Cookie header.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Set-Cookie value that installs a session token.
pub fn install_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly")
}

/// Set-Cookie value that clears the session cookie.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "acct-1".to_string(),
            email: "a@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_read_roundtrips() {
        let store = MemorySessionStore::new("secret");
        let token = store.create(user()).await.unwrap();

        let resolved = store.read(&token).await.unwrap();
        assert_eq!(resolved.id, "acct-1");
        assert_eq!(resolved.email, "a@example.com");
    }

    #[tokio::test]
    async fn destroy_invalidates_the_token() {
        let store = MemorySessionStore::new("secret");
        let token = store.create(user()).await.unwrap();

        store.destroy(&token).await;
        assert!(store.read(&token).await.is_none());
    }

    #[tokio::test]
    async fn tampered_tokens_do_not_resolve() {
        let store = MemorySessionStore::new("secret");
        let token = store.create(user()).await.unwrap();

        let (id, _) = token.split_once('.').unwrap();
        assert!(store.read(id).await.is_none());
        assert!(store.read(&format!("{id}.AAAA")).await.is_none());

        // A token minted under a different key is rejected too.
        let other = MemorySessionStore::new("other-secret");
        assert!(other.read(&token).await.is_none());
    }

    #[test]
    fn session_token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; sid=abc.def; lang=en"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc.def"));

        let mut missing = HeaderMap::new();
        missing.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_token(&missing), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }
}
