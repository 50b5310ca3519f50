//! Client configuration.
//!
//! Native builds read environment variables; browser builds take the server
//! origin from the page they were loaded from.

use letterwheel_shared::{CircleGeometry, Language, TransportError, WS_PATH};
use url::Url;

use crate::ws::ReconnectPolicy;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Settings that apply to every session started by this client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the game authority, e.g. `https://play.example.com`.
    pub server_url: String,
    pub reconnect: ReconnectPolicy,
    pub circle: CircleGeometry,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            reconnect: ReconnectPolicy::default(),
            circle: CircleGeometry::default(),
        }
    }
}

/// Everything one session needs. Fixed once the language is chosen.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ws_url: String,
    pub language: Language,
    /// Sent in INIT and as the session cookie (native only).
    pub session_id: Option<String>,
    pub reconnect: ReconnectPolicy,
    pub circle: CircleGeometry,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LETTERWHEEL_SERVER_URL`: authority origin (default: "http://localhost:8080")
    /// - `LETTERWHEEL_RECONNECT_MS`: delay between reconnect attempts (default: 2000)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> anyhow::Result<Self> {
        use anyhow::Context;

        let mut config = Self::default();

        if let Ok(server_url) = std::env::var("LETTERWHEEL_SERVER_URL") {
            config.server_url = server_url;
        }
        if let Ok(delay) = std::env::var("LETTERWHEEL_RECONNECT_MS") {
            let delay_ms = delay
                .trim()
                .parse::<u32>()
                .with_context(|| format!("LETTERWHEEL_RECONNECT_MS is not a number: {delay}"))?;
            config.reconnect = ReconnectPolicy::fixed(delay_ms);
        }

        // Fail early on an unusable origin
        config.ws_url()?;
        Ok(config)
    }

    /// Configuration for the page this app was served from.
    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> anyhow::Result<Self> {
        let location = web_sys::window()
            .ok_or_else(|| anyhow::anyhow!("no window"))?
            .location();
        let protocol = location
            .protocol()
            .map_err(|e| anyhow::anyhow!("location.protocol: {:?}", e))?;
        let host = location
            .host()
            .map_err(|e| anyhow::anyhow!("location.host: {:?}", e))?;

        Ok(Self {
            server_url: format!("{}//{}", protocol, host),
            ..Self::default()
        })
    }

    pub fn ws_url(&self) -> anyhow::Result<String> {
        Ok(ws_url_for_origin(&self.server_url)?)
    }

    pub fn session(
        &self,
        language: Language,
        session_id: Option<String>,
    ) -> anyhow::Result<SessionConfig> {
        Ok(SessionConfig {
            ws_url: self.ws_url()?,
            language,
            session_id,
            reconnect: self.reconnect.clone(),
            circle: self.circle,
        })
    }
}

/// WebSocket endpoint for a page origin: secure pages get `wss`, plain ones
/// `ws`, and the path is always [`WS_PATH`].
pub fn ws_url_for_origin(origin: &str) -> Result<String, TransportError> {
    let mut url = Url::parse(origin).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => {
            return Err(TransportError::InvalidUrl(format!(
                "unsupported scheme {}",
                other
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| TransportError::InvalidUrl(format!("cannot use scheme {}", scheme)))?;
    url.set_path(WS_PATH);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_url_follows_the_page_scheme() {
        assert_eq!(
            ws_url_for_origin("http://localhost:8080").unwrap(),
            "ws://localhost:8080/ws"
        );
        assert_eq!(
            ws_url_for_origin("https://play.example.com/game?x=1#top").unwrap(),
            "wss://play.example.com/ws"
        );
        assert_eq!(
            ws_url_for_origin("wss://play.example.com:9443").unwrap(),
            "wss://play.example.com:9443/ws"
        );
    }

    #[test]
    fn ws_url_rejects_other_schemes() {
        assert!(matches!(
            ws_url_for_origin("ftp://example.com"),
            Err(TransportError::InvalidUrl(_))
        ));
        assert!(matches!(
            ws_url_for_origin("not a url"),
            Err(TransportError::InvalidUrl(_))
        ));
    }

    #[test]
    fn session_carries_language_and_policy() {
        let config = ClientConfig::default();
        let session = config
            .session(Language::Tr, Some("abc".to_string()))
            .unwrap();
        assert_eq!(session.ws_url, "ws://localhost:8080/ws");
        assert_eq!(session.language, Language::Tr);
        assert_eq!(session.reconnect.delay_ms, 2000);
        assert_eq!(session.reconnect.max_attempts, 0);
    }
}
