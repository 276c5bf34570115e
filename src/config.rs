//! Build-time settings for the browser bundle.
//!
//! Values come from `option_env!` when `trunk build` runs, so a deployment can
//! point the contact form at its own relay without touching the source.

use url::Url;

/// Reserved `.invalid` host, used when `CONTACT_RELAY_URL` is unset or invalid.
pub const PLACEHOLDER_CONTACT_RELAY_URL: &str = "https://relay.example.invalid/";
pub const DEFAULT_ASSET_BASE: &str = "/assets";

/// Fixed header height used when centring a section under the header.
pub const HEADER_HEIGHT: f64 = 100.0;
/// Scroll offset past which the header switches to its `scrolled` look.
pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;

pub const FADE_IN_THRESHOLD: f64 = 0.1;
pub const SECTION_ROOT_MARGIN: &str = "-30% 0px -70% 0px";

pub const PARTICLES_PER_BURST: usize = 18;
pub const PARTICLE_FADE_DELAY_MS: u32 = 10;
pub const PARTICLE_LIFETIME_MS: u32 = 700;
pub const PARTICLE_MIN_RADIUS: f64 = 40.0;
pub const PARTICLE_RADIUS_SPREAD: f64 = 20.0;
/// `None` keeps bursts unbounded; `Some(n)` evicts the oldest live burst past `n`.
pub const PARTICLE_MAX_LIVE_BURSTS: Option<usize> = None;

pub const CAROUSEL_COPIES: usize = 3;
pub const CAROUSEL_FALLBACK_GAP_PX: f64 = 32.0;
pub const CAROUSEL_SPEED_PX_PER_SECOND: f64 = 32.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientLogLevel {
    Debug,
    Info,
    Warn,
}

impl ClientLogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub contact_relay_url: String,
    pub asset_base: String,
    pub log_level: ClientLogLevel,
}

impl SiteConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("CONTACT_RELAY_URL"),
            option_env!("SITE_ASSET_BASE"),
            option_env!("SITE_LOG_LEVEL"),
        )
    }

    fn from_values(relay: Option<&str>, asset_base: Option<&str>, log_level: Option<&str>) -> Self {
        let contact_relay_url = relay
            .and_then(parse_http_url)
            .map(|url| url.to_string())
            .unwrap_or_else(|| PLACEHOLDER_CONTACT_RELAY_URL.to_string());

        let asset_base = asset_base
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ASSET_BASE.to_string());

        let log_level = log_level
            .and_then(ClientLogLevel::parse)
            .unwrap_or(ClientLogLevel::Info);

        Self {
            contact_relay_url,
            asset_base,
            log_level,
        }
    }

    pub fn relay_configured(&self) -> bool {
        self.contact_relay_url != PLACEHOLDER_CONTACT_RELAY_URL
    }

    pub fn asset(&self, relative: &str) -> String {
        format!("{}/{}", self.asset_base, relative.trim_start_matches('/'))
    }
}

fn parse_http_url(value: &str) -> Option<Url> {
    let parsed = Url::parse(value.trim()).ok()?;

    if (parsed.scheme() == "http" || parsed.scheme() == "https") && parsed.host_str().is_some() {
        Some(parsed)
    } else {
        None
    }
}
