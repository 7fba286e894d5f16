use serde::Deserialize;
use service_core::error::AppError;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub oauth: OAuthSettings,
    pub contracts_api: ContractsApiSettings,
    #[serde(default)]
    pub demo: DemoSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Mark the session cookie `Secure`; enable behind HTTPS.
    #[serde(default)]
    pub secure_cookies: bool,
    #[serde(default = "default_session_idle_hours")]
    pub session_idle_hours: i64,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_session_idle_hours() -> i64 {
    24
}

fn default_static_dir() -> String {
    "contract-lookup/static".to_string()
}

/// Public OAuth2 client registration. PKCE replaces the client secret.
#[derive(Deserialize, Clone, Debug)]
pub struct OAuthSettings {
    pub client_id: String,
    /// Authorization endpoint the browser is redirected to.
    pub authorize_url: String,
    /// Token endpoint for the code exchange.
    pub token_url: String,
    /// Must match the registered redirect URI exactly (our `/callback`).
    pub redirect_uri: String,
    #[serde(default = "default_scopes")]
    pub scopes: String,
}

fn default_scopes() -> String {
    "openid profile".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct ContractsApiSettings {
    /// Base path; `/search/contractSummary` and `/search/lines` are appended.
    pub base_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DemoSettings {
    /// Simulated latency before fixtures are returned.
    #[serde(default = "default_demo_latency_ms")]
    pub latency_ms: u64,
    #[serde(default)]
    pub enabled_by_default: bool,
}

fn default_demo_latency_ms() -> u64 {
    800
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            latency_ms: default_demo_latency_ms(),
            enabled_by_default: false,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let configuration_directory = service_core::config::configuration_directory("contract-lookup")?;
    service_core::config::load(&configuration_directory)
}
