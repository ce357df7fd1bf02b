/// Credentials and endpoints for the external services.
///
/// Integrations are enabled only when all three credentials are present.
#[derive(Debug, Clone, Default)]
pub struct IntegrationConfig {
    pub hubspot_access_token: Option<String>,
    pub gong_access_token: Option<String>,
    pub openai_api_key: Option<String>,
    /// Chat model name (default: `gpt-4`).
    pub openai_model: String,
    pub hubspot_base_url: Option<String>,
    pub gong_base_url: Option<String>,
    pub openai_base_url: Option<String>,
}

/// Which credentials are configured, as reported by the health route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ServiceAvailability {
    pub hubspot: bool,
    pub gong: bool,
    pub openai: bool,
}

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl IntegrationConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var                | Default  |
    /// |------------------------|----------|
    /// | `HUBSPOT_ACCESS_TOKEN` | unset    |
    /// | `GONG_ACCESS_TOKEN`    | unset    |
    /// | `OPENAI_API_KEY`       | unset    |
    /// | `OPENAI_MODEL`         | `gpt-4`  |
    /// | `HUBSPOT_BASE_URL`     | public API |
    /// | `GONG_BASE_URL`        | public API |
    /// | `OPENAI_BASE_URL`      | public API |
    pub fn from_env() -> Self {
        Self {
            hubspot_access_token: non_empty_var("HUBSPOT_ACCESS_TOKEN"),
            gong_access_token: non_empty_var("GONG_ACCESS_TOKEN"),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: non_empty_var("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            hubspot_base_url: non_empty_var("HUBSPOT_BASE_URL"),
            gong_base_url: non_empty_var("GONG_BASE_URL"),
            openai_base_url: non_empty_var("OPENAI_BASE_URL"),
        }
    }

    pub fn availability(&self) -> ServiceAvailability {
        ServiceAvailability {
            hubspot: self.hubspot_access_token.is_some(),
            gong: self.gong_access_token.is_some(),
            openai: self.openai_api_key.is_some(),
        }
    }

    /// Whether every credential needed by the integration service is set.
    pub fn is_complete(&self) -> bool {
        let a = self.availability();
        a.hubspot && a.gong && a.openai
    }
}
