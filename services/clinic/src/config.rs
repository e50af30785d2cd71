use anyhow::Context as _;

/// Clinic service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ClinicConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens. Env var: `SESSION_SECRET`.
    pub session_secret: String,
    /// Externally reachable base URL used to build reset links (e.g. "https://clinic.example.com").
    pub public_base_url: String,
    /// Optional cookie domain attribute. Host-only cookie when unset.
    pub cookie_domain: Option<String>,
    /// Directory holding report attachments (default "uploads"). Env var: `UPLOAD_DIR`.
    pub upload_dir: String,
    /// TCP port to listen on (default 5000). Env var: `CLINIC_PORT`.
    pub clinic_port: u16,
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

impl ClinicConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            session_secret: required("SESSION_SECRET")?,
            public_base_url: required("PUBLIC_BASE_URL")?,
            cookie_domain: std::env::var("COOKIE_DOMAIN")
                .ok()
                .filter(|v| !v.is_empty()),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_owned()),
            clinic_port: std::env::var("CLINIC_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        })
    }
}
