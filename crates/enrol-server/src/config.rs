use serde::{Deserialize, Serialize};

fn default_max_connections() -> u32 {
    10
}

/// User store backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreConfig {
    #[default]
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "postgres")]
    Postgres {
        url: String,
        #[serde(default = "default_max_connections")]
        max_connections: u32,
    },
}

/// Which value the token's `sub` claim carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectClaim {
    /// The registrant's first name (wire-compatible default)
    #[default]
    FirstName,
    /// The derived user id
    UserId,
}

fn default_token_ttl() -> u64 {
    300
}

/// Token and identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub jwt_secret: String,
    /// HMAC key used to derive user ids from emails
    pub id_salt: String,
    /// Nominal token lifetime in seconds (default: 300)
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Reject tokens past `exp` (default: false)
    #[serde(default)]
    pub validate_lifetime: bool,
    #[serde(default)]
    pub subject: SubjectClaim,
}

impl AuthConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jwt_secret.is_empty() {
            anyhow::bail!("auth.jwt_secret must not be empty");
        }
        if self.id_salt.is_empty() {
            anyhow::bail!("auth.id_salt must not be empty");
        }
        if self.issuer.is_empty() || self.audience.is_empty() {
            anyhow::bail!("auth.issuer and auth.audience must not be empty");
        }
        Ok(())
    }
}

/// Server configuration - loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub listen: String, // "0.0.0.0:8080"
    #[serde(default)]
    pub store: StoreConfig,
    pub auth: AuthConfig,
}

/// Load server config from a YAML file with ENROL__ env var overrides.
pub fn load_config(path: &str) -> anyhow::Result<ServerConfig> {
    use anyhow::Context;
    let config: ServerConfig = config::Config::builder()
        .add_source(config::File::new(path, config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("ENROL")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to build config from: {}", path))?
        .try_deserialize()
        .with_context(|| format!("Failed to deserialize config from: {}", path))?;
    config.auth.validate()?;
    Ok(config)
}
