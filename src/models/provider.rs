use serde::{Deserialize, Serialize};

/// Deployment target code as exposed by the deployments catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provider {
    Aws,
    Gcp,
    Azure,
    DigitalOcean,
    Hetzner,
    /// Local machines reached over SSH; selects the inventory route.
    Local,
    Other(String),
}

impl Provider {
    pub fn code(&self) -> &str {
        match self {
            Provider::Aws => "aws",
            Provider::Gcp => "gcp",
            Provider::Azure => "azure",
            Provider::DigitalOcean => "digitalocean",
            Provider::Hetzner => "hetzner",
            Provider::Local => "local",
            Provider::Other(code) => code,
        }
    }

    /// Default SSH user of the provider's stock images
    pub fn ansible_user(&self) -> Option<&'static str> {
        match self {
            Provider::Aws => Some("ubuntu"),
            Provider::Gcp => Some("root"),
            Provider::Azure => Some("azureadmin"),
            Provider::DigitalOcean => Some("root"),
            Provider::Hetzner => Some("root"),
            Provider::Local | Provider::Other(_) => None,
        }
    }

    pub fn supports_spot_instances(&self) -> bool {
        matches!(self, Provider::Aws | Provider::Gcp | Provider::Azure)
    }

    /// Providers whose object storage needs explicit S3 credentials for backups
    pub fn needs_s3_credentials(&self) -> bool {
        matches!(self, Provider::DigitalOcean | Provider::Hetzner)
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Provider::Local)
    }
}

impl From<String> for Provider {
    fn from(code: String) -> Self {
        match code.as_str() {
            "aws" => Provider::Aws,
            "gcp" => Provider::Gcp,
            "azure" => Provider::Azure,
            "digitalocean" => Provider::DigitalOcean,
            "hetzner" => Provider::Hetzner,
            "local" => Provider::Local,
            _ => Provider::Other(code),
        }
    }
}

impl From<&str> for Provider {
    fn from(code: &str) -> Self {
        Provider::from(code.to_string())
    }
}

impl From<Provider> for String {
    fn from(provider: Provider) -> Self {
        provider.code().to_string()
    }
}

/// Selected entry of the deployments catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub code: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Provider> for ProviderInfo {
    fn from(code: Provider) -> Self {
        ProviderInfo {
            code,
            description: None,
        }
    }
}
