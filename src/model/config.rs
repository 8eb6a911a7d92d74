use serde::{Deserialize, Serialize};

/// Configuration from site.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Display name for the site.
    pub name: String,
    /// The one username allowed to create and edit content. Everyone else
    /// gets a read-only view.
    #[serde(default = "default_admin")]
    pub admin: String,
}

/// Default: see src/templates/site.toml
fn default_admin() -> String {
    "Algor".to_string()
}

impl SiteConfig {
    /// Whether `username` is the privileged identity for this site.
    pub fn is_admin(&self, username: &str) -> bool {
        !username.is_empty() && username == self.site.admin
    }
}
