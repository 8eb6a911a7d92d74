use std::fs;
use std::path::{Path, PathBuf};

use crate::io::repos::{
    PostRepository, ProfileStore, TagRepository, UserRepository, USERNAME_KEY,
};
use crate::io::store::{Store, StoreError};
use crate::model::config::SiteConfig;

/// Name of the site data directory, discovered by walking up from cwd.
pub const SITE_DIR_NAME: &str = "portico";

/// Error type for site loading
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("not a portico site: no portico/site.toml found")]
    NotASite,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse site.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A fully loaded site: configuration, the persistent store, and every
/// repository, constructed once per invocation and passed by reference.
///
/// Nothing here re-reads the store after load; mutations go through the
/// repositories, which persist write-through.
pub struct Site {
    pub root: PathBuf,
    pub site_dir: PathBuf,
    pub config: SiteConfig,
    pub store: Store,
    pub posts: PostRepository,
    pub tags: TagRepository,
    pub users: UserRepository,
    pub profile: ProfileStore,
}

impl Site {
    /// The currently logged-in username ("" when logged out).
    pub fn current_username(&self) -> Result<String, StoreError> {
        Ok(self.store.read::<String>(USERNAME_KEY)?.unwrap_or_default())
    }

    /// Persist `username` as the logged-in session (empty string logs out,
    /// mirroring how the site clears its stored name).
    pub fn set_username(&self, username: &str) -> Result<(), StoreError> {
        self.store.write(USERNAME_KEY, &username.to_string())
    }

    /// Whether the current session belongs to the site's admin.
    pub fn is_admin_session(&self) -> Result<bool, StoreError> {
        let username = self.current_username()?;
        Ok(self.config.is_admin(&username))
    }
}

/// Discover the site by walking up from the given directory, looking for a
/// `portico/` subdirectory holding `site.toml`.
pub fn discover_site(start: &Path) -> Result<PathBuf, SiteError> {
    let mut current = start.to_path_buf();
    loop {
        let site_dir = current.join(SITE_DIR_NAME);
        if site_dir.is_dir() && site_dir.join("site.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(SiteError::NotASite);
        }
    }
}

/// Load a complete site from the given root directory.
pub fn load_site(root: &Path) -> Result<Site, SiteError> {
    let site_dir = root.join(SITE_DIR_NAME);
    if !site_dir.is_dir() {
        return Err(SiteError::NotASite);
    }

    let config_path = site_dir.join("site.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| SiteError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: SiteConfig = toml::from_str(&config_text)?;

    let store = Store::new(site_dir.join("store"));
    let posts = PostRepository::load(&store)?;
    let tags = TagRepository::load(&store)?;
    let users = UserRepository::load(&store)?;
    let profile = ProfileStore::load(&store)?;

    Ok(Site {
        root: root.to_path_buf(),
        site_dir,
        config,
        store,
        posts,
        tags,
        users,
        profile,
    })
}
