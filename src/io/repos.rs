use indexmap::IndexMap;

use crate::io::store::{Store, StoreError};
use crate::model::content::Profile;
use crate::model::post::Post;

/// Store keys, matching the names the site uses in browser storage.
pub const BLOGS_KEY: &str = "blogs";
pub const TAGS_KEY: &str = "tags";
pub const USERS_KEY: &str = "users";
pub const PROFILE_KEY: &str = "profile";
pub const PROFILE_PIC_KEY: &str = "profilePic";
pub const USERNAME_KEY: &str = "username";

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("post index out of range: {0}")]
    OutOfRange(usize),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse a fixture compiled into the binary. Fixtures are validated by the
/// test suite, so a failure here is a build defect, not a runtime state.
fn bundled<T: serde::de::DeserializeOwned>(name: &str, json: &str) -> T {
    serde_json::from_str(json)
        .unwrap_or_else(|e| panic!("bundled fixture {} is malformed: {}", name, e))
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// The in-memory post collection, loaded once and persisted write-through.
///
/// A persisted `blogs` blob fully replaces the bundled default (no merge).
/// Every successful mutation re-serializes the whole collection and bumps
/// `revision`, which the list filter uses to invalidate cached orderings.
#[derive(Debug)]
pub struct PostRepository {
    posts: Vec<Post>,
    revision: u64,
}

impl PostRepository {
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        let posts = match store.read::<Vec<Post>>(BLOGS_KEY)? {
            Some(stored) => stored,
            None => bundled("posts.json", include_str!("../assets/posts.json")),
        };
        Ok(PostRepository { posts, revision: 0 })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    /// Bumped on every mutation; cached filter results key on this.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append a new post and persist the whole collection.
    /// Returns the new post's index.
    pub fn append(&mut self, store: &Store, post: Post) -> Result<usize, RepoError> {
        self.posts.push(post);
        self.revision += 1;
        self.persist(store)?;
        Ok(self.posts.len() - 1)
    }

    /// Replace the post at `index` and persist the whole collection.
    /// Out of range is an error, not a silent no-op.
    pub fn replace_at(&mut self, store: &Store, index: usize, post: Post) -> Result<(), RepoError> {
        if index >= self.posts.len() {
            return Err(RepoError::OutOfRange(index));
        }
        self.posts[index] = post;
        self.revision += 1;
        self.persist(store)?;
        Ok(())
    }

    fn persist(&self, store: &Store) -> Result<(), StoreError> {
        store.write(BLOGS_KEY, &self.posts)
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// The global list of known tags, used to populate the filter row and to
/// detect when an edit creates a brand-new tag.
#[derive(Debug)]
pub struct TagRepository {
    tags: Vec<String>,
}

impl TagRepository {
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        let tags = match store.read::<Vec<String>>(TAGS_KEY)? {
            Some(stored) => stored,
            None => bundled("tags.json", include_str!("../assets/tags.json")),
        };
        Ok(TagRepository { tags })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add `tag` if it is not already known, persisting on change.
    /// Returns whether the tag was newly added.
    pub fn add_if_absent(&mut self, store: &Store, tag: &str) -> Result<bool, RepoError> {
        if self.contains(tag) {
            return Ok(false);
        }
        self.tags.push(tag.to_string());
        store.write(TAGS_KEY, &self.tags)?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Username → password map. Plaintext on purpose: this gate decides who may
/// edit a personal site, nothing more.
#[derive(Debug)]
pub struct UserRepository {
    users: IndexMap<String, String>,
}

impl UserRepository {
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        let users = match store.read::<IndexMap<String, String>>(USERS_KEY)? {
            Some(stored) => stored,
            None => bundled("users.json", include_str!("../assets/users.json")),
        };
        Ok(UserRepository { users })
    }

    pub fn exists(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn password(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(|s| s.as_str())
    }

    /// Add or overwrite a user and persist the map.
    pub fn add_user(&mut self, store: &Store, username: &str, password: &str) -> Result<(), RepoError> {
        self.users.insert(username.to_string(), password.to_string());
        store.write(USERS_KEY, &self.users)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The header profile blurb, same default/override/persist pattern.
#[derive(Debug)]
pub struct ProfileStore {
    profile: Profile,
}

impl ProfileStore {
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        let profile = match store.read::<Profile>(PROFILE_KEY)? {
            Some(stored) => stored,
            None => bundled("profile.json", include_str!("../assets/profile.json")),
        };
        Ok(ProfileStore { profile })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_interests(&mut self, store: &Store, text: &str) -> Result<(), RepoError> {
        self.profile.interests = text.to_string();
        store.write(PROFILE_KEY, &self.profile)?;
        Ok(())
    }

    pub fn set_plans(&mut self, store: &Store, text: &str) -> Result<(), RepoError> {
        self.profile.plans = text.to_string();
        store.write(PROFILE_KEY, &self.profile)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Static content
// ---------------------------------------------------------------------------

/// The Skills/Experience page content. Read-only; there is no persisted
/// override for this fixture.
pub fn load_skills() -> crate::model::content::SkillBook {
    bundled("skills.json", include_str!("../assets/skills.json"))
}

/// The Education page mark sheets. Read-only, like the skills.
pub fn load_marks() -> crate::model::content::MarkBook {
    bundled("marks.json", include_str!("../assets/marks.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("store"));
        (dir, store)
    }

    // --- Defaults and overrides ---

    #[test]
    fn posts_load_bundled_default_when_store_empty() {
        let (_dir, store) = temp_store();
        let repo = PostRepository::load(&store).unwrap();
        assert!(!repo.is_empty());
        assert_eq!(repo.revision(), 0);
    }

    #[test]
    fn stored_posts_fully_replace_the_default() {
        let (_dir, store) = temp_store();
        let only: Vec<Post> = vec![Post {
            title: "Only".into(),
            date: "2025-01-01".into(),
            tags: vec![],
            body: vec![],
        }];
        store.write(BLOGS_KEY, &only).unwrap();

        let repo = PostRepository::load(&store).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(0).unwrap().title, "Only");
    }

    #[test]
    fn all_bundled_fixtures_parse() {
        let _: Vec<Post> = bundled("posts.json", include_str!("../assets/posts.json"));
        let _: Vec<String> = bundled("tags.json", include_str!("../assets/tags.json"));
        let _: IndexMap<String, String> =
            bundled("users.json", include_str!("../assets/users.json"));
        let _: Profile = bundled("profile.json", include_str!("../assets/profile.json"));
        let _: crate::model::content::SkillBook =
            bundled("skills.json", include_str!("../assets/skills.json"));
        let _: crate::model::content::MarkBook =
            bundled("marks.json", include_str!("../assets/marks.json"));
    }

    // --- Post mutations ---

    #[test]
    fn append_persists_and_bumps_revision() {
        let (_dir, store) = temp_store();
        let mut repo = PostRepository::load(&store).unwrap();
        let before = repo.len();

        let index = repo.append(&store, Post::new_today()).unwrap();
        assert_eq!(index, before);
        assert_eq!(repo.revision(), 1);

        // The whole collection was re-serialized.
        let persisted: Vec<Post> = store.read(BLOGS_KEY).unwrap().unwrap();
        assert_eq!(persisted.len(), before + 1);
    }

    #[test]
    fn replace_at_writes_through() {
        let (_dir, store) = temp_store();
        let mut repo = PostRepository::load(&store).unwrap();

        let mut post = repo.get(0).unwrap().clone();
        post.title = "Rewritten".into();
        repo.replace_at(&store, 0, post).unwrap();

        let persisted: Vec<Post> = store.read(BLOGS_KEY).unwrap().unwrap();
        assert_eq!(persisted[0].title, "Rewritten");
    }

    #[test]
    fn replace_at_out_of_range_is_an_error_and_changes_nothing() {
        let (_dir, store) = temp_store();
        let mut repo = PostRepository::load(&store).unwrap();
        let len = repo.len();

        let result = repo.replace_at(&store, len, Post::new_today());
        assert!(matches!(result, Err(RepoError::OutOfRange(i)) if i == len));
        assert_eq!(repo.len(), len);
        assert_eq!(repo.revision(), 0);
        // Nothing was persisted either.
        assert!(!store.contains(BLOGS_KEY));
    }

    // --- Tags ---

    #[test]
    fn add_if_absent_is_idempotent() {
        let (_dir, store) = temp_store();
        let mut repo = TagRepository::load(&store).unwrap();
        let before = repo.tags().len();

        assert!(repo.add_if_absent(&store, "ferris").unwrap());
        assert!(!repo.add_if_absent(&store, "ferris").unwrap());
        assert_eq!(repo.tags().len(), before + 1);
    }

    #[test]
    fn add_if_absent_persists_only_new_tags() {
        let (_dir, store) = temp_store();
        let mut repo = TagRepository::load(&store).unwrap();

        let existing = repo.tags()[0].clone();
        assert!(!repo.add_if_absent(&store, &existing).unwrap());
        assert!(!store.contains(TAGS_KEY));

        repo.add_if_absent(&store, "brand-new").unwrap();
        let persisted: Vec<String> = store.read(TAGS_KEY).unwrap().unwrap();
        assert!(persisted.contains(&"brand-new".to_string()));
    }

    // --- Users ---

    #[test]
    fn users_default_contains_the_admin() {
        let (_dir, store) = temp_store();
        let repo = UserRepository::load(&store).unwrap();
        assert!(repo.exists("Algor"));
        assert!(repo.password("Algor").is_some());
        assert!(!repo.exists("nobody"));
    }

    #[test]
    fn add_user_persists_the_map() {
        let (_dir, store) = temp_store();
        let mut repo = UserRepository::load(&store).unwrap();
        repo.add_user(&store, "guest", "pw").unwrap();

        let reloaded = UserRepository::load(&store).unwrap();
        assert_eq!(reloaded.password("guest"), Some("pw"));
        // The stored map replaced the default wholesale, admin included.
        assert!(reloaded.exists("Algor"));
    }

    // --- Profile ---

    #[test]
    fn profile_edits_write_through() {
        let (_dir, store) = temp_store();
        let mut profile = ProfileStore::load(&store).unwrap();
        profile.set_interests(&store, "New interests").unwrap();
        profile.set_plans(&store, "New plans").unwrap();

        let reloaded = ProfileStore::load(&store).unwrap();
        assert_eq!(reloaded.profile().interests, "New interests");
        assert_eq!(reloaded.profile().plans, "New plans");
    }
}
