use serde::{Deserialize, Serialize};

/// One unit of a post's body: a paragraph of text or a group of images.
///
/// Serialized untagged so the on-disk form matches the site fixtures:
/// `{"text": "..."}` or `{"images": ["name", ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyBlock {
    Text { text: String },
    Images { images: Vec<String> },
}

impl BodyBlock {
    /// A paragraph block.
    pub fn text(text: impl Into<String>) -> Self {
        BodyBlock::Text { text: text.into() }
    }

    /// An image-group block.
    pub fn images(images: Vec<String>) -> Self {
        BodyBlock::Images { images }
    }

    /// An empty image group, ready to receive uploads.
    pub fn empty_images() -> Self {
        BodyBlock::Images { images: Vec::new() }
    }
}

/// A blog post.
///
/// A post's identity is its position in the repository list; there is no
/// stable ID. The feature set only ever mutates posts in place or appends
/// new ones, so positions stay valid for the life of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// ISO date string, "YYYY-MM-DD". Kept as a string: the sort key is
    /// derived textually and fixtures with a missing date must survive.
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub body: Vec<BodyBlock>,
}

impl Post {
    /// A freshly created post dated today, matching what "Create New Post"
    /// produces on the site.
    pub fn new_today() -> Self {
        Post {
            title: "New post".to_string(),
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            tags: Vec::new(),
            body: Vec::new(),
        }
    }
}
