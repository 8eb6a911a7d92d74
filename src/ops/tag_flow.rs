use crate::io::repos::{RepoError, TagRepository};
use crate::io::store::Store;
use crate::model::draft::{DraftEditor, DraftError};

/// Error type for the tag-adding flow
#[derive(Debug, thiserror::Error)]
pub enum TagFlowError {
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Outcome of trying to add a tag to the open draft. Rejections are
/// outcomes, not errors: they render as inline status text and leave the
/// draft untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// Input was empty after trimming.
    EmptyInput,
    /// The draft already carries this tag.
    AlreadyOnPost,
    /// Added to the draft; the tag was globally unknown and is now recorded.
    CreatedGlobally(String),
    /// Added to the draft; the tag was already globally known.
    AddedKnown(String),
}

impl TagOutcome {
    /// User-facing status line, word-for-word what the site shows.
    pub fn message(&self) -> String {
        match self {
            TagOutcome::EmptyInput => "No tag entered".to_string(),
            TagOutcome::AlreadyOnPost => "You already have this tag".to_string(),
            TagOutcome::CreatedGlobally(tag) => format!("You have created the tag {}", tag),
            TagOutcome::AddedKnown(tag) => format!("You have added the tag {}", tag),
        }
    }
}

/// Add a tag to the open draft.
///
/// The input is trimmed and lowercased, empty and duplicate tags are
/// rejected, and an accepted tag is appended to the draft's list. As a side
/// effect the global tag repository records the tag if it was unknown,
/// persisting immediately — the outcome distinguishes the two cases so the
/// caller can report which one happened.
pub fn add_tag(
    editor: &mut DraftEditor,
    tags: &mut TagRepository,
    store: &Store,
    input: &str,
) -> Result<TagOutcome, TagFlowError> {
    let tag = input.trim().to_lowercase();
    if tag.is_empty() {
        return Ok(TagOutcome::EmptyInput);
    }

    let draft = editor.draft().ok_or(DraftError::Closed)?;
    if draft.tags.iter().any(|t| t == &tag) {
        return Ok(TagOutcome::AlreadyOnPost);
    }

    let mut next = draft.tags.clone();
    next.push(tag.clone());
    editor.set_tags(next)?;

    if tags.add_if_absent(store, &tag)? {
        Ok(TagOutcome::CreatedGlobally(tag))
    } else {
        Ok(TagOutcome::AddedKnown(tag))
    }
}
