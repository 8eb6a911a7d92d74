use crate::model::post::{BodyBlock, Post};

/// Error type for draft-session operations
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("no post is open for editing")]
    Closed,
}

/// A single-post editing session.
///
/// Opening a post takes an independent deep copy; nothing the session does
/// is visible to the repository until the caller feeds the committed draft
/// back through `replace_at`. `reset` returns to the copy taken at open
/// time, not to any intermediate state.
#[derive(Debug, Default)]
pub struct DraftEditor {
    session: Option<Session>,
}

#[derive(Debug)]
struct Session {
    /// Repository index the post was opened from.
    origin: usize,
    /// Pristine copy of the post as it was at open time.
    source: Post,
    /// The working copy all mutations apply to.
    draft: Post,
}

impl DraftEditor {
    pub fn new() -> Self {
        DraftEditor { session: None }
    }

    /// Begin editing `post`, which lives at `origin` in the repository.
    /// Any session already in progress is discarded.
    pub fn open(&mut self, origin: usize, post: &Post) {
        self.session = Some(Session {
            origin,
            source: post.clone(),
            draft: post.clone(),
        });
    }

    /// Whether a session is in progress.
    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    /// The current working copy, if a session is in progress.
    pub fn draft(&self) -> Option<&Post> {
        self.session.as_ref().map(|s| &s.draft)
    }

    /// The repository index the open post came from.
    pub fn origin(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.origin)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), DraftError> {
        let session = self.session.as_mut().ok_or(DraftError::Closed)?;
        session.draft.title = title.into();
        Ok(())
    }

    /// Replace the draft's tag list wholesale.
    pub fn set_tags(&mut self, tags: Vec<String>) -> Result<(), DraftError> {
        let session = self.session.as_mut().ok_or(DraftError::Closed)?;
        session.draft.tags = tags;
        Ok(())
    }

    /// Replace the body block at `index`, or append when `index` is at or
    /// past the end. Indexes can never create gaps: an index far past the
    /// end still appends exactly one block.
    pub fn set_body_item(&mut self, index: usize, block: BodyBlock) -> Result<(), DraftError> {
        let session = self.session.as_mut().ok_or(DraftError::Closed)?;
        let body = &mut session.draft.body;
        if index >= body.len() {
            body.push(block);
        } else {
            body[index] = block;
        }
        Ok(())
    }

    /// Remove the body block at `index`, shifting later blocks down.
    /// Out of range is a no-op.
    pub fn delete_body_item(&mut self, index: usize) -> Result<(), DraftError> {
        let session = self.session.as_mut().ok_or(DraftError::Closed)?;
        if index < session.draft.body.len() {
            session.draft.body.remove(index);
        }
        Ok(())
    }

    /// Discard in-progress edits, restoring the copy taken at open time.
    /// The session stays open.
    pub fn reset(&mut self) -> Result<(), DraftError> {
        let session = self.session.as_mut().ok_or(DraftError::Closed)?;
        session.draft = session.source.clone();
        Ok(())
    }

    /// End the session, handing the working draft and its origin index to
    /// the caller (who writes it back through the repository).
    pub fn commit(&mut self) -> Result<(usize, Post), DraftError> {
        let session = self.session.take().ok_or(DraftError::Closed)?;
        Ok((session.origin, session.draft))
    }
}
