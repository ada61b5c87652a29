//! Represents abstractions for comments: reacting to existing ones and writing new ones.

use crate::{
    client::Client,
    errors::VoteError,
    meta::{Kind, Target},
    reaction::{Counts, ReactionState, Vote},
};
use core::fmt;

/// Represents a comment left on one of the site's articles.
///
/// This is a handle for reacting to a comment that already exists; writing a new
/// comment goes through [`NewComment`] and
/// [`Client::submit_comment`](crate::Client::submit_comment).
#[derive(Clone)]
pub struct Comment {
    pub(crate) client: Client,
    pub(crate) id: u32,
}

impl fmt::Debug for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comment")
            // omitting `client`
            .field("id", &self.id)
            .finish()
    }
}

impl Comment {
    /// Returns the id of this `Comment`.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the reaction [`Target`] for this `Comment`.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Target {
        Target::new(Kind::Comment, self.id)
    }

    /// Casts a like on this `Comment` and returns the refreshed counters.
    pub async fn like(&self) -> Result<Counts, VoteError> {
        self.client.react(self.target(), Vote::Like).await
    }

    /// Casts a dislike on this `Comment` and returns the refreshed counters.
    pub async fn dislike(&self) -> Result<Counts, VoteError> {
        self.client.react(self.target(), Vote::Dislike).await
    }

    /// Casts `vote` on this `Comment` and returns the refreshed counters.
    pub async fn vote(&self, vote: Vote) -> Result<Counts, VoteError> {
        self.client.react(self.target(), vote).await
    }

    /// Returns which side of this `Comment`'s pair is locally marked active.
    #[must_use]
    pub fn state(&self) -> ReactionState {
        self.client.reactions.state(self.target())
    }

    /// Returns this `Comment`'s counters as of the last response seen for it.
    #[must_use]
    pub fn counts(&self) -> Option<Counts> {
        self.client.reactions.counts(self.target())
    }
}

/// A comment to be submitted under an article.
///
/// The three required fields mirror the site's comment form. A reply to an existing
/// comment names its parent with [`parent`](NewComment::parent).
///
/// # Example
///
/// ```
/// # use anitube::NewComment;
/// let reply = NewComment::new("kaonashi", "kaonashi@example.com", "Agreed!").parent(3);
/// ```
#[derive(Debug, Clone)]
pub struct NewComment {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) text: String,
    pub(crate) parent: Option<u32>,
}

impl NewComment {
    /// Creates a top-level comment with the commenter's display name, email, and text.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            text: text.into(),
            parent: None,
        }
    }

    /// Turns the comment into a reply to the comment with the given id.
    #[inline]
    #[must_use]
    pub fn parent(mut self, id: u32) -> Self {
        self.parent = Some(id);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn target_should_use_the_comment_segment() {
        let comment = Client::new().comment(3);

        assert_eq!("comment/3", comment.target().to_string());
    }

    #[test]
    fn new_comment_should_default_to_top_level() {
        let comment = NewComment::new("a", "a@example.com", "hi");

        assert_eq!(None, comment.parent);
    }

    #[test]
    fn parent_should_make_a_reply() {
        let comment = NewComment::new("a", "a@example.com", "hi").parent(3);

        assert_eq!(Some(3), comment.parent);
    }
}
