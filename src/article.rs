//! Represents an abstraction for a news article.

use crate::{
    client::Client,
    errors::VoteError,
    meta::{Kind, Target},
    reaction::{Counts, ReactionState, Vote},
};
use core::fmt;

/// Represents a news article on the site.
///
/// This is a handle: holding one proves nothing about the article existing, it only
/// names which article the methods act on. The id is the number the article's markup
/// carries on its reaction controls, not the URL slug.
///
/// # Example
///
/// ```no_run
/// # use anitube::{Client, errors::Error};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Error> {
/// let client = Client::with_session("session-cookie-value");
///
/// let article = client.article(7);
///
/// let counts = article.like().await?;
///
/// println!("likes: {}", counts.likes());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Article {
    pub(crate) client: Client,
    pub(crate) id: u32,
}

impl fmt::Debug for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Article")
            // omitting `client`
            .field("id", &self.id)
            .finish()
    }
}

impl Article {
    /// Returns the id of this `Article`.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the reaction [`Target`] for this `Article`.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Target {
        Target::new(Kind::Post, self.id)
    }

    /// Casts a like on this `Article` and returns the refreshed counters.
    pub async fn like(&self) -> Result<Counts, VoteError> {
        self.client.react(self.target(), Vote::Like).await
    }

    /// Casts a dislike on this `Article` and returns the refreshed counters.
    pub async fn dislike(&self) -> Result<Counts, VoteError> {
        self.client.react(self.target(), Vote::Dislike).await
    }

    /// Casts `vote` on this `Article` and returns the refreshed counters.
    pub async fn vote(&self, vote: Vote) -> Result<Counts, VoteError> {
        self.client.react(self.target(), vote).await
    }

    /// Returns which side of this `Article`'s pair is locally marked active.
    #[must_use]
    pub fn state(&self) -> ReactionState {
        self.client.reactions.state(self.target())
    }

    /// Returns this `Article`'s counters as of the last response seen for it.
    #[must_use]
    pub fn counts(&self) -> Option<Counts> {
        self.client.reactions.counts(self.target())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn target_should_use_the_post_segment() {
        let article = Client::new().article(7);

        assert_eq!(Target::new(Kind::Post, 7), article.target());
        assert_eq!("post/7", article.target().to_string());
    }

    #[test]
    fn untouched_article_should_read_as_unpressed() {
        let article = Client::new().article(7);

        assert_eq!(ReactionState::None, article.state());
        assert_eq!(None, article.counts());
    }
}
