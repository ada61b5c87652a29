//! Represents an abstraction for a music album.

use crate::{
    client::Client,
    errors::VoteError,
    meta::{Kind, Target},
    reaction::{Counts, ReactionState, Vote},
};
use core::fmt;

/// Represents a music album on the site.
///
/// Albums carry the same like/dislike pair articles and comments do, addressed by the
/// album's numeric id.
#[derive(Clone)]
pub struct Album {
    pub(crate) client: Client,
    pub(crate) id: u32,
}

impl fmt::Debug for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Album")
            // omitting `client`
            .field("id", &self.id)
            .finish()
    }
}

impl Album {
    /// Returns the id of this `Album`.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the reaction [`Target`] for this `Album`.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Target {
        Target::new(Kind::Album, self.id)
    }

    /// Casts a like on this `Album` and returns the refreshed counters.
    pub async fn like(&self) -> Result<Counts, VoteError> {
        self.client.react(self.target(), Vote::Like).await
    }

    /// Casts a dislike on this `Album` and returns the refreshed counters.
    pub async fn dislike(&self) -> Result<Counts, VoteError> {
        self.client.react(self.target(), Vote::Dislike).await
    }

    /// Casts `vote` on this `Album` and returns the refreshed counters.
    pub async fn vote(&self, vote: Vote) -> Result<Counts, VoteError> {
        self.client.react(self.target(), vote).await
    }

    /// Returns which side of this `Album`'s pair is locally marked active.
    #[must_use]
    pub fn state(&self) -> ReactionState {
        self.client.reactions.state(self.target())
    }

    /// Returns this `Album`'s counters as of the last response seen for it.
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
    fn target_should_use_the_album_segment() {
        let album = Client::new().album(5);

        assert_eq!("album/5", album.target().to_string());
    }
}
