//! Per-target like/dislike state and the registry that tracks it.

use crate::meta::Target;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A reaction verb that can be sent to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    /// Cast a like.
    Like,
    /// Cast a dislike.
    Dislike,
}

impl Vote {
    /// Returns the URL path segment for this vote: `like` or `dislike`.
    #[inline]
    #[must_use]
    pub fn as_segment(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

/// Which side of a target's like/dislike pair carries the active marker.
///
/// <div class="warning">
///
/// **These are mutually exclusive**
///
/// </div>
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReactionState {
    /// The like side is marked active.
    Liked,
    /// The dislike side is marked active.
    Disliked,
    /// Neither side has been pressed.
    #[default]
    None,
}

/// A target's counters as last reported by the site.
///
/// These are authoritative only as of the response that carried them; a later
/// response for the same target replaces them wholesale.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub(crate) likes: u32,
    pub(crate) dislikes: u32,
}

impl Counts {
    /// Returns how many likes the target had when the site last answered.
    #[inline]
    #[must_use]
    pub fn likes(&self) -> u32 {
        self.likes
    }

    /// Returns how many dislikes the target had when the site last answered.
    #[inline]
    #[must_use]
    pub fn dislikes(&self) -> u32 {
        self.dislikes
    }
}

/// One target's record: the locally-pressed marker plus the last counters the
/// site reported.
///
/// The two halves move independently. [`press`](ReactionToggle::press) is
/// local and optimistic, applied before any request settles and never rolled
/// back; [`reconcile`](ReactionToggle::reconcile) only ever comes from a
/// server response and only touches the counters, because responses do not
/// say which side the server considers active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReactionToggle {
    state: ReactionState,
    counts: Option<Counts>,
}

impl ReactionToggle {
    /// Marks the pressed side active.
    ///
    /// Holding the state as a single value is what enforces the pair's
    /// exclusivity: activating one side is the same operation as clearing the
    /// other. Pressing the already-active side keeps it active; there is no
    /// local un-press.
    pub fn press(&mut self, vote: Vote) {
        self.state = match vote {
            Vote::Like => ReactionState::Liked,
            Vote::Dislike => ReactionState::Disliked,
        };
    }

    /// Replaces both counters with the ones from a server response.
    pub fn reconcile(&mut self, counts: Counts) {
        self.counts = Some(counts);
    }

    /// Returns which side is currently marked active.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ReactionState {
        self.state
    }

    /// Returns the last counters the site reported, if it ever has.
    #[inline]
    #[must_use]
    pub fn counts(&self) -> Option<Counts> {
        self.counts
    }
}

/// A shared registry of [`ReactionToggle`]s keyed by [`Target`].
///
/// Every clone shares the same map, so any handle reacting through a
/// [`Client`](crate::Client) is visible to every other holder. A target that
/// was never pressed nor reconciled reads as [`ReactionState::None`] with no
/// counts.
///
/// Requests are not de-duplicated and responses are not ordered: two
/// in-flight reactions for one target both land, and whichever response
/// resolves last owns the counters. Serializing them here would change what
/// the site observes, so the registry does not try.
#[derive(Debug, Clone, Default)]
pub struct Reactions(Arc<RwLock<HashMap<Target, ReactionToggle>>>);

impl Reactions {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `vote`'s side active for `target`, clearing the opposite side.
    pub fn press(&self, target: Target, vote: Vote) {
        self.0.write().entry(target).or_default().press(vote);
    }

    /// Replaces both of `target`'s counters from a server response.
    pub fn reconcile(&self, target: Target, counts: Counts) {
        self.0.write().entry(target).or_default().reconcile(counts);
    }

    /// Returns which side of `target`'s pair is marked active.
    #[must_use]
    pub fn state(&self, target: Target) -> ReactionState {
        self.0
            .read()
            .get(&target)
            .map(ReactionToggle::state)
            .unwrap_or_default()
    }

    /// Returns `target`'s last-reported counters, if any response for it has
    /// ever arrived.
    #[must_use]
    pub fn counts(&self, target: Target) -> Option<Counts> {
        self.0.read().get(&target).and_then(ReactionToggle::counts)
    }

    /// Returns a snapshot of `target`'s record.
    #[must_use]
    pub fn toggle(&self, target: Target) -> ReactionToggle {
        self.0.read().get(&target).copied().unwrap_or_default()
    }

    /// Returns how many targets have a record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    /// Returns whether no target has a record yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}
