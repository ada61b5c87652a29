//! Contains metadata implementations for the site's reactable content.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// An error that can occur when parsing a URL path segment into a [`Kind`].
#[derive(Debug, Error)]
#[error("failed to parse `{0}` into `Kind`: should be one of `post`, `comment`, `album`")]
pub struct ParseKindError(String);

/// Represents the kinds of content on the site that can be reacted to.
///
/// The variants map one-to-one to the path segment the backend routes
/// reactions by: `post`, `comment`, and `album`.
#[derive(
    Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// A news article.
    Post,
    /// A comment left on an article.
    Comment,
    /// A music album.
    Album,
}

impl Kind {
    /// Returns the URL path segment for this kind: `post`, `comment`, or `album`.
    #[inline]
    #[must_use]
    pub fn as_segment(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
            Self::Album => "album",
        }
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            "album" => Ok(Self::Album),
            _ => Err(ParseKindError(s.to_owned())),
        }
    }
}

/// Identifies one reactable object on the site: a [`Kind`] plus the object's
/// numeric id.
///
/// A `Target` is the key the reaction registry tracks state under, and the
/// pair of values every reaction URL is built from. Two controls for the same
/// object, like and dislike, share one `Target`.
///
/// # Example
///
/// ```
/// # use anitube::{Kind, Target};
/// let target = Target::new(Kind::Post, 7);
///
/// assert_eq!("post/7", target.to_string());
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Target {
    pub(crate) kind: Kind,
    pub(crate) id: u32,
}

impl Target {
    /// Creates a `Target` for the object of `kind` with the given id.
    #[inline]
    #[must_use]
    pub fn new(kind: Kind, id: u32) -> Self {
        Self { kind, id }
    }

    /// Returns the kind of content this `Target` points at.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the object id this `Target` points at.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.as_segment(), self.id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_should_round_trip_through_segment() -> Result<(), ParseKindError> {
        for kind in [Kind::Post, Kind::Comment, Kind::Album] {
            assert_eq!(kind, Kind::from_str(kind.as_segment())?);
        }
        Ok(())
    }

    #[test]
    fn kind_should_reject_unknown_segment() {
        assert!(Kind::from_str("band").is_err());
        assert!(Kind::from_str("Post").is_err());
    }

    #[test]
    fn target_should_display_as_path() {
        assert_eq!("comment/3", Target::new(Kind::Comment, 3).to_string());
    }
}
