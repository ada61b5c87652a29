use crate::reaction::Counts;
use serde::Deserialize;

/// Body of a successful vote response.
///
/// Both counters are always present no matter which side was voted; the
/// registry refreshes both from every response.
#[derive(Deserialize, Debug)]
pub struct RawVoteResponse {
    pub like_count: u32,
    pub dislike_count: u32,
}

impl From<RawVoteResponse> for Counts {
    fn from(raw: RawVoteResponse) -> Self {
        Self {
            likes: raw.like_count,
            dislikes: raw.dislike_count,
        }
    }
}
