//! Errors that can happen when interacting with the site.
#![allow(missing_docs)]

use thiserror::Error;

pub use _inner::{ClientBuilderError, CommentError, CsrfError, Error, VoteError};

#[derive(Debug, Error)]
#[error(transparent)]
pub struct RequestError(#[from] pub(crate) reqwest::Error);

/// A 2xx reply whose body was not the documented JSON shape.
///
/// Carries the body verbatim so the caller can see what the site actually
/// said; the backend contract here is thin enough that this is usually a
/// login page or an HTML error page rather than a subtle shape drift.
#[derive(Debug, Error)]
#[error("failed to deserialize response body: {source}\n\n{body}")]
pub struct MalformedResponse {
    pub(crate) source: serde_json::Error,
    pub(crate) body: String,
}

impl MalformedResponse {
    /// Returns the response body that failed to deserialize.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

mod _inner {
    use crate::stdx::error::InternalInvariant;
    use error_set::error_set;

    error_set! {
        #[expect(
            clippy::error_impl_error,
            reason = "`Error` is a ball of mud enum built through codegen; only meant for prototyping"
        )]
        Error := VoteError || CommentError || CsrfError || ClientBuilderError;

        VoteError := Base || ClientError || Csrf || InvalidSession;

        CommentError := {
            #[display("comment text cannot be empty")]
            EmptyText,
        } || Base || ClientError || Csrf;

        CsrfError := Base || ClientError || Csrf;

        ClientBuilderError := {
            BuildFailed,
        };

        // --- Internal ---

        Csrf := {
            #[display("site set no `csrftoken` cookie and rendered no fallback form field")]
            MissingToken,
            #[display("request rejected as cross-site forgery")]
            TokenRejected,
        };

        InvalidSession := {
            #[display("not logged in, or session invalid or expired")]
            InvalidSession,
        };

        ClientError := {
            RequestFailed(super::RequestError),
        };

        Base := {
            Internal(InternalInvariant),
            Malformed(super::MalformedResponse),
        };
    }
}
