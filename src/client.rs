//! Represents a client abstraction for the site.

mod api;

use crate::{
    album::Album,
    article::Article,
    comment::{Comment, NewComment},
    errors::{
        ClientBuilderError, CommentError, CsrfError, MalformedResponse, RequestError, VoteError,
    },
    meta::Target,
    reaction::{Counts, Reactions, Vote},
    stdx::{
        cookie,
        error::{InternalInvariant, Invariant as _, invariant},
        http::{DEFAULT_USER_AGENT, IRetry as _},
    },
};

use api::votes::RawVoteResponse;
use reqwest::{StatusCode, header::SET_COOKIE, redirect::Policy};
use scraper::{Html, Selector};
use std::{fmt::Display, sync::Arc};
use url::Url;

/// Where the site lives unless [`ClientBuilder::base_url`] says otherwise.
static SITE: &str = "https://anitube.example/";

/// Cookie the backend delivers its anti-forgery token in.
static CSRF_COOKIE: &str = "csrftoken";

/// Cookie the backend keeps its login session in.
static SESSION_COOKIE: &str = "sessionid";

/// A builder for configuring and creating instances of [`Client`] with custom settings.
///
/// The `ClientBuilder` provides an API for fine-tuning various aspects of the `Client`
/// configuration: the session credential, a custom user agent, and the base URL of the
/// site deployment to talk to.
///
/// # Usage
///
/// The builder allows for method chaining to incrementally configure the client, with the final
/// step being a call to [`build()`](ClientBuilder::build()), which consumes the builder and returns a [`Client`].
///
/// # Example
///
/// ```
/// # use anitube::ClientBuilder;
/// let client = ClientBuilder::new()
///     .user_agent("custom-agent/1.0")
///     .build()?;
/// # Ok::<(), anitube::errors::ClientBuilderError>(())
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    builder: reqwest::ClientBuilder,
    session: Session,
    base: Url,
}

impl Default for ClientBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    ///
    /// This includes a default user agent (`$CARGO_PKG_NAME/$CARGO_PKG_VERSION`) and the
    /// public site as the base URL.
    ///
    /// Redirects are never followed: the backend answers anonymous reactions with a
    /// redirect to its login page, and comment submissions with a redirect back to the
    /// article, and both must stay visible to be classified.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::ClientBuilder;
    /// let builder = ClientBuilder::new();
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        let builder = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .use_rustls_tls()
            .https_only(true)
            .brotli(true)
            .redirect(Policy::none());

        #[expect(
            clippy::expect_used,
            reason = "the default site URL is a literal and parsing it can only fail if the literal itself is edited broken"
        )]
        let base = Url::parse(SITE).expect("default site URL should parse");

        Self {
            builder,
            session: Session::default(),
            base,
        }
    }

    /// Configures the `ClientBuilder` to use the specified session cookie value for
    /// authenticated requests.
    ///
    /// Reactions are rejected by the backend for anonymous visitors, so any use of
    /// [`Client::react`] and the handle methods built on it needs a session. The value is
    /// the site's `sessionid` cookie of a logged-in browser session.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use anitube::ClientBuilder;
    /// let builder = ClientBuilder::new().with_session("session-cookie-value");
    /// ```
    #[inline]
    #[must_use]
    pub fn with_session(mut self, session: &str) -> Self {
        self.session = Session::new(session);
        self
    }

    /// Configures the session from a whole `Cookie` header line, digging the
    /// `sessionid` pair out of it.
    ///
    /// Convenient when the cookies are copied straight out of a browser's
    /// devtools. When the list carries no `sessionid`, no session is set.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::ClientBuilder;
    /// let builder = ClientBuilder::new()
    ///     .with_browser_cookies("csrftoken=abc123; sessionid=xyz; theme=dark");
    /// ```
    #[inline]
    #[must_use]
    pub fn with_browser_cookies(mut self, cookies: &str) -> Self {
        if let Some(session) = cookie::find(cookies, SESSION_COOKIE) {
            self.session = Session::new(&session);
        }
        self
    }

    /// Sets a custom `User-Agent` header for the [`Client`].
    ///
    /// By default, the user agent is set to (`$CARGO_PKG_NAME/$CARGO_PKG_VERSION`), but this can be overridden using this method.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::ClientBuilder;
    /// let builder = ClientBuilder::new().user_agent("custom-agent/1.0");
    /// ```
    #[inline]
    #[must_use]
    pub fn user_agent(self, user_agent: &str) -> Self {
        let builder = self.builder.user_agent(user_agent);
        Self { builder, ..self }
    }

    /// Points the [`Client`] at a different deployment of the site.
    ///
    /// The URL should end with a `/`; reaction and comment paths are joined onto it.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::ClientBuilder;
    /// # use url::Url;
    /// let base = Url::parse("https://staging.anitube.example/")?;
    /// let builder = ClientBuilder::new().base_url(base);
    /// # Ok::<(), url::ParseError>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base = url;
        self
    }

    /// Consumes the `ClientBuilder` and returns a fully-configured [`Client`].
    ///
    /// # Errors
    ///
    /// This method returns a [`ClientBuilderError`] if the underlying HTTP client could not be built,
    /// such as when TLS initialization fails or the DNS resolver cannot load the system configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use anitube::{Client, ClientBuilder, errors::ClientBuilderError};
    /// let client: Client = ClientBuilder::new().build()?;
    /// # Ok::<(), ClientBuilderError>(())
    /// ```
    #[inline]
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        Ok(Client {
            http: self
                .builder
                .build()
                .map_err(|_err| ClientBuilderError::BuildFailed)?,
            session: self.session,
            base: self.base,
            reactions: Reactions::new(),
        })
    }
}

/// A high-level, asynchronous client to interact with the site.
///
/// The `Client` is designed for efficient, reusable interactions, and internally
/// manages connection pooling for optimal performance. Cloning is cheap; every clone
/// shares the connection pool and the [`Reactions`] registry.
///
/// # Example
///
/// ```
/// # use anitube::Client;
/// let client = Client::new();
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) base: Url,
    pub(crate) reactions: Reactions,
}

// Creation impls
impl Client {
    /// Instantiates a new [`Client`] with the default user agent: (`$CARGO_PKG_NAME/$CARGO_PKG_VERSION`).
    ///
    /// # Panics
    ///
    /// This function will panic if the TLS backend cannot be initialized or if the DNS resolver
    /// fails to load the system's configuration. For a safer alternative that returns a `Result`
    /// instead of panicking, consider using the [`ClientBuilder`] for more controlled error handling.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::Client;
    /// let client = Client::new();
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        #[expect(
            clippy::expect_used,
            reason = "it is documented that this can panic and that `ClientBuilder` should be used instead for a `Result`"
        )]
        ClientBuilder::new().build().expect("Client::new()")
    }

    /// Instantiates a new [`Client`] with a provided session cookie value, allowing
    /// authenticated requests.
    ///
    /// # Panics
    ///
    /// This function will panic if the TLS backend cannot be initialized or if the DNS resolver
    /// fails to load the system's configuration. For a safer alternative that returns a `Result`
    /// instead of panicking, consider using the [`ClientBuilder`] for more controlled error handling.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::Client;
    /// let client = Client::with_session("session-cookie-value");
    /// ```
    #[inline]
    #[must_use]
    pub fn with_session(session: &str) -> Self {
        #[expect(
            clippy::expect_used,
            reason = "it is documented that this can panic and that `ClientBuilder` should be used instead for a `Result`"
        )]
        ClientBuilder::new()
            .with_session(session)
            .build()
            .expect("Client::with_session()")
    }

    /// Returns a [`ClientBuilder`] for creating a custom-configured `Client`.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::{Client, ClientBuilder};
    /// let builder: ClientBuilder = Client::builder();
    /// ```
    #[inline]
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

// Public facing impls
impl Client {
    /// Returns a handle for the news article with the given id.
    ///
    /// This does not make a request and does not prove the article exists; it only
    /// names which article the handle's methods act on.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::Client;
    /// let client = Client::new();
    /// let article = client.article(7);
    /// assert_eq!(7, article.id());
    /// ```
    #[inline]
    #[must_use]
    pub fn article(&self, id: u32) -> Article {
        Article {
            client: self.clone(),
            id,
        }
    }

    /// Returns a handle for the comment with the given id.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::Client;
    /// let client = Client::new();
    /// let comment = client.comment(3);
    /// assert_eq!(3, comment.id());
    /// ```
    #[inline]
    #[must_use]
    pub fn comment(&self, id: u32) -> Comment {
        Comment {
            client: self.clone(),
            id,
        }
    }

    /// Returns a handle for the album with the given id.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::Client;
    /// let client = Client::new();
    /// let album = client.album(5);
    /// assert_eq!(5, album.id());
    /// ```
    #[inline]
    #[must_use]
    pub fn album(&self, id: u32) -> Album {
        Album {
            client: self.clone(),
            id,
        }
    }

    /// Returns the registry of reaction state this client has accumulated.
    ///
    /// Shared across clones of the `Client` and updated by every reaction sent through
    /// any of them.
    #[inline]
    #[must_use]
    pub fn reactions(&self) -> &Reactions {
        &self.reactions
    }

    /// Returns whether a session was provided when making the `Client`.
    ///
    /// # Example
    ///
    /// ```
    /// # use anitube::Client;
    /// let client = Client::new();
    /// assert!(!client.has_session());
    /// ```
    #[inline]
    #[must_use]
    pub fn has_session(&self) -> bool {
        !self.session.is_empty()
    }

    /// Casts `vote` on `target` and returns the counters the site answered with.
    ///
    /// The pressed side is marked active in the [`Reactions`] registry before the
    /// request is sent and is not rolled back on failure; only the counters wait for
    /// the response. On success both of the target's counters are refreshed from the
    /// response, no matter which side was voted.
    ///
    /// A fresh anti-forgery token is fetched for every call; nothing about the token is
    /// cached.
    ///
    /// Repeated calls issue repeated POSTs. Whether the backend treats a repeat as a
    /// toggle, a switch, or a plain increment is its own business; no idempotence is
    /// assumed or guaranteed here. Calls for the same target are not serialized either:
    /// when responses resolve out of order, the last one to land owns the counters.
    ///
    /// # Errors
    ///
    /// - [`VoteError::InvalidSession`] when the site bounces the vote to its login page.
    /// - [`VoteError::TokenRejected`] when the site rejects the anti-forgery token.
    /// - [`VoteError::MissingToken`] when no token could be obtained at all.
    /// - [`VoteError::Malformed`] when a 2xx response is not the documented JSON shape.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use anitube::{Client, Kind, Target, Vote, errors::Error};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Error> {
    /// let client = Client::with_session("session-cookie-value");
    ///
    /// let counts = client.react(Target::new(Kind::Post, 7), Vote::Like).await?;
    ///
    /// println!("{} likes, {} dislikes", counts.likes(), counts.dislikes());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn react(&self, target: Target, vote: Vote) -> Result<Counts, VoteError> {
        // Marker first. The press is local and survives whatever the network does.
        self.reactions.press(target, vote);

        let token = self.csrf_token().await?;

        let url = self.endpoint(&format!(
            "{}/{}/{}/",
            target.kind().as_segment(),
            target.id(),
            vote.as_segment()
        ))?;

        let response = self
            .http
            .post(url)
            .header("X-CSRFToken", token.value())
            .header("Referer", self.base.as_str())
            .header("Cookie", self.cookies(&token))
            .form(&[("obj", target.id())])
            .retry()
            .send()
            .await
            .map_err(RequestError)?;

        let status = response.status();

        if status.is_redirection() {
            // Anonymous votes bounce to the login page.
            return Err(VoteError::InvalidSession);
        }

        if status == StatusCode::FORBIDDEN {
            return Err(VoteError::TokenRejected);
        }

        invariant!(
            status.is_success(),
            "vote endpoint answered `{status}` for `{target}`"
        );

        let body = response.text().await.map_err(RequestError)?;

        let raw = match serde_json::from_str::<RawVoteResponse>(&body) {
            Ok(raw) => raw,
            Err(source) => return Err(MalformedResponse { source, body }.into()),
        };

        let counts = Counts::from(raw);

        self.reactions.reconcile(target, counts);

        Ok(counts)
    }

    /// Submits a comment under the article with the given `slug`.
    ///
    /// Set [`NewComment::parent`] to reply to an existing comment. Commenting does not
    /// need a session. Success is the site bouncing back to the article page.
    ///
    /// # Errors
    ///
    /// - [`CommentError::EmptyText`] before any request when the text is blank.
    /// - [`CommentError::TokenRejected`] when the site rejects the anti-forgery token.
    /// - [`CommentError::MissingToken`] when no token could be obtained at all.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use anitube::{Client, NewComment, errors::Error};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Error> {
    /// let client = Client::new();
    ///
    /// let comment = NewComment::new("kaonashi", "kaonashi@example.com", "Great episode!");
    ///
    /// client.submit_comment("spirited-away", &comment).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_comment(
        &self,
        slug: &str,
        comment: &NewComment,
    ) -> Result<(), CommentError> {
        if comment.text.trim().is_empty() {
            return Err(CommentError::EmptyText);
        }

        let token = self.csrf_token().await?;

        let url = self.endpoint(&format!("comment/{}/", urlencoding::encode(slug)))?;

        let mut form = vec![
            ("name", comment.name.clone()),
            ("email", comment.email.clone()),
            ("text", comment.text.clone()),
        ];

        if let Some(parent) = comment.parent {
            form.push(("parent", parent.to_string()));
        }

        let response = self
            .http
            .post(url)
            .header("X-CSRFToken", token.value())
            .header("Referer", self.base.as_str())
            .header("Cookie", self.cookies(&token))
            .form(&form)
            .retry()
            .send()
            .await
            .map_err(RequestError)?;

        let status = response.status();

        // The backend answers a stored comment with a redirect back to the article.
        if status.is_redirection() || status.is_success() {
            return Ok(());
        }

        if status == StatusCode::FORBIDDEN {
            return Err(CommentError::TokenRejected);
        }

        invariant!("comment endpoint answered `{status}` for `{slug}`");
    }
}

// Internal impls
impl Client {
    /// Obtains a fresh anti-forgery token.
    ///
    /// One token per state-changing call; tokens are never stashed for the life of the
    /// client, so a rotation on the site's side is picked up on the next call. The
    /// token arrives as the `csrftoken` cookie of any page load; when the cookie is
    /// missing, the rendered comment form's hidden `csrfmiddlewaretoken` field is the
    /// fallback.
    async fn csrf_token(&self) -> Result<CsrfToken, CsrfError> {
        let response = self
            .http
            .get(self.base.clone())
            .retry()
            .send()
            .await
            .map_err(RequestError)?;

        for header in response.headers().get_all(SET_COOKIE) {
            let Ok(value) = header.to_str() else {
                continue;
            };

            if let Some(token) = cookie::set_cookie_value(value, CSRF_COOKIE) {
                return Ok(CsrfToken(Arc::from(token)));
            }
        }

        let html = response.text().await.map_err(RequestError)?;

        if let Some(token) = form_token(&html) {
            return Ok(CsrfToken(Arc::from(token)));
        }

        Err(CsrfError::MissingToken)
    }

    /// Joins `path` onto the configured base URL.
    fn endpoint(&self, path: &str) -> Result<Url, InternalInvariant> {
        self.base
            .join(path)
            .invariant(format!("`{path}` should join onto `{}`", self.base))
    }

    /// Assembles the `Cookie` header for a state-changing request.
    fn cookies(&self, token: &CsrfToken) -> String {
        match self.session.value() {
            Some(session) => format!("{CSRF_COOKIE}={token}; {SESSION_COOKIE}={session}"),
            None => format!("{CSRF_COOKIE}={token}"),
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Digs the rendered `csrfmiddlewaretoken` hidden input out of page markup.
fn form_token(html: &str) -> Option<String> {
    let html = Html::parse_document(html);

    let selector = Selector::parse(r#"input[name="csrfmiddlewaretoken"]"#).ok()?;

    let input = html.select(&selector).next()?;

    input.value().attr("value").map(ToOwned::to_owned)
}

/// An anti-forgery token good for the request being built.
pub(crate) struct CsrfToken(Arc<str>);

impl CsrfToken {
    fn value(&self) -> &str {
        &self.0
    }
}

impl Display for CsrfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Session(Option<Arc<str>>);

impl Session {
    #[inline]
    fn new(session: &str) -> Self {
        Self(Some(Arc::from(session)))
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.0.as_ref().is_none_or(|session| session.is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn session_should_be_empty() {
        let session = Session::default();
        assert!(session.is_empty());
    }

    #[test]
    fn session_should_not_be_empty() {
        let session = Session::new("session");
        assert!(!session.is_empty());
    }

    #[test]
    fn cookie_header_should_carry_token_only_without_session() {
        let client = Client::new();
        let token = CsrfToken(Arc::from("abc123"));

        assert_eq!("csrftoken=abc123", client.cookies(&token));
    }

    #[test]
    fn cookie_header_should_carry_session_when_present() {
        let client = Client::with_session("xyz");
        let token = CsrfToken(Arc::from("abc123"));

        assert_eq!("csrftoken=abc123; sessionid=xyz", client.cookies(&token));
    }

    #[test]
    fn browser_cookies_should_yield_a_session() {
        let client = Client::builder()
            .with_browser_cookies("csrftoken=abc123; sessionid=xyz; theme=dark")
            .build()
            .unwrap();

        assert!(client.has_session());
    }

    #[test]
    fn browser_cookies_without_sessionid_should_leave_no_session() {
        let client = Client::builder()
            .with_browser_cookies("csrftoken=abc123; theme=dark")
            .build()
            .unwrap();

        assert!(!client.has_session());
    }

    #[test]
    fn vote_endpoint_should_follow_the_documented_path() -> Result<(), InternalInvariant> {
        let client = Client::new();

        let url = client.endpoint("post/7/like/")?;

        assert_eq!("https://anitube.example/post/7/like/", url.as_str());
        Ok(())
    }

    #[test]
    fn endpoint_should_respect_a_base_with_a_path() -> Result<(), InternalInvariant> {
        let base = Url::parse("https://mirror.example/anitube/").unwrap();

        let client = Client::builder().base_url(base).build().unwrap();

        let url = client.endpoint("comment/3/dislike/")?;

        assert_eq!(
            "https://mirror.example/anitube/comment/3/dislike/",
            url.as_str()
        );
        Ok(())
    }

    #[test]
    fn vote_body_should_carry_the_object_id() {
        let client = Client::new();

        let url = client.endpoint("post/7/like/").unwrap();

        let request = client
            .http
            .post(url)
            .form(&[("obj", 7_u32)])
            .build()
            .unwrap();

        let body = request.body().and_then(|body| body.as_bytes());

        assert_eq!(Some(&b"obj=7"[..]), body);
    }

    #[test]
    fn form_token_should_be_found_in_markup() {
        let html = r#"
            <html><body>
            <form action="/comment/spirited-away/" method="post">
                <input type="hidden" name="csrfmiddlewaretoken" value="abc123">
                <textarea name="text"></textarea>
            </form>
            </body></html>
        "#;

        assert_eq!(Some("abc123".to_owned()), form_token(html));
    }

    #[test]
    fn form_token_should_be_none_when_markup_has_no_form() {
        assert_eq!(None, form_token("<html><body><p>hi</p></body></html>"));
    }
}
