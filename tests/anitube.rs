use anitube::{Client, Kind, NewComment, ReactionState, Target, Vote, errors::VoteError};
use pretty_assertions::assert_eq;

fn client() -> Client {
    match std::env::var("ANITUBE_SESSION") {
        Ok(session) if !session.is_empty() => Client::with_session(&session),
        _ => Client::new(),
    }
}

#[test]
fn handles_should_agree_with_raw_targets() {
    let client = Client::new();

    assert_eq!(Target::new(Kind::Post, 7), client.article(7).target());
    assert_eq!(Target::new(Kind::Comment, 3), client.comment(3).target());
    assert_eq!(Target::new(Kind::Album, 5), client.album(5).target());
}

#[test]
fn registry_should_be_shared_between_client_clones_and_handles() {
    let client = Client::new();
    let article = client.article(7);

    client.reactions().press(article.target(), Vote::Dislike);

    assert_eq!(ReactionState::Disliked, article.state());
    assert_eq!(ReactionState::Disliked, client.clone().article(7).state());
}

#[tokio::test]
#[ignore = "needs a reachable site deployment and a logged-in `ANITUBE_SESSION`"]
async fn should_like_an_article_and_refresh_both_counters() {
    let client = client();

    let article = client.article(7);

    let counts = article.like().await.unwrap();

    assert_eq!(ReactionState::Liked, article.state());
    assert_eq!(Some(counts), article.counts());
}

#[tokio::test]
#[ignore = "needs a reachable site deployment and a logged-in `ANITUBE_SESSION`"]
async fn switching_sides_should_keep_exactly_one_marker() {
    let client = client();

    let comment = client.comment(3);

    comment.like().await.unwrap();
    comment.dislike().await.unwrap();

    assert_eq!(ReactionState::Disliked, comment.state());
}

#[tokio::test]
#[ignore = "needs a reachable site deployment"]
async fn anonymous_vote_should_surface_as_invalid_session() {
    let client = Client::new();

    let err = client
        .react(Target::new(Kind::Post, 7), Vote::Like)
        .await
        .unwrap_err();

    assert!(
        matches!(err, VoteError::InvalidSession),
        "expected the login bounce, got: {err:?}"
    );

    // The optimistic marker stays either way.
    assert_eq!(
        ReactionState::Liked,
        client.reactions().state(Target::new(Kind::Post, 7))
    );
}

#[tokio::test]
#[ignore = "needs a reachable site deployment"]
async fn should_submit_a_comment_without_a_session() {
    let client = Client::new();

    let comment = NewComment::new("anitube-tests", "tests@example.com", "automated hello");

    client
        .submit_comment("spirited-away", &comment)
        .await
        .unwrap();
}

#[tokio::test]
async fn blank_comment_should_be_rejected_before_any_request() {
    let client = Client::new();

    let comment = NewComment::new("anitube-tests", "tests@example.com", "   ");

    let err = client
        .submit_comment("spirited-away", &comment)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        anitube::errors::CommentError::EmptyText
    ));
}
