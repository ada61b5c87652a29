use anitube::{Client, errors::Error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let session = std::env::var("ANITUBE_SESSION")
        .expect("set `ANITUBE_SESSION` to the `sessionid` cookie of a logged-in session");

    let client = Client::with_session(&session);

    let article = client.article(7);

    let counts = article.like().await?;

    println!("likes: {}", counts.likes());
    println!("dislikes: {}", counts.dislikes());
    println!("marked: {:?}", article.state());

    Ok(())
}
