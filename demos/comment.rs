use anitube::{Client, NewComment, errors::Error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let client = Client::new();

    let comment = NewComment::new("kaonashi", "kaonashi@example.com", "Great episode!");

    client.submit_comment("spirited-away", &comment).await?;

    let reply = NewComment::new("kaonashi", "kaonashi@example.com", "Replying to myself.")
        .parent(3);

    client.submit_comment("spirited-away", &reply).await?;

    println!("both comments submitted");

    Ok(())
}
