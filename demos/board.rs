use anitube::{Client, Kind, Target, Vote, errors::Error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let session = std::env::var("ANITUBE_SESSION")
        .expect("set `ANITUBE_SESSION` to the `sessionid` cookie of a logged-in session");

    let client = Client::with_session(&session);

    client.react(Target::new(Kind::Post, 7), Vote::Like).await?;
    client.react(Target::new(Kind::Comment, 3), Vote::Dislike).await?;
    client.react(Target::new(Kind::Album, 5), Vote::Like).await?;

    for target in [
        Target::new(Kind::Post, 7),
        Target::new(Kind::Comment, 3),
        Target::new(Kind::Album, 5),
    ] {
        let toggle = client.reactions().toggle(target);

        println!("{target}: {:?} {:?}", toggle.state(), toggle.counts());
    }

    Ok(())
}
