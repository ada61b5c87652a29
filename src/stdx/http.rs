use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;

pub static DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Statuses the site's front proxy hands out under load. Anything else is the
/// backend speaking and must reach the caller untouched.
fn is_transient(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 502 | 503 | 504)
}

pub struct Retry(RequestBuilder);

impl Retry {
    pub async fn send(self) -> Result<Response, reqwest::Error> {
        let mut tries = 10;
        let mut wait = fastrand::u64(1..=5);

        loop {
            #[allow(clippy::expect_used, reason = "if `RequestBuilder` fails to clone, it means we are working on streams, which is not the assumption of operation!")]
            let request = self.0.try_clone()
                .expect("`RequestBuilder` should only fail to clone when working with streams/readers, and we only do standard requests");

            match request.send().await {
                Ok(response) if is_transient(response.status()) && tries > 0 => {
                    tokio::time::sleep(Duration::from_secs(wait)).await;
                    tries -= 1;
                    wait += 3;
                    wait += fastrand::u64(1..=5);
                }
                Err(_) if tries > 0 => {
                    tokio::time::sleep(Duration::from_secs(wait)).await;
                    tries -= 1;
                    wait += 3;
                    wait += fastrand::u64(1..=5);
                }
                Ok(response) => return Ok(response),
                Err(err) => return Err(err),
            }
        }
    }
}

pub trait IRetry {
    fn retry(self) -> Retry;
}

impl IRetry for RequestBuilder {
    fn retry(self) -> Retry {
        Retry(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_agent_should_be_expected() {
        const AGENT: &str = "anitube/0.1.0";
        const { assert!(AGENT.len() == DEFAULT_USER_AGENT.len()) }
        assert_eq!(AGENT, DEFAULT_USER_AGENT);
    }

    #[test]
    fn transient_statuses_should_be_retried() {
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient(StatusCode::BAD_GATEWAY));
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_transient(StatusCode::GATEWAY_TIMEOUT));
    }

    #[test]
    fn backend_statuses_should_not_be_retried() {
        assert!(!is_transient(StatusCode::OK));
        assert!(!is_transient(StatusCode::FOUND));
        assert!(!is_transient(StatusCode::FORBIDDEN));
        assert!(!is_transient(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
