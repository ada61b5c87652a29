//! Minimal cookie-pair handling.
//!
//! Only covers what talking to the site needs: pulling one named value out of
//! a `Cookie`-style pair list or a `Set-Cookie` header. Attributes like
//! `Path` and `Max-Age` are ignored.

/// Extracts the value of the cookie `name` from a `"a=1; b=2"` style pair
/// list, percent-decoded.
pub fn find(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode(value))
}

/// Extracts the cookie value from a single `Set-Cookie` header value, if the
/// header sets `name`.
///
/// The cookie pair is always the first `;`-separated element; everything
/// after it is attributes.
pub fn set_cookie_value(header: &str, name: &str) -> Option<String> {
    let pair = header.split(';').next()?;

    let (key, value) = pair.trim().split_once('=')?;

    (key == name).then(|| decode(value))
}

fn decode(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        // Not valid UTF-8 once decoded. The raw value is still the best
        // answer we can give back.
        Err(_) => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn should_find_token_in_pair_list() {
        let cookies = "sessionid=xyz; csrftoken=abc123; theme=dark";
        assert_eq!(Some("abc123".to_owned()), find(cookies, "csrftoken"));
    }

    #[test]
    fn should_find_token_when_only_pair() {
        assert_eq!(Some("abc123".to_owned()), find("csrftoken=abc123", "csrftoken"));
    }

    #[test]
    fn should_not_match_on_name_prefix() {
        let cookies = "csrftoken2=nope; csrftoken=abc123";
        assert_eq!(Some("abc123".to_owned()), find(cookies, "csrftoken"));
    }

    #[test]
    fn should_be_none_when_absent() {
        assert_eq!(None, find("sessionid=xyz; theme=dark", "csrftoken"));
        assert_eq!(None, find("", "csrftoken"));
    }

    #[test]
    fn should_percent_decode_values() {
        let cookies = "csrftoken=a%20b%3Dc";
        assert_eq!(Some("a b=c".to_owned()), find(cookies, "csrftoken"));
    }

    #[test]
    fn should_read_set_cookie_pair_and_skip_attributes() {
        let header = "csrftoken=abc123; expires=Tue, 04 Aug 2026 00:00:00 GMT; Max-Age=31449600; Path=/; SameSite=Lax";
        assert_eq!(Some("abc123".to_owned()), set_cookie_value(header, "csrftoken"));
    }

    #[test]
    fn should_reject_set_cookie_for_other_name() {
        let header = "sessionid=xyz; Path=/; HttpOnly";
        assert_eq!(None, set_cookie_value(header, "csrftoken"));
    }
}
