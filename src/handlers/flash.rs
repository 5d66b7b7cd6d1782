//! One-shot notifications carried between a mutation and the next page view.
//!
//! The cookie value is `level:message` with the message url-encoded, where
//! level is `success` or `error`.

use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::services::Outcome;

pub const FLASH_COOKIE: &str = "flash";

pub fn encode(outcome: &Outcome) -> String {
    let level = if outcome.success { "success" } else { "error" };
    format!("{}:{}", level, urlencoding::encode(&outcome.message))
}

pub fn decode(value: &str) -> Option<Outcome> {
    let (level, message) = value.split_once(':')?;
    // The jar may already have percent-decoded the value
    let message = urlencoding::decode(message)
        .map(|m| m.into_owned())
        .unwrap_or_else(|_| message.to_string());

    match level {
        "success" => Some(Outcome::success(message)),
        "error" => Some(Outcome::failure(message)),
        _ => None,
    }
}

/// Queue `outcome` for display on the next rendered page.
pub fn set(jar: CookieJar, outcome: &Outcome) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, encode(outcome)))
            .path("/")
            .http_only(true),
    )
}

/// Read the pending notification, if any, and clear it.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Outcome>) {
    let Some(outcome) = jar.get(FLASH_COOKIE).map(|c| decode(c.value())) else {
        return (jar, None);
    };

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_success() {
        let value = encode(&Outcome::success("Venue The Hop was successfully listed!"));
        assert_eq!(value, "success:Venue%20The%20Hop%20was%20successfully%20listed%21");
    }

    #[test]
    fn test_decode_roundtrip_with_colon() {
        let outcome = Outcome::failure("Error: could not list 100% of it");
        assert_eq!(decode(&encode(&outcome)), Some(outcome));
    }

    #[test]
    fn test_decode_already_decoded_value() {
        assert_eq!(
            decode("success:Show was successfully listed!"),
            Some(Outcome::success("Show was successfully listed!"))
        );
    }

    #[test]
    fn test_decode_unknown_level() {
        assert_eq!(decode("warning:hm"), None);
        assert_eq!(decode("no separator"), None);
    }

    #[test]
    fn test_take_clears_cookie() {
        let jar = set(CookieJar::new(), &Outcome::success("done"));
        let (jar, outcome) = take(jar);

        assert_eq!(outcome, Some(Outcome::success("done")));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_take_without_cookie() {
        let (_, outcome) = take(CookieJar::new());
        assert_eq!(outcome, None);
    }
}
