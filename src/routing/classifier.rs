//! Path classification for requests that match no forwarding route.
//!
//! # Decision table (first match wins)
//! - empty token → 200, empty-call marker
//! - length != 3 → 200, token echoed back
//! - `"500"` → 500
//! - `"400"` → 400
//! - any other 3-character token → 200
//!
//! Length is counted in characters, not bytes. No trimming or case folding.

use axum::http::StatusCode;

use crate::upstream::Reply;

pub const CALL_PREFIX: &str = "your call is";
pub const EMPTY_CALL: &str = "your call is [empty]";
pub const RETURN_200: &str = "return status will be 200";
pub const RETURN_400: &str = "return status will be 400";
pub const RETURN_500: &str = "return status will be 500";

/// Map a path token (leading `/` already stripped) to its reply.
pub fn classify(token: &str) -> Reply {
    match token {
        "" => Reply::ok(EMPTY_CALL),
        t if t.chars().count() != 3 => Reply::ok(format!("{} {}", CALL_PREFIX, t)),
        "500" => Reply::new(StatusCode::INTERNAL_SERVER_ERROR, RETURN_500),
        "400" => Reply::new(StatusCode::BAD_REQUEST, RETURN_400),
        _ => Reply::ok(RETURN_200),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_call() {
        assert_eq!(classify(""), Reply::ok(EMPTY_CALL));
    }

    #[test]
    fn test_echoes_tokens_not_three_long() {
        for token in ["a", "ab", "abcd", "1234", "foo/bar", " 200", "20"] {
            let reply = classify(token);
            assert_eq!(reply.status, StatusCode::OK, "token {:?}", token);
            assert_eq!(reply.body, format!("your call is {}", token));
        }
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(classify("500"), Reply::new(StatusCode::INTERNAL_SERVER_ERROR, RETURN_500));
        assert_eq!(classify("400"), Reply::new(StatusCode::BAD_REQUEST, RETURN_400));
        assert_eq!(classify("200"), Reply::ok(RETURN_200));
    }

    #[test]
    fn test_other_three_char_tokens_default_to_200() {
        // Must hit the default branch, never the echo branch.
        for token in ["abc", "123", "404", "a b", "5OO", "é!x"] {
            assert_eq!(classify(token), Reply::ok(RETURN_200), "token {:?}", token);
        }
    }

    #[test]
    fn test_length_counts_characters() {
        // Three characters, more than three bytes.
        assert_eq!(classify("日本語"), Reply::ok(RETURN_200));
        assert_eq!(classify("日本"), Reply::ok("your call is 日本"));
    }

    #[test]
    fn test_classify_is_pure() {
        for token in ["", "x", "400", "500", "abc", "longer"] {
            assert_eq!(classify(token), classify(token));
        }
    }
}
