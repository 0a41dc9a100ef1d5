//! Session token placeholder.
//!
//! A token is the base64 text of `"{user_id}:{unix_millis}"`. It carries no
//! signature and no expiry, so anyone can mint one for any user id; it only
//! identifies the caller, it does not protect anything.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;

use crate::error::ApiError;

/// Accepted as user 1 without decoding.
pub const DEV_BYPASS_TOKEN: &str = "dummy-token-for-development";

const DEV_BYPASS_USER_ID: u64 = 1;

pub fn issue_token(user_id: u64) -> String {
    issue_token_at(user_id, Utc::now().timestamp_millis())
}

pub fn issue_token_at(user_id: u64, unix_millis: i64) -> String {
    STANDARD.encode(format!("{user_id}:{unix_millis}"))
}

/// Returns the user id carried by `token`.
pub fn decode_token(token: &str) -> Result<u64, ApiError> {
    if token == DEV_BYPASS_TOKEN {
        return Ok(DEV_BYPASS_USER_ID);
    }

    let invalid = || ApiError::Auth("Invalid token".to_string());

    let bytes = STANDARD.decode(token.trim()).map_err(|_| invalid())?;
    let text = String::from_utf8(bytes).map_err(|_| invalid())?;
    let (user_id, _issued_at) = text.split_once(':').ok_or_else(invalid)?;

    user_id.parse::<u64>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bypass_token_is_user_one() {
        assert_eq!(decode_token(DEV_BYPASS_TOKEN).unwrap(), 1);
    }

    #[test]
    fn issued_token_decodes_to_its_user() {
        let token = issue_token_at(42, 1_767_225_600_000);
        assert_eq!(token, STANDARD.encode("42:1767225600000"));
        assert_eq!(decode_token(&token).unwrap(), 42);
        assert_eq!(decode_token(&issue_token(7)).unwrap(), 7);
    }

    #[test]
    fn malformed_tokens_are_auth_errors() {
        let cases = [
            "not base64 at all!".to_string(),
            STANDARD.encode("no-separator"),
            STANDARD.encode("abc:123"),
            STANDARD.encode(":123"),
            STANDARD.encode([0xff, 0xfe, b':', b'1']),
            String::new(),
        ];

        for token in cases {
            assert!(
                matches!(decode_token(&token), Err(ApiError::Auth(_))),
                "accepted {token:?}"
            );
        }
    }
}
