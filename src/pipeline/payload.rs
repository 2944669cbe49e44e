//! Payload transcoding: chunk string ⇄ card document.
//!
//! Frontends disagree on how the card JSON is stored inside the text chunk:
//! most base64-wrap it (tEXt is Latin-1, raw JSON with non-ASCII prose is
//! not representable), a few store plain JSON. Decoding therefore tries
//! base64-then-JSON first and falls back to parsing the string directly.
//! Encoding does not mirror that choice: the output is *always* the
//! base64-wrapped form, normalizing plain-JSON inputs on the way through.

use crate::error::TavernStripError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Which decode branch accepted the payload. Diagnostic only — the encode
/// side always emits [`PayloadEncoding::Base64Json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadEncoding {
    /// `base64(json)` — the common, normalized form.
    Base64Json,
    /// The chunk held the JSON document directly.
    PlainJson,
}

/// A decoded card document plus the branch that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCard {
    pub card: Value,
    pub encoding: PayloadEncoding,
}

/// Decode a chunk string into a card document.
///
/// Tries base64 → JSON, then raw JSON. If both branches reject the payload
/// the error carries both failure messages so the caller can tell a
/// truncated base64 blob from a malformed document.
pub fn decode_payload(raw: &str) -> Result<DecodedCard, TavernStripError> {
    let base64_error = match STANDARD.decode(raw.trim()) {
        Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
            Ok(card) => {
                return Ok(DecodedCard {
                    card,
                    encoding: PayloadEncoding::Base64Json,
                })
            }
            Err(e) => format!("decoded base64, but the result is not JSON: {e}"),
        },
        Err(e) => format!("not base64: {e}"),
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(card) => {
            debug!("payload was plain JSON; will be normalized to base64 on write");
            Ok(DecodedCard {
                card,
                encoding: PayloadEncoding::PlainJson,
            })
        }
        Err(json_error) => Err(TavernStripError::PayloadDecode {
            base64_error,
            json_error: json_error.to_string(),
        }),
    }
}

/// Serialise a card document back into chunk form: JSON, base64-wrapped.
pub fn encode_payload(card: &Value) -> Result<String, TavernStripError> {
    let json = serde_json::to_string(card)?;
    Ok(STANDARD.encode(json.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_base64_wrapped_json() {
        let raw = STANDARD.encode(r#"{"data":{"name":"Alice"}}"#);
        let decoded = decode_payload(&raw).expect("decode");
        assert_eq!(decoded.encoding, PayloadEncoding::Base64Json);
        assert_eq!(decoded.card["data"]["name"], "Alice");
    }

    #[test]
    fn falls_back_to_plain_json() {
        let decoded = decode_payload(r#"{"data":{"name":"Bob"}}"#).expect("decode");
        assert_eq!(decoded.encoding, PayloadEncoding::PlainJson);
        assert_eq!(decoded.card["data"]["name"], "Bob");
    }

    #[test]
    fn base64_of_non_json_falls_through_then_errors() {
        // Valid base64, but the decoded bytes are not JSON, and the raw
        // string is not JSON either.
        let raw = STANDARD.encode("definitely not json");
        let err = decode_payload(&raw).expect_err("must fail");
        match err {
            TavernStripError::PayloadDecode {
                base64_error,
                json_error,
            } => {
                assert!(base64_error.contains("not JSON"), "got: {base64_error}");
                assert!(!json_error.is_empty());
            }
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn garbage_reports_both_branch_failures() {
        let err = decode_payload("!!! not base64, not json !!!").expect_err("must fail");
        match err {
            TavernStripError::PayloadDecode {
                base64_error,
                json_error,
            } => {
                assert!(base64_error.contains("not base64"), "got: {base64_error}");
                assert!(!json_error.is_empty());
            }
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn encode_always_produces_base64() {
        let card = json!({"data": {"description": "plain"}});
        let encoded = encode_payload(&card).expect("encode");
        let bytes = STANDARD.decode(&encoded).expect("output must be base64");
        let back: Value = serde_json::from_slice(&bytes).expect("and wrap JSON");
        assert_eq!(back, card);
    }

    #[test]
    fn round_trip_preserves_structure() {
        let card = json!({
            "spec": "chara_card_v2",
            "data": {
                "name": "Alice",
                "description": "no markers",
                "personality": null,
                "character_book": {"entries": [{"content": "x"}]},
                "alternate_greetings": ["hi"],
                "extensions": {"nested": [1, 2, 3]}
            }
        });
        let encoded = encode_payload(&card).expect("encode");
        let decoded = decode_payload(&encoded).expect("decode");
        assert_eq!(decoded.encoding, PayloadEncoding::Base64Json);
        assert_eq!(decoded.card, card);
    }

    #[test]
    fn decode_tolerates_surrounding_whitespace_on_base64() {
        let raw = format!("  {}\n", STANDARD.encode(r#"{"a":1}"#));
        let decoded = decode_payload(&raw).expect("decode");
        assert_eq!(decoded.card["a"], 1);
    }
}
