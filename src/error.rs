//! Error types for the tavern-strip library.
//!
//! Every fallible operation in the crate returns [`TavernStripError`]. The
//! variants follow the pipeline stages: the codec reports container-level
//! failures with the offending path attached, the transcoder reports both
//! decode attempts it made, and the orchestrator reports output-file I/O.
//!
//! The library never prints or logs an error on the caller's behalf — it
//! returns structured values and lets the caller (the CLI binary, a web
//! layer, a test) decide on presentation. None of these failures are worth
//! retrying without changed inputs: every operation is deterministic, so a
//! retry would reproduce the same result.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the tavern-strip library.
#[derive(Debug, Error)]
pub enum TavernStripError {
    // ── Container errors ──────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PNG file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The file could not be opened or is not a well-formed PNG.
    #[error("failed to read PNG '{path}': {source}")]
    ContainerRead {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },

    /// Re-encoding the PNG copy failed (I/O or invalid chunk data).
    #[error("failed to write PNG copy of '{path}': {source}")]
    ContainerWrite {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },

    // ── Metadata errors ───────────────────────────────────────────────────
    /// The PNG has no text chunk under the target keyword (any casing).
    #[error("no '{keyword}' text chunk found in '{path}'\nIs this really a character card PNG?")]
    MetadataNotFound { path: PathBuf, keyword: String },

    /// Neither decode strategy produced a JSON document.
    ///
    /// Both attempt failures are carried so the caller can see *why* each
    /// branch rejected the payload, not just that decoding failed.
    #[error(
        "metadata payload is neither base64-wrapped JSON nor plain JSON\n  \
         base64 attempt: {base64_error}\n  \
         plain-JSON attempt: {json_error}"
    )]
    PayloadDecode {
        base64_error: String,
        json_error: String,
    },

    /// Serialising the edited card back to JSON failed.
    ///
    /// Near-impossible for a document that was just deserialised, but the
    /// transcoder propagates it rather than panicking.
    #[error("failed to serialise character card: {source}")]
    PayloadEncode {
        #[from]
        source: serde_json::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not stage or persist the output file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn metadata_not_found_display_names_keyword_and_path() {
        let e = TavernStripError::MetadataNotFound {
            path: PathBuf::from("cards/alice.png"),
            keyword: "Chara".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("Chara"), "got: {msg}");
        assert!(msg.contains("cards/alice.png"), "got: {msg}");
    }

    #[test]
    fn payload_decode_display_carries_both_attempts() {
        let e = TavernStripError::PayloadDecode {
            base64_error: "Invalid symbol 123".into(),
            json_error: "expected value at line 1 column 1".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("Invalid symbol 123"));
        assert!(msg.contains("expected value at line 1 column 1"));
    }

    #[test]
    fn file_not_found_display() {
        let e = TavernStripError::FileNotFound {
            path: PathBuf::from("/nope.png"),
        };
        assert!(e.to_string().contains("/nope.png"));
    }

    #[test]
    fn output_write_chains_source() {
        use std::error::Error as _;
        let e = TavernStripError::OutputWrite {
            path: PathBuf::from("out/de8_x.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("de8_x.png"));
    }
}
