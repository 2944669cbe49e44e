//! # tavern-strip
//!
//! Strip paired `*asterisk*` emphasis from Tavern character cards embedded
//! in PNG files.
//!
//! ## Why this crate?
//!
//! Character-card PNGs carry their whole persona — description, greeting,
//! example dialogue, lorebook — as a base64 JSON blob inside an ancillary
//! `Chara` text chunk. Cards written for frontends that *render* asterisk
//! emphasis read terribly in frontends that don't (or that speak the text
//! aloud). This crate rewrites the card in a fresh copy of the image: it
//! unwraps matched `*pairs*` in the prose fields, leaves every other byte
//! of the card and the image alone, and never modifies the original file.
//!
//! ## Pipeline Overview
//!
//! ```text
//! card.png
//!  │
//!  ├─ 1. Chunk    read the `Chara` text entry (case-insensitive)
//!  ├─ 2. Payload  base64+JSON decode, raw-JSON fallback
//!  ├─ 3. Walk     strip the five prose fields, lorebook entries, greetings
//!  ├─ 4. Payload  JSON → base64 (always normalized to the wrapped form)
//!  └─ 5. Chunk    write de8_card.png: pixels + other chunks carried over
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tavern_strip::process_file;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let out = process_file("cards/alice.png", "processed")?;
//!     println!("wrote {}", out.output_path.display());
//!     eprintln!("{} fields changed", out.stats.fields_changed);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `tavern-strip` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! tavern-strip = { version = "0.3", default-features = false }
//! ```
//!
//! The library is fully synchronous and touches the filesystem only through
//! the codec and the orchestrator; the stripper, walker, and transcoder are
//! pure functions you can call on bare strings and [`serde_json::Value`]s.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::StorageConfig;
pub use error::TavernStripError;
pub use pipeline::chunk::{read_card_chunk, write_card_chunk, CARD_KEYWORD};
pub use pipeline::payload::{decode_payload, encode_payload, DecodedCard, PayloadEncoding};
pub use pipeline::strip::{strip_markers, EMPHASIS_MARKER};
pub use pipeline::walk::{edit_card, EditStats, EDITED_FIELDS};
pub use process::{inspect, output_file_name, process_file, CardSummary, ProcessOutput, OUTPUT_PREFIX};
