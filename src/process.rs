//! Top-level entry points: one call per card file.
//!
//! [`process_file`] is the whole pipeline — read the card chunk, decode it,
//! strip the prose fields, re-encode, and write a new PNG into the caller's
//! directory under a `de8_`-prefixed name. The output is staged in an
//! anonymous temp file inside the target directory and persisted into place
//! only after the codec has finished, so a failure at any stage leaves no
//! partial file visible.
//!
//! [`inspect`] is the read-only half: decode and summarise without writing.

use crate::error::TavernStripError;
use crate::pipeline::payload::{self, DecodedCard, PayloadEncoding};
use crate::pipeline::walk::{self, EditStats};
use crate::pipeline::chunk;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fixed marker prepended to the input's file name to form the output name.
pub const OUTPUT_PREFIX: &str = "de8_";

/// Result of a successful [`process_file`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOutput {
    /// Where the rewritten PNG landed.
    pub output_path: PathBuf,
    /// Which decode branch accepted the stored payload (diagnostic; the
    /// output is always base64-wrapped regardless).
    pub encoding: PayloadEncoding,
    /// What the field walker did.
    pub stats: EditStats,
}

/// Read-only summary of a card file, for callers that want to look before
/// they touch anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSummary {
    /// `data.name`, if the card carries one.
    pub name: Option<String>,
    /// Which decode branch accepted the stored payload.
    pub encoding: PayloadEncoding,
    /// Number of lorebook entries.
    pub book_entries: usize,
    /// Number of alternate greetings.
    pub alternate_greetings: usize,
    /// Editable fields that currently contain emphasis markers.
    pub fields_with_markers: usize,
}

/// Strip emphasis markers from the card embedded in `input` and write the
/// result as a new PNG inside `output_dir`.
///
/// The output file name is the input's base name prefixed with
/// [`OUTPUT_PREFIX`]. The source file is never modified. On any failure no
/// output file exists — the write is staged through a temp file in
/// `output_dir` and only renamed into place on success.
///
/// # Errors
/// * [`TavernStripError::MetadataNotFound`] — no `Chara` chunk in the PNG
/// * [`TavernStripError::PayloadDecode`] — the chunk holds neither
///   base64-wrapped nor plain JSON
/// * container/output variants for I/O and malformed-PNG failures
pub fn process_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<ProcessOutput, TavernStripError> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();
    info!("processing {}", input.display());

    let raw = chunk::read_card_chunk(input)?;
    let DecodedCard { mut card, encoding } = payload::decode_payload(&raw)?;
    debug!(?encoding, "decoded character card payload");

    let stats = walk::edit_card(&mut card);
    let encoded = payload::encode_payload(&card)?;

    let output_path = output_dir.join(output_file_name(input));
    let staged = tempfile::Builder::new()
        .prefix(".tavern-strip-")
        .suffix(".png")
        .tempfile_in(output_dir)
        .map_err(|source| TavernStripError::OutputWrite {
            path: output_path.clone(),
            source,
        })?;

    chunk::write_card_chunk(input, staged.as_file(), &encoded)?;

    staged
        .persist(&output_path)
        .map_err(|e| TavernStripError::OutputWrite {
            path: output_path.clone(),
            source: e.error,
        })?;

    info!(
        changed = stats.fields_changed,
        "wrote {}",
        output_path.display()
    );
    Ok(ProcessOutput {
        output_path,
        encoding,
        stats,
    })
}

/// Decode the card embedded in `input` and summarise it without writing
/// anything.
pub fn inspect(input: impl AsRef<Path>) -> Result<CardSummary, TavernStripError> {
    let input = input.as_ref();
    let raw = chunk::read_card_chunk(input)?;
    let DecodedCard { card, encoding } = payload::decode_payload(&raw)?;

    let data = card.get("data");
    let name = data
        .and_then(|d| d.get("name"))
        .and_then(|n| n.as_str())
        .map(str::to_owned);
    let book_entries = data
        .and_then(|d| d.get("character_book"))
        .and_then(|b| b.get("entries"))
        .and_then(|e| e.as_array())
        .map_or(0, Vec::len);
    let alternate_greetings = data
        .and_then(|d| d.get("alternate_greetings"))
        .and_then(|g| g.as_array())
        .map_or(0, Vec::len);

    // Count without mutating: a field "has markers" when stripping would
    // change it.
    let mut probe = card.clone();
    let stats = walk::edit_card(&mut probe);

    Ok(CardSummary {
        name,
        encoding,
        book_entries,
        alternate_greetings,
        fields_with_markers: stats.fields_changed,
    })
}

/// Output file name for `input`: base name with the fixed prefix.
///
/// A path with no file name (e.g. `/`) degrades to the prefix alone rather
/// than erroring; the codec will have rejected such inputs long before.
pub fn output_file_name(input: &Path) -> String {
    let base = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{OUTPUT_PREFIX}{base}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_gets_fixed_prefix() {
        assert_eq!(output_file_name(Path::new("alice.png")), "de8_alice.png");
        assert_eq!(
            output_file_name(Path::new("/uploads/deep/bob.png")),
            "de8_bob.png"
        );
    }

    #[test]
    fn output_name_keeps_odd_names_intact() {
        assert_eq!(
            output_file_name(Path::new("no extension")),
            "de8_no extension"
        );
        assert_eq!(output_file_name(Path::new("de8_x.png")), "de8_de8_x.png");
    }
}
