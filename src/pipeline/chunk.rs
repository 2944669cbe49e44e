//! PNG text-chunk codec: locate the card chunk, rewrite the container.
//!
//! Character-card PNGs carry their payload in an ancillary text chunk keyed
//! `Chara` (casing varies between frontends, so matching is
//! case-insensitive). Reading returns that chunk's value; writing produces
//! a brand-new PNG at a caller-supplied sink that carries the original
//! pixel data, colour metadata, and every *other* text entry unchanged,
//! with exactly one canonical `Chara` tEXt entry holding the new payload.
//!
//! The decoder runs with identity transformations so pixel bytes round-trip
//! exactly as stored (packed sub-byte rows, 16-bit samples, palette indices
//! — nothing is expanded or converted). Text chunks are allowed after the
//! image data, so both operations drain the file to IEND before consulting
//! the chunk list.
//!
//! Writing never touches the source path. Callers that need all-or-nothing
//! output semantics hand in a temp-file writer and persist it on success
//! (see [`crate::process`]).

use crate::error::TavernStripError;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Canonical keyword of the character-card text chunk.
pub const CARD_KEYWORD: &str = "Chara";

/// Read the card payload string from the PNG at `path`.
///
/// Scans tEXt, then iTXt, then zTXt entries for a keyword matching
/// [`CARD_KEYWORD`] case-insensitively. Returns
/// [`TavernStripError::MetadataNotFound`] if no entry matches.
pub fn read_card_chunk(path: &Path) -> Result<String, TavernStripError> {
    let file = open_container(path)?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder.read_info().map_err(|source| {
        TavernStripError::ContainerRead {
            path: path.to_path_buf(),
            source,
        }
    })?;
    // Text chunks may sit after the image data; drain to IEND so the
    // chunk list is complete.
    reader
        .finish()
        .map_err(|source| TavernStripError::ContainerRead {
            path: path.to_path_buf(),
            source,
        })?;

    let info = reader.info();

    for chunk in &info.uncompressed_latin1_text {
        if chunk.keyword.eq_ignore_ascii_case(CARD_KEYWORD) {
            debug!(keyword = %chunk.keyword, "found card payload in tEXt chunk");
            return Ok(chunk.text.clone());
        }
    }
    for chunk in &info.utf8_text {
        if chunk.keyword.eq_ignore_ascii_case(CARD_KEYWORD) {
            debug!(keyword = %chunk.keyword, "found card payload in iTXt chunk");
            return chunk
                .get_text()
                .map_err(|source| TavernStripError::ContainerRead {
                    path: path.to_path_buf(),
                    source,
                });
        }
    }
    for chunk in &info.compressed_latin1_text {
        if chunk.keyword.eq_ignore_ascii_case(CARD_KEYWORD) {
            debug!(keyword = %chunk.keyword, "found card payload in zTXt chunk");
            return chunk
                .get_text()
                .map_err(|source| TavernStripError::ContainerRead {
                    path: path.to_path_buf(),
                    source,
                });
        }
    }

    Err(TavernStripError::MetadataNotFound {
        path: path.to_path_buf(),
        keyword: CARD_KEYWORD.to_string(),
    })
}

/// Write a copy of the PNG at `src` into `dst`, replacing the card chunk.
///
/// Every text entry whose keyword does not match [`CARD_KEYWORD`]
/// (case-insensitively) is carried over in its original chunk form; all
/// case variants of the target key are dropped and replaced by a single
/// canonical tEXt entry holding `payload`. Pixel data, palette,
/// transparency, and colour-space metadata are carried unchanged.
pub fn write_card_chunk<W: Write>(
    src: &Path,
    dst: W,
    payload: &str,
) -> Result<(), TavernStripError> {
    let read_err = |source: png::DecodingError| TavernStripError::ContainerRead {
        path: src.to_path_buf(),
        source,
    };
    let write_err = |source: png::EncodingError| TavernStripError::ContainerWrite {
        path: src.to_path_buf(),
        source,
    };

    let file = open_container(src)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(read_err)?;

    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut pixels).map_err(read_err)?;
    // Pick up any text chunks stored after the image data.
    reader.finish().map_err(read_err)?;

    let info = reader.info();
    if info.animation_control.is_some() {
        warn!(
            src = %src.display(),
            "source is an animated PNG; only the first frame is carried over"
        );
    }

    let mut encoder = png::Encoder::new(dst, info.width, info.height);
    encoder.set_color(info.color_type);
    encoder.set_depth(info.bit_depth);
    if let Some(palette) = info.palette.as_ref() {
        encoder.set_palette(palette.to_vec());
    }
    if let Some(trns) = info.trns.as_ref() {
        encoder.set_trns(trns.to_vec());
    }
    if let Some(gamma) = info.source_gamma {
        encoder.set_source_gamma(gamma);
    }
    if let Some(chromaticities) = info.source_chromaticities {
        encoder.set_source_chromaticities(chromaticities);
    }
    if let Some(srgb) = info.srgb {
        encoder.set_source_srgb(srgb);
    }

    for chunk in &info.uncompressed_latin1_text {
        if !chunk.keyword.eq_ignore_ascii_case(CARD_KEYWORD) {
            encoder
                .add_text_chunk(chunk.keyword.clone(), chunk.text.clone())
                .map_err(write_err)?;
        }
    }
    for chunk in &info.compressed_latin1_text {
        if !chunk.keyword.eq_ignore_ascii_case(CARD_KEYWORD) {
            let text = chunk.get_text().map_err(read_err)?;
            encoder
                .add_ztxt_chunk(chunk.keyword.clone(), text)
                .map_err(write_err)?;
        }
    }
    for chunk in &info.utf8_text {
        if !chunk.keyword.eq_ignore_ascii_case(CARD_KEYWORD) {
            let text = chunk.get_text().map_err(read_err)?;
            encoder
                .add_itxt_chunk(chunk.keyword.clone(), text)
                .map_err(write_err)?;
        }
    }
    encoder
        .add_text_chunk(CARD_KEYWORD.to_string(), payload.to_string())
        .map_err(write_err)?;

    let mut writer = encoder.write_header().map_err(write_err)?;
    writer
        .write_image_data(&pixels[..frame.buffer_size()])
        .map_err(write_err)?;
    writer.finish().map_err(write_err)
}

fn open_container(path: &Path) -> Result<File, TavernStripError> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TavernStripError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            TavernStripError::ContainerRead {
                path: path.to_path_buf(),
                source: e.into(),
            }
        }
    })
}
