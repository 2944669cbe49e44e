//! Pipeline stages for character-card editing.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable — only [`chunk`]
//! touches the filesystem; [`payload`], [`walk`], and [`strip`] are pure
//! and run against plain strings and JSON values.
//!
//! ## Data Flow
//!
//! ```text
//! PNG ──▶ chunk.read ──▶ payload.decode ──▶ walk.edit ──▶ payload.encode ──▶ chunk.write ──▶ PNG'
//!          (tEXt scan)    (base64/JSON)      (stripper)     (JSON→base64)     (chunk copy)
//! ```
//!
//! 1. [`chunk`]   — find the `Chara` text entry / rewrite the container
//! 2. [`payload`] — chunk string ⇄ card document
//! 3. [`walk`]    — route the card's prose fields through the stripper
//! 4. [`strip`]   — the paired-marker removal algorithm itself

pub mod chunk;
pub mod payload;
pub mod strip;
pub mod walk;
