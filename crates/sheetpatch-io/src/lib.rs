//! Codec boundary and document loading.
//!
//! The byte-level format of a concrete spreadsheet container (OOXML
//! packages, legacy binary formats) is an external collaborator behind the
//! [`SpreadsheetCodec`] trait: `parse(bytes) -> Document` and
//! `serialize(&Document) -> bytes`. The round-trip fidelity contract is the
//! only thing this crate asks of a codec: every metadata field it receives
//! must come back unchanged.
//!
//! A versioned JSON container codec ([`JsonContainer`]) ships as the
//! reference implementation of the boundary, so the load/save contract is
//! concrete and testable without any format-specific machinery.

mod codec;
mod container;
mod loader;

pub use codec::{CodecError, SpreadsheetCodec};
pub use container::{JsonContainer, CONTAINER_TAG};
pub use loader::{load_from_bytes, save_to_bytes};
