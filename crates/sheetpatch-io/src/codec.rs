use sheetpatch_model::Document;
use thiserror::Error;

/// Errors surfaced at the codec boundary.
///
/// The taxonomy is deliberately small: either the bytes are not a container
/// this codec recognizes, or the container uses a feature the codec cannot
/// represent. The second case exists so that a feature gap surfaces as an
/// error instead of a silently thinner document: a partially preserved
/// document is worse than a visible failure.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a valid/parseable container.
    #[error("unrecognized or corrupt container: {0}")]
    Format(String),

    /// The container carries a feature this codec cannot represent without
    /// dropping it.
    #[error("unsupported container feature: {0}")]
    UnsupportedFeature(String),
}

/// Byte-level codec for one spreadsheet container format.
///
/// Both operations are pure transforms: no shared state, no side effects
/// beyond allocation, safe to call repeatedly for independent sessions.
///
/// Contract for `serialize`: reproduce, byte-for-byte where the format
/// allows, every metadata field of the document unchanged, and encode the
/// full cell map with correct value + formatting pairing.
pub trait SpreadsheetCodec {
    /// Decode container bytes into a [`Document`].
    ///
    /// On success, `sheets[0].cells` reflects every non-empty cell in the
    /// container; metadata fields the format does not support are simply
    /// left at their defaults (absence is not an error).
    fn parse(&self, bytes: &[u8]) -> Result<Document, CodecError>;

    /// Encode a [`Document`] into container bytes.
    fn serialize(&self, document: &Document) -> Result<Vec<u8>, CodecError>;
}
