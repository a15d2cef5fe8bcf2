use sheetpatch_model::Document;

use crate::{CodecError, SpreadsheetCodec};

/// Turn raw container bytes into a [`Document`].
///
/// Fails with [`CodecError::Format`] when the bytes are not a recognized
/// container and [`CodecError::UnsupportedFeature`] when the codec cannot
/// represent a feature present in the file; the error is surfaced instead
/// of silently dropping the feature. A partially-populated document is
/// never returned.
///
/// The loader holds no state and may be called repeatedly for independent
/// sessions.
pub fn load_from_bytes(
    codec: &dyn SpreadsheetCodec,
    bytes: &[u8],
) -> Result<Document, CodecError> {
    codec.parse(bytes)
}

/// Serialize a [`Document`] into container bytes.
///
/// The codec must reattach every metadata field verbatim; this wrapper adds
/// nothing beyond the symmetric entry point to [`load_from_bytes`].
pub fn save_to_bytes(
    codec: &dyn SpreadsheetCodec,
    document: &Document,
) -> Result<Vec<u8>, CodecError> {
    codec.serialize(document)
}
