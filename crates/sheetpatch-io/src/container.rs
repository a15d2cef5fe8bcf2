use serde::{Deserialize, Serialize};
use sheetpatch_model::{Document, SCHEMA_VERSION};

use crate::{CodecError, SpreadsheetCodec};

/// Identifying tag carried in every container envelope.
pub const CONTAINER_TAG: &str = "sheetpatch/container";

/// The bundled reference codec: a versioned JSON envelope around the
/// document model.
///
/// The envelope is `{ "container": <tag>, "document": { ... } }`. The
/// document's own `schema_version` gates compatibility: an envelope written
/// by a newer schema is refused as [`CodecError::UnsupportedFeature`]
/// rather than half-read. Binary preserved parts encode as base64 (see
/// `sheetpatch_model::serde_b64`), so the whole container is text.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonContainer;

#[derive(Serialize)]
struct Envelope<'a> {
    container: &'a str,
    document: &'a Document,
}

/// Full payload view; the tag is validated on [`EnvelopeHead`] first.
#[derive(Deserialize)]
struct OwnedEnvelope {
    document: Document,
}

/// Minimal view used to gate on the schema version before decoding the
/// full payload.
#[derive(Deserialize)]
struct EnvelopeHead {
    container: String,
    document: DocumentHead,
}

#[derive(Deserialize)]
struct DocumentHead {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl SpreadsheetCodec for JsonContainer {
    fn parse(&self, bytes: &[u8]) -> Result<Document, CodecError> {
        let head: EnvelopeHead = serde_json::from_slice(bytes)
            .map_err(|err| CodecError::Format(err.to_string()))?;
        if head.container != CONTAINER_TAG {
            return Err(CodecError::Format(format!(
                "unexpected container tag {:?}",
                head.container
            )));
        }
        if head.document.schema_version > SCHEMA_VERSION {
            return Err(CodecError::UnsupportedFeature(format!(
                "container schema version {} is newer than the supported version {}",
                head.document.schema_version, SCHEMA_VERSION
            )));
        }

        let envelope: OwnedEnvelope = serde_json::from_slice(bytes)
            .map_err(|err| CodecError::Format(err.to_string()))?;
        Ok(envelope.document)
    }

    fn serialize(&self, document: &Document) -> Result<Vec<u8>, CodecError> {
        let envelope = Envelope {
            container: CONTAINER_TAG,
            document,
        };
        serde_json::to_vec(&envelope).map_err(|err| CodecError::Format(err.to_string()))
    }
}
