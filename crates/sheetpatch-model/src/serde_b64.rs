//! Serde helpers that encode binary payloads as base64 strings.
//!
//! Preserved parts carry raw bytes (macro payloads, images, pivot
//! definitions). Encoding them as base64 keeps the serialized document a
//! plain JSON-safe text payload instead of an array-of-numbers blowup.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serializer};

/// `#[serde(with = "sheetpatch_model::serde_b64::bytes")]` for `Vec<u8>` fields.
pub mod bytes {
    use super::*;

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "sheetpatch_model::serde_b64::part_map")]` for
/// `BTreeMap<String, Vec<u8>>` fields (part name -> payload).
pub mod part_map {
    use std::collections::BTreeMap;

    use serde::ser::SerializeMap;

    use super::*;

    pub fn serialize<S>(parts: &BTreeMap<String, Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(parts.len()))?;
        for (name, payload) in parts {
            map.serialize_entry(name, &STANDARD.encode(payload))?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = BTreeMap::<String, String>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|(name, payload)| {
                STANDARD
                    .decode(payload.as_bytes())
                    .map(|decoded| (name, decoded))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}
