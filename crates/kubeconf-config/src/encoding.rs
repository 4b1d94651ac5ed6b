//! Serde helpers for the on-disk kubeconfig representation.

use serde::{Deserialize, Deserializer};

/// Read `null` (or an empty YAML value) as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `true` when `value` equals its type's default. Used to omit empty fields.
pub(crate) fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Byte fields are written as standard base64 strings.
pub(crate) mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => STANDARD
                .decode(text.trim())
                .map_err(|e| D::Error::custom(format!("invalid base64 data: {e}"))),
            None => Ok(Vec::new()),
        }
    }
}

/// Extension maps are written as `[{name, extension}]` lists.
pub(crate) mod named_extensions {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct NamedExtensionRef<'a> {
        name: &'a str,
        extension: &'a serde_json::Value,
    }

    #[derive(Deserialize)]
    struct NamedExtension {
        name: String,
        #[serde(default)]
        extension: serde_json::Value,
    }

    pub(crate) fn serialize<S: Serializer>(
        map: &BTreeMap<String, serde_json::Value>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            map.iter()
                .map(|(name, extension)| NamedExtensionRef { name, extension }),
        )
    }

    /// Later duplicates replace earlier ones.
    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, serde_json::Value>, D::Error> {
        let list = Option::<Vec<NamedExtension>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(list
            .into_iter()
            .map(|entry| (entry.name, entry.extension))
            .collect())
    }
}
