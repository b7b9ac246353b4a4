//! Serde helpers for flexible deserialization.
//!
//! When the `tracing` feature is enabled, this module also logs warnings for any
//! unknown fields encountered during deserialization, helping detect stale or
//! misspelled configuration keys.

use std::str::FromStr as _;

use alloy::primitives::U256;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A `serde_as` type that deserializes token ids given as decimal strings,
/// `0x`-prefixed hex strings or JSON integers into [`U256`].
///
/// Token ids are always serialized back as decimal strings, since JSON numbers
/// cannot represent the full `uint256` range.
pub struct TokenIdFromAny;

impl<'de> serde_with::DeserializeAs<'de, U256> for TokenIdFromAny {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<U256, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt;

        use serde::de::{self, Visitor};

        struct TokenIdVisitor;

        impl Visitor<'_> for TokenIdVisitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a token id as a string or non-negative integer")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                U256::from_str(v.trim()).map_err(E::custom)
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(U256::from(v))
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(v)
                    .map(U256::from)
                    .map_err(|_err| E::custom(format!("token id must not be negative: {v}")))
            }
        }

        deserializer.deserialize_any(TokenIdVisitor)
    }
}

impl serde_with::SerializeAs<U256> for TokenIdFromAny {
    fn serialize_as<S>(source: &U256, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(source)
    }
}

/// Deserialize JSON with unknown field warnings.
///
/// Unknown fields are logged at `WARN` with their JSON path and value but never
/// fail deserialization. On failure the offending path is logged at `ERROR`.
#[cfg(feature = "tracing")]
pub(crate) fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    use std::any::type_name;

    tracing::trace!(
        type_name = %type_name::<T>(),
        json = %value,
        "deserializing JSON"
    );

    let original = value.clone();
    let mut unknown_paths: Vec<String> = Vec::new();

    let result: T = serde_ignored::deserialize(value, |path| {
        unknown_paths.push(path.to_string());
    })
    .inspect_err(|_| {
        // serde_ignored loses the failing path, so replay through serde_path_to_error
        let path_result: Result<T, _> = serde_path_to_error::deserialize(original.clone());
        if let Err(path_err) = path_result {
            let path = path_err.path().to_string();
            let value_display = format_value(lookup_value(&original, &path));

            tracing::error!(
                type_name = %type_name::<T>(),
                path = %path,
                value = %value_display,
                error = %path_err.inner(),
                "deserialization failed"
            );
        }
    })?;

    for path in unknown_paths {
        let value_display = format_value(lookup_value(&original, &path));

        tracing::warn!(
            type_name = %type_name::<T>(),
            field = %path,
            value = %value_display,
            "unknown field ignored"
        );
    }

    Ok(result)
}

/// Pass-through deserialization when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub(crate) fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Look up a value in a JSON structure by a `serde_ignored` or `serde_path_to_error` path.
///
/// `?` segments mark `Option` wrappers and are skipped.
#[cfg(feature = "tracing")]
fn lookup_value<'value>(value: &'value Value, path: &str) -> Option<&'value Value> {
    let mut current = value;

    for segment in path_segments(path) {
        if segment == "?" {
            continue;
        }

        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Splits `immutable.v1.address` or `items[0].id` into its non-empty segments.
#[cfg(feature = "tracing")]
fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['.', '[', ']']).filter(|segment| !segment.is_empty())
}

#[cfg(feature = "tracing")]
fn format_value(value: Option<&Value>) -> String {
    value.map_or_else(|| "<unable to retrieve>".to_owned(), Value::to_string)
}
