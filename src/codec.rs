use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::WorkflowError;

/// Typed payload codec over an opaque string encoding.
pub trait Codec {
    fn encode<T: Serialize>(value: &T) -> Result<String, String>;
    fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, String>;
}

/// JSON codec used for all encoded payloads in this crate.
pub struct Json;

impl Codec for Json {
    fn encode<T: Serialize>(value: &T) -> Result<String, String> {
        serde_json::to_string(value).map_err(|e| format!("encode: {e}"))
    }

    fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, String> {
        serde_json::from_str(payload).map_err(|e| format!("decode: {e}"))
    }
}

/// Ordered sequence of opaque encoded argument values.
///
/// Each element is independently decodable to a caller-requested shape via
/// [`get`](Self::get). Decoding is lazy and per-element: a handler may decode
/// only the arguments it needs, in any order, any number of times (including
/// zero). Decoding is a pure projection and never mutates the set, so repeat
/// decodes of the same element with the same shape yield equal values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedValues {
    values: Vec<String>,
}

impl EncodedValues {
    /// An argument set with no elements.
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// Wrap already-encoded elements as produced by the transport layer.
    pub fn from_raw(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Encode a homogeneous slice of values into an argument set.
    pub fn from_values<T: Serialize>(values: &[T]) -> Result<Self, String> {
        let mut encoded = Vec::with_capacity(values.len());
        for v in values {
            encoded.push(Json::encode(v)?);
        }
        Ok(Self { values: encoded })
    }

    /// Append one encoded value; chains for heterogeneous argument lists.
    pub fn with<T: Serialize>(mut self, value: &T) -> Result<Self, String> {
        self.values.push(Json::encode(value)?);
        Ok(self)
    }

    /// Decode the element at `index` to the requested shape.
    ///
    /// Fails with [`WorkflowError::Decode`] when the index is out of range
    /// (wrong arity) or the underlying payload is structurally incompatible
    /// with the requested shape.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T, WorkflowError> {
        let raw = self.values.get(index).ok_or_else(|| {
            WorkflowError::decode(
                index,
                format!("index {index} out of range for {} encoded values", self.values.len()),
            )
        })?;
        Json::decode(raw).map_err(|reason| WorkflowError::Decode { index, reason })
    }

    /// Raw encoded element at `index`, for callers that stay generic over the payload.
    pub fn raw(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: same element, same shape, decoded twice yields equal values
    #[test]
    fn test_decode_is_idempotent() {
        let args = EncodedValues::empty()
            .with(&"World")
            .unwrap()
            .with(&42u64)
            .unwrap();

        let first: String = args.get(0).unwrap();
        let second: String = args.get(0).unwrap();
        assert_eq!(first, "World");
        assert_eq!(first, second);

        // Decoding one element does not disturb decodes of the others
        let n: u64 = args.get(1).unwrap();
        assert_eq!(n, 42);
        let again: String = args.get(0).unwrap();
        assert_eq!(again, "World");
    }

    /// Test: elements decode in any order, independent of declaration order
    #[test]
    fn test_decode_any_order() {
        let args = EncodedValues::from_values(&[1i64, 2, 3]).unwrap();
        assert_eq!(args.len(), 3);
        let last: i64 = args.get(2).unwrap();
        let first: i64 = args.get(0).unwrap();
        assert_eq!((first, last), (1, 3));
    }

    /// Test: out-of-range index reports a Decode failure carrying the index
    #[test]
    fn test_wrong_arity_is_decode_error() {
        let args = EncodedValues::from_values(&["only"]).unwrap();
        let err = args.get::<String>(1).unwrap_err();
        assert!(matches!(err, WorkflowError::Decode { index: 1, .. }));
    }

    /// Test: structural mismatch reports a Decode failure, set stays usable
    #[test]
    fn test_incompatible_shape_is_decode_error() {
        let args = EncodedValues::empty().with(&"not a number").unwrap();
        let err = args.get::<u64>(0).unwrap_err();
        assert!(matches!(err, WorkflowError::Decode { index: 0, .. }));
        // The failed decode did not consume or corrupt the element
        let s: String = args.get(0).unwrap();
        assert_eq!(s, "not a number");
    }

    /// Test: raw access exposes the encoded form without decoding
    #[test]
    fn test_raw_access() {
        let args = EncodedValues::empty().with(&"World").unwrap();
        assert_eq!(args.raw(0), Some("\"World\""));
        assert_eq!(args.raw(1), None);
        assert!(!args.is_empty());
        assert!(EncodedValues::empty().is_empty());
    }
}
