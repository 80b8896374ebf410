use crate::transport::TransportError;
use crate::Result;
use bytes::Bytes;
use serde::Serialize;

/// Request payload accepted by [`ShuttleClient::dispatch`](crate::ShuttleClient::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Raw audio bytes, uploaded as multipart/form-data under the `file` field.
    Binary(Bytes),
    /// Any JSON document, sent as the request body.
    Json(serde_json::Value),
}

impl Payload {
    /// Serialize any value into a JSON payload.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(TransportError::from)?;
        Ok(Payload::Json(value))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Binary(_) => "binary",
            Payload::Json(_) => "json",
        }
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Binary(bytes)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Binary(Bytes::from(bytes))
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Transcribe<'a> {
        model: &'a str,
        temperature: f32,
    }

    #[test]
    fn test_json_from_struct() {
        let payload = Payload::json(&Transcribe {
            model: "whisper",
            temperature: 0.5,
        })
        .unwrap();
        assert_eq!(payload, Payload::Json(json!({"model": "whisper", "temperature": 0.5})));
        assert_eq!(payload.kind(), "json");
    }

    #[test]
    fn test_bytes_become_binary() {
        let payload: Payload = vec![1u8, 2, 3].into();
        assert_eq!(payload, Payload::Binary(Bytes::from_static(&[1, 2, 3])));
        assert_eq!(payload.kind(), "binary");
    }

    #[test]
    fn test_unserializable_value_is_transport_error() {
        use std::collections::HashMap;
        // Non-string map keys cannot become JSON object keys.
        let mut map = HashMap::new();
        map.insert((1, 2), "x");
        let err = Payload::json(&map).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Transport(TransportError::Serialize(_))
        ));
    }
}
