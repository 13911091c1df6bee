use serde::{Deserialize, Serialize};

/// Wrapper for every successful API response body: `{ "data": ... }`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body of every error response: `{ "error": ... }`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(Envelope::new(vec![1, 2, 3])).unwrap();
        assert_eq!(body, json!({ "data": [1, 2, 3] }));

        let empty: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(empty.data.is_empty());
    }
}
