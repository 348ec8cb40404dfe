use serde::{Deserialize, Serialize};

/// Error body the service attaches to non-2xx responses.
///
/// The `detail` field is optional, and on some failure paths the body is
/// not valid JSON at all; [`ErrorBody::from_bytes`] tolerates both and
/// degrades to an empty body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn from_bytes(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn detail_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.detail.as_deref().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_detail_when_present() {
        let body = ErrorBody::from_bytes(br#"{"detail": "Activity full"}"#);
        assert_eq!(body.detail.as_deref(), Some("Activity full"));
    }

    #[test]
    fn tolerates_non_json_bodies() {
        let body = ErrorBody::from_bytes(b"<html>boom</html>");
        assert_eq!(body.detail, None);
        assert_eq!(body.detail_or("fallback"), "fallback");
    }

    #[test]
    fn tolerates_unknown_extra_fields() {
        let body = ErrorBody::from_bytes(br#"{"detail": "nope", "code": 400}"#);
        assert_eq!(body.detail.as_deref(), Some("nope"));
    }
}
