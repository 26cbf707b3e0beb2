//! SBI Message Structures
//!
//! Transport-independent request/response values passed through the server
//! middleware pipeline. The hyper layer converts to and from these.

use std::collections::HashMap;

use bytes::Bytes;
use serde::Serialize;

use crate::constants::{content_type, header, status};
use crate::model::{NfProfileRegistrationError, ProblemDetails};

/// An inbound SBI request.
///
/// Header names are stored lowercase; query parameters keep their wire names.
#[derive(Debug, Clone, Default)]
pub struct SbiRequest {
    pub method: String,
    /// Path component only, query string already split off.
    pub path: String,
    pub params: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
    /// Whether the request arrived over TLS.
    pub tls: bool,
    /// Port of the local listener the request arrived on.
    pub local_port: u16,
    /// Client id bound by the bearer-verification middleware (the token's
    /// `sub` claim).
    pub client_id: Option<String>,
}

impl SbiRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_json_body<T: Serialize>(self, value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        self.with_header(header::CONTENT_TYPE, content_type::APPLICATION_JSON)
            .with_body(body)
    }

    /// Path segments with the leading slash removed.
    pub fn path_segments(&self) -> Vec<&str> {
        self.path
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// An outbound SBI response.
#[derive(Debug, Clone, Default)]
pub struct SbiResponse {
    pub status: u16,
    /// Ordered header list; `set_header` replaces by case-insensitive name.
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl SbiResponse {
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn ok() -> Self {
        Self::with_status(status::OK)
    }

    pub fn no_content() -> Self {
        Self::with_status(status::NO_CONTENT)
    }

    /// Set a header, replacing any previous value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            existing.1 = value;
        } else {
            self.headers.push((name, value));
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// Attach a JSON body with the given content type.
    pub fn with_json_as<T: Serialize>(mut self, content_type: &str, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => {
                self.body = Bytes::from(body);
                self.set_header(header::CONTENT_TYPE, content_type);
                self
            }
            Err(e) => internal_error(&format!("response serialization failed: {e}")),
        }
    }

    /// Attach an `application/json` body.
    pub fn with_json<T: Serialize>(self, value: &T) -> Self {
        self.with_json_as(content_type::APPLICATION_JSON, value)
    }

    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Build a ProblemDetails response.
pub fn problem(status: u16, title: &str, detail: &str) -> SbiResponse {
    let problem = ProblemDetails::with_status(status as i32)
        .with_title(title)
        .with_detail(detail);
    SbiResponse::with_status(status)
        .with_json_as(content_type::APPLICATION_PROBLEM_JSON, &problem)
}

pub fn bad_request(detail: &str) -> SbiResponse {
    problem(status::BAD_REQUEST, "Bad Request", detail)
}

pub fn forbidden(detail: &str) -> SbiResponse {
    problem(status::FORBIDDEN, "Forbidden", detail)
}

pub fn not_found(detail: &str) -> SbiResponse {
    problem(status::NOT_FOUND, "Not Found", detail)
}

pub fn unsupported_media_type(detail: &str) -> SbiResponse {
    problem(
        status::UNSUPPORTED_MEDIA_TYPE,
        "Unsupported Media Type",
        detail,
    )
}

pub fn internal_error(detail: &str) -> SbiResponse {
    problem(
        status::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        detail,
    )
}

/// Build a registration error response (400, NFProfileRegistrationError).
pub fn registration_error(detail: &str) -> SbiResponse {
    let err = NfProfileRegistrationError::bad_request(detail);
    SbiResponse::with_status(status::BAD_REQUEST)
        .with_json_as(content_type::APPLICATION_PROBLEM_JSON, &err)
}

/// Build a compact `{"error": kind}` response, as used by the OAuth2 and
/// policy-gate paths.
pub fn error_kind(status: u16, kind: &str) -> SbiResponse {
    let body = serde_json::json!({ "error": kind });
    SbiResponse::with_status(status).with_json(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = SbiRequest::new("GET", "/nnrf-nfm/v1/nf-instances")
            .with_param("nf-type", "SMF")
            .with_header("Accept-Encoding", "gzip");

        assert_eq!(request.method, "GET");
        assert_eq!(request.param("nf-type"), Some("SMF"));
        assert_eq!(request.header("accept-encoding"), Some("gzip"));
        assert_eq!(request.header("Accept-Encoding"), Some("gzip"));
        assert_eq!(
            request.path_segments(),
            vec!["nnrf-nfm", "v1", "nf-instances"]
        );
    }

    #[test]
    fn test_response_set_header_replaces() {
        let mut response = SbiResponse::ok();
        response.set_header("Cache-Control", "no-cache");
        response.set_header("cache-control", "public, max-age=3600");
        assert_eq!(response.headers.len(), 1);
        assert_eq!(
            response.header("Cache-Control"),
            Some("public, max-age=3600")
        );
    }

    #[test]
    fn test_problem_response() {
        let response = problem(404, "Not Found", "NFInstanceId not found");
        assert_eq!(response.status, 404);
        assert_eq!(
            response.header("Content-Type"),
            Some("application/problem+json")
        );
        let body: ProblemDetails = response.json_body().unwrap();
        assert_eq!(body.status, 404);
        assert_eq!(body.detail, "NFInstanceId not found");
    }

    #[test]
    fn test_registration_error_response() {
        let response = registration_error("NFProfile.NFType is required");
        assert_eq!(response.status, 400);
        let body: NfProfileRegistrationError = response.json_body().unwrap();
        assert_eq!(body.problem_details.status, 400);
        assert!(body.problem_details.detail.contains("required"));
    }

    #[test]
    fn test_error_kind_body() {
        let response = error_kind(401, "invalid_client");
        assert_eq!(response.status, 401);
        let body: serde_json::Value = response.json_body().unwrap();
        assert_eq!(body["error"], "invalid_client");
    }
}
