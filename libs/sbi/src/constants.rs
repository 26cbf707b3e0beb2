//! SBI Constants
//!
//! HTTP status codes, content types, headers and resource names used on the
//! Nnrf interface.

/// HTTP Status Codes
pub mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const NO_CONTENT: u16 = 204;
    pub const NOT_MODIFIED: u16 = 304;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const UNSUPPORTED_MEDIA_TYPE: u16 = 415;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// API names and versions
pub mod api {
    pub const NNRF_NFM: &str = "nnrf-nfm";
    pub const V1: &str = "v1";
    /// Value of the X-NRF-API-Version response header
    pub const NRF_API_VERSION: &str = "1.3.0";
}

/// Resource Names
pub mod resource {
    pub const NF_INSTANCES: &str = "nf-instances";
    pub const SHARED_DATA: &str = "shared-data";
}

/// HTTP Headers
pub mod header {
    pub const ACCEPT_ENCODING: &str = "accept-encoding";
    pub const AUTHORIZATION: &str = "authorization";
    pub const CACHE_CONTROL: &str = "Cache-Control";
    pub const CONTENT_ENCODING: &str = "content-encoding";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ETAG: &str = "ETag";
    pub const HOST: &str = "host";
    pub const IF_NONE_MATCH: &str = "if-none-match";
    pub const LOCATION: &str = "Location";
    pub const NRF_API_VERSION: &str = "X-NRF-API-Version";
    pub const STRICT_TRANSPORT_SECURITY: &str = "Strict-Transport-Security";
    pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
    pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
    pub const X_FORWARDED_SCHEME: &str = "x-forwarded-scheme";

    /// Value of the Strict-Transport-Security header on every response
    pub const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
}

/// Content Types
pub mod content_type {
    pub const APPLICATION_JSON: &str = "application/json";
    pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";
    pub const APPLICATION_3GPP_HAL_JSON: &str = "application/3gppHal+json";
    pub const APPLICATION_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
}

/// Query Parameters
pub mod param {
    pub const NF_TYPE: &str = "nf-type";
    pub const LIMIT: &str = "limit";
    pub const PAGE_NUMBER: &str = "page-number";
    pub const PAGE_SIZE: &str = "page-size";
    pub const REQUESTER_FEATURES: &str = "requester-features";
}
