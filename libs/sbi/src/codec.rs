//! Request/Response Content Coding
//!
//! Full-body gzip and deflate (zlib) coding for the SBI ingress and egress
//! paths. Any other coding token is rejected with 415 by the caller.

use std::io::{Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use thiserror::Error;

/// Supported content codings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    Gzip,
    Deflate,
}

impl ContentCoding {
    /// Parse a Content-Encoding / Accept-Encoding token (case-insensitive).
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "gzip" => Some(Self::Gzip),
            "deflate" => Some(Self::Deflate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Deflate => "deflate",
        }
    }
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Unsupported Content-Encoding")]
    Unsupported,

    #[error("Invalid {0} format")]
    Malformed(&'static str),
}

/// Decompress a request body according to its Content-Encoding token.
pub fn decode_body(token: &str, body: &[u8]) -> Result<Vec<u8>, CodecError> {
    let coding = ContentCoding::from_token(token).ok_or(CodecError::Unsupported)?;
    let mut decoded = Vec::new();
    match coding {
        ContentCoding::Gzip => {
            let mut reader = GzDecoder::new(body);
            reader
                .read_to_end(&mut decoded)
                .map_err(|_| CodecError::Malformed("Gzip"))?;
        }
        ContentCoding::Deflate => {
            let mut reader = ZlibDecoder::new(body);
            reader
                .read_to_end(&mut decoded)
                .map_err(|_| CodecError::Malformed("Zlib"))?;
        }
    }
    Ok(decoded)
}

/// Compress a response body with the negotiated coding. The encoder is
/// finished before returning so the stream is complete on every path.
pub fn encode_body(coding: ContentCoding, body: &[u8]) -> Result<Vec<u8>, CodecError> {
    match coding {
        ContentCoding::Gzip => {
            let mut writer = GzEncoder::new(Vec::new(), Compression::default());
            writer
                .write_all(body)
                .and_then(|_| writer.finish())
                .map_err(|_| CodecError::Malformed("Gzip"))
        }
        ContentCoding::Deflate => {
            let mut writer = ZlibEncoder::new(Vec::new(), Compression::default());
            writer
                .write_all(body)
                .and_then(|_| writer.finish())
                .map_err(|_| CodecError::Malformed("Zlib"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coding_tokens() {
        assert_eq!(ContentCoding::from_token("gzip"), Some(ContentCoding::Gzip));
        assert_eq!(ContentCoding::from_token("GZIP"), Some(ContentCoding::Gzip));
        assert_eq!(
            ContentCoding::from_token("deflate"),
            Some(ContentCoding::Deflate)
        );
        assert_eq!(ContentCoding::from_token("br"), None);
        assert_eq!(ContentCoding::from_token(""), None);
    }

    #[test]
    fn test_gzip_round_trip() {
        let payload = br#"{"nfType":"AMF","nfStatus":"REGISTERED"}"#;
        let compressed = encode_body(ContentCoding::Gzip, payload).unwrap();
        assert_ne!(compressed, payload.to_vec());
        let decoded = decode_body("gzip", &compressed).unwrap();
        assert_eq!(decoded, payload.to_vec());
    }

    #[test]
    fn test_deflate_round_trip() {
        let payload = b"shared profile data";
        let compressed = encode_body(ContentCoding::Deflate, payload).unwrap();
        let decoded = decode_body("deflate", &compressed).unwrap();
        assert_eq!(decoded, payload.to_vec());
    }

    #[test]
    fn test_decode_unsupported_token() {
        assert!(matches!(
            decode_body("br", b"anything"),
            Err(CodecError::Unsupported)
        ));
    }

    #[test]
    fn test_decode_malformed_payload() {
        assert!(matches!(
            decode_body("gzip", b"definitely not gzip"),
            Err(CodecError::Malformed("Gzip"))
        ));
        assert!(matches!(
            decode_body("deflate", b"definitely not zlib"),
            Err(CodecError::Malformed("Zlib"))
        ));
    }
}
