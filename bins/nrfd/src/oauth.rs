//! OAuth2 Token Service
//!
//! The NRF acts as the Authorization Server of the SBA: it issues RS256
//! access tokens through the client-credentials grant and verifies bearer
//! tokens on protected routes. The signing key pair is generated at process
//! start and never persisted.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Issuer claim of every token minted here.
const TOKEN_ISSUER: &str = "nrf-oauth-server";
/// Audience claim of every token minted here.
const TOKEN_AUDIENCE: &str = "nrf-service";
/// Token lifetime in seconds.
const TOKEN_LIFETIME: u64 = 3600;

/// RSA modulus size for the signing key.
const RSA_KEY_BITS: usize = 2048;

/// Claims carried in an NRF access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    pub sub: String,
    pub aud: Vec<String>,
    pub iat: u64,
    pub exp: u64,
}

/// Bearer verification failure; `kind` is the client-visible error token.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization_header_missing")]
    HeaderMissing,

    #[error("invalid_authorization_header")]
    InvalidHeader,

    #[error("invalid_token")]
    InvalidToken,
}

impl AuthError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HeaderMissing => "authorization_header_missing",
            Self::InvalidHeader => "invalid_authorization_header",
            Self::InvalidToken => "invalid_token",
        }
    }
}

/// Outcome of a token-endpoint request.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenGrant {
    /// `{access_token, token_type, expires_in}`
    Issued {
        access_token: String,
        expires_in: u64,
    },
    /// 401 `{"error":"invalid_client"}`
    InvalidClient,
    /// 400 `{"error":"unsupported_grant_type"}`
    UnsupportedGrantType,
    /// 500 `{"error":"failed_to_generate_token"}`
    SigningFailed,
}

/// The NRF token issuer and verifier.
///
/// Holds the RS256 key pair: the private half signs issued tokens, the
/// public half checks inbound bearer tokens. Shared read-only across all
/// request tasks.
pub struct OAuth2Service {
    client_id: String,
    client_secret: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Public key PEM, kept for verifier construction in tests.
    public_key_pem: String,
}

impl OAuth2Service {
    /// Generate the key pair and build the service.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
            .context("failed to generate RSA signing key")?;

        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .context("failed to encode RSA private key")?;
        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .context("failed to encode RSA public key")?;

        let encoding_key = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .context("failed to load RSA private key")?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem.as_bytes())
            .context("failed to load RSA public key")?;

        Ok(Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            encoding_key,
            decoding_key,
            public_key_pem: public_pem,
        })
    }

    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }

    /// Handle a client-credentials token request.
    pub fn grant(&self, client_id: &str, client_secret: &str, grant_type: &str) -> TokenGrant {
        if client_id != self.client_id || client_secret != self.client_secret {
            return TokenGrant::InvalidClient;
        }
        if grant_type != "client_credentials" {
            return TokenGrant::UnsupportedGrantType;
        }

        let iat = unix_now();
        let claims = AccessTokenClaims {
            iss: TOKEN_ISSUER.to_string(),
            sub: client_id.to_string(),
            aud: vec![TOKEN_AUDIENCE.to_string()],
            iat,
            exp: iat + TOKEN_LIFETIME,
        };

        match encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key) {
            Ok(access_token) => TokenGrant::Issued {
                access_token,
                expires_in: TOKEN_LIFETIME,
            },
            Err(e) => {
                log::error!("access token signing failed: {e}");
                TokenGrant::SigningFailed
            }
        }
    }

    /// Verify the Authorization header of a protected request. On success
    /// the `sub` claim (the client id) is returned for handler introspection.
    pub fn verify_bearer(&self, auth_header: Option<&str>) -> Result<String, AuthError> {
        let header = auth_header.ok_or(AuthError::HeaderMissing)?;
        if header.is_empty() {
            return Err(AuthError::HeaderMissing);
        }

        let token = extract_bearer_token(header).ok_or(AuthError::InvalidHeader)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.leeway = 0;

        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(data.claims.sub)
    }
}

/// Extract the token from a `Bearer <token>` header value.
fn extract_bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Parse an `application/x-www-form-urlencoded` body into a field map.
pub fn parse_form(body: &[u8]) -> HashMap<String, String> {
    let body = String::from_utf8_lossy(body);
    let mut fields = HashMap::new();
    for pair in body.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            fields.insert(url_decode(key), url_decode(value));
        }
    }
    fields
}

/// Minimal percent-decoding for form fields.
fn url_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(bytes[i]);
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
