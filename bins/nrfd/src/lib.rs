//! NRF (Network Repository Function)
//!
//! The service registry of the 5G control plane: accepts NF profile
//! registrations over the Nnrf service-based interface, answers retrieval
//! and listing queries, and acts as the OAuth2 authorization server for the
//! SBA.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration
//! - [`context`] - the in-memory registry
//! - [`oauth`] - OAuth2 token issuance and bearer verification
//! - [`nnrf_handler`] - Nnrf-nfm operation handlers
//! - [`server`] - the SBI HTTP server and middleware pipeline

pub mod config;
pub mod context;
pub mod nnrf_handler;
pub mod oauth;
pub mod server;

pub use config::{NrfConf, SbiTlsSettings, TlsType};
pub use context::{PageError, Registry, Upsert};
pub use nnrf_handler::Nrf;
pub use oauth::{AccessTokenClaims, AuthError, OAuth2Service, TokenGrant};
pub use server::{dispatch, SbiServer};
