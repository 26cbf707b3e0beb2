//! SBI HTTP Server
//!
//! HTTP/1.1 server for the Nnrf interface, built on hyper. Each inbound
//! request runs through a fixed middleware pipeline: request logging, panic
//! recovery, ingress content decoding, egress coding negotiation, bearer
//! verification for the protected route group, handler dispatch, the
//! conditional-GET stage, security headers and egress compression.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tokio_rustls::TlsAcceptor;

use nrf_sbi::codec::{decode_body, encode_body, CodecError, ContentCoding};
use nrf_sbi::constants::{api, header, status};
use nrf_sbi::etag::{compare_etags, generate_etag};
use nrf_sbi::message::{
    bad_request, error_kind, internal_error, not_found, unsupported_media_type, SbiRequest,
    SbiResponse,
};
use nrf_sbi::tls;
use nrf_sbi::SbiError;

use crate::config::TlsType;
use crate::nnrf_handler::Nrf;

/// Server state
enum ServerState {
    Stopped,
    Running(oneshot::Sender<()>),
}

/// The SBI server: owns the listener lifecycle and the middleware pipeline.
pub struct SbiServer {
    nrf: Arc<Nrf>,
    state: Arc<Mutex<ServerState>>,
}

impl SbiServer {
    pub fn new(nrf: Arc<Nrf>) -> Self {
        Self {
            nrf,
            state: Arc::new(Mutex::new(ServerState::Stopped)),
        }
    }

    /// Bind the configured address and start serving in a background task.
    pub async fn start(&self) -> Result<SocketAddr, SbiError> {
        let mut state = self.state.lock().await;
        if matches!(*state, ServerState::Running(_)) {
            return Err(SbiError::ServerError("Server already running".to_string()));
        }

        let conf = &self.nrf.conf;
        let addr: SocketAddr = format!("{}:{}", conf.sbi_ip_addr, conf.sbi_port)
            .parse()
            .map_err(|e| SbiError::InvalidUri(format!("Invalid SBI address: {e}")))?;

        let tls_acceptor = build_tls_acceptor(&self.nrf)?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| SbiError::ServerError(format!("Failed to bind {addr}: {e}")))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| SbiError::ServerError(e.to_string()))?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        *state = ServerState::Running(shutdown_tx);
        drop(state);

        let nrf = self.nrf.clone();
        let scheme = if tls_acceptor.is_some() { "https" } else { "http" };
        log::info!("SBI {scheme} server listening on {local_addr}");

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, peer)) => {
                                let nrf = nrf.clone();
                                let acceptor = tls_acceptor.clone();
                                let local_port = local_addr.port();
                                tokio::spawn(async move {
                                    serve_stream(stream, peer, nrf, acceptor, local_port).await;
                                });
                            }
                            Err(e) => {
                                log::error!("accept error: {e}");
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        log::info!("SBI server on {local_addr} stopping");
                        break;
                    }
                }
            }
        });

        Ok(local_addr)
    }

    /// Stop the server.
    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        if let ServerState::Running(shutdown_tx) =
            std::mem::replace(&mut *state, ServerState::Stopped)
        {
            let _ = shutdown_tx.send(());
        }
    }

    pub async fn is_running(&self) -> bool {
        let state = self.state.lock().await;
        matches!(*state, ServerState::Running(_))
    }
}

/// Build the TLS acceptor for the configured transport, if any.
fn build_tls_acceptor(nrf: &Nrf) -> Result<Option<TlsAcceptor>, SbiError> {
    let settings = &nrf.conf.sbi_tls_settings;
    let config = match settings.tls_type {
        TlsType::NonTls => return Ok(None),
        TlsType::ServerTls => {
            let certs = tls::load_certs(&settings.cert_file)?;
            let key = tls::load_private_key(&settings.key_file)?;
            tls::build_server_config(certs, key)?
        }
        TlsType::MutualTls => {
            let certs = tls::load_certs(&settings.cert_file)?;
            let key = tls::load_private_key(&settings.key_file)?;
            tls::build_server_config_mtls(certs, key, &settings.ca_file)?
        }
    };
    Ok(Some(TlsAcceptor::from(Arc::new(config))))
}

/// Serve one accepted TCP stream, completing the TLS handshake first when
/// the transport requires it.
async fn serve_stream(
    stream: tokio::net::TcpStream,
    peer: SocketAddr,
    nrf: Arc<Nrf>,
    acceptor: Option<TlsAcceptor>,
    local_port: u16,
) {
    match acceptor {
        Some(acceptor) => match acceptor.accept(stream).await {
            Ok(tls_stream) => {
                serve_connection(TokioIo::new(tls_stream), nrf, true, local_port).await;
            }
            Err(e) => {
                log::error!("TLS handshake with {peer} failed: {e}");
            }
        },
        None => {
            serve_connection(TokioIo::new(stream), nrf, false, local_port).await;
        }
    }
}

async fn serve_connection<I>(io: I, nrf: Arc<Nrf>, tls: bool, local_port: u16)
where
    I: hyper::rt::Read + hyper::rt::Write + Unpin + Send + 'static,
{
    let service = service_fn(move |req: Request<Incoming>| {
        let nrf = nrf.clone();
        async move {
            let request = convert_request(req, tls, local_port).await;
            let response = dispatch(nrf, request).await;
            Ok::<_, Infallible>(convert_response(response))
        }
    });

    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
        log::debug!("connection closed: {e}");
    }
}

/// Convert a hyper request to an SbiRequest.
async fn convert_request(req: Request<Incoming>, tls: bool, local_port: u16) -> SbiRequest {
    let method = req.method().to_string();
    let uri = req.uri().clone();

    let mut request = SbiRequest::new(method, uri.path());
    request.tls = tls;
    request.local_port = local_port;

    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            request
                .headers
                .insert(name.as_str().to_lowercase(), value.to_string());
        }
    }

    if let Some(query) = uri.query() {
        for pair in query.split('&') {
            if let Some((name, value)) = pair.split_once('=') {
                request.params.insert(name.to_string(), value.to_string());
            }
        }
    }

    if let Ok(body) = req.into_body().collect().await {
        request.body = body.to_bytes();
    }

    request
}

/// Convert an SbiResponse to a hyper response.
fn convert_response(response: SbiResponse) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(response.status);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.body(Full::new(response.body)).unwrap_or_else(|_| {
        Response::builder()
            .status(500)
            .body(Full::new(Bytes::from("Internal Server Error")))
            .unwrap()
    })
}

/// Run a request through the middleware pipeline. Panics inside the pipeline
/// surface as a 500 instead of tearing down the connection task.
pub async fn dispatch(nrf: Arc<Nrf>, request: SbiRequest) -> SbiResponse {
    let method = request.method.clone();
    let path = request.path.clone();
    log::info!("{method} {path} request received");

    let response = match tokio::spawn(process(nrf, request)).await {
        Ok(response) => response,
        Err(e) => {
            log::error!("{method} {path} handler panicked: {e}");
            finalize(internal_error("request handling failed"), None)
        }
    };

    log::debug!("{method} {path} -> {}", response.status);
    response
}

async fn process(nrf: Arc<Nrf>, mut request: SbiRequest) -> SbiResponse {
    // Egress coding is negotiated up front so an unsupported Accept-Encoding
    // fails before any work is done.
    let egress = match request.header(header::ACCEPT_ENCODING) {
        Some(token) if !token.is_empty() => match ContentCoding::from_token(token) {
            Some(coding) => Some(coding),
            None => {
                return finalize(
                    unsupported_media_type("Unsupported Accept-Encoding"),
                    None,
                )
            }
        },
        _ => None,
    };

    // Ingress content decoding.
    if let Some(token) = request
        .header(header::CONTENT_ENCODING)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
    {
        match decode_body(&token, &request.body) {
            Ok(decoded) => request.body = Bytes::from(decoded),
            Err(CodecError::Unsupported) => {
                return finalize(
                    unsupported_media_type("Unsupported Content-Encoding"),
                    egress,
                )
            }
            Err(e @ CodecError::Malformed(_)) => {
                return finalize(bad_request(&e.to_string()), egress)
            }
        }
    }

    // Bearer verification for the protected route group.
    if nrf.conf.oauth2_required && request.path.starts_with("/nnrf-nfm/") {
        match nrf.oauth.verify_bearer(request.header(header::AUTHORIZATION)) {
            Ok(client_id) => {
                log::debug!("authorized client: {client_id}");
                request.client_id = Some(client_id);
            }
            Err(e) => return finalize(error_kind(status::UNAUTHORIZED, e.kind()), egress),
        }
    }

    let is_get = request.method == "GET";
    let client_etag = request.header(header::IF_NONE_MATCH).map(str::to_string);

    let mut response = route(&nrf, &request);

    // Conditional GET: tag the response body and honor If-None-Match.
    if is_get && response.status == status::OK && !response.body.is_empty() {
        let weak = nrf.conf.etag_weak_validation;
        let etag = generate_etag(&response.body, weak);
        response.set_header(header::ETAG, etag.clone());
        if !response.has_header(header::CACHE_CONTROL) {
            response.set_header(
                header::CACHE_CONTROL,
                format!("public, max-age={}", nrf.conf.etag_cache_max_age),
            );
        }
        if let Some(client_tag) = client_etag {
            if compare_etags(&client_tag, &etag, weak) {
                response.status = status::NOT_MODIFIED;
                response.body = Bytes::new();
            }
        }
    }

    finalize(response, egress)
}

/// Attach the security headers and compress the body with the negotiated
/// coding. Every response leaves through here.
fn finalize(mut response: SbiResponse, egress: Option<ContentCoding>) -> SbiResponse {
    response.set_header(header::NRF_API_VERSION, api::NRF_API_VERSION);
    response.set_header(header::STRICT_TRANSPORT_SECURITY, header::HSTS_VALUE);

    if let Some(coding) = egress {
        if !response.body.is_empty() {
            match encode_body(coding, &response.body) {
                Ok(compressed) => {
                    response.body = Bytes::from(compressed);
                    response.set_header("Content-Encoding", coding.as_str());
                }
                Err(e) => {
                    log::error!("response compression failed: {e}");
                }
            }
        }
    }

    response
}

/// The Nnrf route table.
fn route(nrf: &Nrf, request: &SbiRequest) -> SbiResponse {
    let segments = request.path_segments();
    match (segments.as_slice(), request.method.as_str()) {
        (["oauth2", "token"], "POST") => nrf.handle_access_token(request),

        (["nnrf-nfm", "v1", "nf-instances"], "GET") => nrf.handle_nf_list_retrieve(request),
        (["nnrf-nfm", "v1", "nf-instances", id], "PUT") => {
            nrf.handle_nf_register_or_replacement(request, id)
        }
        (["nnrf-nfm", "v1", "nf-instances", id], "GET") => {
            nrf.handle_nf_profile_retrieve(request, id)
        }
        (["nnrf-nfm", "v1", "nf-instances", id], "DELETE") => nrf.handle_nf_deregister(id),

        (["nnrf-nfm", "v1", "shared-data", id], "PUT") => {
            nrf.handle_shared_data_register_or_replacement(request, id)
        }
        (["nnrf-nfm", "v1", "shared-data", id], "GET") => {
            nrf.handle_shared_data_retrieve(request, id)
        }
        (["nnrf-nfm", "v1", "shared-data", id], "DELETE") => {
            nrf.handle_shared_data_deregister(id)
        }

        _ => {
            log::warn!("unknown route: {} {}", request.method, request.path);
            not_found("resource not found")
        }
    }
}
