//! End-to-end Nnrf-nfm tests against a live SBI server socket.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use nrfd::{Nrf, NrfConf, SbiServer};

/// Start an NRF on an ephemeral port.
async fn start_nrf(conf: NrfConf) -> (SbiServer, SocketAddr) {
    let mut conf = conf;
    conf.sbi_port = 0;
    let nrf = Arc::new(Nrf::new(conf).unwrap());
    let server = SbiServer::new(nrf);
    let addr = server.start().await.unwrap();
    (server, addr)
}

/// Send one request over a fresh HTTP/1.1 connection.
async fn send(
    addr: SocketAddr,
    request: Request<Full<Bytes>>,
) -> (hyper::StatusCode, hyper::HeaderMap, Bytes) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let io = TokioIo::new(stream);
    let (mut sender, conn) = hyper::client::conn::http1::handshake(io).await.unwrap();
    tokio::spawn(async move {
        let _ = conn.await;
    });

    let response = sender.send_request(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

fn profile_json(id: &str, nf_type: &str, nf_status: &str) -> String {
    format!(r#"{{"nfInstanceId":"{id}","nfType":"{nf_type}","nfStatus":"{nf_status}"}}"#)
}

#[tokio::test]
async fn test_register_retrieve_deregister_over_socket() {
    let (server, addr) = start_nrf(NrfConf::default()).await;
    let id = "331A1FB2-3AC1-43DF-A7D0-882D0EE44B7D";
    let lower = id.to_lowercase();

    // register
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/nnrf-nfm/v1/nf-instances/{id}"))
        .header("Host", addr.to_string())
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(profile_json(id, "AMF", "REGISTERED"))))
        .unwrap();
    let (status, headers, body) = send(addr, request).await;
    assert_eq!(status, 201);
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(
        headers["location"],
        format!("http://{addr}/nnrf-nfm/v1/nf-instances/{lower}").as_str()
    );
    assert_eq!(headers["x-nrf-api-version"], "1.3.0");
    let registered: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(registered["nfInstanceId"], lower.as_str());

    // replace returns 200
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/nnrf-nfm/v1/nf-instances/{id}"))
        .header("Host", addr.to_string())
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(profile_json(id, "AMF", "SUSPENDED"))))
        .unwrap();
    let (status, _, body) = send(addr, request).await;
    assert_eq!(status, 200);
    let replaced: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(replaced["nfStatus"], "SUSPENDED");

    // retrieve reflects the replacement
    let request = Request::builder()
        .method("GET")
        .uri(format!("/nnrf-nfm/v1/nf-instances/{lower}"))
        .header("Host", addr.to_string())
        .body(Full::new(Bytes::new()))
        .unwrap();
    let (status, headers, body) = send(addr, request).await;
    assert_eq!(status, 200);
    assert!(headers.contains_key("etag"));
    let retrieved: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(retrieved["nfStatus"], "SUSPENDED");

    // deregister twice
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/nnrf-nfm/v1/nf-instances/{lower}"))
        .header("Host", addr.to_string())
        .body(Full::new(Bytes::new()))
        .unwrap();
    let (status, _, _) = send(addr, request).await;
    assert_eq!(status, 204);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/nnrf-nfm/v1/nf-instances/{lower}"))
        .header("Host", addr.to_string())
        .body(Full::new(Bytes::new()))
        .unwrap();
    let (status, headers, _) = send(addr, request).await;
    assert_eq!(status, 404);
    assert_eq!(headers["content-type"], "application/problem+json");

    server.stop().await;
}

#[tokio::test]
async fn test_list_pagination_over_socket() {
    let (server, addr) = start_nrf(NrfConf::default()).await;
    let ids = [
        "9b2e6a40-ff20-4b0e-9e54-5ec9a8a2aa01",
        "9b2e6a40-ff20-4b0e-9e54-5ec9a8a2aa02",
        "9b2e6a40-ff20-4b0e-9e54-5ec9a8a2aa03",
    ];

    for id in ids {
        let request = Request::builder()
            .method("PUT")
            .uri(format!("/nnrf-nfm/v1/nf-instances/{id}"))
            .header("Host", addr.to_string())
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(profile_json(id, "SMF", "REGISTERED"))))
            .unwrap();
        let (status, _, _) = send(addr, request).await;
        assert_eq!(status, 201);
    }

    let request = Request::builder()
        .method("GET")
        .uri("/nnrf-nfm/v1/nf-instances?nf-type=SMF&limit=2&page-number=1&page-size=2")
        .header("Host", addr.to_string())
        .body(Full::new(Bytes::new()))
        .unwrap();
    let (status, headers, body) = send(addr, request).await;
    assert_eq!(status, 200);
    assert_eq!(headers["content-type"], "application/3gppHal+json");
    let list: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(list["totalItemCount"], 2);
    let links = list["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(
        links[0],
        format!("http://{addr}/nnrf-nfm/v1/nf-instances/{}", ids[0]).as_str()
    );
    assert_eq!(
        links[1],
        format!("http://{addr}/nnrf-nfm/v1/nf-instances/{}", ids[1]).as_str()
    );

    server.stop().await;
}

#[tokio::test]
async fn test_shared_data_gate_over_socket() {
    let mut conf = NrfConf::default();
    conf.allowed_shared_data = false;
    let (server, addr) = start_nrf(conf).await;

    let request = Request::builder()
        .method("PUT")
        .uri("/nnrf-nfm/v1/shared-data/shared-udm-01")
        .header("Host", addr.to_string())
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"sharedDataId":"shared-udm-01"}"#)))
        .unwrap();
    let (status, _, body) = send(addr, request).await;
    assert_eq!(status, 403);
    let denied: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(denied["error"], "SharedData feature not allowed");

    server.stop().await;
}

#[tokio::test]
async fn test_access_token_over_socket() {
    let (server, addr) = start_nrf(NrfConf::default()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/oauth2/token")
        .header("Host", addr.to_string())
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Full::new(Bytes::from(
            "client_id=NRF_Service&client_secret=123456&grant_type=client_credentials",
        )))
        .unwrap();
    let (status, _, body) = send(addr, request).await;
    assert_eq!(status, 200);
    let token: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(token["token_type"], "Bearer");
    assert_eq!(token["expires_in"], 3600);
    assert!(token["access_token"].as_str().unwrap().contains('.'));

    server.stop().await;
}
