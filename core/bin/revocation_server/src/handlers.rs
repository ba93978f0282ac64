//! The server's six HTTP routes. Method-mismatch 405s are handled by
//! `axum`'s router; each handler here only needs to worry about body parsing
//! (400) and internal failures (500), via [`crate::error::ApiError`].

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(liveness))
        .route("/new-ct/get-sth", get(get_sth))
        .route("/new-ct/get-inclusion-proof", get(get_inclusion_proof))
        .route("/new-ct/get-ocsp", get(get_ocsp))
        .route("/new-ct/post-revocation", post(post_revocation))
        .route("/new-ct/post-multiple-revocations", post(post_multiple_revocations))
}

/// Returns 200 on `GET /` so clients can easily check if the server is up;
/// every other path falls through to axum's default 404.
async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize)]
struct SthResponse {
    #[serde(rename = "LogRoot")]
    log_root: String,
    #[serde(rename = "LogRootSignature")]
    log_root_signature: String,
}

async fn get_sth(State(state): State<AppState>) -> impl IntoResponse {
    let slr = state.tree.get_sth();
    Json(SthResponse {
        log_root: BASE64.encode(&slr.log_root),
        log_root_signature: BASE64.encode(&slr.log_root_signature),
    })
}

#[derive(Deserialize)]
struct InclusionProofRequest {
    #[serde(rename = "Serial")]
    serial: u64,
}

#[derive(Serialize, Deserialize)]
struct InclusionProofResponse {
    #[serde(rename = "Proof")]
    proof: Vec<String>,
}

async fn get_inclusion_proof(
    State(state): State<AppState>,
    body: Result<Json<InclusionProofRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(format!("Invalid InclusionProofRequest: {e}")))?;
    let proof = state.tree.get_inclusion_proof(req.serial);
    Ok(Json(InclusionProofResponse {
        proof: proof.iter().map(|h| BASE64.encode(h)).collect(),
    }))
}

async fn get_ocsp(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let cert_id = revocation_ocsp::parse_request(&body)?;
    let serial = revocation_ocsp::cert_id::serial_from_cert_id(&cert_id)?;

    let revoked = state.tree.get_revocation_value(serial);
    let proof = state.tree.get_inclusion_proof(serial);

    let answer = revocation_ocsp::RevocationAnswer {
        cert_id,
        revoked,
        proof,
        this_update: state.tree.last_updated(),
        next_update: state.tree.next_update(),
    };

    let responder_spki = state.tree.signer_public_key_bitstring();
    let signature_algorithm = state.tree.signature_algorithm();
    let tree = state.tree.clone();

    let der = revocation_ocsp::build_response(&answer, &responder_spki, signature_algorithm, |msg| {
        tree.sign(msg)
            .map_err(|e| revocation_ocsp::OcspCodecError::Signing(e.to_string()))
    })
    .map_err(|e| ApiError::Internal(format!("Unable to build OCSP response: {e}")))?;

    Ok(([(header::CONTENT_TYPE, "application/ocsp-response")], der))
}

#[derive(Deserialize)]
struct RevocationRequest {
    #[serde(rename = "Serial")]
    serial: u64,
}

async fn post_revocation(
    State(state): State<AppState>,
    body: Result<Json<RevocationRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(format!("Invalid AddRevocation Request: {e}")))?;
    state.tree.add_node(req.serial)?;
    Ok(StatusCode::OK)
}

#[derive(Deserialize)]
struct RevocationsRequest {
    #[serde(rename = "Serials")]
    serials: Vec<u64>,
}

async fn post_multiple_revocations(
    State(state): State<AppState>,
    body: Result<Json<RevocationsRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(format!("Invalid AddRevocations Request: {e}")))?;
    for serial in req.serials {
        state.tree.add_node(serial)?;
    }
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use rand::rngs::OsRng;
    use revocation_crypto::{Signer, SigningKey};
    use revocation_merkle_tree::SparseMerkleTree;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let key = p256::ecdsa::SigningKey::random(&mut OsRng);
        let signer = Signer::new(0, SigningKey::EcdsaP256(Box::new(key)));
        let tree = SparseMerkleTree::new(7, Duration::from_secs(3600), signer).unwrap();
        AppState { tree: std::sync::Arc::new(tree) }
    }

    async fn send(state: &AppState, req: Request<Body>) -> axum::response::Response {
        routes().with_state(state.clone()).oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn liveness_returns_200() {
        let state = test_state();
        let resp = send(&state, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn get_sth_returns_base64_fields() {
        let state = test_state();
        let resp = send(
            &state,
            Request::builder().uri("/new-ct/get-sth").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(parsed["LogRoot"].as_str().unwrap().len() > 0);
        assert!(parsed["LogRootSignature"].as_str().unwrap().len() > 0);
    }

    #[tokio::test]
    async fn post_revocation_then_inclusion_proof_reflects_after_integration() {
        let state = test_state();
        let resp = send(
            &state,
            Request::builder()
                .method("POST")
                .uri("/new-ct/post-revocation")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"Serial":5}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        // No sequencer thread runs in this test; integrate synchronously.
        state.tree.integrate_queue().unwrap();
        assert!(state.tree.get_revocation_value(5));

        let resp = send(
            &state,
            Request::builder()
                .uri("/new-ct/get-inclusion-proof")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"Serial":5}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        let parsed: InclusionProofResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.proof.len(), state.tree.height() as usize);
    }

    #[tokio::test]
    async fn malformed_post_revocation_body_is_400() {
        let state = test_state();
        let resp = send(
            &state,
            Request::builder()
                .method("POST")
                .uri("/new-ct/post-revocation")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn method_mismatch_is_405() {
        let state = test_state();
        let resp = send(
            &state,
            Request::builder()
                .method("POST")
                .uri("/new-ct/get-sth")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn get_ocsp_round_trips_through_the_codec() {
        let state = test_state();

        let cert_id =
            revocation_ocsp::cert_id::build_cert_id([1u8; 32], [2u8; 32], 5).unwrap();
        let request = revocation_ocsp::asn1::OcspRequest {
            tbs_request: revocation_ocsp::asn1::TbsRequest {
                version: 0,
                request_list: vec![revocation_ocsp::asn1::Request {
                    req_cert: cert_id,
                    single_request_extensions: None,
                }],
                request_extensions: None,
            },
        };
        let der_bytes = {
            use der::Encode;
            request.to_der().unwrap()
        };

        state.tree.add_node(5).unwrap();
        state.tree.integrate_queue().unwrap();

        let resp = send(
            &state,
            Request::builder()
                .uri("/new-ct/get-ocsp")
                .body(Body::from(der_bytes))
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(resp.into_body()).await.unwrap();
        let parsed = revocation_ocsp::parse_response(&body).unwrap();
        assert!(parsed.revoked);
        assert_eq!(
            revocation_ocsp::cert_id::serial_from_cert_id(&parsed.cert_id).unwrap(),
            5
        );
    }
}
