use crate::config::{BuildInfo, Config};
use axum::{
    body::{Body, Bytes},
    extract::{rejection::QueryRejection, Query, State},
    http::{header::ALLOW, HeaderValue, Response as HttpResponse, StatusCode},
    response::Response,
    routing::{any, get},
    Router,
};
use chrono::{SecondsFormat, Utc};
use fixphrase_core::{decode, encode, Dictionary, FixPhraseError};
use fixphrase_protocol::{
    serialize_json_pretty, DecodeEnvelope, DecodeRequest, EncodeRequest, ErrorBody, HealthReport,
    DECODE_USAGE, ENCODE_USAGE,
};
use serde::Serialize;
use std::sync::Arc;

/// Shared, read-only state behind every handler
pub struct AppState {
    pub dictionary: Dictionary,
    pub config: Config,
    pub build: BuildInfo,
}

impl AppState {
    pub fn new(dictionary: Dictionary, config: Config, build: BuildInfo) -> Self {
        Self {
            dictionary,
            config,
            build,
        }
    }
}

type HttpResult = Result<Response, StatusCode>;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/encode",
            get(encode_query)
                .post(encode_body)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/decode",
            get(decode_query)
                .post(decode_body)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route("/healthz", any(healthz))
        .with_state(state)
}

/// Query pairs in request order; repeated keys are kept
type QueryPairs = Vec<(String, String)>;

/// First value given for `key`, or empty when absent
fn first_value<'a>(pairs: &'a QueryPairs, key: &str) -> &'a str {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or_default()
}

async fn encode_query(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> HttpResult {
    let Query(params) = match params {
        Ok(params) => params,
        Err(err) => return bad_request(ErrorBody::new("invalid query").with_detail(err)),
    };
    let (lat, lon) = (first_value(&params, "lat"), first_value(&params, "lon"));
    if lat.is_empty() || lon.is_empty() {
        return bad_request(
            ErrorBody::new("missing query params: lat and lon are required")
                .with_usage(&ENCODE_USAGE),
        );
    }

    let lat = match lat.trim().parse::<f64>() {
        Ok(lat) => lat,
        Err(err) => return bad_request(ErrorBody::new("invalid lat").with_detail(err)),
    };
    let lon = match lon.trim().parse::<f64>() {
        Ok(lon) => lon,
        Err(err) => return bad_request(ErrorBody::new("invalid lon").with_detail(err)),
    };
    respond_encode(&state, lat, lon)
}

async fn encode_body(State(state): State<Arc<AppState>>, body: Bytes) -> HttpResult {
    let request: EncodeRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => return bad_request(ErrorBody::new("invalid json").with_detail(err)),
    };
    respond_encode(&state, request.lat, request.lon)
}

fn respond_encode(state: &AppState, lat: f64, lon: f64) -> HttpResult {
    match encode(&state.dictionary, lat, lon) {
        Ok(encoded) => {
            log::debug!("encode ({lat}, {lon}) -> {}", encoded.phrase);
            build_response(StatusCode::OK, &encoded)
        }
        Err(err) => codec_error(err),
    }
}

async fn decode_query(
    State(state): State<Arc<AppState>>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> HttpResult {
    let Query(params) = match params {
        Ok(params) => params,
        Err(err) => return bad_request(ErrorBody::new("invalid query").with_detail(err)),
    };
    let phrase = first_value(&params, "phrase");
    if phrase.trim().is_empty() {
        return bad_request(
            ErrorBody::new("missing query param: phrase").with_usage(&DECODE_USAGE),
        );
    }
    respond_decode(&state, phrase)
}

async fn decode_body(State(state): State<Arc<AppState>>, body: Bytes) -> HttpResult {
    let request: DecodeRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => return bad_request(ErrorBody::new("invalid json").with_detail(err)),
    };
    respond_decode(&state, &request.phrase)
}

fn respond_decode(state: &AppState, phrase: &str) -> HttpResult {
    match decode(&state.dictionary, phrase) {
        Ok(decoded) => {
            log::debug!(
                "decode {phrase:?} -> ({}, {}) ±{}",
                decoded.lat,
                decoded.lon,
                decoded.accuracy_degrees
            );
            build_response(StatusCode::OK, &DecodeEnvelope::from(decoded))
        }
        Err(err) => codec_error(err),
    }
}

async fn healthz(State(state): State<Arc<AppState>>) -> HttpResult {
    let report = HealthReport {
        ok: true,
        service: state.config.server_name.clone(),
        repo: state.config.repo_url.clone(),
        image: state.config.ghcr_image.clone(),
        version: state.build.version.to_string(),
        commit: state.build.commit.to_string(),
        build_date: state.build.date.to_string(),
        wordlist_len: state.dictionary.len(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    };
    build_response(StatusCode::OK, &report)
}

async fn method_not_allowed() -> HttpResult {
    let mut response = build_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &ErrorBody::new("method not allowed"),
    )?;
    response
        .headers_mut()
        .insert(ALLOW, HeaderValue::from_static("GET, POST"));
    Ok(response)
}

fn codec_error(err: FixPhraseError) -> HttpResult {
    let body = ErrorBody::new(err.to_string()).with_code(err.code());
    if err.is_caller_error() {
        return bad_request(body);
    }
    log::error!("codec failure: {err}");
    build_response(StatusCode::INTERNAL_SERVER_ERROR, &body)
}

fn bad_request(body: ErrorBody) -> HttpResult {
    build_response(StatusCode::BAD_REQUEST, &body)
}

pub(crate) fn build_response<T: Serialize>(status: StatusCode, value: &T) -> HttpResult {
    let bytes = serialize_json_pretty(value)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_bytes();

    HttpResponse::builder()
        .status(status)
        .header("content-type", "application/json; charset=utf-8")
        .body(Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
