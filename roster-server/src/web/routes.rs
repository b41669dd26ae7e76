//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::airports::{AirportError, resolve_with_timeout};
use crate::domain::{Airport, IataCode};
use crate::parser::{RosterFormat, UnknownFormat, parse_roster, parse_with_format};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/roster/parse", post(parse_roster_text))
        .route("/airports/:iata", get(get_airport))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a roster posted as plain text.
///
/// Strict rosters come back as `{duties, startDate, endDate}`, generic ones
/// as a bare duty array.
async fn parse_roster_text(
    State(state): State<AppState>,
    Query(query): Query<ParseQuery>,
    body: String,
) -> Result<Response, AppError> {
    let requested = match query.format.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(f) if f.eq_ignore_ascii_case("auto") => None,
        Some(f) => Some(f.parse::<RosterFormat>()?),
    };

    let roster = match requested {
        Some(format) => {
            parse_with_format(&body, format, state.resolver.as_ref(), state.resolve_timeout).await
        }
        None => parse_roster(&body, state.resolver.as_ref(), state.resolve_timeout)
            .await
            .ok_or_else(|| AppError::Unprocessable {
                message: "Unrecognised roster format".to_string(),
            })?,
    };

    debug!(format = %roster.format, duties = roster.duties.len(), "roster parsed");

    let response = match roster.format {
        RosterFormat::Strict => Json(StrictRosterResponse::from(roster)).into_response(),
        RosterFormat::Generic => Json(roster.duties).into_response(),
    };
    Ok(response)
}

/// Look up a single airport by IATA code.
async fn get_airport(
    State(state): State<AppState>,
    Path(iata): Path<String>,
) -> Result<Json<Airport>, AppError> {
    let code = IataCode::parse_normalized(&iata).map_err(|_| AppError::BadRequest {
        message: format!("Invalid IATA code: {}", iata),
    })?;

    let airports =
        resolve_with_timeout(state.resolver.as_ref(), &[code], state.resolve_timeout).await?;

    airports
        .into_iter()
        .find(|airport| airport.iata_code() == Some(code))
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Airport not found: {}", code),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Upstream { message: String },
}

impl From<UnknownFormat> for AppError {
    fn from(e: UnknownFormat) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<AirportError> for AppError {
    fn from(e: AirportError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(status = status.as_u16(), %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::airports::{AirportBackend, AirportDirectory};
    use crate::cache::{CacheConfig, CachedAirportResolver};

    const STRICT_ROSTER: &str = "\
AIR ASIA BERHAD
01/03/2024 - 31/03/2024
D5012
06:10
KUL
07:15
PEN
D7S1
05:00
11:00
";

    fn app() -> Router {
        let directory = AirportDirectory::from_airports(vec![Airport::new(
            IataCode::parse("KUL").unwrap(),
            "Kuala Lumpur International",
        )]);
        let resolver = CachedAirportResolver::new(
            AirportBackend::Directory(directory),
            &CacheConfig::default(),
        );
        create_router(AppState::new(resolver, Duration::from_secs(1)))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn post_roster(uri: &str, text: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(text.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn detected_strict_roster() {
        let (status, body) = send(post_roster("/roster/parse", STRICT_ROSTER)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["startDate"], "01/03/2024");
        assert_eq!(body["endDate"], "31/03/2024");

        let duties = body["duties"].as_array().unwrap();
        assert_eq!(duties.len(), 2);
        assert_eq!(duties[0]["type"], "FLIGHT_DUTY");
        assert_eq!(duties[0]["flightNumber"], "D5012");
        assert_eq!(duties[0]["departureAirport"]["IATA"], "KUL");
        assert_eq!(duties[0]["arrivalAirport"], "PEN");
        assert_eq!(duties[1]["type"], "STANDBY");
        assert_eq!(duties[1]["standby"], "D7S1");
    }

    #[tokio::test]
    async fn unrecognised_roster_is_unprocessable() {
        let (status, body) = send(post_roster("/roster/parse", "D123\n08:00")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn generic_roster_is_a_bare_array() {
        let text = "OFF\nD123\n09:00\nKUL\n10:00\nSIN\n";
        let (status, body) = send(post_roster("/roster/parse?format=generic", text)).await;

        assert_eq!(status, StatusCode::OK);
        let duties = body.as_array().unwrap();
        assert_eq!(duties.len(), 1);
        assert_eq!(duties[0]["type"], "FLIGHT_DUTY");
        assert_eq!(duties[0]["flightNumber"], "D123");
    }

    #[tokio::test]
    async fn forced_strict_skips_detection() {
        let text = "D123\n08:00\nKUL\n09:30\nPEN";
        let (status, body) = send(post_roster("/roster/parse?format=strict", text)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["duties"].as_array().unwrap().len(), 1);
        assert_eq!(body["startDate"], "");
    }

    #[tokio::test]
    async fn unknown_format_is_bad_request() {
        let (status, body) = send(post_roster("/roster/parse?format=pdf", "AIR ASIA")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown roster format: pdf");
    }

    #[tokio::test]
    async fn airport_lookup() {
        let (status, body) = send(Request::get("/airports/kul").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["IATA"], "KUL");
        assert_eq!(body["name"], "Kuala Lumpur International");
    }

    #[tokio::test]
    async fn unknown_airport_is_not_found() {
        let (status, _) = send(Request::get("/airports/XXX").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_airport_code_is_bad_request() {
        let (status, _) = send(Request::get("/airports/K1").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
