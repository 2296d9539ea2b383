use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

pub const VALIDATION: i32 = 100;
pub const SERVICE_NOT_READY: i32 = 101;
pub const INVALID_COORDINATES: i32 = 102;
pub const NO_ROUTE_FOUND: i32 = 103;
pub const ADDRESS_NOT_FOUND: i32 = 104;
pub const WAYPOINT_NOT_FOUND: i32 = 105;
pub const PLAN_SUPERSEDED: i32 = 106;

pub const ENV_VAR: i32 = 1;
pub const AUTHORIZATION: i32 = 2;
pub const NETWORK: i32 = 3;
pub const UNKNOWN_PROVIDER: i32 = 4;
pub const UNEXPECTED: i32 = 5;

impl Error {
    /// Errors raised by the routing provider rather than by local checks.
    pub fn is_upstream(&self) -> bool {
        matches!(self.code, AUTHORIZATION | NETWORK | UNKNOWN_PROVIDER)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self.code {
            SERVICE_NOT_READY => StatusCode::SERVICE_UNAVAILABLE,
            NO_ROUTE_FOUND | ADDRESS_NOT_FOUND | WAYPOINT_NOT_FOUND => StatusCode::NOT_FOUND,
            PLAN_SUPERSEDED => StatusCode::CONFLICT,
            AUTHORIZATION | NETWORK | UNKNOWN_PROVIDER => StatusCode::BAD_GATEWAY,
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        let error_message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
            _ => self.message.as_str(),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn validation_error(message: &str) -> Error {
    Error {
        code: VALIDATION,
        message: format!("validation error: {}", message),
    }
}

pub fn not_enough_waypoints_error() -> Error {
    validation_error("not enough waypoints")
}

pub fn transit_via_points_error() -> Error {
    validation_error("transit routes cannot have via-points")
}

pub fn service_not_ready_error() -> Error {
    Error {
        code: SERVICE_NOT_READY,
        message: "service not ready".into(),
    }
}

pub fn invalid_coordinates_error() -> Error {
    Error {
        code: INVALID_COORDINATES,
        message: "invalid coordinates".into(),
    }
}

pub fn no_route_found_error() -> Error {
    Error {
        code: NO_ROUTE_FOUND,
        message: "no route found".into(),
    }
}

pub fn address_not_found_error() -> Error {
    Error {
        code: ADDRESS_NOT_FOUND,
        message: "address not found".into(),
    }
}

pub fn waypoint_not_found_error() -> Error {
    Error {
        code: WAYPOINT_NOT_FOUND,
        message: "waypoint not found".into(),
    }
}

pub fn plan_superseded_error() -> Error {
    Error {
        code: PLAN_SUPERSEDED,
        message: "plan superseded".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: ENV_VAR,
        message: "environment variable error".into(),
    }
}

pub fn authorization_error() -> Error {
    Error {
        code: AUTHORIZATION,
        message: "authorization error".into(),
    }
}

pub fn network_error() -> Error {
    Error {
        code: NETWORK,
        message: "network error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        return network_error();
    }

    unknown_provider_error()
}

pub fn unknown_provider_error() -> Error {
    Error {
        code: UNKNOWN_PROVIDER,
        message: "unknown provider error".into(),
    }
}

pub fn unexpected_error<T: Debug>(err: T) -> Error {
    tracing::error!("unexpected error: {:?}", err);

    Error {
        code: UNEXPECTED,
        message: "unexpected error".into(),
    }
}
