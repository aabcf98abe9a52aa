//! Wire format negotiation - JSON or MessagePack
//!
//! Request bodies follow `Content-Type`, responses follow `Accept`.
//! Anything that does not name MessagePack is JSON. MessagePack is encoded
//! as maps keyed by field name, so both formats carry the same keys.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::ApiError;
use crate::models::ValidationError;

pub const JSON_MIME: &str = "application/json";
pub const MSGPACK_MIME: &str = "application/msgpack";

const MSGPACK_ALIASES: [&str; 3] = [MSGPACK_MIME, "application/x-msgpack", "application/vnd.msgpack"];

/// Body serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    #[default]
    Json,
    MessagePack,
}

impl WireFormat {
    /// Format of a request body.
    pub fn from_content_type(headers: &HeaderMap) -> Self {
        let is_msgpack = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(names_msgpack);
        if is_msgpack {
            Self::MessagePack
        } else {
            Self::Json
        }
    }

    /// Format the client wants back.
    pub fn from_accept(headers: &HeaderMap) -> Self {
        let is_msgpack = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .any(names_msgpack);
        if is_msgpack {
            Self::MessagePack
        } else {
            Self::Json
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::MessagePack => "msgpack",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => JSON_MIME,
            Self::MessagePack => MSGPACK_MIME,
        }
    }

    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, ValidationError> {
        let result = match self {
            Self::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
            Self::MessagePack => rmp_serde::from_slice(bytes).map_err(|e| e.to_string()),
        };
        result.map_err(|reason| ValidationError::InvalidBody {
            format: self.name(),
            reason,
        })
    }

    pub fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>, String> {
        match self {
            Self::Json => serde_json::to_vec(value).map_err(|e| e.to_string()),
            Self::MessagePack => rmp_serde::to_vec_named(value).map_err(|e| e.to_string()),
        }
    }

    /// Encode `value` as a response with this format's content type.
    pub fn respond<T: Serialize>(self, status: StatusCode, value: T) -> Encoded<T> {
        Encoded {
            format: self,
            status,
            value,
        }
    }
}

fn names_msgpack(media: &str) -> bool {
    let mime = media.split(';').next().unwrap_or_default().trim();
    MSGPACK_ALIASES
        .iter()
        .any(|alias| mime.eq_ignore_ascii_case(alias))
}

/// Response format chosen from the `Accept` header
#[derive(Debug, Clone, Copy)]
pub struct Accepts(pub WireFormat);

impl<S> FromRequestParts<S> for Accepts
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(WireFormat::from_accept(&parts.headers)))
    }
}

/// Request body decoded according to `Content-Type`
#[derive(Debug)]
pub struct Wire<T>(pub T);

impl<S, T> FromRequest<S> for Wire<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = WireFormat::from_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::InvalidBody {
                format: format.name(),
                reason: e.body_text(),
            })
        })?;
        Ok(Self(format.decode(&bytes)?))
    }
}

/// Serialized response body
pub struct Encoded<T> {
    format: WireFormat,
    status: StatusCode,
    value: T,
}

impl<T: Serialize> IntoResponse for Encoded<T> {
    fn into_response(self) -> Response {
        match self.format.encode(&self.value) {
            Ok(body) => (
                self.status,
                [(CONTENT_TYPE, self.format.content_type())],
                body,
            )
                .into_response(),
            Err(message) => ApiError::Internal { message }.into_response(),
        }
    }
}
