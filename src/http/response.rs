//! Reply types for the faucet API.
//!
//! Handlers return typed outcomes: [`Grant`] on success, [`ApiError`] on any
//! refusal or failure. This module decodes them into the `{success, ...}`
//! wire shape at the boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::chain::ChainError;

/// Successful disbursement reply.
#[derive(Debug, Clone)]
pub struct Grant {
    /// Transaction hash, 0x-prefixed hex.
    pub tx_id: String,
    /// Human-followable link to the transaction.
    pub explorer_url: String,
}

/// Typed request failure; the variant decides the HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed body, address, or amount. Never logged as operational.
    #[error("{0}")]
    Validation(String),

    /// The withdrawal cooldown has not elapsed. Expected and benign.
    #[error("You can only withdraw once every {0} hours.")]
    Cooldown(u64),

    /// The operator account cannot cover the requested amount.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Chain-side failure; the stage-specific detail is in the message.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    /// The HTTP status this failure maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InsufficientBalance => StatusCode::BAD_REQUEST,
            Self::Cooldown(_) => StatusCode::FORBIDDEN,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ChainError> for ApiError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::InvalidAmount(_) => Self::Validation(err.to_string()),
            ChainError::InsufficientBalance { .. } => Self::InsufficientBalance,
            _ => Self::Upstream(err.to_string()),
        }
    }
}

/// The wire shape shared by every reply; absent fields are omitted.
#[derive(Debug, Serialize)]
struct ReplyBody {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tx_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explorer_url: Option<String>,
}

impl IntoResponse for Grant {
    fn into_response(self) -> Response {
        let body = ReplyBody {
            success: true,
            message: None,
            tx_id: Some(self.tx_id),
            explorer_url: Some(self.explorer_url),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ReplyBody {
            success: false,
            message: Some(self.to_string()),
            tx_id: None,
            explorer_url: None,
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Cooldown(24).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::InsufficientBalance.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Upstream("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_cooldown_message_names_the_interval() {
        assert_eq!(
            ApiError::Cooldown(24).to_string(),
            "You can only withdraw once every 24 hours."
        );
    }

    #[test]
    fn test_chain_error_mapping() {
        let err: ApiError = ChainError::InsufficientBalance {
            available: U256::ZERO,
            requested: U256::from(1u64),
        }
        .into();
        assert!(matches!(err, ApiError::InsufficientBalance));
        assert_eq!(err.to_string(), "Insufficient balance");

        let err: ApiError = ChainError::Broadcast("refused".into()).into();
        assert!(matches!(err, ApiError::Upstream(_)));

        let err: ApiError = ChainError::InvalidAmount("abc".into()).into();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_wire_shape_omits_absent_fields() {
        let grant = ReplyBody {
            success: true,
            message: None,
            tx_id: Some("0xdead".into()),
            explorer_url: Some("https://x/tx/0xdead".into()),
        };
        let json = serde_json::to_string(&grant).unwrap();
        assert!(json.contains("\"tx_id\""));
        assert!(!json.contains("\"message\""));

        let failure = ReplyBody {
            success: false,
            message: Some("nope".into()),
            tx_id: None,
            explorer_url: None,
        };
        let json = serde_json::to_string(&failure).unwrap();
        assert!(json.contains("\"message\":\"nope\""));
        assert!(!json.contains("tx_id"));
    }
}
