//! Request body types and request-id tagging.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Body of `POST /mantle/request`. All fields are required.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalRequest {
    /// Chain endpoint to disburse on (bare host or full URL).
    pub network: String,

    /// Target account, 0x-prefixed hex.
    pub address: String,

    /// Amount in the chain's display unit (ether), as a decimal string.
    pub amount: String,
}

/// Tag every request with an id for log correlation, keeping ids supplied by
/// the caller.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    if !request.headers().contains_key(X_REQUEST_ID) {
        let id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&id) {
            request.headers_mut().insert(X_REQUEST_ID, value);
        }
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_deserializes() {
        let request: WithdrawalRequest = serde_json::from_str(
            r#"{"network":"rpc.sepolia.mantle.xyz","address":"0xabc","amount":"0.01"}"#,
        )
        .unwrap();
        assert_eq!(request.network, "rpc.sepolia.mantle.xyz");
        assert_eq!(request.amount, "0.01");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result: Result<WithdrawalRequest, _> =
            serde_json::from_str(r#"{"network":"x","address":"0xabc"}"#);
        assert!(result.is_err());
    }
}
