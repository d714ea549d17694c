use crate::api::v1::handler::ApiResponse;
use crate::application_port::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(err) = err.find::<ApiErrorCode>() {
        let json = warp::reply::json(&ApiResponse::<()>::err(err.clone(), err.to_string()));
        Ok(warp::reply::with_status(json, StatusCode::OK))
    } else {
        let json = warp::reply::json(&ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ApiError {
                code: ApiErrorCode::InternalError,
                message: format!("Unhandled error: {:?}", err),
            }),
        });
        Ok(warp::reply::with_status(
            json,
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Invalid friend request")]
    InvalidRequest,
    #[error("No member with that email")]
    UnknownEmail,
    #[error("Friend request or friendship already exists")]
    DuplicateRequest,
    #[error("Friend edge not found")]
    UnknownFriendId,
    #[error("Internal error")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<FriendError> for ApiErrorCode {
    fn from(error: FriendError) -> Self {
        match error {
            FriendError::FailedToLogin => ApiErrorCode::NotLoggedIn,
            FriendError::InvalidRequest => ApiErrorCode::InvalidRequest,
            FriendError::InvalidEmail => ApiErrorCode::UnknownEmail,
            FriendError::DuplicateFriendRequest => ApiErrorCode::DuplicateRequest,
            FriendError::InvalidFriendId => ApiErrorCode::UnknownFriendId,
            FriendError::Store(e) => ApiErrorCode::internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_map_to_distinct_codes() {
        assert!(matches!(
            ApiErrorCode::from(FriendError::FailedToLogin),
            ApiErrorCode::NotLoggedIn
        ));
        assert!(matches!(
            ApiErrorCode::from(FriendError::DuplicateFriendRequest),
            ApiErrorCode::DuplicateRequest
        ));
        assert!(matches!(
            ApiErrorCode::from(FriendError::InvalidFriendId),
            ApiErrorCode::UnknownFriendId
        ));
        assert!(matches!(
            ApiErrorCode::from(FriendError::Store("boom".into())),
            ApiErrorCode::InternalError
        ));
    }

    #[test]
    fn error_envelope_serializes_code_and_message() {
        let resp = ApiResponse::<()>::err(ApiErrorCode::UnknownEmail, "no member with that email");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "UnknownEmail");
        assert_eq!(json["error"]["message"], "no member with that email");
    }
}
