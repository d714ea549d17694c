use super::error::*;
use crate::application_port::FriendGraphService;
use crate::domain_model::{EdgeId, MemberId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

pub async fn friend_list(
    actor: MemberId,
    friend_service: Arc<dyn FriendGraphService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let friends = friend_service
        .list_friends(actor)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(friends)))
}

pub async fn send_list(
    actor: MemberId,
    friend_service: Arc<dyn FriendGraphService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let sent = friend_service
        .list_sent_requests(actor)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(sent)))
}

pub async fn received_list(
    actor: MemberId,
    friend_service: Arc<dyn FriendGraphService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let received = friend_service
        .list_received_requests(actor)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(received)))
}

#[derive(Debug, Deserialize)]
pub struct RequestFriendRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RequestFriendResponse {
    pub edge_id: EdgeId,
}

pub async fn request_friend(
    body: RequestFriendRequest,
    actor: MemberId,
    friend_service: Arc<dyn FriendGraphService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let edge_id = friend_service
        .request_friend(actor, &body.email)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(RequestFriendResponse {
        edge_id,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ApproveFriendRequest {
    pub edge_id: EdgeId,
}

#[derive(Debug, Serialize)]
pub struct ApproveFriendResponse;

pub async fn approve_friend(
    body: ApproveFriendRequest,
    actor: MemberId,
    friend_service: Arc<dyn FriendGraphService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    friend_service
        .approve_friend(actor, body.edge_id)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(ApproveFriendResponse)))
}

#[derive(Debug, Deserialize)]
pub struct RemoveFriendRequest {
    pub edge_id: EdgeId,
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct RemoveFriendResponse;

pub async fn remove_friend(
    body: RemoveFriendRequest,
    actor: MemberId,
    friend_service: Arc<dyn FriendGraphService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    friend_service
        .remove_friend(actor, body.edge_id, body.force)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(RemoveFriendResponse)))
}
