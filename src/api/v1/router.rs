use super::error::*;
use super::handler;
use crate::application_port::IdentityService;
use crate::domain_model::MemberId;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, http, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let friend_list = warp::get()
        .and(warp::path("friend_list"))
        .and(warp::path::end())
        .and(with_verification(server.identity_service.clone()))
        .and(with(server.friend_service.clone()))
        .and_then(handler::friend_list);

    let send_list = warp::get()
        .and(warp::path("send_list"))
        .and(warp::path::end())
        .and(with_verification(server.identity_service.clone()))
        .and(with(server.friend_service.clone()))
        .and_then(handler::send_list);

    let received_list = warp::get()
        .and(warp::path("received_list"))
        .and(warp::path::end())
        .and(with_verification(server.identity_service.clone()))
        .and(with(server.friend_service.clone()))
        .and_then(handler::received_list);

    let request_friend = warp::post()
        .and(warp::path("request_friend"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_verification(server.identity_service.clone()))
        .and(with(server.friend_service.clone()))
        .and_then(handler::request_friend);

    let approve_friend = warp::post()
        .and(warp::path("approve_friend"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_verification(server.identity_service.clone()))
        .and(with(server.friend_service.clone()))
        .and_then(handler::approve_friend);

    let remove_friend = warp::post()
        .and(warp::path("remove_friend"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_verification(server.identity_service.clone()))
        .and(with(server.friend_service.clone()))
        .and_then(handler::remove_friend);

    friend_list
        .or(send_list)
        .or(received_list)
        .or(request_friend)
        .or(approve_friend)
        .or(remove_friend)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn with_verification(
    identity_service: Arc<dyn IdentityService>,
) -> impl Filter<Extract = (MemberId,), Error = warp::Rejection> + Clone {
    warp::header::<String>(http::header::AUTHORIZATION.as_ref()).and_then(move |token: String| {
        let identity_service = identity_service.clone();
        async move {
            if let Some(token) = token.strip_prefix("Bearer ") {
                let actor = identity_service
                    .resolve_token(token)
                    .await
                    .map_err(ApiErrorCode::from)
                    .map_err(reject::custom)?;
                Ok(actor)
            } else {
                Err(reject::custom(ApiErrorCode::NotLoggedIn))
            }
        }
    })
}
