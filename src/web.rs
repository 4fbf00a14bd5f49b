mod db;
mod poll_api;
mod result_api;
mod vote_api;

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use warp::Filter;

use crate::config::Config;
use crate::voting::{Id, Identity, Role};

pub async fn setup() {
    let config = Arc::new(Config::load());
    let port = config.port;

    let with_config = {
        let config = config.clone();
        warp::any().map(move || config.clone())
    };

    // the fronting identity provider vouches for x-user-id; absent header
    // means an anonymous caller
    let identity = {
        let config = config.clone();
        warp::header::optional::<Uuid>("x-user-id").map(move |user_id: Option<Uuid>| {
            user_id.map(|user_id| {
                let role = if config.is_admin(&user_id) {
                    Role::Admin
                } else {
                    Role::Member
                };
                Identity::new(Id(user_id), role)
            })
        })
    };

    let create_poll = warp::post()
        .and(warp::path!("api" / "poll"))
        .and(identity.clone())
        .and(with_config.clone())
        .and(warp::body::json())
        .map(poll_api::create);

    let get_poll = warp::get()
        .and(warp::path!("api" / "poll" / Uuid))
        .map(poll_api::get);

    let update_poll = warp::put()
        .and(warp::path!("api" / "poll" / Uuid))
        .and(identity.clone())
        .and(with_config.clone())
        .and(warp::body::json())
        .map(poll_api::update);

    let delete_poll = warp::delete()
        .and(warp::path!("api" / "poll" / Uuid))
        .and(identity.clone())
        .map(poll_api::delete);

    let submit_vote = warp::post()
        .and(warp::path!("api" / "poll" / Uuid / "vote"))
        .and(identity.clone())
        .and(with_config.clone())
        .and(warp::body::json())
        .map(vote_api::submit);

    let vote_status = warp::get()
        .and(warp::path!("api" / "poll" / Uuid / "vote"))
        .and(identity.clone())
        .map(vote_api::status);

    let get_result = warp::get()
        .and(warp::path!("api" / "poll" / Uuid / "result"))
        .map(result_api::get_result);

    let routes = create_poll
        .or(get_poll)
        .or(update_poll)
        .or(delete_poll)
        .or(submit_vote)
        .or(vote_status)
        .or(get_result);

    info!("Server running on port {port}");
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}
