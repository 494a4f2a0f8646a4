pub mod processor;
pub mod routes;
pub mod store;
pub mod cors;
pub mod config;
pub mod error;
pub mod rate_limiter;
pub mod catchers;
pub use shared::user_info;
pub use shared::{models::*, error::*, user_info::*};
pub use shared::vote_logic::{Vote, VoteStore, RankedPage, HALL_OF_FAME_THRESHOLD};

use rocket::{catchers, routes, Build, Rocket};
use crate::{
    catchers::{bad_request, internal_error, not_found, too_many_requests, unauthorized, unprocessable},
    cors::Cors,
    routes::{all_options, cast_vote, current_vote, hall_of_fame, page_score, page_votes, AppState},
};

pub fn build_rocket(app_state: AppState, cors: Cors) -> Rocket<Build> {
    rocket::build()
        .attach(cors)
        .manage(app_state)
        .mount(
            "/api",
            routes![
                cast_vote,
                current_vote,
                page_score,
                page_votes,
                hall_of_fame,
                all_options
            ],
        )
        .register(
            "/",
            catchers![
                unauthorized,
                too_many_requests,
                bad_request,
                unprocessable,
                internal_error,
                not_found
            ],
        )
}
