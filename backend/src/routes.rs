use std::sync::Mutex;
use rocket::{State, get, post, http::Status, serde::json::Json};
use tracing::{debug, info, instrument};
use shared::{models::*, user_info::UserInfo, VoteService};
use crate::{
    config::Config,
    error::ApiError,
    processor::VoteProcessor,
    rate_limiter::{RateLimiter, RateLimitError},
    store::{FileStorage, SharedVotes},
};

pub struct AppState {
    pub votes: SharedVotes,
    pub vote_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let storage = FileStorage::with_quota(&config.data_dir, config.storage_quota_bytes);
        info!("📂 Opening vote store in {}", storage.dir().display());
        Self::with_storage(storage, RateLimiter::new(config.vote_max_attempts, config.vote_window_minutes))
    }

    pub fn with_storage(storage: FileStorage, vote_limiter: RateLimiter) -> Self {
        let service = VoteService::open(storage);
        info!("🗳️ Loaded votes for {} pages", service.store().page_ids().count());
        Self {
            votes: Mutex::new(service),
            vote_limiter,
        }
    }
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

#[instrument(skip(state, request, user_info))]
#[post("/pages/<page_id>/vote", format = "json", data = "<request>")]
pub async fn cast_vote(
    state: &State<AppState>,
    page_id: &str,
    request: Json<CastVoteRequest>,
    user_info: UserInfo,
) -> Result<Json<VoteSummary>, ApiError> {
    let voter_id = user_info.voter_id().ok_or(ApiError::Unauthorized)?;
    let vote = VoteProcessor::validate_cast(page_id, voter_id, &request)?;

    let rate_limit_key = format!("cast_vote:{}", user_info.client_fingerprint);
    state.vote_limiter.check(&rate_limit_key).map_err(|e| match e {
        RateLimitError::Exceeded(_) => ApiError::RateLimited(e.to_string()),
        RateLimitError::Unavailable => ApiError::Internal(e.to_string()),
    })?;

    debug!(?vote, "Casting vote");
    VoteProcessor::cast(&state.votes, page_id, voter_id, vote).map(Json)
}

#[get("/pages/<page_id>/vote")]
pub async fn current_vote(
    state: &State<AppState>,
    page_id: &str,
    user_info: UserInfo,
) -> Result<Json<VoteSummary>, ApiError> {
    VoteProcessor::current(&state.votes, page_id, user_info.voter_id()).map(Json)
}

#[get("/pages/<page_id>/score")]
pub async fn page_score(state: &State<AppState>, page_id: &str) -> Result<Json<PageScore>, ApiError> {
    VoteProcessor::score(&state.votes, page_id).map(Json)
}

#[get("/pages/<page_id>/votes")]
pub async fn page_votes(state: &State<AppState>, page_id: &str) -> Result<Json<PageVotes>, ApiError> {
    VoteProcessor::page_votes(&state.votes, page_id).map(Json)
}

#[get("/hall-of-fame?<limit>")]
pub async fn hall_of_fame(state: &State<AppState>, limit: Option<usize>) -> Result<Json<HallOfFame>, ApiError> {
    VoteProcessor::hall_of_fame(&state.votes, limit).map(Json)
}
