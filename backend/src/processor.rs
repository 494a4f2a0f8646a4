use std::sync::MutexGuard;
use tracing::{error, info};
use shared::{
    hall_of_fame_limit, parse_vote_value, validate_page_id, validate_voter_id,
    CastVoteRequest, HallOfFame, PageScore, PageVotes, Vote, VoteService, VoteSummary,
    HALL_OF_FAME_THRESHOLD,
};
use crate::error::ApiError;
use crate::store::{FileStorage, SharedVotes};

pub struct VoteProcessor;

impl VoteProcessor {
    fn lock(votes: &SharedVotes) -> Result<MutexGuard<'_, VoteService<FileStorage>>, ApiError> {
        votes.lock().map_err(|e| {
            error!("Failed to acquire vote store lock: {}", e);
            ApiError::Internal("vote store unavailable".into())
        })
    }

    fn summary(service: &VoteService<FileStorage>, page_id: &str, voter_id: Option<&str>) -> VoteSummary {
        VoteSummary {
            page_id: page_id.to_string(),
            vote: service.current_vote(page_id, voter_id),
            score: service.score_of(page_id),
            hall_of_fame: service.is_hall_of_fame(page_id),
        }
    }

    /// Checks a cast request without touching the store.
    pub fn validate_cast(page_id: &str, voter_id: &str, request: &CastVoteRequest) -> Result<Vote, ApiError> {
        validate_page_id(page_id)?;
        validate_voter_id(voter_id)?;
        Ok(parse_vote_value(&request.vote)?)
    }

    pub fn cast(votes: &SharedVotes, page_id: &str, voter_id: &str, vote: Vote) -> Result<VoteSummary, ApiError> {
        let mut service = Self::lock(votes)?;
        let was_famous = service.is_hall_of_fame(page_id);
        service.cast_vote(page_id, voter_id, vote);

        let summary = Self::summary(&service, page_id, Some(voter_id));
        if summary.hall_of_fame != was_famous {
            info!(page_id, score = summary.score, hall_of_fame = summary.hall_of_fame, "Hall of Fame membership changed");
        }
        Ok(summary)
    }

    pub fn current(votes: &SharedVotes, page_id: &str, voter_id: Option<&str>) -> Result<VoteSummary, ApiError> {
        validate_page_id(page_id)?;
        let service = Self::lock(votes)?;
        Ok(Self::summary(&service, page_id, voter_id))
    }

    pub fn score(votes: &SharedVotes, page_id: &str) -> Result<PageScore, ApiError> {
        validate_page_id(page_id)?;
        let service = Self::lock(votes)?;
        Ok(PageScore {
            page_id: page_id.to_string(),
            score: service.score_of(page_id),
            hall_of_fame: service.is_hall_of_fame(page_id),
        })
    }

    pub fn page_votes(votes: &SharedVotes, page_id: &str) -> Result<PageVotes, ApiError> {
        validate_page_id(page_id)?;
        let service = Self::lock(votes)?;
        Ok(PageVotes {
            page_id: page_id.to_string(),
            votes: service.page_votes(page_id),
        })
    }

    pub fn hall_of_fame(votes: &SharedVotes, limit: Option<usize>) -> Result<HallOfFame, ApiError> {
        let service = Self::lock(votes)?;
        Ok(HallOfFame {
            threshold: HALL_OF_FAME_THRESHOLD,
            entries: service.hall_of_fame(hall_of_fame_limit(limit)),
        })
    }
}
