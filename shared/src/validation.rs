use crate::vote_logic::{Vote, VoteError};

pub const MAX_ID_LENGTH: usize = 128;
pub const DEFAULT_HALL_OF_FAME_LIMIT: usize = 50;
pub const MAX_HALL_OF_FAME_LIMIT: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty page id")]
    EmptyPageId,
    #[error("Empty voter id")]
    EmptyVoterId,
    #[error("Identifier exceeds maximum length of {MAX_ID_LENGTH}")]
    IdTooLong,
    #[error("Identifier contains control characters")]
    ControlCharacters,
    #[error(transparent)]
    InvalidVote(#[from] VoteError),
    #[error("Invalid vote {0}. Must be 1 or -1")]
    MalformedVote(String),
}

fn validate_id(id: &str, empty: ValidationError) -> Result<(), ValidationError> {
    if id.trim().is_empty() { return Err(empty); }
    if id.len() > MAX_ID_LENGTH { return Err(ValidationError::IdTooLong); }
    if id.chars().any(char::is_control) { return Err(ValidationError::ControlCharacters); }
    Ok(())
}

pub fn validate_page_id(page_id: &str) -> Result<(), ValidationError> {
    validate_id(page_id, ValidationError::EmptyPageId)
}

pub fn validate_voter_id(voter_id: &str) -> Result<(), ValidationError> {
    validate_id(voter_id, ValidationError::EmptyVoterId)
}

pub fn parse_vote(value: i8) -> Result<Vote, ValidationError> {
    Ok(Vote::try_from(value)?)
}

/// Accepts the JSON `1` or `-1`; anything else is a [`ValidationError`].
pub fn parse_vote_value(value: &serde_json::Value) -> Result<Vote, ValidationError> {
    value.as_i64()
        .and_then(|n| i8::try_from(n).ok())
        .ok_or_else(|| ValidationError::MalformedVote(value.to_string()))
        .and_then(parse_vote)
}

/// Clamps a requested Hall of Fame size into `1..=MAX_HALL_OF_FAME_LIMIT`.
pub fn hall_of_fame_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_HALL_OF_FAME_LIMIT)
        .clamp(1, MAX_HALL_OF_FAME_LIMIT)
}
