use std::collections::{HashMap, HashSet};
use std::cmp::Ordering;
use thiserror::Error;
use serde::{Serialize, Deserialize};

/// Score a page must strictly exceed to enter the Hall of Fame.
pub const HALL_OF_FAME_THRESHOLD: i64 = 10;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteError {
    #[error("Invalid vote {0}. Must be 1 or -1")] InvalidVote(i8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Vote { Up, Down }

impl Vote {
    pub const fn as_i8(self) -> i8 {
        match self {
            Vote::Up => 1,
            Vote::Down => -1,
        }
    }
}

impl TryFrom<i8> for Vote {
    type Error = VoteError;

    fn try_from(v: i8) -> Result<Self, VoteError> {
        match v {
            1 => Ok(Vote::Up),
            -1 => Ok(Vote::Down),
            n => Err(VoteError::InvalidVote(n)),
        }
    }
}

impl From<Vote> for i8 {
    fn from(vote: Vote) -> i8 { vote.as_i8() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPage {
    pub page_id: String,
    pub score: i64,
}

/// Every recorded vote, keyed by page then voter.
///
/// Serializes as a plain nested JSON object so the persisted blob reads
/// `{"page": {"voter": 1}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteStore {
    pages: HashMap<String, HashMap<String, Vote>>,
}

impl VoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the voter's vote on a page, replacing any earlier one.
    /// Returns the vote that was replaced.
    pub fn record(&mut self, page_id: &str, voter_id: &str, vote: Vote) -> Option<Vote> {
        self.pages
            .entry(page_id.to_owned())
            .or_default()
            .insert(voter_id.to_owned(), vote)
    }

    pub fn vote_of(&self, page_id: &str, voter_id: &str) -> Option<Vote> {
        self.pages.get(page_id)?.get(voter_id).copied()
    }

    pub fn page_votes(&self, page_id: &str) -> Option<&HashMap<String, Vote>> {
        self.pages.get(page_id)
    }

    pub fn page_ids(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool { self.pages.is_empty() }

    pub fn score(&self, page_id: &str) -> i64 {
        self.pages.get(page_id).map_or(0, Self::sum)
    }

    pub fn is_hall_of_fame(&self, page_id: &str) -> bool {
        self.score(page_id) > HALL_OF_FAME_THRESHOLD
    }

    pub fn hall_of_fame_ids(&self, threshold: i64) -> HashSet<String> {
        self.pages.iter()
            .filter(|(_, votes)| Self::sum(votes) > threshold)
            .map(|(page_id, _)| page_id.clone())
            .collect()
    }

    /// Hall of Fame members, best score first, ties broken by page id.
    pub fn hall_of_fame_ranking(&self, threshold: i64, limit: usize) -> Vec<RankedPage> {
        let mut ranked: Vec<_> = self.pages.iter()
            .map(|(page_id, votes)| RankedPage { page_id: page_id.clone(), score: Self::sum(votes) })
            .filter(|entry| entry.score > threshold)
            .collect();

        ranked.sort_unstable_by(|a, b| match b.score.cmp(&a.score) {
            Ordering::Equal => a.page_id.cmp(&b.page_id),
            other => other,
        });
        ranked.truncate(limit);
        ranked
    }

    fn sum(votes: &HashMap<String, Vote>) -> i64 {
        votes.values().map(|&v| i64::from(v.as_i8())).sum()
    }
}
