use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use crate::vote_logic::{RankedPage, Vote};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    /// Kept loose so out-of-range or non-numeric votes reach validation.
    #[serde(default)]
    pub vote: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    pub page_id: String,
    pub vote: Option<Vote>,
    pub score: i64,
    pub hall_of_fame: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageScore {
    pub page_id: String,
    pub score: i64,
    pub hall_of_fame: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageVotes {
    pub page_id: String,
    pub votes: HashMap<String, Vote>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HallOfFame {
    pub threshold: i64,
    pub entries: Vec<RankedPage>,
}
