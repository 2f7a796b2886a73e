// User entities
// The subset of a user profile the matches tracker reports on

use serde::{Deserialize, Serialize};

use crate::value_objects::{Gender, Mark};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchUser {
    pub id: i64,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub city_id: i64,
    /// Account in good standing (not blocked or deleted by moderation).
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub rating_elo: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMark {
    pub sender: MatchUser,
    pub receiver: MatchUser,
    pub sender_mark: Mark,
}
