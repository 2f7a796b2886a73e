// Request payloads for the tracking commands

use serde::Deserialize;

use matchtrack_domain::MatchUser;

#[derive(Debug, Clone, Deserialize)]
pub struct SendLikeRequest {
    pub sender_id: i64,
    pub receiver_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FraudRequest {
    pub user_id: i64,
    pub fraud_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PickupRequest {
    pub user_id: i64,
    #[serde(default)]
    pub found_user_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PickupDeletedRequest {
    pub user_id: i64,
    pub contact: MatchUser,
    #[serde(default)]
    pub attempt: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PickupMatchesRequest {
    pub user: MatchUser,
    #[serde(default)]
    pub contact: Option<MatchUser>,
    #[serde(default = "default_is_pickup")]
    pub is_pickup: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriorityTimeRequest {
    pub user_id: i64,
    pub count_list: i64,
    /// Milliseconds spent building the priority list.
    pub execute_time: i64,
}

fn default_is_pickup() -> bool {
    true
}
