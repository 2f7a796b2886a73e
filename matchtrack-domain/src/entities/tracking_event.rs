// Tracking event entity
// One flat analytics record per user action

use serde::{Deserialize, Serialize};

use crate::value_objects::{FraudType, Gender, Mark};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupMatches {
    pub user_id: i64,
    pub gender: Gender,
    pub city_id: i64,
    pub region_id: i64,
    pub country_id: i64,
    pub user_rating: i32,
    pub is_pickup: u8,
    #[serde(flatten)]
    pub contact: Option<PickupContact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupContact {
    pub contact_id: i64,
    pub contact_country_id: i64,
    pub contact_city_id: i64,
    pub contact_gender: Gender,
    pub contact_rating: i32,
    pub contact_region_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackingEvent {
    UserFraud {
        user_id: i64,
        fraud_type: FraudType,
    },
    MatchesUserNotFound {
        user_id: i64,
        iter: i64,
    },
    MatchesPickupDeletedUser {
        user_id: i64,
        contact_id: i64,
        contact_ok: bool,
        attempt: u32,
    },
    PickupMatches(PickupMatches),
    PriorityListLogTime {
        user_id: i64,
        count_list: i64,
        time_execute: i64,
    },
    SendLike {
        sender_id: i64,
        receiver_id: i64,
    },
    UserMark {
        sender_id: i64,
        receiver_id: i64,
        mark: Mark,
    },
}

impl TrackingEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackingEvent::UserFraud { .. } => "user_fraud",
            TrackingEvent::MatchesUserNotFound { .. } => "matches_user_not_found",
            TrackingEvent::MatchesPickupDeletedUser { .. } => "matches_pickup_deleted_user",
            TrackingEvent::PickupMatches(_) => "pickup_matches",
            TrackingEvent::PriorityListLogTime { .. } => "priority_list_log_time",
            TrackingEvent::SendLike { .. } => "send_like",
            TrackingEvent::UserMark { .. } => "user_mark",
        }
    }

    /// The user who performed the action.
    pub fn user_id(&self) -> i64 {
        match self {
            TrackingEvent::UserFraud { user_id, .. }
            | TrackingEvent::MatchesUserNotFound { user_id, .. }
            | TrackingEvent::MatchesPickupDeletedUser { user_id, .. }
            | TrackingEvent::PriorityListLogTime { user_id, .. } => *user_id,
            TrackingEvent::PickupMatches(event) => event.user_id,
            TrackingEvent::SendLike { sender_id, .. } | TrackingEvent::UserMark { sender_id, .. } => {
                *sender_id
            }
        }
    }
}
