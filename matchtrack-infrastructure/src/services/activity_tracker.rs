use std::sync::Arc;

use async_trait::async_trait;

use matchtrack_domain::{ActivityTracker, EventPusher, TrackingEvent, UserMark};

/// Records likes and marks as plain analytics events.
pub struct EventActivityTracker {
    pusher: Arc<dyn EventPusher>,
}

impl EventActivityTracker {
    pub fn new(pusher: Arc<dyn EventPusher>) -> Self {
        Self { pusher }
    }
}

#[async_trait]
impl ActivityTracker for EventActivityTracker {
    async fn track_send_like(&self, sender_id: i64, receiver_id: i64) -> anyhow::Result<()> {
        self.pusher
            .push(TrackingEvent::SendLike {
                sender_id,
                receiver_id,
            })
            .await
    }

    async fn track_user_mark(&self, user_mark: &UserMark) -> anyhow::Result<()> {
        self.pusher
            .push(TrackingEvent::UserMark {
                sender_id: user_mark.sender.id,
                receiver_id: user_mark.receiver.id,
                mark: user_mark.sender_mark,
            })
            .await
    }
}
