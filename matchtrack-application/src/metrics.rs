use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    track_requests: AtomicU64,
    events_pushed: AtomicU64,
    push_errors: AtomicU64,
    fraud_events: AtomicU64,
    not_found_events: AtomicU64,
}

impl Metrics {
    pub fn record_request(&self) {
        self.track_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_push(&self, event_name: &str) {
        self.events_pushed.fetch_add(1, Ordering::Relaxed);
        match event_name {
            "user_fraud" => {
                self.fraud_events.fetch_add(1, Ordering::Relaxed);
            }
            "matches_user_not_found" => {
                self.not_found_events.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    pub fn record_push_error(&self) {
        self.push_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn events_pushed(&self) -> u64 {
        self.events_pushed.load(Ordering::Relaxed)
    }

    pub fn push_errors(&self) -> u64 {
        self.push_errors.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let requests = self.track_requests.load(Ordering::Relaxed);
        let pushed = self.events_pushed.load(Ordering::Relaxed);
        let errors = self.push_errors.load(Ordering::Relaxed);
        let fraud = self.fraud_events.load(Ordering::Relaxed);
        let not_found = self.not_found_events.load(Ordering::Relaxed);

        format!(
            "# TYPE matchtrack_track_requests_total counter\n\
matchtrack_track_requests_total {}\n\
# TYPE matchtrack_events_pushed_total counter\n\
matchtrack_events_pushed_total {}\n\
# TYPE matchtrack_push_errors_total counter\n\
matchtrack_push_errors_total {}\n\
# TYPE matchtrack_fraud_events_total counter\n\
matchtrack_fraud_events_total {}\n\
# TYPE matchtrack_not_found_events_total counter\n\
matchtrack_not_found_events_total {}\n",
            requests, pushed, errors, fraud, not_found
        )
    }
}
