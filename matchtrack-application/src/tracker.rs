use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use matchtrack_domain::ports::{
    ActivityTracker, BotDetector, ClicksCounter, EventPusher, GeoDirectory, TempDataStore, TTL_MONTH,
};
use matchtrack_domain::{build_pickup_matches_event, City, FraudType, MatchUser, TrackingEvent, UserMark};

use crate::{AppError, Metrics};

const NOT_FOUND_KEY: &str = "matches_notfound";
// Event names the activity tracker emits on the tracker's behalf.
const SEND_LIKE_EVENT: &str = "send_like";
const USER_MARK_EVENT: &str = "user_mark";

/// Turns matches activity into analytics events.
///
/// Holds no state of its own; counters and cached flags live in the
/// injected collaborators.
pub struct Tracker {
    activity_tracker: Arc<dyn ActivityTracker>,
    bot_detector: Arc<dyn BotDetector>,
    clicks_counter: Arc<dyn ClicksCounter>,
    temp_data: Arc<dyn TempDataStore>,
    event_pusher: Arc<dyn EventPusher>,
    geo: Arc<dyn GeoDirectory>,
    metrics: Arc<Metrics>,
}

impl Tracker {
    pub fn new(
        activity_tracker: Arc<dyn ActivityTracker>,
        bot_detector: Arc<dyn BotDetector>,
        clicks_counter: Arc<dyn ClicksCounter>,
        temp_data: Arc<dyn TempDataStore>,
        event_pusher: Arc<dyn EventPusher>,
        geo: Arc<dyn GeoDirectory>,
    ) -> Self {
        Self {
            activity_tracker,
            bot_detector,
            clicks_counter,
            temp_data,
            event_pusher,
            geo,
            metrics: Arc::new(Metrics::default()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub async fn track_new_click_and_mark(&self, user_mark: &UserMark) -> Result<(), AppError> {
        let sender_id = user_mark.sender.id;
        self.clicks_counter.inc_clicks_per_day(sender_id).await?;
        if let Some(fraud_type) = self.bot_detector.try_detect_clicker(sender_id).await? {
            self.track_fraud(sender_id, fraud_type).await?;
        }

        if !user_mark.sender_mark.is_positive() {
            return Ok(());
        }

        if let Some(fraud_type) = self.bot_detector.try_detect_woman_clicker_360(sender_id).await? {
            self.track_fraud(sender_id, fraud_type).await?;
        }
        Ok(())
    }

    pub async fn track_fraud(&self, user_id: i64, fraud_type: FraudType) -> Result<(), AppError> {
        info!(user_id, fraud_type = %fraud_type, "fraud detected");
        self.push(TrackingEvent::UserFraud { user_id, fraud_type }).await
    }

    /// Counts consecutive pickups that found nobody for `user_id`.
    ///
    /// A successful pickup clears the counter without emitting an event.
    pub async fn pickup_user_tracking(
        &self,
        user_id: i64,
        found_user_id: Option<i64>,
    ) -> Result<(), AppError> {
        let not_found_count = self
            .temp_data
            .get_value(user_id, NOT_FOUND_KEY)
            .await?
            .as_ref()
            .and_then(counter_value)
            .unwrap_or_default();

        if found_user_id.is_some_and(|id| id != 0) {
            if not_found_count != 0 {
                self.temp_data.delete(user_id, NOT_FOUND_KEY).await?;
            }
            return Ok(());
        }

        let iter = not_found_count + 1;
        self.temp_data
            .set(user_id, NOT_FOUND_KEY, Value::from(iter), TTL_MONTH)
            .await?;

        self.push(TrackingEvent::MatchesUserNotFound { user_id, iter })
            .await
    }

    pub async fn pickup_deleted_user_tracking(
        &self,
        user_id: i64,
        contact: &MatchUser,
        attempt: u32,
    ) -> Result<(), AppError> {
        self.push(TrackingEvent::MatchesPickupDeletedUser {
            user_id,
            contact_id: contact.id,
            contact_ok: contact.ok,
            attempt,
        })
        .await
    }

    pub async fn track_send_like(&self, sender_id: i64, receiver_id: i64) -> Result<(), AppError> {
        let result = self
            .activity_tracker
            .track_send_like(sender_id, receiver_id)
            .await;
        self.record_outcome(SEND_LIKE_EVENT, sender_id, result)
    }

    pub async fn track_user_mark(&self, user_mark: &UserMark) -> Result<(), AppError> {
        let result = self.activity_tracker.track_user_mark(user_mark).await;
        self.record_outcome(USER_MARK_EVENT, user_mark.sender.id, result)
    }

    pub async fn track_pickup_matches_user(
        &self,
        user: &MatchUser,
        contact: Option<&MatchUser>,
        is_pickup: bool,
    ) -> Result<(), AppError> {
        let user_city = self.resolve_city(user.city_id).await?;
        let contact_city = match contact {
            Some(contact) => Some(self.resolve_city(contact.city_id).await?),
            None => None,
        };

        let event = build_pickup_matches_event(
            user,
            &user_city,
            contact.zip(contact_city.as_ref()),
            is_pickup,
        );
        self.push(event).await
    }

    pub async fn track_priority_execute_time(
        &self,
        user_id: i64,
        count_list: i64,
        execute_time: i64,
    ) -> Result<(), AppError> {
        self.push(TrackingEvent::PriorityListLogTime {
            user_id,
            count_list,
            time_execute: execute_time,
        })
        .await
    }

    async fn resolve_city(&self, city_id: i64) -> Result<City, AppError> {
        self.geo
            .city_by_id(city_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("city {}", city_id)))
    }

    async fn push(&self, event: TrackingEvent) -> Result<(), AppError> {
        let name = event.name();
        let user_id = event.user_id();
        let result = self.event_pusher.push(event).await;
        self.record_outcome(name, user_id, result)
    }

    fn record_outcome(
        &self,
        name: &'static str,
        user_id: i64,
        result: anyhow::Result<()>,
    ) -> Result<(), AppError> {
        match result {
            Ok(()) => {
                self.metrics.record_push(name);
                debug!(event = name, user_id, "event pushed");
                Ok(())
            }
            Err(err) => {
                self.metrics.record_push_error();
                error!(event = name, user_id, "failed to push event: {}", err);
                Err(AppError::Internal(err))
            }
        }
    }
}

// Stores may hand the counter back as a JSON number or as a string.
fn counter_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use matchtrack_domain::{Country, Gender, Mark, Subdivision};

    use super::*;

    #[derive(Default)]
    struct RecordingPusher {
        events: Mutex<Vec<TrackingEvent>>,
        fail: bool,
    }

    impl RecordingPusher {
        fn events(&self) -> Vec<TrackingEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventPusher for RecordingPusher {
        async fn push(&self, event: TrackingEvent) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("sink unavailable");
            }
            self.events.lock().unwrap().push(event);
            Ok(())
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubBotDetector {
        clicker: Option<&'static str>,
        clicker_360: Option<&'static str>,
        fail: bool,
        calls_360: AtomicUsize,
    }

    #[async_trait]
    impl BotDetector for StubBotDetector {
        async fn try_detect_clicker(&self, _user_id: i64) -> anyhow::Result<Option<FraudType>> {
            if self.fail {
                anyhow::bail!("detector unavailable");
            }
            Ok(self.clicker.and_then(FraudType::new))
        }

        async fn try_detect_woman_clicker_360(
            &self,
            _user_id: i64,
        ) -> anyhow::Result<Option<FraudType>> {
            self.calls_360.fetch_add(1, Ordering::SeqCst);
            Ok(self.clicker_360.and_then(FraudType::new))
        }
    }

    #[derive(Default)]
    struct CountingClicks {
        clicks: AtomicU64,
    }

    #[async_trait]
    impl ClicksCounter for CountingClicks {
        async fn inc_clicks_per_day(&self, _user_id: i64) -> anyhow::Result<u64> {
            Ok(self.clicks.fetch_add(1, Ordering::SeqCst) + 1)
        }

        async fn clicks_per_day(&self, _user_id: i64) -> anyhow::Result<u64> {
            Ok(self.clicks.load(Ordering::SeqCst))
        }
    }

    #[derive(Default)]
    struct MapTempStore {
        values: Mutex<HashMap<(i64, String), (Value, Duration)>>,
        deletes: AtomicUsize,
    }

    impl MapTempStore {
        fn stored(&self, user_id: i64, key: &str) -> Option<(Value, Duration)> {
            self.values
                .lock()
                .unwrap()
                .get(&(user_id, key.to_string()))
                .cloned()
        }
    }

    #[async_trait]
    impl TempDataStore for MapTempStore {
        async fn get_value(&self, user_id: i64, key: &str) -> anyhow::Result<Option<Value>> {
            Ok(self.stored(user_id, key).map(|(value, _)| value))
        }

        async fn set(&self, user_id: i64, key: &str, value: Value, ttl: Duration) -> anyhow::Result<()> {
            self.values
                .lock()
                .unwrap()
                .insert((user_id, key.to_string()), (value, ttl));
            Ok(())
        }

        async fn delete(&self, user_id: i64, key: &str) -> anyhow::Result<()> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            self.values.lock().unwrap().remove(&(user_id, key.to_string()));
            Ok(())
        }

        async fn increment(&self, user_id: i64, key: &str, ttl: Duration) -> anyhow::Result<i64> {
            let mut values = self.values.lock().unwrap();
            let entry = values
                .entry((user_id, key.to_string()))
                .or_insert((Value::from(0), ttl));
            let next = entry.0.as_i64().unwrap_or_default() + 1;
            *entry = (Value::from(next), ttl);
            Ok(next)
        }

        async fn set_if_absent(
            &self,
            user_id: i64,
            key: &str,
            value: Value,
            ttl: Duration,
        ) -> anyhow::Result<bool> {
            let mut values = self.values.lock().unwrap();
            let entry_key = (user_id, key.to_string());
            if values.contains_key(&entry_key) {
                return Ok(false);
            }
            values.insert(entry_key, (value, ttl));
            Ok(true)
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct StaticGeo {
        cities: HashMap<i64, City>,
    }

    #[async_trait]
    impl GeoDirectory for StaticGeo {
        async fn city_by_id(&self, city_id: i64) -> anyhow::Result<Option<City>> {
            Ok(self.cities.get(&city_id).cloned())
        }
    }

    #[derive(Default)]
    struct RecordingActivity {
        likes: Mutex<Vec<(i64, i64)>>,
        marks: Mutex<Vec<UserMark>>,
        fail: bool,
    }

    #[async_trait]
    impl ActivityTracker for RecordingActivity {
        async fn track_send_like(&self, sender_id: i64, receiver_id: i64) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("sink unavailable");
            }
            self.likes.lock().unwrap().push((sender_id, receiver_id));
            Ok(())
        }

        async fn track_user_mark(&self, user_mark: &UserMark) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("sink unavailable");
            }
            self.marks.lock().unwrap().push(user_mark.clone());
            Ok(())
        }
    }

    struct Fixture {
        tracker: Tracker,
        pusher: Arc<RecordingPusher>,
        bot: Arc<StubBotDetector>,
        clicks: Arc<CountingClicks>,
        temp: Arc<MapTempStore>,
        activity: Arc<RecordingActivity>,
        metrics: Arc<Metrics>,
    }

    fn fixture_with(bot: StubBotDetector, pusher: RecordingPusher) -> Fixture {
        fixture_with_activity(bot, pusher, RecordingActivity::default())
    }

    fn fixture_with_activity(
        bot: StubBotDetector,
        pusher: RecordingPusher,
        activity: RecordingActivity,
    ) -> Fixture {
        let pusher = Arc::new(pusher);
        let bot = Arc::new(bot);
        let clicks = Arc::new(CountingClicks::default());
        let temp = Arc::new(MapTempStore::default());
        let activity = Arc::new(activity);
        let metrics = Arc::new(Metrics::default());
        let geo = Arc::new(StaticGeo {
            cities: HashMap::from([
                (
                    100,
                    City {
                        id: 100,
                        name: Some("Moscow".to_string()),
                        country: Country { id: 1 },
                        subdivision: Some(Subdivision { id: 77 }),
                    },
                ),
                (
                    200,
                    City {
                        id: 200,
                        name: None,
                        country: Country { id: 2 },
                        subdivision: None,
                    },
                ),
            ]),
        });
        let tracker = Tracker::new(
            activity.clone(),
            bot.clone(),
            clicks.clone(),
            temp.clone(),
            pusher.clone(),
            geo,
        )
        .with_metrics(metrics.clone());
        Fixture {
            tracker,
            pusher,
            bot,
            clicks,
            temp,
            activity,
            metrics,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(StubBotDetector::default(), RecordingPusher::default())
    }

    fn user(id: i64, city_id: i64) -> MatchUser {
        MatchUser {
            id,
            gender: Gender::Male,
            city_id,
            ok: true,
            rating_elo: 1500,
        }
    }

    fn mark(sender_mark: Mark) -> UserMark {
        UserMark {
            sender: user(1, 100),
            receiver: user(2, 200),
            sender_mark,
        }
    }

    #[tokio::test]
    async fn negative_mark_skips_the_360_check() {
        let f = fixture_with(
            StubBotDetector {
                clicker: Some("clicker"),
                clicker_360: Some("woman_clicker_360"),
                ..Default::default()
            },
            RecordingPusher::default(),
        );

        f.tracker
            .track_new_click_and_mark(&mark(Mark::No))
            .await
            .expect("track mark");

        assert_eq!(f.clicks.clicks.load(Ordering::SeqCst), 1);
        assert_eq!(f.bot.calls_360.load(Ordering::SeqCst), 0);
        assert_eq!(
            f.pusher.events(),
            vec![TrackingEvent::UserFraud {
                user_id: 1,
                fraud_type: FraudType::clicker(),
            }]
        );
    }

    #[tokio::test]
    async fn positive_mark_reports_360_fraud() {
        let f = fixture_with(
            StubBotDetector {
                clicker_360: Some("woman_clicker_360"),
                ..Default::default()
            },
            RecordingPusher::default(),
        );

        f.tracker
            .track_new_click_and_mark(&mark(Mark::Maybe))
            .await
            .expect("track mark");

        assert_eq!(f.bot.calls_360.load(Ordering::SeqCst), 1);
        assert_eq!(
            f.pusher.events(),
            vec![TrackingEvent::UserFraud {
                user_id: 1,
                fraud_type: FraudType::woman_clicker_360(),
            }]
        );
    }

    #[tokio::test]
    async fn clean_click_pushes_nothing() {
        let f = fixture();
        f.tracker
            .track_new_click_and_mark(&mark(Mark::Yes))
            .await
            .expect("track mark");
        assert!(f.pusher.events().is_empty());
        assert_eq!(f.clicks.clicks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missed_pickups_increment_the_counter() {
        let f = fixture();
        f.tracker.pickup_user_tracking(5, None).await.expect("first miss");
        f.tracker.pickup_user_tracking(5, None).await.expect("second miss");

        assert_eq!(
            f.pusher.events(),
            vec![
                TrackingEvent::MatchesUserNotFound { user_id: 5, iter: 1 },
                TrackingEvent::MatchesUserNotFound { user_id: 5, iter: 2 },
            ]
        );
        let (value, ttl) = f.temp.stored(5, NOT_FOUND_KEY).expect("counter stored");
        assert_eq!(value, Value::from(2));
        assert_eq!(ttl, TTL_MONTH);
    }

    #[tokio::test]
    async fn found_pickup_resets_the_counter_silently() {
        let f = fixture();
        f.tracker.pickup_user_tracking(5, None).await.expect("miss");
        f.tracker.pickup_user_tracking(5, Some(9)).await.expect("found");

        assert_eq!(f.pusher.events().len(), 1);
        assert!(f.temp.stored(5, NOT_FOUND_KEY).is_none());
        assert_eq!(f.temp.deletes.load(Ordering::SeqCst), 1);

        f.tracker.pickup_user_tracking(5, None).await.expect("miss again");
        assert_eq!(
            f.pusher.events().last(),
            Some(&TrackingEvent::MatchesUserNotFound { user_id: 5, iter: 1 })
        );
    }

    #[tokio::test]
    async fn found_pickup_without_misses_does_not_touch_the_store() {
        let f = fixture();
        f.tracker.pickup_user_tracking(5, Some(9)).await.expect("found");
        assert!(f.pusher.events().is_empty());
        assert_eq!(f.temp.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_found_user_counts_as_a_miss() {
        let f = fixture();
        f.tracker.pickup_user_tracking(5, Some(0)).await.expect("miss");
        assert_eq!(
            f.pusher.events(),
            vec![TrackingEvent::MatchesUserNotFound { user_id: 5, iter: 1 }]
        );
    }

    #[tokio::test]
    async fn string_counter_from_store_is_honoured() {
        let f = fixture();
        f.temp
            .set(5, NOT_FOUND_KEY, Value::from("4"), TTL_MONTH)
            .await
            .expect("seed counter");
        f.tracker.pickup_user_tracking(5, None).await.expect("miss");
        assert_eq!(
            f.pusher.events(),
            vec![TrackingEvent::MatchesUserNotFound { user_id: 5, iter: 5 }]
        );
    }

    #[tokio::test]
    async fn deleted_pickup_reports_contact_state() {
        let f = fixture();
        let mut contact = user(8, 200);
        contact.ok = false;
        f.tracker
            .pickup_deleted_user_tracking(1, &contact, 3)
            .await
            .expect("track deleted pickup");
        assert_eq!(
            f.pusher.events(),
            vec![TrackingEvent::MatchesPickupDeletedUser {
                user_id: 1,
                contact_id: 8,
                contact_ok: false,
                attempt: 3,
            }]
        );
    }

    #[tokio::test]
    async fn pickup_matches_resolves_both_cities() {
        let f = fixture();
        f.tracker
            .track_pickup_matches_user(&user(1, 100), Some(&user(2, 200)), true)
            .await
            .expect("track pickup");

        let events = f.pusher.events();
        let Some(TrackingEvent::PickupMatches(event)) = events.first() else {
            panic!("expected pickup event, got {:?}", events);
        };
        assert_eq!(event.region_id, 77);
        assert_eq!(event.country_id, 1);
        assert_eq!(event.is_pickup, 1);
        let contact = event.contact.as_ref().expect("contact fields");
        assert_eq!(contact.contact_country_id, 2);
        assert_eq!(contact.contact_region_id, 0);
    }

    #[tokio::test]
    async fn pickup_matches_with_unknown_city_is_not_found() {
        let f = fixture();
        let err = f
            .tracker
            .track_pickup_matches_user(&user(1, 100), Some(&user(2, 999)), false)
            .await
            .expect_err("unknown contact city");
        match err {
            AppError::NotFound(message) => assert!(message.contains("999")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(f.pusher.events().is_empty());
    }

    #[tokio::test]
    async fn priority_time_is_pushed_verbatim() {
        let f = fixture();
        f.tracker
            .track_priority_execute_time(3, 40, 1250)
            .await
            .expect("track priority");
        assert_eq!(
            f.pusher.events(),
            vec![TrackingEvent::PriorityListLogTime {
                user_id: 3,
                count_list: 40,
                time_execute: 1250,
            }]
        );
        assert_eq!(f.metrics.events_pushed(), 1);
    }

    #[tokio::test]
    async fn likes_and_marks_go_to_the_activity_tracker() {
        let f = fixture();
        f.tracker.track_send_like(1, 2).await.expect("track like");
        f.tracker
            .track_user_mark(&mark(Mark::Yes))
            .await
            .expect("track user mark");

        assert_eq!(*f.activity.likes.lock().unwrap(), vec![(1, 2)]);
        assert_eq!(f.activity.marks.lock().unwrap().len(), 1);
        assert!(f.pusher.events().is_empty());
        assert_eq!(f.metrics.events_pushed(), 2);
    }

    #[tokio::test]
    async fn activity_failures_are_counted() {
        let f = fixture_with_activity(
            StubBotDetector::default(),
            RecordingPusher::default(),
            RecordingActivity {
                fail: true,
                ..Default::default()
            },
        );
        let err = f.tracker.track_send_like(1, 2).await.expect_err("like fails");
        assert!(matches!(err, AppError::Internal(_)));
        let err = f
            .tracker
            .track_user_mark(&mark(Mark::No))
            .await
            .expect_err("mark fails");
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(f.metrics.push_errors(), 2);
        assert_eq!(f.metrics.events_pushed(), 0);
    }

    #[tokio::test]
    async fn detector_failure_propagates_after_the_click_is_counted() {
        let f = fixture_with(
            StubBotDetector {
                clicker_360: Some("woman_clicker_360"),
                fail: true,
                ..Default::default()
            },
            RecordingPusher::default(),
        );
        let err = f
            .tracker
            .track_new_click_and_mark(&mark(Mark::Yes))
            .await
            .expect_err("detector failure");
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(f.clicks.clicks.load(Ordering::SeqCst), 1);
        assert_eq!(f.bot.calls_360.load(Ordering::SeqCst), 0);
        assert!(f.pusher.events().is_empty());
    }

    #[tokio::test]
    async fn sink_failure_is_reported_and_counted() {
        let f = fixture_with(
            StubBotDetector::default(),
            RecordingPusher {
                fail: true,
                ..Default::default()
            },
        );
        let err = f
            .tracker
            .track_priority_execute_time(3, 1, 1)
            .await
            .expect_err("sink failure");
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(f.metrics.push_errors(), 1);
        assert_eq!(f.metrics.events_pushed(), 0);
    }
}
