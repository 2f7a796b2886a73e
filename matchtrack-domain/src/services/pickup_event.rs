use crate::entities::{City, MatchUser, PickupContact, PickupMatches, TrackingEvent};

/// Builds the pickup analytics record from already resolved cities.
pub fn build_pickup_matches_event(
    user: &MatchUser,
    user_city: &City,
    contact: Option<(&MatchUser, &City)>,
    is_pickup: bool,
) -> TrackingEvent {
    let contact = contact.map(|(contact, contact_city)| PickupContact {
        contact_id: contact.id,
        contact_country_id: contact_city.country_id(),
        contact_city_id: contact.city_id,
        contact_gender: contact.gender,
        contact_rating: contact.rating_elo,
        contact_region_id: contact_city.region_id(),
    });

    TrackingEvent::PickupMatches(PickupMatches {
        user_id: user.id,
        gender: user.gender,
        city_id: user.city_id,
        region_id: user_city.region_id(),
        country_id: user_city.country_id(),
        user_rating: user.rating_elo,
        is_pickup: u8::from(is_pickup),
        contact,
    })
}
