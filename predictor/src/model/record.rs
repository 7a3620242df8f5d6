use std::borrow::Cow;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::form::{Choice, ReservationForm};

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Text(_) => None,
        }
    }

    /// Category view used by one-hot style lookups. Floats have none.
    pub fn as_category(&self) -> Option<Cow<'_, str>> {
        match self {
            FeatureValue::Text(v) => Some(Cow::Borrowed(v.as_str())),
            FeatureValue::Int(v) => Some(Cow::Owned(v.to_string())),
            FeatureValue::Float(_) => None,
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureValue::Int(v) => serializer.serialize_i64(*v),
            FeatureValue::Float(v) => serializer.serialize_f64(*v),
            FeatureValue::Text(v) => serializer.serialize_str(v),
        }
    }
}

/// One flat, named feature row handed to the classifier.
///
/// Column order follows the training frame; names must match the
/// artifact's `input_features` exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRecord {
    fields: Vec<(&'static str, FeatureValue)>,
}

impl ReservationRecord {
    pub fn from_form(form: &ReservationForm) -> Self {
        let form = form.clamped();
        let int = |v: u32| FeatureValue::Int(i64::from(v));
        let text = |v: &str| FeatureValue::Text(v.to_string());

        let fields = vec![
            ("lead_time", int(form.lead_time)),
            ("stays_in_weekend_nights", int(form.stays_in_weekend_nights)),
            ("stays_in_week_nights", int(form.stays_in_week_nights)),
            ("adults", int(form.adults)),
            ("children", int(form.children)),
            ("babies", int(form.babies)),
            ("total_guests", int(form.total_guests())),
            ("total_stay_nights", int(form.total_stay_nights())),
            ("adr", FeatureValue::Float(form.adr)),
            ("required_car_parking_spaces", int(form.required_car_parking_spaces)),
            ("total_of_special_requests", int(form.total_of_special_requests)),
            ("booking_changes", int(form.booking_changes)),
            ("days_in_waiting_list", int(form.days_in_waiting_list)),
            ("hotel", text(form.hotel.as_str())),
            ("meal", text(form.meal.as_str())),
            ("market_segment", text(form.market_segment.as_str())),
            ("distribution_channel", text(form.distribution_channel.as_str())),
            ("reserved_room_type", text(form.reserved_room_type.as_str())),
            ("deposit_type", text(form.deposit_type.as_str())),
            ("customer_type", text(form.customer_type.as_str())),
            ("country", text(&form.country)),
            ("previous_bookings_not_canceled", int(form.previous_bookings_not_canceled)),
            ("is_repeated_guest", int(form.is_repeated_guest)),
            ("previous_cancellations", int(form.previous_cancellations)),
        ];

        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ReservationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
