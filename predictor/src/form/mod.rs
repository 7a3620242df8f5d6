pub mod choices;
pub mod render;

use common::{Error, Result};
use serde::{Deserialize, Serialize};

pub use choices::{
    Choice, CustomerType, DepositType, DistributionChannel, HotelType, MarketSegment, MealPlan,
    RoomType,
};

/// Inclusive bounds of an integer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

impl IntRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

pub const LEAD_TIME: IntRange = IntRange::new(0, 500);
pub const WEEKEND_NIGHTS: IntRange = IntRange::new(0, 20);
pub const WEEK_NIGHTS: IntRange = IntRange::new(0, 50);
pub const GUESTS: IntRange = IntRange::new(0, 10);
pub const PARKING_SPACES: IntRange = IntRange::new(0, 5);
pub const SPECIAL_REQUESTS: IntRange = IntRange::new(0, 10);
pub const BOOKING_CHANGES: IntRange = IntRange::new(0, 50);
pub const DAYS_IN_WAITING_LIST: IntRange = IntRange::new(0, 200);
pub const PREVIOUS_BOOKINGS: IntRange = IntRange::new(0, 50);
pub const REPEATED_GUEST: IntRange = IntRange::new(0, 1);

pub const ADR_MIN: f64 = 0.0;
pub const ADR_MAX: f64 = 1000.0;

pub const DEFAULT_COUNTRY: &str = "USA";

/// Current values of the reservation form.
///
/// Only primitive inputs are stored; `total_guests` and `total_stay_nights`
/// are derived on every read and cannot be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationForm {
    pub lead_time: u32,
    pub stays_in_weekend_nights: u32,
    pub stays_in_week_nights: u32,
    pub adults: u32,
    pub children: u32,
    pub babies: u32,
    pub adr: f64,
    pub required_car_parking_spaces: u32,
    pub total_of_special_requests: u32,
    pub booking_changes: u32,
    pub days_in_waiting_list: u32,
    pub hotel: HotelType,
    pub meal: MealPlan,
    pub market_segment: MarketSegment,
    pub distribution_channel: DistributionChannel,
    pub reserved_room_type: RoomType,
    pub deposit_type: DepositType,
    pub customer_type: CustomerType,
    pub country: String,
    pub previous_bookings_not_canceled: u32,
    pub is_repeated_guest: u32,
    pub previous_cancellations: u32,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            lead_time: 0,
            stays_in_weekend_nights: 0,
            stays_in_week_nights: 0,
            adults: 0,
            children: 0,
            babies: 0,
            adr: 0.0,
            required_car_parking_spaces: 0,
            total_of_special_requests: 0,
            booking_changes: 0,
            days_in_waiting_list: 0,
            hotel: HotelType::default(),
            meal: MealPlan::default(),
            market_segment: MarketSegment::default(),
            distribution_channel: DistributionChannel::default(),
            reserved_room_type: RoomType::default(),
            deposit_type: DepositType::default(),
            customer_type: CustomerType::default(),
            country: DEFAULT_COUNTRY.to_string(),
            previous_bookings_not_canceled: 0,
            is_repeated_guest: 0,
            previous_cancellations: 0,
        }
    }
}

impl ReservationForm {
    pub fn total_guests(&self) -> u32 {
        self.adults + self.children + self.babies
    }

    pub fn total_stay_nights(&self) -> u32 {
        self.stays_in_weekend_nights + self.stays_in_week_nights
    }

    /// Parses a browser form body. Blank numeric inputs fall back to their
    /// defaults; a blank country is kept as submitted.
    pub fn from_urlencoded(body: &[u8]) -> Result<Self> {
        let mut pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|e| Error::InvalidInput(format!("Invalid form submission: {}", e)))?;
        pairs.retain(|(key, value)| key == "country" || !value.trim().is_empty());

        let cleaned = serde_urlencoded::to_string(&pairs)
            .map_err(|e| Error::InvalidInput(format!("Invalid form submission: {}", e)))?;
        serde_urlencoded::from_str(&cleaned)
            .map_err(|e| Error::InvalidInput(format!("Invalid form submission: {}", e)))
    }

    /// Returns a copy with every numeric field pulled into its domain.
    pub fn clamped(&self) -> Self {
        let adr = if self.adr.is_finite() {
            self.adr.clamp(ADR_MIN, ADR_MAX)
        } else {
            ADR_MIN
        };

        Self {
            lead_time: LEAD_TIME.clamp(self.lead_time),
            stays_in_weekend_nights: WEEKEND_NIGHTS.clamp(self.stays_in_weekend_nights),
            stays_in_week_nights: WEEK_NIGHTS.clamp(self.stays_in_week_nights),
            adults: GUESTS.clamp(self.adults),
            children: GUESTS.clamp(self.children),
            babies: GUESTS.clamp(self.babies),
            adr,
            required_car_parking_spaces: PARKING_SPACES.clamp(self.required_car_parking_spaces),
            total_of_special_requests: SPECIAL_REQUESTS.clamp(self.total_of_special_requests),
            booking_changes: BOOKING_CHANGES.clamp(self.booking_changes),
            days_in_waiting_list: DAYS_IN_WAITING_LIST.clamp(self.days_in_waiting_list),
            country: self.country.trim().to_string(),
            previous_bookings_not_canceled: PREVIOUS_BOOKINGS
                .clamp(self.previous_bookings_not_canceled),
            is_repeated_guest: REPEATED_GUEST.clamp(self.is_repeated_guest),
            previous_cancellations: PREVIOUS_BOOKINGS.clamp(self.previous_cancellations),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_totals_follow_inputs() {
        for adults in 0..=10 {
            for children in [0, 3, 10] {
                for babies in [0, 1, 10] {
                    let form = ReservationForm {
                        adults,
                        children,
                        babies,
                        ..Default::default()
                    };
                    assert_eq!(form.total_guests(), adults + children + babies);
                }
            }
        }

        for weekend in 0..=20 {
            for week in [0, 7, 50] {
                let form = ReservationForm {
                    stays_in_weekend_nights: weekend,
                    stays_in_week_nights: week,
                    ..Default::default()
                };
                assert_eq!(form.total_stay_nights(), weekend + week);
            }
        }
    }

    #[test]
    fn test_clamped_pulls_values_into_domain() {
        let form = ReservationForm {
            lead_time: 900,
            stays_in_weekend_nights: 21,
            adults: 12,
            adr: 1500.5,
            required_car_parking_spaces: 9,
            days_in_waiting_list: 365,
            is_repeated_guest: 4,
            previous_cancellations: 80,
            country: "  PRT ".to_string(),
            ..Default::default()
        }
        .clamped();

        assert_eq!(form.lead_time, 500);
        assert_eq!(form.stays_in_weekend_nights, 20);
        assert_eq!(form.adults, 10);
        assert_eq!(form.adr, 1000.0);
        assert_eq!(form.required_car_parking_spaces, 5);
        assert_eq!(form.days_in_waiting_list, 200);
        assert_eq!(form.is_repeated_guest, 1);
        assert_eq!(form.previous_cancellations, 50);
        assert_eq!(form.country, "PRT");
    }

    #[test]
    fn test_non_finite_adr_clamps_to_zero() {
        let form = ReservationForm {
            adr: f64::NAN,
            ..Default::default()
        };
        assert_eq!(form.clamped().adr, 0.0);
    }

    #[test]
    fn test_defaults_and_partial_json() {
        let form: ReservationForm =
            serde_json::from_str(r#"{"lead_time": 45, "hotel": "City Hotel"}"#).unwrap();
        assert_eq!(form.lead_time, 45);
        assert_eq!(form.hotel, HotelType::CityHotel);
        assert_eq!(form.meal, MealPlan::Bb);
        assert_eq!(form.country, "USA");
    }

    #[test]
    fn test_urlencoded_body_parses() {
        let body = "lead_time=120&adults=2&children=1&adr=99.5&market_segment=Offline+TA%2FTO\
                    &deposit_type=Non+Refund&country=GBR&debug=on";
        let form: ReservationForm = serde_urlencoded::from_str(body).unwrap();
        assert_eq!(form.lead_time, 120);
        assert_eq!(form.total_guests(), 3);
        assert_eq!(form.adr, 99.5);
        assert_eq!(form.market_segment, MarketSegment::OfflineTaTo);
        assert_eq!(form.deposit_type, DepositType::NonRefund);
        assert_eq!(form.country, "GBR");
    }

    #[test]
    fn test_blank_numeric_inputs_fall_back_to_defaults() {
        let form =
            ReservationForm::from_urlencoded(b"lead_time=30&children=&adr=+&adults=2&country=")
                .unwrap();
        assert_eq!(form.lead_time, 30);
        assert_eq!(form.children, 0);
        assert_eq!(form.adr, 0.0);
        assert_eq!(form.adults, 2);
        assert_eq!(form.country, "");
    }

    #[test]
    fn test_from_urlencoded_reports_bad_values() {
        let err = ReservationForm::from_urlencoded(b"adults=two").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(ReservationForm::from_urlencoded(b"meal=XX").is_err());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result = ReservationForm::from_urlencoded(b"reserved_room_type=Z");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
