use std::fmt::Write;

use super::{
    Choice, IntRange, ReservationForm, ADR_MAX, ADR_MIN, BOOKING_CHANGES, DAYS_IN_WAITING_LIST,
    GUESTS, LEAD_TIME, PARKING_SPACES, PREVIOUS_BOOKINGS, SPECIAL_REQUESTS, WEEKEND_NIGHTS,
    WEEK_NIGHTS,
};

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn number_input(out: &mut String, name: &str, label: &str, value: u32, range: IntRange) {
    let _ = write!(
        out,
        r#"<label for="{name}">{label}</label>
<input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="1" value="{value}" required>
"#,
        min = range.min,
        max = range.max,
    );
}

fn select_input<C: Choice>(out: &mut String, name: &str, label: &str, selected: C) {
    let _ = writeln!(out, r#"<label for="{name}">{label}</label>"#);
    let _ = writeln!(out, r#"<select id="{name}" name="{name}">"#);
    for option in C::ALL {
        let value = escape_html(option.as_str());
        let marker = if *option == selected { " selected" } else { "" };
        let _ = writeln!(out, r#"<option value="{value}"{marker}>{value}</option>"#);
    }
    out.push_str("</select>\n");
}

/// Renders the reservation inputs, pre-filled with `form`.
pub fn render_inputs(form: &ReservationForm) -> String {
    let mut out = String::new();

    out.push_str("<div class=\"columns\">\n<div class=\"column\">\n<h4>Stay &amp; Guest Information</h4>\n");
    number_input(&mut out, "lead_time", "Lead Time (Days)", form.lead_time, LEAD_TIME);
    number_input(
        &mut out,
        "stays_in_weekend_nights",
        "Weekend Nights",
        form.stays_in_weekend_nights,
        WEEKEND_NIGHTS,
    );
    number_input(
        &mut out,
        "stays_in_week_nights",
        "Weekday Nights",
        form.stays_in_week_nights,
        WEEK_NIGHTS,
    );
    number_input(&mut out, "adults", "Adults", form.adults, GUESTS);
    number_input(&mut out, "children", "Children", form.children, GUESTS);
    number_input(&mut out, "babies", "Babies", form.babies, GUESTS);
    let _ = writeln!(
        out,
        r#"<p class="derived">Total guests: {} &middot; Total nights: {}</p>"#,
        form.total_guests(),
        form.total_stay_nights()
    );

    out.push_str("<h4>Guest History</h4>\n");
    let repeated = form.is_repeated_guest == 1;
    let _ = writeln!(
        out,
        r#"<label for="is_repeated_guest">Repeated Guest</label>
<select id="is_repeated_guest" name="is_repeated_guest">
<option value="0"{no}>No</option>
<option value="1"{yes}>Yes</option>
</select>"#,
        no = if repeated { "" } else { " selected" },
        yes = if repeated { " selected" } else { "" },
    );
    number_input(
        &mut out,
        "previous_cancellations",
        "Previous Cancellations",
        form.previous_cancellations,
        PREVIOUS_BOOKINGS,
    );
    number_input(
        &mut out,
        "previous_bookings_not_canceled",
        "Previous Bookings Not Canceled",
        form.previous_bookings_not_canceled,
        PREVIOUS_BOOKINGS,
    );

    out.push_str("</div>\n<div class=\"column\">\n<h4>Booking Details</h4>\n");
    let _ = write!(
        out,
        r#"<label for="adr">Average Daily Rate (ADR)</label>
<input type="number" id="adr" name="adr" min="{ADR_MIN}" max="{ADR_MAX}" step="0.01" value="{:.2}" required>
"#,
        form.adr
    );
    number_input(
        &mut out,
        "required_car_parking_spaces",
        "Required Parking Spaces",
        form.required_car_parking_spaces,
        PARKING_SPACES,
    );
    number_input(
        &mut out,
        "total_of_special_requests",
        "Special Requests",
        form.total_of_special_requests,
        SPECIAL_REQUESTS,
    );
    number_input(
        &mut out,
        "booking_changes",
        "Booking Changes",
        form.booking_changes,
        BOOKING_CHANGES,
    );
    number_input(
        &mut out,
        "days_in_waiting_list",
        "Days in Waiting List",
        form.days_in_waiting_list,
        DAYS_IN_WAITING_LIST,
    );
    out.push_str("</div>\n</div>\n");

    out.push_str("<div class=\"columns\">\n<div class=\"column\">\n");
    select_input(&mut out, "hotel", "Hotel Type", form.hotel);
    select_input(&mut out, "meal", "Meal Plan", form.meal);
    select_input(&mut out, "market_segment", "Market Segment", form.market_segment);
    select_input(
        &mut out,
        "distribution_channel",
        "Distribution Channel",
        form.distribution_channel,
    );
    out.push_str("</div>\n<div class=\"column\">\n");
    select_input(
        &mut out,
        "reserved_room_type",
        "Reserved Room Type",
        form.reserved_room_type,
    );
    select_input(&mut out, "deposit_type", "Deposit Type", form.deposit_type);
    select_input(&mut out, "customer_type", "Customer Type", form.customer_type);
    let _ = write!(
        out,
        r#"<label for="country">Country Code</label>
<input type="text" id="country" name="country" value="{}">
"#,
        escape_html(&form.country)
    );
    out.push_str("</div>\n</div>\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{DepositType, MarketSegment};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"A&B"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_inputs_carry_domains_and_selection() {
        let form = ReservationForm {
            lead_time: 42,
            deposit_type: DepositType::NonRefund,
            market_segment: MarketSegment::OfflineTaTo,
            ..Default::default()
        };
        let html = render_inputs(&form);

        assert!(html.contains(r#"name="lead_time" min="0" max="500" step="1" value="42""#));
        assert!(html.contains(r#"name="days_in_waiting_list" min="0" max="200""#));
        assert!(html.contains(r#"step="1" value="0" required>"#));
        assert!(html.contains(r#"step="0.01" value="0.00" required>"#));
        assert!(html.contains(r#"<option value="Non Refund" selected>"#));
        assert!(html.contains(r#"<option value="Offline TA/TO" selected>"#));
        assert!(html.contains(r#"<option value="No Deposit">"#));
        assert!(html.contains(r#"value="USA""#));
    }

    #[test]
    fn test_country_is_escaped() {
        let form = ReservationForm {
            country: r#""><script>"#.to_string(),
            ..Default::default()
        };
        let html = render_inputs(&form);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }
}
