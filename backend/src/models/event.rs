//! Sales events and the derived event table.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Draw identifier, the grouping key of a sales period.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DrawNo(pub i64);

impl DrawNo {
    pub fn new(value: i64) -> Self {
        DrawNo(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DrawNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DrawNo {
    fn from(value: i64) -> Self {
        DrawNo(value)
    }
}

/// One customer transaction.
///
/// Calendar features are derived from `datetime` when the event is built and
/// cannot be set independently of it. A row exported without a customer id
/// is kept but does not count as a sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    datetime: NaiveDateTime,
    customer_id: Option<String>,
    draw_no: DrawNo,
    date: NaiveDate,
    time: NaiveTime,
    weekday: Weekday,
}

impl Event {
    pub fn new(datetime: NaiveDateTime, customer_id: impl Into<String>, draw_no: DrawNo) -> Self {
        Self::with_customer(datetime, Some(customer_id.into()), draw_no)
    }

    /// Build an event whose customer id may be absent.
    pub fn with_customer(
        datetime: NaiveDateTime,
        customer_id: Option<String>,
        draw_no: DrawNo,
    ) -> Self {
        Self {
            datetime,
            customer_id,
            draw_no,
            date: datetime.date(),
            time: datetime.time(),
            weekday: datetime.weekday(),
        }
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn draw_no(&self) -> DrawNo {
        self.draw_no
    }

    /// Calendar date component.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Time-of-day component.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// English weekday name, e.g. `"Saturday"`.
    pub fn day_of_week(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    /// True iff the event happened on a Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday, Weekday::Sat | Weekday::Sun)
    }
}

/// Full English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Loaded and derived event log.
///
/// This is the unit that gets memoized: it is built once per source content
/// and only read afterwards.
#[derive(Debug, Clone)]
pub struct EventTable {
    events: Vec<Event>,
    draws: Vec<DrawNo>,
    checksum: String,
}

impl EventTable {
    /// Build a table from events in file order.
    pub fn new(events: Vec<Event>, checksum: impl Into<String>) -> Self {
        let mut draws: Vec<DrawNo> = Vec::new();
        for event in &events {
            if !draws.contains(&event.draw_no) {
                draws.push(event.draw_no);
            }
        }

        Self {
            events,
            draws,
            checksum: checksum.into(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Distinct draw numbers in the order they first appear in the log.
    pub fn draws(&self) -> &[DrawNo] {
        &self.draws
    }

    /// SHA-256 checksum of the source content the table was built from.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events belonging to one draw, in file order.
    pub fn events_for(&self, draw_no: DrawNo) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |e| e.draw_no == draw_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_event_derives_calendar_features() {
        // 2023-06-03 was a Saturday
        let event = Event::new(at("2023-06-03", "14:07:30"), "C1", DrawNo::new(1));

        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2023, 6, 3).unwrap());
        assert_eq!(event.time(), NaiveTime::from_hms_opt(14, 7, 30).unwrap());
        assert_eq!(event.day_of_week(), "Saturday");
        assert!(event.is_weekend());
    }

    #[test]
    fn test_weekday_is_not_weekend() {
        let friday = Event::new(at("2023-06-02", "09:00:00"), "C1", DrawNo::new(1));
        let sunday = Event::new(at("2023-06-04", "09:00:00"), "C1", DrawNo::new(1));

        assert_eq!(friday.day_of_week(), "Friday");
        assert!(!friday.is_weekend());
        assert_eq!(sunday.day_of_week(), "Sunday");
        assert!(sunday.is_weekend());
    }

    #[test]
    fn test_table_keeps_first_seen_draw_order() {
        let events = vec![
            Event::new(at("2023-06-03", "10:00:00"), "A", DrawNo::new(42)),
            Event::new(at("2023-06-03", "11:00:00"), "B", DrawNo::new(7)),
            Event::new(at("2023-06-03", "12:00:00"), "C", DrawNo::new(42)),
            Event::new(at("2023-06-03", "13:00:00"), "D", DrawNo::new(9)),
        ];
        let table = EventTable::new(events, "abc");

        assert_eq!(
            table.draws(),
            &[DrawNo::new(42), DrawNo::new(7), DrawNo::new(9)]
        );
        assert_eq!(table.events_for(DrawNo::new(42)).count(), 2);
        assert_eq!(table.len(), 4);
        assert_eq!(table.checksum(), "abc");
    }

    #[test]
    fn test_event_without_customer() {
        let event = Event::with_customer(at("2023-06-03", "10:00:00"), None, DrawNo::new(1));
        assert_eq!(event.customer_id(), None);
        assert!(event.is_weekend());

        let named = Event::new(at("2023-06-03", "10:00:00"), "C1", DrawNo::new(1));
        assert_eq!(named.customer_id(), Some("C1"));
    }

    #[test]
    fn test_draw_no_display() {
        assert_eq!(DrawNo::new(1203).to_string(), "1203");
        assert_eq!(DrawNo::from(5).value(), 5);
    }
}
