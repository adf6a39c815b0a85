//! Raw date parsing and display formatting shared by resume and blog code.

use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const DISPLAY: &[BorrowedFormatItem<'_>] = format_description!("[day] [month repr:long] [year]");
const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parse a raw stored date value: either an ISO-8601 calendar date
/// (`2021-03-05`) or a full RFC 3339 timestamp.
pub fn parse_raw(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if let Ok(date) = Date::parse(trimmed, &ISO_DATE) {
        return Some(date);
    }
    OffsetDateTime::parse(trimmed, &Rfc3339)
        .ok()
        .map(OffsetDateTime::date)
}

/// Render a date for display as `dd MonthName yyyy`, e.g. `05 March 2021`.
pub fn display(date: Date) -> String {
    date.format(&DISPLAY)
        .expect("const display format is well-formed")
}
