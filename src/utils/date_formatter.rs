use crate::data_types::{DateSpec, Era, Precision, Record};
use chrono::NaiveDate;

/// Formats a date for labels and tooltips ("c. 481", "52 BCE", "1780s", "14 July 1789").
pub fn format_date(date: &DateSpec) -> String {
    let magnitude = date.year.saturating_abs();
    let body = match date.precision {
        Precision::Decade => format!("{}s", magnitude - magnitude % 10),
        Precision::Century => {
            let century = (magnitude - 1).max(0) / 100 + 1;
            format!("{}{} c.", century, ordinal_suffix(century))
        }
        Precision::Exact => format_exact(date).unwrap_or_else(|| magnitude.to_string()),
        Precision::Year => magnitude.to_string(),
    };
    let mut out = String::new();
    if date.circa {
        out.push_str("c. ");
    }
    out.push_str(&body);
    if date.era == Era::Bce && magnitude != 0 {
        out.push_str(" BCE");
    }
    out
}

fn format_exact(date: &DateSpec) -> Option<String> {
    let month = date.month?;
    // chrono counts years proleptically; only the month/day names are taken from it.
    let parsed = NaiveDate::from_ymd_opt(2000, month, date.day.unwrap_or(1))?;
    let magnitude = date.year.saturating_abs();
    Some(match date.day {
        Some(_) => format!("{} {}", parsed.format("%-d %B"), magnitude),
        None => format!("{} {}", parsed.format("%B"), magnitude),
    })
}

fn ordinal_suffix(n: i32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Formats the date range of a record ("481 – 751", "c. 732").
pub fn format_record_dates(record: &Record) -> String {
    match &record.date_end {
        Some(end) if end.ordering_year() != record.ordering_year() => {
            format!("{} – {}", format_date(&record.date_start), format_date(end))
        }
        _ => format_date(&record.date_start),
    }
}

/// Text shown next to a record's glyph: the title followed by its start year.
pub fn record_label(record: &Record) -> String {
    format!("{} ({})", record.title, format_date(&record.date_start))
}

/// Formats a signed ordering year for the time axis.
pub fn format_axis_year(year: i64) -> String {
    if year < 0 {
        format!("{} BCE", -year)
    } else {
        year.to_string()
    }
}
