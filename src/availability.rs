//! Expansion of booked ranges into the individual days they cover.

use chrono::NaiveDate;

/// Flatten inclusive `(start, end)` ranges into every calendar day they cover.
///
/// Ranges are expanded in input order and concatenated. Overlapping ranges
/// yield the shared days once per range. A range with `start > end` covers
/// no days.
pub fn expand<I>(ranges: I) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = (NaiveDate, NaiveDate)>,
{
    let mut days = Vec::new();
    for (start, end) in ranges {
        days.extend(start.iter_days().take_while(|day| *day <= end));
    }
    days
}
