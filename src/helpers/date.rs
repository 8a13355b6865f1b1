//! Date helper functions

use chrono::NaiveDate;

/// Format a `YYYY-MM-DD` date as an RFC 822 timestamp at UTC midnight,
/// the form feed readers expect in `<pubDate>`.
///
/// Returns `None` when the string is not a real calendar date.
///
/// # Examples
/// ```
/// use folio_rs::helpers::rfc822_date;
/// assert_eq!(rfc822_date("2024-01-15").as_deref(), Some("Mon, 15 Jan 2024 00:00:00 GMT"));
/// ```
pub fn rfc822_date(date: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let midnight = day.and_hms_opt(0, 0, 0)?;
    Some(midnight.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc822_date() {
        assert_eq!(
            rfc822_date("2023-12-31").as_deref(),
            Some("Sun, 31 Dec 2023 00:00:00 GMT")
        );
    }

    #[test]
    fn test_rfc822_date_rejects_impossible_dates() {
        assert_eq!(rfc822_date("2024-02-30"), None);
        assert_eq!(rfc822_date("2024-13-01"), None);
    }
}
