use chrono::{DateTime, Utc};

/// Table-friendly rendering of a review timestamp, e.g. "Jan 15 2024, 09:30".
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%b %d %Y, %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::time::fixed_now;

    #[test]
    fn formats_compactly() {
        assert_eq!(format_timestamp(fixed_now()), "Nov 14 2023, 22:13");
    }
}
