//! Tracking id generation.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Prefix carried by every generated tracking id.
pub const TRACKING_PREFIX: &str = "TRK";

const SUFFIX_LEN: usize = 6;

/// Generate a tracking id such as `TRK-261018-7QK2ZD`.
pub fn generate_tracking_id(now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("{}-{}-{}", TRACKING_PREFIX, now.format("%y%m%d"), suffix)
}

/// Generate a tracking id not accepted by `taken`.
pub fn generate_unique(now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = generate_tracking_id(now);
        if !taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tracking_id_shape() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let id = generate_tracking_id(now);

        assert!(id.starts_with("TRK-261018-"));
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_unique_skips_taken_ids() {
        use std::cell::Cell;

        let now = Utc::now();
        let calls = Cell::new(0);
        let id = generate_unique(now, |_| {
            calls.set(calls.get() + 1);
            calls.get() < 3
        });

        assert_eq!(calls.get(), 3);
        assert!(id.starts_with(TRACKING_PREFIX));
    }
}
