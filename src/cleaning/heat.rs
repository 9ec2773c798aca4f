use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::Record;

/// Parses scraped heat text ("12.3万", "532 万热度", "850") into an integer.
pub struct HeatNormalizer {
    number: Regex,
    unit: Regex,
    multiplier: f64,
}

impl HeatNormalizer {
    pub fn new(multiplier: f64) -> Result<Self> {
        Ok(Self {
            number: Regex::new(r"(\d+(\.\d+)?)").context("Failed to compile heat number regex")?,
            unit: Regex::new(r"\s*万\s*(热度)?").context("Failed to compile heat unit regex")?,
            multiplier,
        })
    }

    /// First numeric token, scaled when a 万 marker is present, truncated.
    /// `None` when the text has no digits.
    pub fn parse(&self, text: &str) -> Option<i64> {
        let captures = self.number.captures(text)?;
        let value: f64 = captures.get(1)?.as_str().parse().ok()?;

        let scaled = if self.unit.is_match(text) {
            value * self.multiplier
        } else {
            value
        };

        Some(scaled as i64)
    }

    pub fn apply(&self, records: &mut [Record]) {
        for record in records.iter_mut() {
            record.heat = self.parse(&record.raw_heat);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn normalizer() -> HeatNormalizer {
        HeatNormalizer::new(10_000.0).unwrap()
    }

    #[test]
    fn test_decimal_with_unit() {
        assert_eq!(normalizer().parse("12.3万"), Some(123_000));
        assert_eq!(normalizer().parse("1.5万"), Some(15_000));
    }

    #[test]
    fn test_unit_with_spacing_and_qualifier() {
        assert_eq!(normalizer().parse("532 万热度"), Some(5_320_000));
        assert_eq!(normalizer().parse("5万 热度"), Some(50_000));
    }

    #[test]
    fn test_unitless_count() {
        assert_eq!(normalizer().parse("850"), Some(850));
        assert_eq!(normalizer().parse("850 热度"), Some(850));
    }

    #[test]
    fn test_no_number_is_missing() {
        assert_eq!(normalizer().parse("abc"), None);
        assert_eq!(normalizer().parse(""), None);
        assert_eq!(normalizer().parse("万"), None);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let n = normalizer();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let mut records = vec![
            Record::new(date, time, "微博", "a", 1, "5万", ""),
            Record::new(date, time, "微博", "b", 2, "", ""),
            Record::new(date, time, "微博", "c", 3, "1万", ""),
        ];

        n.apply(&mut records);
        let once = records.clone();
        n.apply(&mut records);

        assert_eq!(once, records);
        assert_eq!(
            records.iter().map(|r| r.heat).collect::<Vec<_>>(),
            vec![Some(50_000), None, Some(10_000)]
        );
    }
}
