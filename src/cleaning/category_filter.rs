use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::Record;

pub struct CategoryFilter {
    pattern: Regex,
}

impl CategoryFilter {
    pub fn new(categories: &[&str]) -> Result<Self> {
        let alternatives = categories
            .iter()
            .map(|c| regex::escape(c))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!("(?i)({})", alternatives))
            .context("Failed to compile category denylist")?;

        Ok(Self { pattern })
    }

    pub fn is_denied(&self, title: &str) -> bool {
        self.pattern.is_match(title)
    }

    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        records.into_iter().filter(|r| !self.is_denied(&r.title)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CATEGORY_DENYLIST;
    use chrono::{NaiveDate, NaiveTime};

    fn record(title: &str) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            "微博",
            title,
            1,
            "1万",
            "",
        )
    }

    #[test]
    fn test_denied_titles() {
        let filter = CategoryFilter::new(CATEGORY_DENYLIST).unwrap();

        assert!(filter.is_denied("暑期电影票房破纪录"));
        assert!(filter.is_denied("新综艺今晚开播"));
        assert!(filter.is_denied("年度游戏大奖揭晓"));
        assert!(filter.is_denied("New MOVIE trailer released"));
        assert!(!filter.is_denied("央行宣布降准"));
        assert!(!filter.is_denied("Markets rally on rate cut"));
    }

    #[test]
    fn test_apply_removes_whole_records() {
        let filter = CategoryFilter::new(CATEGORY_DENYLIST).unwrap();
        let records = vec![record("央行宣布降准"), record("新专辑发布"), record("高考成绩公布")];

        let kept = filter.apply(records);

        let titles: Vec<&str> = kept.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["央行宣布降准", "高考成绩公布"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = CategoryFilter::new(CATEGORY_DENYLIST).unwrap();
        let records = vec![record("央行宣布降准"), record("动画电影定档"), record("地铁新线开通")];

        let once = filter.apply(records);
        let twice = filter.apply(once.clone());

        assert_eq!(once, twice);
    }
}
