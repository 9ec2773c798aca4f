use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use log::{debug, info, warn};
use reqwest::Url;

use crate::config::AppConfig;
use crate::database::{self, records, DbPool};
use crate::domain::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct DigestItem {
    pub title: String,
    pub link: String,
}

/// Renders the day's top headlines into the HTML body a notifier sends
pub struct DigestService {
    pool: DbPool,
    base_url: Url,
    limit: usize,
}

impl DigestService {
    pub fn new(config: &AppConfig, limit: Option<usize>) -> Result<Self> {
        let pool = database::create_pool(&config.database_path)?;
        Self::with_pool(pool, config.scraper.url, limit.unwrap_or(config.output.digest_size))
    }

    pub fn with_pool(pool: DbPool, base_url: &str, limit: usize) -> Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        Ok(Self { pool, base_url, limit })
    }

    pub fn build(&self) -> Result<Vec<DigestItem>> {
        let mut conn = database::get_connection(&self.pool)?;
        database::setup::ensure_schema(&mut conn)?;

        let Some(date) = records::latest_date(&mut conn)? else {
            return Ok(Vec::new());
        };

        let day = records::list_by_date(&mut conn, date)?;
        info!("  → {} records stored for {}", day.len(), date);
        Ok(select_items(day, self.limit, &self.base_url))
    }

    pub fn run(&self, output: &Path) -> Result<PathBuf> {
        info!("=== Building Digest ===\n");

        let items = self.build()?;
        if items.is_empty() {
            warn!("No scored records found, digest will be empty");
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let body = render_digest(&items, Local::now().time());
        fs::write(output, body).with_context(|| format!("Failed to write {}", output.display()))?;

        info!("=== Digest Complete: {} items in {} ===", items.len(), output.display());
        Ok(output.to_path_buf())
    }
}

/// Hottest distinct titles first; a repeated title keeps its hottest entry.
pub fn select_items(mut day: Vec<Record>, limit: usize, base_url: &Url) -> Vec<DigestItem> {
    day.sort_by(|a, b| {
        b.heat
            .cmp(&a.heat)
            .then_with(|| a.rank.cmp(&b.rank))
            .then_with(|| a.source.cmp(&b.source))
    });

    let mut seen = HashSet::new();
    day.into_iter()
        .filter(|r| seen.insert(r.title.clone()))
        .take(limit)
        .map(|r| DigestItem {
            link: resolve_link(base_url, &r.link),
            title: r.title,
        })
        .collect()
}

/// Absolute URL for a scraped `href`; one that cannot be joined is kept as is.
pub fn resolve_link(base_url: &Url, link: &str) -> String {
    match base_url.join(link) {
        Ok(url) => url.to_string(),
        Err(e) => {
            debug!("Keeping unresolvable link {}: {}", link, e);
            link.to_string()
        }
    }
}

pub fn render_digest(items: &[DigestItem], now: NaiveTime) -> String {
    let mut body = format!(
        "现在是北京时间{}<br>\n早上好，一起来关注今日要闻吧:<br>\n",
        now.format("%H:%M")
    );

    for item in items {
        body.push_str(&format!(
            "<p><a href=\"{}\">{}</a></p>\n",
            html_escape::encode_double_quoted_attribute(&item.link),
            html_escape::encode_text(&item.title)
        ));
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, setup};
    use crate::domain::Tokens;
    use chrono::NaiveDate;

    const BASE: &str = "https://tophub.today/";

    fn base() -> Url {
        Url::parse(BASE).unwrap()
    }

    fn scored(day: u32, source: &str, title: &str, rank: u32, heat: i64, link: &str) -> Record {
        let mut r = Record::new(
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            source,
            title,
            rank,
            "",
            link,
        );
        r.heat = Some(heat);
        r.sentiment = Some(0.0);
        r.weighted_sentiment = Some(0.0);
        r.tokens = Some(Tokens::Raw(title.to_string()));
        r
    }

    #[test]
    fn test_select_orders_by_heat_and_dedups() {
        let day = vec![
            scored(2, "微博", "台风登陆", 2, 300, "/l?e=1"),
            scored(2, "知乎", "台风登陆", 1, 900, "/l?e=2"),
            scored(2, "微博", "地铁开通", 1, 500, "/l?e=3"),
            scored(2, "微博", "新品发布", 3, 100, "/l?e=4"),
        ];

        let items = select_items(day, 2, &base());

        assert_eq!(
            items,
            vec![
                DigestItem { title: "台风登陆".to_string(), link: "https://tophub.today/l?e=2".to_string() },
                DigestItem { title: "地铁开通".to_string(), link: "https://tophub.today/l?e=3".to_string() },
            ]
        );
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(resolve_link(&base(), "/l?e=1"), "https://tophub.today/l?e=1");
        let bare = Url::parse("https://tophub.today").unwrap();
        assert_eq!(resolve_link(&bare, "l?e=1"), "https://tophub.today/l?e=1");
        assert_eq!(resolve_link(&base(), "https://weibo.com/x"), "https://weibo.com/x");
        assert_eq!(resolve_link(&base(), ""), "https://tophub.today/");
    }

    #[test]
    fn test_resolve_link_scheme_relative_and_case() {
        assert_eq!(
            resolve_link(&base(), "//s.weibo.com/weibo?q=x"),
            "https://s.weibo.com/weibo?q=x"
        );
        assert_eq!(resolve_link(&base(), "HTTPS://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let pool = create_memory_pool().unwrap();
        assert!(DigestService::with_pool(pool, "not a url", 20).is_err());
    }

    #[test]
    fn test_render_escapes_markup() {
        let items = vec![DigestItem {
            title: "<b>A&B</b>".to_string(),
            link: "https://x.test/?a=1&b=\"2\"".to_string(),
        }];

        let html = render_digest(&items, NaiveTime::from_hms_opt(7, 5, 0).unwrap());

        assert!(html.starts_with("现在是北京时间07:05<br>"));
        assert!(html.contains(
            "<p><a href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\">&lt;b&gt;A&amp;B&lt;/b&gt;</a></p>"
        ));
    }

    #[test]
    fn test_build_uses_latest_date_only() {
        let pool = create_memory_pool().unwrap();
        {
            let mut conn = get_connection(&pool).unwrap();
            setup::ensure_schema(&mut conn).unwrap();
            let stored = vec![
                scored(1, "微博", "昨日旧闻", 1, 9_000, "/l?e=9"),
                scored(2, "微博", "今日要闻", 1, 100, "/l?e=1"),
            ];
            records::insert_records(&mut conn, &stored).unwrap();
        }

        let items = DigestService::with_pool(pool, BASE, 20).unwrap().build().unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "今日要闻");
    }
}
