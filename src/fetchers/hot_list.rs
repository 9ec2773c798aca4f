use anyhow::{Context, Result};
use log::{info, warn};
use scraper::{Html, Selector};

use crate::config::{ScraperSettings, SourceConfig};
use crate::errors::fetch_context;
use crate::http::PageClient;

/// Downloads the aggregator page that holds every hot list section
pub struct HotListFetcher {
    client: PageClient,
    url: String,
}

impl HotListFetcher {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = PageClient::new(settings.user_agent, settings.timeout_secs)?;
        Ok(Self {
            client,
            url: settings.url.to_string(),
        })
    }

    pub async fn fetch(&self, sources: &[SourceConfig]) -> Result<String> {
        info!("Fetching hot lists from {}", self.url);

        let html = self
            .client
            .get_text(&self.url)
            .await
            .with_context(|| fetch_context(&self.url))?;

        let missing = missing_sections(&html, sources);
        if !missing.is_empty() {
            warn!("Page is missing sections: {}", missing.join(", "));
        }

        info!("  → Fetched {} bytes", html.len());
        Ok(html)
    }
}

/// Display names of configured sources whose section is absent from `html`.
pub fn missing_sections(html: &str, sources: &[SourceConfig]) -> Vec<&'static str> {
    let document = Html::parse_document(html);

    sources
        .iter()
        .filter(|source| {
            Selector::parse(&format!("#{}", source.node_id))
                .map(|selector| document.select(&selector).next().is_none())
                .unwrap_or(true)
        })
        .map(|source| source.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections() {
        let html = r#"<html><body><div id="node-1"></div><div id="node-6"></div></body></html>"#;
        let sources = vec![
            SourceConfig::new("node-1", "微博"),
            SourceConfig::new("node-6", "知乎"),
            SourceConfig::new("node-221", "抖音"),
        ];

        assert_eq!(missing_sections(html, &sources), vec!["抖音"]);
    }
}
