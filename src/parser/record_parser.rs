use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime};
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};

use crate::config::SourceConfig;
use crate::domain::Record;

/// Extracts ranked entries from the hot list sections of an aggregator page
pub struct RecordParser {
    entry_selector: Selector,
    title_selector: Selector,
    rank_selector: Selector,
    heat_selector: Selector,
}

impl RecordParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            entry_selector: Self::compile("a[target='_blank']")?,
            title_selector: Self::compile(".t")?,
            rank_selector: Self::compile(".s")?,
            heat_selector: Self::compile(".e")?,
        })
    }

    /// Parse every configured source section of a snapshot.
    ///
    /// Output follows document order within a section and `sources` order
    /// across sections. A section missing from the page yields nothing.
    pub fn parse_snapshot(
        &self,
        html: &str,
        date: NaiveDate,
        time: NaiveTime,
        sources: &[SourceConfig],
    ) -> Vec<Record> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for source in sources {
            let parsed = self.parse_source(&document, source, date, time);
            info!("  → {}: {} entries", source.name, parsed.len());
            records.extend(parsed);
        }

        records
    }

    pub fn parse_source(
        &self,
        document: &Html,
        source: &SourceConfig,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Vec<Record> {
        let Some(section) = self.find_section(document, source) else {
            warn!("Section {} ({}) not found in snapshot", source.node_id, source.name);
            return Vec::new();
        };

        section
            .select(&self.entry_selector)
            .filter_map(|entry| self.parse_entry(entry, source, date, time))
            .collect()
    }

    // --- Construction Helpers ---

    fn compile(css: &str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| anyhow!("Failed to compile selector {}: {}", css, e))
    }

    fn find_section<'a>(&self, document: &'a Html, source: &SourceConfig) -> Option<ElementRef<'a>> {
        let selector = Selector::parse(&format!("#{}", source.node_id)).ok()?;
        document.select(&selector).next()
    }

    // --- Entry Extraction ---

    fn parse_entry(
        &self,
        entry: ElementRef,
        source: &SourceConfig,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Option<Record> {
        let href = entry.value().attr("href").unwrap_or_default();

        let Some(title) = self.child_text(entry, &self.title_selector).filter(|t| !t.is_empty()) else {
            debug!("Skipping entry without title in {}: {}", source.name, href);
            return None;
        };

        let Some(rank) = self.child_text(entry, &self.rank_selector).and_then(|s| Self::parse_rank(&s)) else {
            debug!("Skipping entry without rank in {}: {}", source.name, title);
            return None;
        };

        let raw_heat = self.child_text(entry, &self.heat_selector).unwrap_or_default();

        Some(Record::new(date, time, source.name, &title, rank, &raw_heat, href))
    }

    fn child_text(&self, entry: ElementRef, selector: &Selector) -> Option<String> {
        entry
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    fn parse_rank(text: &str) -> Option<u32> {
        text.parse::<u32>().ok().filter(|&rank| rank > 0)
    }
}
