use vader_sentiment::SentimentIntensityAnalyzer;

use super::TextScorer;

/// Rule-based compound polarity for Latin-script and other non-CJK text
pub struct GeneralScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl GeneralScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for GeneralScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextScorer for GeneralScorer {
    fn polarity(&self, text: &str) -> f64 {
        let scores = self.analyzer.polarity_scores(text);
        scores.get("compound").copied().unwrap_or(0.0)
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }
}
