pub mod cjk;
pub mod general;
pub mod positivity;

pub use cjk::CjkScorer;
pub use general::GeneralScorer;
pub use positivity::PositivityModel;

use crate::config::PipelineSettings;
use crate::domain::Tokens;
use crate::errors::PipelineError;

/// Polarity in `[-1, 1]` and content words for a piece of text.
pub trait TextScorer {
    fn polarity(&self, text: &str) -> f64;
    fn tokenize(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Cjk,
    General,
}

/// Any CJK Unified Ideograph selects the CJK path.
pub fn detect_script(text: &str) -> Script {
    if text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c)) {
        Script::Cjk
    } else {
        Script::General
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTitle {
    pub sentiment: f64,
    pub tokens: Tokens,
}

/// Scoring resources built once and shared by every title of every batch
pub struct ScoringContext {
    cjk: CjkScorer,
    general: GeneralScorer,
    short_title_chars: usize,
}

impl ScoringContext {
    pub fn new(settings: &PipelineSettings) -> Self {
        Self {
            cjk: CjkScorer::new(PositivityModel::seeded(), settings.min_cjk_token_chars),
            general: GeneralScorer::new(),
            short_title_chars: settings.short_title_chars,
        }
    }

    pub fn scorer_for(&self, script: Script) -> &dyn TextScorer {
        match script {
            Script::Cjk => &self.cjk,
            Script::General => &self.general,
        }
    }

    pub fn score(&self, title: &str) -> Result<ScoredTitle, PipelineError> {
        let scorer = self.scorer_for(detect_script(title));

        let polarity = scorer.polarity(title);
        if !polarity.is_finite() {
            return Err(PipelineError::UnscorableTitle(title.to_string()));
        }

        let tokens = if title.chars().count() <= self.short_title_chars {
            Tokens::Raw(title.to_string())
        } else {
            Tokens::Words(scorer.tokenize(title))
        };

        Ok(ScoredTitle {
            sentiment: polarity.clamp(-1.0, 1.0),
            tokens,
        })
    }
}
