use jieba_rs::Jieba;

use super::positivity::PositivityModel;
use super::TextScorer;

/// Segmentation and positivity scoring for text containing CJK ideographs
pub struct CjkScorer {
    segmenter: Jieba,
    model: PositivityModel,
    min_token_chars: usize,
}

impl CjkScorer {
    pub fn new(model: PositivityModel, min_token_chars: usize) -> Self {
        Self {
            segmenter: Jieba::new(),
            model,
            min_token_chars,
        }
    }

    /// Drops every Unicode whitespace character, full-width spaces included.
    fn compact(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

impl TextScorer for CjkScorer {
    /// Positivity probability remapped from `[0, 1]` to `[-1, 1]`.
    fn polarity(&self, text: &str) -> f64 {
        let p = self.model.probability(&Self::compact(text));
        (p - 0.5) * 2.0
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let compact = Self::compact(text);
        self.segmenter
            .cut(&compact, true)
            .into_iter()
            .filter(|word| word.chars().count() >= self.min_token_chars)
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_without_known_features_scores_zero() {
        let scorer = CjkScorer::new(PositivityModel::seeded(), 2);
        assert_eq!(scorer.polarity("xyz"), 0.0);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let scorer = CjkScorer::new(PositivityModel::seeded(), 2);
        assert_eq!(scorer.polarity("比赛 圆满 成功"), scorer.polarity("比赛圆满成功"));
        assert_eq!(scorer.polarity("比赛\u{3000}圆满\t成功"), scorer.polarity("比赛圆满成功"));
        assert_eq!(CjkScorer::compact(" 降\u{3000}温\n"), "降温");
    }

    #[test]
    fn test_everyday_headlines_are_not_flat() {
        let scorer = CjkScorer::new(PositivityModel::seeded(), 2);
        let headlines = ["中国女排3比0战胜日本", "这家餐厅太好吃了", "油价今晚下调", "明星离婚引热议"];

        let zeros = headlines.iter().filter(|h| scorer.polarity(h) == 0.0).count();
        assert_eq!(zeros, 0);
    }
}
