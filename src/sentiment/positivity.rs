use std::collections::BTreeMap;

use log::debug;

/// Tab separated `+`/`-` label and headline, one per line; `#` starts a comment
const LABELLED_HEADLINES: &str = include_str!("headlines.txt");

/// Longest character n-gram learned from labelled headlines
const TRAINING_GRAM_CHARS: usize = 2;

/// Seed observations: word, count in positive headlines, count in negative headlines
const SEED_COUNTS: &[(&str, u32, u32)] = &[
    // positive
    ("成功", 8, 1),
    ("圆满", 6, 0),
    ("庆祝", 5, 0),
    ("夺冠", 7, 0),
    ("冠军", 5, 0),
    ("胜利", 6, 0),
    ("突破", 6, 1),
    ("喜讯", 6, 0),
    ("点赞", 5, 0),
    ("好评", 5, 0),
    ("优秀", 5, 0),
    ("幸福", 6, 0),
    ("温暖", 5, 0),
    ("感动", 5, 0),
    ("开心", 5, 0),
    ("美好", 5, 0),
    ("丰收", 5, 0),
    ("增长", 4, 1),
    ("上涨", 4, 1),
    ("回暖", 4, 0),
    ("利好", 6, 0),
    ("创新", 4, 0),
    ("提升", 3, 0),
    ("助力", 3, 0),
    ("顺利", 5, 0),
    ("平安", 5, 0),
    ("获救", 5, 0),
    ("团圆", 5, 0),
    ("欢迎", 3, 0),
    ("支持", 3, 1),
    ("希望", 3, 1),
    ("创纪录", 4, 0),
    // negative
    ("事故", 0, 7),
    ("死亡", 0, 8),
    ("遇难", 0, 8),
    ("去世", 0, 6),
    ("逝世", 0, 5),
    ("失败", 1, 6),
    ("暴跌", 0, 7),
    ("下跌", 1, 4),
    ("爆炸", 0, 7),
    ("火灾", 0, 7),
    ("地震", 0, 5),
    ("洪水", 0, 5),
    ("暴雨", 0, 4),
    ("诈骗", 0, 7),
    ("违法", 0, 5),
    ("犯罪", 0, 6),
    ("被捕", 0, 5),
    ("丑闻", 0, 6),
    ("危机", 0, 6),
    ("冲突", 0, 5),
    ("袭击", 0, 7),
    ("战争", 0, 6),
    ("裁员", 0, 6),
    ("亏损", 0, 6),
    ("坍塌", 0, 6),
    ("受伤", 0, 5),
    ("伤亡", 0, 7),
    ("失踪", 0, 6),
    ("投诉", 0, 4),
    ("争议", 1, 4),
    ("质疑", 0, 4),
    ("造假", 0, 6),
    ("罚款", 0, 4),
    ("处罚", 0, 4),
    ("担忧", 0, 4),
    ("崩盘", 0, 7),
    ("悲剧", 0, 7),
    ("谣言", 0, 4),
    ("严重", 0, 4),
];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ClassCounts {
    positive: f64,
    negative: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Positive,
    Negative,
}

/// Two-class naive Bayes over lexicon words and character n-grams, with
/// add-one smoothing.
///
/// Every n-gram of the text up to the longest known feature is looked up,
/// so ordinary characters seen in the labelled headlines contribute
/// evidence even when no lexicon word is present. Text sharing no feature
/// with the vocabulary gets exactly the prior (0.5 with balanced priors).
#[derive(Debug, Clone)]
pub struct PositivityModel {
    vocabulary: BTreeMap<String, ClassCounts>,
    positive_total: f64,
    negative_total: f64,
    prior_positive: f64,
    longest_feature: usize,
}

impl PositivityModel {
    pub fn new() -> Self {
        Self {
            vocabulary: BTreeMap::new(),
            positive_total: 0.0,
            negative_total: 0.0,
            prior_positive: 0.5,
            longest_feature: 0,
        }
    }

    /// Model built from the bundled lexicon counts and labelled headlines.
    pub fn seeded() -> Self {
        let mut model = Self::new();
        for &(word, positive, negative) in SEED_COUNTS {
            model.add(word, positive, negative);
        }
        let trained = model.train_corpus(LABELLED_HEADLINES);
        debug!("Positivity model: {} headlines, {} features", trained, model.len());
        model
    }

    pub fn add(&mut self, word: &str, positive: u32, negative: u32) {
        let entry = self.vocabulary.entry(word.to_string()).or_default();
        entry.positive += positive as f64;
        entry.negative += negative as f64;
        self.positive_total += positive as f64;
        self.negative_total += negative as f64;
        self.longest_feature = self.longest_feature.max(word.chars().count());
    }

    /// Count every character unigram and bigram of `text` under `label`.
    pub fn train(&mut self, text: &str, label: Label) {
        for gram in char_ngrams(text, TRAINING_GRAM_CHARS) {
            match label {
                Label::Positive => self.add(&gram, 1, 0),
                Label::Negative => self.add(&gram, 0, 1),
            }
        }
    }

    fn train_corpus(&mut self, corpus: &str) -> usize {
        let mut trained = 0;
        for line in corpus.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#')) {
            let (label, title) = match line.split_once('\t') {
                Some(("+", title)) => (Label::Positive, title),
                Some(("-", title)) => (Label::Negative, title),
                _ => {
                    debug!("Skipping unlabelled line: {}", line);
                    continue;
                }
            };
            self.train(title, label);
            trained += 1;
        }
        trained
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Posterior probability that `text` is positive, in `[0, 1]`.
    pub fn probability(&self, text: &str) -> f64 {
        let vocab_size = self.vocabulary.len() as f64;
        let mut log_odds = (self.prior_positive / (1.0 - self.prior_positive)).ln();

        for gram in char_ngrams(text, self.longest_feature) {
            let Some(counts) = self.vocabulary.get(&gram) else {
                continue;
            };

            let p_positive = (counts.positive + 1.0) / (self.positive_total + vocab_size);
            let p_negative = (counts.negative + 1.0) / (self.negative_total + vocab_size);
            log_odds += (p_positive / p_negative).ln();
        }

        1.0 / (1.0 + (-log_odds).exp())
    }
}

impl Default for PositivityModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlapping n-grams of 1..=`max_chars` letters and digits; punctuation and
/// whitespace are skipped.
fn char_ngrams(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().filter(|c| c.is_alphanumeric()).collect();

    (1..=max_chars)
        .flat_map(|n| chars.windows(n).map(|w| w.iter().collect::<String>()).collect::<Vec<_>>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_text_gets_prior() {
        let model = PositivityModel::seeded();
        assert_eq!(model.probability("xyz"), 0.5);
        assert_eq!(model.probability("，。！"), 0.5);
        assert_eq!(PositivityModel::new().probability("成功"), 0.5);
    }

    #[test]
    fn test_class_evidence() {
        let model = PositivityModel::seeded();

        assert!(model.probability("比赛圆满成功") > 0.5);
        assert!(model.probability("工厂爆炸致三人死亡") < 0.5);
    }

    #[test]
    fn test_repeated_evidence_strengthens() {
        let model = PositivityModel::seeded();
        assert!(model.probability("成功成功") > model.probability("成功"));
    }

    #[test]
    fn test_probability_is_bounded() {
        let model = PositivityModel::seeded();
        let extreme = "死亡".repeat(500);
        let p = model.probability(&extreme);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_add_accumulates() {
        let mut model = PositivityModel::new();
        model.add("好", 2, 0);
        model.add("好", 1, 0);
        model.add("坏", 0, 3);

        assert_eq!(model.len(), 2);
        assert!(model.probability("好") > 0.5);
    }

    #[test]
    fn test_headlines_without_lexicon_words_still_lean() {
        let model = PositivityModel::seeded();
        let headlines = [
            "中国女排3比0战胜日本",
            "这家餐厅太好吃了",
            "央行宣布降准释放流动性",
            "全国多地迎来降温",
            "年轻人为什么不爱存钱",
            "明星离婚引热议",
            "油价今晚下调",
            "小猫被困树上消防员出动救援",
        ];

        for headline in headlines {
            assert_ne!(model.probability(headline), 0.5, "{}", headline);
        }
        assert!(model.probability("这家餐厅太好吃了") > 0.5);
        assert!(model.probability("某地发生交通事故") < 0.5);
    }

    #[test]
    fn test_char_ngrams_skip_punctuation() {
        assert_eq!(char_ngrams("好，吃", 2), vec!["好", "吃", "好吃"]);
        assert!(char_ngrams("", 3).is_empty());
        assert!(char_ngrams("abc", 0).is_empty());
    }

    #[test]
    fn test_train_corpus_reads_labelled_lines() {
        let mut model = PositivityModel::new();

        let trained = model.train_corpus("# header\n+\t好消息\n\n-\t坏消息\nno label here\n");

        assert_eq!(trained, 2);
        assert!(model.probability("好") > 0.5);
        assert!(model.probability("坏") < 0.5);
        assert_eq!(model.probability("消息"), 0.5);
    }

    #[test]
    fn test_seeded_model_includes_labelled_headlines() {
        let model = PositivityModel::seeded();
        assert!(model.len() > SEED_COUNTS.len() * 10);
    }
}
