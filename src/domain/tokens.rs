use serde::{Deserialize, Serialize};

/// Content words of a title.
///
/// Very short titles are kept whole as `Raw` instead of being segmented;
/// the distinction survives persistence (bare JSON string vs. array).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tokens {
    Raw(String),
    Words(Vec<String>),
}

impl Tokens {
    pub fn words(&self) -> Vec<&str> {
        match self {
            Tokens::Raw(text) => vec![text.as_str()],
            Tokens::Words(words) => words.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Tokens::Raw(_))
    }
}
