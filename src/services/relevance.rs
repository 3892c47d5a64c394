use log::debug;
use regex::Regex;
use std::collections::HashSet;

/// Keyword gate that decides whether a question mentions the dataset at all
/// before any completion-API call is made. A question passes when it shares
/// at least one word with the column names.
#[derive(Clone, Debug)]
pub struct RelevanceFilter {
    word_pattern: Regex,
}

impl RelevanceFilter {
    pub fn new() -> Self {
        Self {
            word_pattern: Regex::new(r"\w+").expect("word pattern must compile"),
        }
    }

    /// Maximal runs of word characters, lowercased. "Miles/Gallon" yields
    /// ["miles", "gallon"] while "weight_kg" stays a single token.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word_pattern
            .find_iter(&lowered)
            .map(|word| word.as_str().to_string())
            .collect()
    }

    pub fn is_relevant(&self, column_names: &[String], user_query: &str) -> bool {
        let column_words: HashSet<String> = column_names
            .iter()
            .flat_map(|name| self.tokenize(name))
            .collect();
        debug!("Column name words: {:?}", column_words);

        let query_tokens = self.tokenize(user_query);
        debug!("Query tokens: {:?}", query_tokens);

        let relevant = query_tokens
            .iter()
            .any(|token| column_words.contains(token));
        debug!("Query matches a column word: {}", relevant);

        relevant
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new()
    }
}
