//! Word count: tokenizing, per-partition counting and cross-partition merge.
//!

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Occurrences of each lowercase word in one partition.
///
/// Ordered by word, so serializing the same counts always yields the same
/// bytes.
pub type WordCount = BTreeMap<String, u64>;

/// Yields every maximal run of ASCII letters in `text`, lowercased.
///
/// Digits, punctuation, whitespace and non-ASCII characters all separate
/// words and never end up inside one.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|s| !s.is_empty())
        .map(|word| word.to_ascii_lowercase())
}

pub fn count_words(text: &str) -> WordCount {
    let mut counts = WordCount::new();
    for word in tokenize(text) {
        *counts.entry(word).or_insert(0) += 1;
    }
    counts
}

/// A word whose total no longer fits in a `u64`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("total count of {word:?} overflows u64")]
pub struct CountOverflow {
    pub word: String,
}

/// Running totals across any number of [`WordCount`]s.
#[derive(Debug, Default, Clone)]
pub struct Aggregate {
    totals: HashMap<String, u64>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every count in `partial` to the totals. Adding the same
    /// partial twice counts it twice.
    ///
    /// Fails on the first total that would overflow. The aggregate is then
    /// only partially updated and should be dropped.
    pub fn add(&mut self, partial: WordCount) -> Result<(), CountOverflow> {
        for (word, count) in partial {
            let total = self.totals.get(&word).copied().unwrap_or(0);
            let Some(sum) = total.checked_add(count) else {
                return Err(CountOverflow { word });
            };
            self.totals.insert(word, sum);
        }
        Ok(())
    }

    /// Number of distinct words seen so far.
    pub fn unique_words(&self) -> usize {
        self.totals.len()
    }

    #[cfg(test)]
    fn get(&self, word: &str) -> Option<u64> {
        self.totals.get(word).copied()
    }

    /// Orders the totals by count, highest first. Equal counts are ordered
    /// alphabetically so the result never depends on input order.
    pub fn into_ranking(self) -> Ranking {
        let entries = self
            .totals
            .into_iter()
            .sorted_by(|(word_a, count_a), (word_b, count_b)| {
                count_b.cmp(count_a).then_with(|| word_a.cmp(word_b))
            })
            .collect();
        Ranking(entries)
    }
}

/// Final word totals in rank order.
///
/// Serializes as a JSON object whose keys appear in rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking(pub Vec<(String, u64)>);

impl Serialize for Ranking {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(word, count)| (word, count)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> WordCount {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn case_folds_and_strips_punctuation() {
        let wc = count_words("The cat sat. The CAT sat!");
        assert_eq!(wc, counts(&[("the", 2), ("cat", 2), ("sat", 2)]));
    }

    #[test]
    fn digits_and_symbols_separate_words() {
        let words: Vec<String> = tokenize("abc123def it's e-mail_x 42").collect();
        assert_eq!(words, vec!["abc", "def", "it", "s", "e", "mail", "x"]);
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        let words: Vec<String> = tokenize("café naïve Über").collect();
        assert_eq!(words, vec!["caf", "na", "ve", "ber"]);
    }

    #[test]
    fn empty_text_counts_nothing() {
        assert!(count_words("").is_empty());
        assert!(count_words("123 ... \n\t!").is_empty());
    }

    #[test]
    fn same_text_serializes_identically() {
        let text = "zebra apple Mango apple zebra";
        let first = serde_json::to_vec(&count_words(text)).unwrap();
        let second = serde_json::to_vec(&count_words(text)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, br#"{"apple":2,"mango":1,"zebra":2}"#);
    }

    #[test]
    fn aggregate_sums_every_contribution() {
        let first = counts(&[("a", 1), ("b", 2)]);
        let second = counts(&[("b", 3), ("c", 4)]);

        let mut agg = Aggregate::new();
        agg.add(first.clone()).unwrap();
        agg.add(second).unwrap();
        agg.add(first).unwrap();

        assert_eq!(agg.unique_words(), 3);
        assert_eq!(agg.get("a"), Some(2));
        assert_eq!(agg.get("b"), Some(7));
        assert_eq!(agg.get("c"), Some(4));
    }

    #[test]
    fn overflowing_total_is_refused() {
        let mut agg = Aggregate::new();
        agg.add(counts(&[("x", u64::MAX), ("y", 1)])).unwrap();

        let err = agg.add(counts(&[("x", 1)])).unwrap_err();

        assert_eq!(err.word, "x");
        assert_eq!(agg.get("x"), Some(u64::MAX));
    }

    #[test]
    fn ranking_breaks_ties_alphabetically() {
        let mut agg = Aggregate::new();
        agg.add(counts(&[("b", 5), ("a", 5), ("c", 7)])).unwrap();
        let ranking = agg.into_ranking();

        assert_eq!(
            ranking,
            Ranking(vec![
                ("c".to_string(), 7),
                ("a".to_string(), 5),
                ("b".to_string(), 5)
            ])
        );
        assert_eq!(
            serde_json::to_string(&ranking).unwrap(),
            r#"{"c":7,"a":5,"b":5}"#
        );
    }

    #[test]
    fn empty_ranking_is_an_empty_object() {
        let ranking = Aggregate::new().into_ranking();
        assert!(ranking.0.is_empty());
        assert_eq!(serde_json::to_string(&ranking).unwrap(), "{}");
    }
}
