use std::collections::HashSet;

use kotoba_core::Result;

use crate::rules::{RuleSet, WordType};

/// Default cap on how many rules may be chained onto one word
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// One possible dictionary form of a word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Deinflection {
    pub word: String,
    /// Rules applied to reach `word`, innermost first, e.g. `causative < polite`.
    /// Empty for the word as given.
    pub reason: String,
    pub word_type: WordType,
}

impl Deinflection {
    /// The word as given, matching any word type.
    pub fn identity(word: &str) -> Self {
        Self {
            word: word.to_string(),
            reason: String::new(),
            word_type: WordType::all(),
        }
    }

    pub fn is_inflected(&self) -> bool {
        !self.reason.is_empty()
    }
}

pub struct JapaneseDeinflector {
    rules: RuleSet,
    max_depth: usize,
}

impl JapaneseDeinflector {
    pub fn new(rules: RuleSet, max_depth: usize) -> Self {
        Self { rules, max_depth }
    }

    /// Deinflector over the rules bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(RuleSet::bundled()?, DEFAULT_MAX_DEPTH))
    }

    /// Every form `word` could have been inflected from, the word itself first.
    ///
    /// Candidates are produced breadth-first, so less transformed forms come
    /// earlier. The same word may appear more than once when different rule
    /// chains reach it.
    pub fn deinflect(&self, word: &str) -> Vec<Deinflection> {
        let mut results = vec![Deinflection::identity(word)];
        let mut depths = vec![0];
        let mut seen: HashSet<Deinflection> = results.iter().cloned().collect();

        let mut i = 0;
        while i < results.len() {
            if depths[i] >= self.max_depth {
                i += 1;
                continue;
            }

            let current = results[i].clone();
            for rule in self.rules.candidates_for(current.word.chars().count()) {
                if !current.word_type.intersects(rule.input) || !current.word.ends_with(&rule.from)
                {
                    continue;
                }

                let stem = &current.word[..current.word.len() - rule.from.len()];
                let word = format!("{stem}{}", rule.to);
                if word.is_empty() || word == current.word {
                    continue;
                }

                let label = self.rules.reason(rule.reason);
                let reason = if current.reason.is_empty() {
                    label.to_string()
                } else {
                    format!("{label} < {}", current.reason)
                };

                let candidate = Deinflection {
                    word,
                    reason,
                    word_type: rule.output,
                };
                if seen.insert(candidate.clone()) {
                    results.push(candidate);
                    depths.push(depths[i] + 1);
                }
            }
            i += 1;
        }

        tracing::trace!("Deinflected {word} into {} candidates", results.len());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deinflector() -> JapaneseDeinflector {
        JapaneseDeinflector::bundled().unwrap()
    }

    fn find<'a>(results: &'a [Deinflection], word: &str, reason: &str) -> Option<&'a Deinflection> {
        results.iter().find(|d| d.word == word && d.reason == reason)
    }

    #[test]
    fn identity_comes_first() {
        let results = deinflector().deinflect("食べました");
        assert_eq!(results[0].word, "食べました");
        assert_eq!(results[0].reason, "");
        assert_eq!(results[0].word_type, WordType::all());
        assert!(!results[0].is_inflected());
    }

    #[test]
    fn empty_input_yields_only_identity() {
        let results = deinflector().deinflect("");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word, "");
    }

    #[test]
    fn copula_deinflects() {
        let results = deinflector().deinflect("です");
        let copula = find(&results, "だ", "polite").unwrap();
        assert_eq!(copula.word_type, WordType::COPULA);
    }

    #[test]
    fn never_produces_empty_words() {
        let d = deinflector();
        for word in ["な", "た", "ます", "です", "く", "る", "い", "ない", "さ"] {
            let results = d.deinflect(word);
            assert!(results.iter().all(|r| !r.word.is_empty()), "{word}");
        }
    }

    #[test]
    fn chains_read_innermost_first() {
        let results = deinflector().deinflect("食べさせられました");
        let base = find(&results, "食べる", "causative < potential or passive < polite past")
            .unwrap();
        assert_eq!(base.word_type, WordType::ICHIDAN);
        assert!(find(&results, "食べる", "causative passive < polite past").is_some());
    }

    #[test]
    fn godan_past() {
        let results = deinflector().deinflect("読んだ");
        let base = find(&results, "読む", "past").unwrap();
        assert_eq!(base.word_type, WordType::GODAN);
    }

    #[test]
    fn adjective_negative_past() {
        let results = deinflector().deinflect("高くなかった");
        let base = find(&results, "高い", "negative < past").unwrap();
        assert_eq!(base.word_type, WordType::I_ADJECTIVE);
    }

    #[test]
    fn irregular_verbs() {
        let d = deinflector();
        assert!(find(&d.deinflect("来ない"), "来る", "negative").is_some());
        assert!(find(&d.deinflect("きました"), "くる", "polite past").is_some());
        assert!(find(&d.deinflect("愛しています"), "愛する", "continuous < polite").is_some());
        assert!(find(&d.deinflect("行った"), "行く", "past").is_some());
    }

    #[test]
    fn copula_candidates_are_not_reinflected() {
        let results = deinflector().deinflect("ぼんです");
        let copula: Vec<_> = results.iter().filter(|d| d.word == "ぼんだ").collect();
        assert_eq!(copula.len(), 1);
        assert_eq!(copula[0].word_type, WordType::COPULA);
        assert!(results.iter().all(|d| d.word != "ぼむ"));
    }

    #[test]
    fn same_word_may_come_from_several_chains() {
        let results = deinflector().deinflect("食べられる");
        let bases: Vec<_> = results.iter().filter(|d| d.word == "食べる").collect();
        assert!(bases.len() >= 2);
        assert!(bases
            .iter()
            .any(|d| d.reason == "potential or passive" && d.word_type == WordType::ICHIDAN));
        assert!(bases
            .iter()
            .any(|d| d.reason == "passive" && d.word_type == WordType::GODAN));
    }

    #[test]
    fn self_mapping_rules_are_ignored() {
        let rules = RuleSet::parse("header\nnoop\nる\tる\tinitial>v1\t0\n").unwrap();
        let results = JapaneseDeinflector::new(rules, DEFAULT_MAX_DEPTH).deinflect("見る");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn depth_cap_stops_cycles() {
        let rules = RuleSet::parse("header\nswap\nあ\tい\tv1>v1\t0\nい\tあ\tv1>v1\t0\n").unwrap();
        let results = JapaneseDeinflector::new(rules, 3).deinflect("あ");
        let words: Vec<&str> = results.iter().map(|d| d.word.as_str()).collect();
        assert_eq!(words, ["あ", "い", "あ", "い"]);
        assert_eq!(results[3].reason, "swap < swap < swap");
    }
}
