//! Deinflection rule data.
//!
//! Rule text layout:
//!
//! ```text
//! <header line>
//! # comment
//! polite past            <- reason 0 (any line without a tab)
//! past                   <- reason 1
//! ました<TAB>る<TAB>initial>v1<TAB>0
//! ```
//!
//! The third field lists the classes a word must have for the rule to fire
//! and, after `>`, the classes of the word it produces.

use bitflags::bitflags;
use kotoba_core::{LoadError, Result};

const BUNDLED_RULES: &str = include_str!("../data/deinflect.dat");

bitflags! {
    /// Conjugation classes a candidate word may belong to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WordType: u16 {
        /// Ichidan verb (v1)
        const ICHIDAN = 1;
        /// Godan verb (v5*)
        const GODAN = 1 << 1;
        /// I-adjective (adj-i)
        const I_ADJECTIVE = 1 << 2;
        /// Kuru verb (vk)
        const KURU = 1 << 3;
        /// Suru verb (vs-*)
        const SURU = 1 << 4;
        /// Copula (cop)
        const COPULA = 1 << 5;
        /// The word exactly as it appeared in the text
        const INITIAL = 1 << 6;
    }
}

impl WordType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "initial" => Some(Self::INITIAL),
            "v1" => Some(Self::ICHIDAN),
            "v5" => Some(Self::GODAN),
            "adj-i" => Some(Self::I_ADJECTIVE),
            "vk" => Some(Self::KURU),
            "vs" => Some(Self::SURU),
            "cop" => Some(Self::COPULA),
            _ => None,
        }
    }

    fn parse_tags(tags: &str) -> Result<Self> {
        tags.split('|').try_fold(Self::empty(), |acc, tag| {
            Self::from_tag(tag.trim())
                .map(|t| acc | t)
                .ok_or_else(|| LoadError::invalid_format(format!("unknown word type '{tag}'")))
        })
    }

    /// Whether a single dictionary part-of-speech tag (`v5k`, `adj-i`,
    /// `cop-da`, …) belongs to one of these classes.
    pub fn matches_pos(self, pos: &str) -> bool {
        let family = |base: &str| {
            pos.strip_prefix(base)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
        };
        (self.contains(Self::ICHIDAN) && family("v1"))
            || (self.contains(Self::GODAN) && pos.len() > 2 && pos.starts_with("v5"))
            || (self.contains(Self::I_ADJECTIVE) && matches!(pos, "adj-i" | "adj-ix"))
            || (self.contains(Self::KURU) && pos == "vk")
            || (self.contains(Self::SURU) && pos.len() > 3 && pos.starts_with("vs-"))
            || (self.contains(Self::COPULA) && family("cop"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub from: String,
    pub to: String,
    pub input: WordType,
    pub output: WordType,
    pub reason: usize,
}

#[derive(Debug, Clone)]
struct RuleGroup {
    from_len: usize,
    rules: Vec<Rule>,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    reasons: Vec<String>,
    groups: Vec<RuleGroup>,
}

impl RuleSet {
    /// Rules shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_RULES)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut reasons = Vec::new();
        let mut rules = Vec::new();

        for (lineno, line) in text.lines().enumerate().skip(1) {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            if !line.contains('\t') {
                reasons.push(line.trim().to_string());
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            let [from, to, types, reason] = fields[..] else {
                tracing::warn!(
                    "Skipping deinflection rule on line {}: expected 4 fields, found {}",
                    lineno + 1,
                    fields.len()
                );
                continue;
            };

            if from.is_empty() {
                return Err(LoadError::invalid_format(format!(
                    "line {}: rule has an empty inflected suffix",
                    lineno + 1
                )));
            }
            let (input, output) = types.split_once('>').ok_or_else(|| {
                LoadError::invalid_format(format!("line {}: bad word types '{types}'", lineno + 1))
            })?;
            let reason = reason
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&r| r < reasons.len())
                .ok_or_else(|| {
                    LoadError::invalid_format(format!(
                        "line {}: undeclared reason '{reason}'",
                        lineno + 1
                    ))
                })?;

            rules.push(Rule {
                from: from.to_string(),
                to: to.to_string(),
                input: WordType::parse_tags(input)?,
                output: WordType::parse_tags(output)?,
                reason,
            });
        }

        rules.sort_by_key(|r| std::cmp::Reverse(r.from.chars().count()));
        let mut groups: Vec<RuleGroup> = Vec::new();
        for rule in rules {
            match groups.last_mut() {
                Some(group) if group.from_len == rule.from.chars().count() => {
                    group.rules.push(rule)
                }
                _ => groups.push(RuleGroup {
                    from_len: rule.from.chars().count(),
                    rules: vec![rule],
                }),
            }
        }

        let this = Self { reasons, groups };
        tracing::debug!(
            "Parsed {} deinflection rules with {} reasons",
            this.len(),
            this.reasons.len()
        );
        Ok(this)
    }

    pub fn reason(&self, idx: usize) -> &str {
        self.reasons.get(idx).map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Rules whose suffix could fit in a word of `word_len` characters,
    /// longest suffix first.
    pub fn candidates_for(&self, word_len: usize) -> impl Iterator<Item = &Rule> {
        self.groups
            .iter()
            .filter(move |g| g.from_len <= word_len)
            .flat_map(|g| g.rules.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_rules_parse() {
        let rules = RuleSet::bundled().unwrap();
        assert!(rules.len() > 300);
        assert_eq!(rules.reason(0), "polite past negative");
        assert!(rules.candidates_for(usize::MAX).any(|r| r.from == "です"
            && r.to == "だ"
            && r.output == WordType::COPULA
            && rules.reason(r.reason) == "polite"));
    }

    #[test]
    fn longest_suffixes_come_first() {
        let rules = RuleSet::bundled().unwrap();
        let lens: Vec<usize> = rules
            .candidates_for(usize::MAX)
            .map(|r| r.from.chars().count())
            .collect();
        assert!(lens.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn short_words_skip_long_rules() {
        let rules = RuleSet::bundled().unwrap();
        assert!(rules.candidates_for(1).all(|r| r.from.chars().count() == 1));
    }

    #[test]
    fn groups_follow_character_length() {
        let rules = RuleSet::parse(
            "header\npast\nた\tる\tinitial>v1\t0\ned\te\tinitial>v1\t0\nました\tる\tinitial>v1\t0\nd\t\tinitial>v1\t0\n",
        )
        .unwrap();
        let lens: Vec<usize> = rules.groups.iter().map(|g| g.from_len).collect();
        assert_eq!(lens, [3, 2, 1]);
        assert_eq!(rules.groups[2].rules.len(), 2);

        let fits: Vec<&str> = rules.candidates_for(2).map(|r| r.from.as_str()).collect();
        assert_eq!(fits, ["ed", "た", "d"]);
    }

    #[test]
    fn parses_reasons_and_rules() {
        let rules = RuleSet::parse("header\npolite\n# comment\n\nます\tる\tinitial>v1|vk\t0\n").unwrap();
        assert_eq!(rules.len(), 1);
        let rule = rules.candidates_for(usize::MAX).next().unwrap();
        assert_eq!(rule.input, WordType::INITIAL);
        assert_eq!(rule.output, WordType::ICHIDAN | WordType::KURU);
        assert_eq!(rules.reason(rule.reason), "polite");
    }

    #[test]
    fn header_line_is_ignored() {
        let rules = RuleSet::parse("ます\tる\tinitial>v1\t0\npolite\n").unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn rejects_unknown_word_types() {
        let err = RuleSet::parse("header\npolite\nます\tる\tinitial>v9\t0\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)));
    }

    #[test]
    fn rejects_undeclared_reasons() {
        let err = RuleSet::parse("header\npolite\nます\tる\tinitial>v1\t1\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)));
    }

    #[test]
    fn rejects_empty_suffix() {
        let err = RuleSet::parse("header\npolite\n\tる\tinitial>v1\t0\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)));
    }

    #[test]
    fn skips_lines_with_wrong_field_count() {
        let rules = RuleSet::parse("header\npolite\nます\tる\t0\n").unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn pos_compatibility() {
        assert!(WordType::GODAN.matches_pos("v5k-s"));
        assert!(WordType::ICHIDAN.matches_pos("v1"));
        assert!(WordType::SURU.matches_pos("vs-i"));
        assert!(!WordType::SURU.matches_pos("vs"));
        assert!(WordType::COPULA.matches_pos("cop-da"));
        assert!(!WordType::COPULA.matches_pos("n"));
        assert!(!WordType::KURU.matches_pos("vk-x"));
        assert!((WordType::ICHIDAN | WordType::KURU).matches_pos("vk"));
        assert!(WordType::ICHIDAN.matches_pos("v1-s"));
        assert!(WordType::I_ADJECTIVE.matches_pos("adj-ix"));
        assert!(!WordType::I_ADJECTIVE.matches_pos("adj-na"));
        assert!(!WordType::COPULA.matches_pos("copy"));
        assert!(!WordType::COPULA.matches_pos("copper"));
        assert!(!WordType::GODAN.matches_pos("v5"));
        assert!(!WordType::ICHIDAN.matches_pos("v10"));
    }
}
