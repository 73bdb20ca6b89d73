use regex::{Regex, RegexBuilder};

use crate::models::{CategoryRule, Transaction};

pub(crate) struct Categorizer {
    rules: Vec<CompiledRule>,
}

struct CompiledRule {
    pattern: String,
    regex: Option<Regex>,
    category_id: i64,
}

impl Categorizer {
    /// Compiles the rules in order. Returns the categorizer plus the patterns
    /// of any regex rules that failed to compile; those rules are skipped.
    pub(crate) fn new(rules: &[CategoryRule]) -> (Self, Vec<String>) {
        let mut bad_patterns = Vec::new();
        let mut compiled = Vec::with_capacity(rules.len());

        for r in rules {
            let regex = if r.is_regex {
                match RegexBuilder::new(&r.pattern).case_insensitive(true).build() {
                    Ok(re) => Some(re),
                    Err(err) => {
                        tracing::warn!(pattern = %r.pattern, %err, "skipping invalid regex rule");
                        bad_patterns.push(r.pattern.clone());
                        continue;
                    }
                }
            } else {
                None
            };
            compiled.push(CompiledRule {
                pattern: r.pattern.to_lowercase(),
                regex,
                category_id: r.category_id,
            });
        }

        (Self { rules: compiled }, bad_patterns)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Category of the first rule matching `text`.
    pub(crate) fn categorize(&self, text: &str) -> Option<i64> {
        let lower = text.to_lowercase();

        self.rules
            .iter()
            .find(|rule| match &rule.regex {
                Some(re) => re.is_match(text),
                None => !rule.pattern.is_empty() && lower.contains(&rule.pattern),
            })
            .map(|rule| rule.category_id)
    }

    /// Assigns categories to uncategorized transactions from their receiver
    /// and description. Returns how many were categorized.
    pub(crate) fn categorize_batch(&self, transactions: &mut [Transaction]) -> usize {
        let mut count = 0;
        for txn in transactions.iter_mut() {
            if txn.category_id.is_none() {
                txn.category_id = self.categorize(&txn.match_text());
                if txn.category_id.is_some() {
                    count += 1;
                }
            }
        }
        count
    }
}
