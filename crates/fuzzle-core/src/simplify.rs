use std::borrow::Cow;

use regex::{NoExpand, Regex};
use serde::Deserialize;

use crate::error::LoadError;

/// One `complex -> simple` rule with its compiled whole-word matcher
#[derive(Debug, Clone)]
struct Substitution {
    from: String,
    to: String,
    pattern: Regex,
}

#[derive(Debug, Deserialize)]
struct SubstitutionJson {
    from: String,
    to: String,
}

/// Ordered substitution rules; rules apply in insertion order
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    rules: Vec<Substitution>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (from, to) in pairs {
            table.insert(from.as_ref(), to)?;
        }
        Ok(table)
    }

    /// Load from a JSON array of `{"from": ..., "to": ...}` objects
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let raw: Vec<SubstitutionJson> = serde_json::from_str(json_str)?;
        Self::from_pairs(raw.into_iter().map(|r| (r.from, r.to)))
    }

    /// Add a rule at the end, or replace the target of an existing key in place
    pub fn insert(&mut self, from: &str, to: impl Into<String>) -> Result<(), LoadError> {
        let from = from.trim().to_lowercase();
        let to = to.into();

        if from.is_empty() {
            return Err(LoadError::InvalidFormat("empty substitution key".to_string()));
        }

        if let Some(rule) = self.rules.iter_mut().find(|r| r.from == from) {
            rule.to = to;
            return Ok(());
        }

        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&from)))
            .map_err(|e| LoadError::InvalidFormat(format!("substitution '{from}': {e}")))?;

        self.rules.push(Substitution { from, to, pattern });
        Ok(())
    }

    /// Append the rules of `other` after this table's rules
    pub fn extend(&mut self, other: SubstitutionTable) {
        for rule in other.rules {
            if let Some(existing) = self.rules.iter_mut().find(|r| r.from == rule.from) {
                existing.to = rule.to;
            } else {
                self.rules.push(rule);
            }
        }
    }

    pub fn get(&self, from: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.from == from)
            .map(|r| r.to.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|r| (r.from.as_str(), r.to.as_str()))
    }
}

/// Replace whole-word, case-insensitive occurrences of every table key.
///
/// Rules run in table order over the progressively rewritten text.
/// Replacements are inserted verbatim; surrounding text is untouched.
pub fn simplify(text: &str, table: &SubstitutionTable) -> String {
    let mut simplified = text.to_string();

    for rule in &table.rules {
        if let Cow::Owned(replaced) = rule.pattern.replace_all(&simplified, NoExpand(&rule.to)) {
            tracing::trace!("Applied substitution '{}' -> '{}'", rule.from, rule.to);
            simplified = replaced;
        }
    }

    simplified
}
