/*!
 * Data model shared by the extractor and the rewriter.
 *
 * All offsets are UTF-8 byte offsets into the original document text and
 * always fall on character boundaries.
 */

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A glossary definition: unique key plus the name shown in body prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// Identifier used in the definition and in generated references
    pub key: String,

    /// Human-readable text that appears in the body
    pub name: String,
}

/// Ordered key → name mapping.
///
/// Iteration follows first-definition order. Redefining a key replaces its
/// name in place, so the key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
    index: HashMap<String, usize>,
}

impl Glossary {
    /// Create a new empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry. Returns the previous name for the key.
    pub fn insert(&mut self, key: &str, name: &str) -> Option<String> {
        if let Some(&position) = self.index.get(key) {
            let previous = std::mem::replace(&mut self.entries[position].name, name.to_string());
            return Some(previous);
        }

        self.index.insert(key.to_string(), self.entries.len());
        self.entries.push(GlossaryEntry {
            key: key.to_string(),
            name: name.to_string(),
        });
        None
    }

    /// Look up the display name for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].name.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-definition order.
    pub fn iter(&self) -> impl Iterator<Item = &GlossaryEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }
}

impl<K: AsRef<str>, N: AsRef<str>> FromIterator<(K, N)> for Glossary {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        let mut glossary = Glossary::new();
        for (key, name) in iter {
            glossary.insert(key.as_ref(), name.as_ref());
        }
        glossary
    }
}

/// Half-open interval `[start, end)` in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} exceeds end {}", start, end);
        Self { start, end }
    }

    /// Whether `offset` lies inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether the two spans share at least one position.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// What a scanned span represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// A full glossary definition block
    Definition,
    /// An existing cross-reference
    Reference,
}

/// A span found by the markup scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedSpan {
    pub kind: SpanKind,
    pub span: Span,

    /// Key the definition declares or the reference points to (trimmed)
    pub key: String,
}

/// A pending substitution, expressed in original-text coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Span,
    pub text: String,
    pub key: String,
    pub name: String,
}

/// Record of an applied replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    /// Display name that triggered the replacement
    pub name: String,

    /// Key the generated reference points to
    pub key: String,

    /// Start offset in the original text
    pub offset: usize,

    /// 1-based line of `offset`
    pub line: usize,

    /// 1-based column (in characters) of `offset`
    pub column: usize,
}

/// Result of a rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Rewritten document text
    pub text: String,

    /// Applied replacements, ascending by original offset
    pub changes: Vec<ChangeRecord>,
}

impl RewriteOutcome {
    pub fn replacement_count(&self) -> usize {
        self.changes.len()
    }

    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}
