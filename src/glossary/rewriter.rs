/*!
 * Reference rewriting.
 *
 * Replaces whole-word, case-insensitive occurrences of glossary display names
 * with canonical references (`\gls{key}`), except:
 * - inside an existing reference to any key,
 * - inside the definition block of the entry being replaced.
 *
 * Occurrences inside other entries' definitions are still replaced. All
 * decisions are made against the original text; the output is assembled in a
 * single ascending pass at the end.
 */

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

use crate::errors::GlossaryError;
use crate::glossary::model::{
    ChangeRecord, Glossary, Replacement, RewriteOutcome, Span, SpanKind,
};
use crate::glossary::scanner::{MarkupScanner, MarkupSyntax};

static DEFAULT_REWRITER: Lazy<ReferenceRewriter> = Lazy::new(|| {
    ReferenceRewriter::new(MarkupSyntax::default()).expect("default markup syntax is valid")
});

/// Rewrite `text` with the default `\gls` reference syntax.
pub fn replace_terms_with_references(
    text: &str,
    glossary: &Glossary,
) -> Result<RewriteOutcome, GlossaryError> {
    DEFAULT_REWRITER.rewrite(text, glossary)
}

/// Ranges where replacement must not happen.
#[derive(Debug, Clone, Default)]
pub struct ExclusionZones {
    /// Existing references, ascending and non-overlapping
    references: Vec<Span>,

    /// Each key's own definition block
    definitions: HashMap<String, Span>,
}

impl ExclusionZones {
    /// Partition the scanner's tagged spans. A key with several located
    /// blocks keeps the last one.
    pub fn scan(scanner: &MarkupScanner, text: &str) -> Self {
        let mut zones = Self::default();

        for tagged in scanner.scan(text) {
            match tagged.kind {
                SpanKind::Reference => zones.references.push(tagged.span),
                SpanKind::Definition => {
                    zones.definitions.insert(tagged.key, tagged.span);
                }
            }
        }

        zones
    }

    /// Whether `offset` lies inside any existing reference.
    pub fn in_reference(&self, offset: usize) -> bool {
        let after = self.references.partition_point(|span| span.start <= offset);
        after > 0 && self.references[after - 1].contains(offset)
    }

    /// Whether `offset` lies inside the definition block of `key`.
    pub fn in_own_definition(&self, key: &str, offset: usize) -> bool {
        self.definitions
            .get(key)
            .is_some_and(|span| span.contains(offset))
    }

    pub fn definition_span(&self, key: &str) -> Option<Span> {
        self.definitions.get(key).copied()
    }
}

/// Rewrites glossary term occurrences into references.
#[derive(Debug, Clone)]
pub struct ReferenceRewriter {
    scanner: MarkupScanner,
}

impl ReferenceRewriter {
    pub fn new(syntax: MarkupSyntax) -> Result<Self, GlossaryError> {
        Ok(Self {
            scanner: MarkupScanner::new(syntax)?,
        })
    }

    pub fn with_scanner(scanner: MarkupScanner) -> Self {
        Self { scanner }
    }

    /// Rewrite every safe occurrence of each display name in `text`.
    pub fn rewrite(
        &self,
        text: &str,
        glossary: &Glossary,
    ) -> Result<RewriteOutcome, GlossaryError> {
        let zones = ExclusionZones::scan(&self.scanner, text);
        for entry in glossary.iter() {
            if zones.definition_span(&entry.key).is_none() {
                debug!("No definition block located for '{}', no self-exclusion", entry.key);
            }
        }

        let pending = self.collect_candidates(text, glossary, &zones)?;
        let candidate_count = pending.len();
        let accepted = resolve_overlaps(pending);
        debug!(
            "{} candidate occurrences, {} accepted after overlap resolution",
            candidate_count,
            accepted.len()
        );

        Ok(apply_replacements(text, accepted))
    }

    /// Enumerate surviving candidates in glossary order, then document order.
    pub fn collect_candidates(
        &self,
        text: &str,
        glossary: &Glossary,
        zones: &ExclusionZones,
    ) -> Result<Vec<Replacement>, GlossaryError> {
        let mut pending = Vec::new();

        for entry in glossary.iter() {
            let pattern = name_pattern(&entry.name)?;
            let reference = self.scanner.syntax().reference_for(&entry.key);

            for span in whole_word_matches(&pattern, text) {
                if zones.in_reference(span.start) {
                    trace!("'{}' at {} is inside a reference", entry.name, span.start);
                    continue;
                }
                if zones.in_own_definition(&entry.key, span.start) {
                    trace!("'{}' at {} is inside its own definition", entry.name, span.start);
                    continue;
                }

                pending.push(Replacement {
                    span,
                    text: reference.clone(),
                    key: entry.key.clone(),
                    name: entry.name.clone(),
                });
            }
        }

        Ok(pending)
    }
}

/// Case-insensitive literal pattern for a display name.
fn name_pattern(name: &str) -> Result<Regex, GlossaryError> {
    Ok(RegexBuilder::new(&regex::escape(name))
        .case_insensitive(true)
        .build()?)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Matches of `pattern` not adjacent to a word character on either side.
///
/// A rejected match does not consume its text, so an overlapping match that
/// starts later is still found.
fn whole_word_matches(pattern: &Regex, text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut at = 0;

    while at <= text.len() {
        let Some(m) = pattern.find_at(text, at) else {
            break;
        };

        let before_ok = !text[..m.start()].chars().next_back().is_some_and(is_word_char);
        let after_ok = !text[m.end()..].chars().next().is_some_and(is_word_char);

        if before_ok && after_ok && !m.as_str().is_empty() {
            spans.push(Span::new(m.start(), m.end()));
            at = m.end();
        } else {
            at = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
    }

    spans
}

/// Keep a non-overlapping subset of `pending`.
///
/// Replacements are visited by descending start offset; the first one to
/// claim a range wins. Equal starts keep enumeration order (stable sort).
/// Every accepted span starts at or after the current candidate, so only the
/// most recently accepted one can overlap it.
pub fn resolve_overlaps(mut pending: Vec<Replacement>) -> Vec<Replacement> {
    pending.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    let mut accepted: Vec<Replacement> = Vec::with_capacity(pending.len());

    for replacement in pending {
        let overlaps = accepted
            .last()
            .is_some_and(|claimed| claimed.span.overlaps(&replacement.span));
        if overlaps {
            trace!(
                "Dropping '{}' at {}: overlaps an accepted replacement",
                replacement.name,
                replacement.span.start
            );
            continue;
        }
        accepted.push(replacement);
    }

    accepted
}

/// Build the rewritten text from non-overlapping replacements.
pub fn apply_replacements(text: &str, mut accepted: Vec<Replacement>) -> RewriteOutcome {
    accepted.sort_by_key(|replacement| replacement.span.start);

    let mut output = String::with_capacity(text.len() + accepted.len() * 8);
    let mut changes = Vec::with_capacity(accepted.len());
    let mut cursor = 0;
    let mut lines = LineTracker::new(text);

    for replacement in accepted {
        output.push_str(&text[cursor..replacement.span.start]);
        output.push_str(&replacement.text);
        cursor = replacement.span.end;

        let (line, column) = lines.position(replacement.span.start);
        changes.push(ChangeRecord {
            name: replacement.name,
            key: replacement.key,
            offset: replacement.span.start,
            line,
            column,
        });
    }
    output.push_str(&text[cursor..]);

    RewriteOutcome {
        text: output,
        changes,
    }
}

/// Converts ascending byte offsets to 1-based line/column pairs.
///
/// Each byte of the text is visited once across all calls.
struct LineTracker<'a> {
    text: &'a str,
    line: usize,
    column: usize,
    scanned: usize,
}

impl<'a> LineTracker<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            line: 1,
            column: 1,
            scanned: 0,
        }
    }

    fn position(&mut self, offset: usize) -> (usize, usize) {
        for c in self.text[self.scanned..offset].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.scanned = offset;

        (self.line, self.column)
    }
}
