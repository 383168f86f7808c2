/*!
 * Lexical scanner for the small family of glossary markup patterns.
 *
 * Recognizes:
 * - definitions: `\newglossaryentry{key}{... name={Name} ...}`
 * - references: `\gls{key}`
 *
 * Brackets around keys and names are matched non-greedily, so a key or name
 * containing `}` is cut at the first `}`. The definition body block is closed
 * by brace-depth counting and never extends past the next definition marker.
 *
 * The key bracket is read as written. When one entry's key equals another
 * entry's display name, a rewrite turns that key into a reference
 * (`\newglossaryentry{\gls{g}}{...}`). The block then no longer declares
 * its original key, so a second pass no longer protects that entry's own
 * name inside it.
 */

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::GlossaryError;
use crate::glossary::model::{Span, SpanKind, TaggedSpan};

/// Command names used for definitions and references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupSyntax {
    /// Command that declares an entry, without the backslash
    #[serde(default = "default_definition_command")]
    pub definition_command: String,

    /// Command that references an entry, without the backslash
    #[serde(default = "default_reference_command")]
    pub reference_command: String,
}

impl Default for MarkupSyntax {
    fn default() -> Self {
        Self {
            definition_command: default_definition_command(),
            reference_command: default_reference_command(),
        }
    }
}

impl MarkupSyntax {
    /// Check that both commands are usable LaTeX control words.
    pub fn validate(&self) -> Result<(), GlossaryError> {
        validate_command("definition", &self.definition_command)?;
        validate_command("reference", &self.reference_command)?;
        Ok(())
    }

    /// Canonical reference markup for `key`, e.g. `\gls{key}`.
    pub fn reference_for(&self, key: &str) -> String {
        format!("\\{}{{{}}}", self.reference_command, key)
    }
}

fn default_definition_command() -> String {
    "newglossaryentry".to_string()
}

fn default_reference_command() -> String {
    "gls".to_string()
}

fn validate_command(role: &'static str, name: &str) -> Result<(), GlossaryError> {
    let letters = name.strip_suffix('*').unwrap_or(name);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GlossaryError::InvalidCommand {
            role,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// A `(key, name)` pair captured from a definition, trimmed, with the offset
/// of its marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDefinition {
    pub start: usize,
    pub key: String,
    pub name: String,
}

/// Compiled scanner for one [`MarkupSyntax`].
#[derive(Debug, Clone)]
pub struct MarkupScanner {
    syntax: MarkupSyntax,
    marker: String,
    entry_pattern: Regex,
    head_pattern: Regex,
    reference_pattern: Regex,
}

impl MarkupScanner {
    pub fn new(syntax: MarkupSyntax) -> Result<Self, GlossaryError> {
        syntax.validate()?;

        let definition = regex::escape(&syntax.definition_command);
        let reference = regex::escape(&syntax.reference_command);

        let entry_pattern = Regex::new(&format!(
            r"(?s)\\{}\{{(.*?)\}}\s*\{{.*?name=\{{(.*?)\}}",
            definition
        ))?;
        let head_pattern = Regex::new(&format!(r"(?s)\\{}\{{(.*?)\}}\s*\{{", definition))?;
        let reference_pattern = Regex::new(&format!(r"\\{}\{{.*?\}}", reference))?;

        Ok(Self {
            marker: format!("\\{}{{", syntax.definition_command),
            syntax,
            entry_pattern,
            head_pattern,
            reference_pattern,
        })
    }

    pub fn syntax(&self) -> &MarkupSyntax {
        &self.syntax
    }

    /// Every definition matching the recognized pattern, in document order.
    ///
    /// Keys and names are trimmed but not filtered.
    pub fn definitions(&self, text: &str) -> Vec<RawDefinition> {
        self.entry_pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(RawDefinition {
                    start: whole.start(),
                    key: caps.get(1)?.as_str().trim().to_string(),
                    name: caps.get(2)?.as_str().trim().to_string(),
                })
            })
            .collect()
    }

    /// Definition blocks and existing references as tagged spans, ordered by
    /// start offset.
    ///
    /// References never overlap each other. Definition blocks keep document
    /// order among themselves, so for a key defined more than once the last
    /// locatable block comes last. Blocks whose body is not closed before the
    /// next marker are skipped.
    pub fn scan(&self, text: &str) -> Vec<TaggedSpan> {
        let prefix = self.syntax.reference_command.len() + 2;
        let mut spans = self.definition_blocks(text);
        spans.extend(self.reference_pattern.find_iter(text).map(|m| TaggedSpan {
            kind: SpanKind::Reference,
            span: Span::new(m.start(), m.end()),
            key: text[m.start() + prefix..m.end() - 1].trim().to_string(),
        }));
        spans.sort_by_key(|tagged| tagged.span.start);
        spans
    }

    fn definition_blocks(&self, text: &str) -> Vec<TaggedSpan> {
        let markers: Vec<usize> = text.match_indices(&self.marker).map(|(i, _)| i).collect();
        let mut blocks = Vec::new();

        for caps in self.head_pattern.captures_iter(text) {
            let (Some(head), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let bound = markers
                .iter()
                .copied()
                .find(|&m| m > head.start())
                .unwrap_or(text.len());

            if head.end() > bound {
                continue;
            }

            if let Some(close) = find_block_close(text, head.end(), bound) {
                blocks.push(TaggedSpan {
                    kind: SpanKind::Definition,
                    span: Span::new(head.start(), close),
                    key: key.as_str().trim().to_string(),
                });
            }
        }

        blocks
    }
}

/// Offset just past the `}` that closes a block opened right before `from`.
///
/// Backslash-escaped braces are not counted. Returns `None` when the block is
/// still open at `bound`.
fn find_block_close(text: &str, from: usize, bound: usize) -> Option<usize> {
    let bytes = &text.as_bytes()[from..bound];
    let mut depth = 1usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}
