/*!
 * Glossary discovery and reference rewriting for LaTeX sources.
 *
 * - `scanner`: recognizes definition and reference markup
 * - `extractor`: builds the key → display name mapping
 * - `rewriter`: turns plain occurrences into references
 */

pub mod extractor;
pub mod model;
pub mod rewriter;
pub mod scanner;

pub use extractor::{GlossaryExtractor, extract_glossary_terms};
pub use model::{
    ChangeRecord, Glossary, GlossaryEntry, Replacement, RewriteOutcome, Span, SpanKind, TaggedSpan,
};
pub use rewriter::{ExclusionZones, ReferenceRewriter, replace_terms_with_references};
pub use scanner::{MarkupScanner, MarkupSyntax};

use crate::errors::GlossaryError;

/// Extractor and rewriter sharing one compiled scanner.
#[derive(Debug, Clone)]
pub struct GlossaryProcessor {
    extractor: GlossaryExtractor,
    rewriter: ReferenceRewriter,
}

impl GlossaryProcessor {
    pub fn new(syntax: MarkupSyntax) -> Result<Self, GlossaryError> {
        let scanner = MarkupScanner::new(syntax)?;
        Ok(Self {
            extractor: GlossaryExtractor::with_scanner(scanner.clone()),
            rewriter: ReferenceRewriter::with_scanner(scanner),
        })
    }

    pub fn extract(&self, text: &str) -> Glossary {
        self.extractor.extract(text)
    }

    /// Extract the glossary from `text` and rewrite the same text with it.
    pub fn process(&self, text: &str) -> Result<(Glossary, RewriteOutcome), GlossaryError> {
        let glossary = self.extractor.extract(text);
        let outcome = self.rewriter.rewrite(text, &glossary)?;
        Ok((glossary, outcome))
    }
}
