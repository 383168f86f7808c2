/*!
 * Glossary term extraction.
 *
 * Builds the ordered key → display name mapping from every recognized
 * definition in a document.
 */

use log::{debug, trace};
use once_cell::sync::Lazy;

use crate::errors::GlossaryError;
use crate::glossary::model::Glossary;
use crate::glossary::scanner::{MarkupScanner, MarkupSyntax};

static DEFAULT_EXTRACTOR: Lazy<GlossaryExtractor> = Lazy::new(|| {
    GlossaryExtractor::new(MarkupSyntax::default()).expect("default markup syntax is valid")
});

/// Extract glossary terms using the default `\newglossaryentry` syntax.
pub fn extract_glossary_terms(text: &str) -> Glossary {
    DEFAULT_EXTRACTOR.extract(text)
}

/// Extracts glossary entries from document text.
#[derive(Debug, Clone)]
pub struct GlossaryExtractor {
    scanner: MarkupScanner,
}

impl GlossaryExtractor {
    pub fn new(syntax: MarkupSyntax) -> Result<Self, GlossaryError> {
        Ok(Self {
            scanner: MarkupScanner::new(syntax)?,
        })
    }

    pub fn with_scanner(scanner: MarkupScanner) -> Self {
        Self { scanner }
    }

    /// Extract the glossary from a document.
    ///
    /// Later definitions of a key overwrite earlier ones. Definitions whose
    /// key or name is blank are dropped.
    pub fn extract(&self, text: &str) -> Glossary {
        let mut glossary = Glossary::new();

        for definition in self.scanner.definitions(text) {
            if definition.key.is_empty() || definition.name.is_empty() {
                debug!(
                    "Skipping definition at offset {} with blank key or name",
                    definition.start
                );
                continue;
            }

            if let Some(previous) = glossary.insert(&definition.key, &definition.name) {
                debug!(
                    "Glossary key '{}' redefined: '{}' -> '{}'",
                    definition.key, previous, definition.name
                );
            } else {
                trace!("Found glossary entry '{}' = '{}'", definition.key, definition.name);
            }
        }

        glossary
    }
}
