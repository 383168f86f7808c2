/*!
 * # glsmark - glossary cross-references for LaTeX sources
 *
 * A Rust library and CLI that finds `\newglossaryentry` definitions in a
 * LaTeX document and turns plain occurrences of their display names into
 * `\gls{key}` references.
 *
 * ## Features
 *
 * - Extract glossary entries (key and display name) from definitions
 * - Whole-word, case-insensitive, literal matching of display names
 * - Existing references and each entry's own definition are left untouched
 * - Deterministic resolution of overlapping matches
 * - Configurable definition/reference commands
 * - Single file and folder processing, dry runs
 *
 * ## Architecture
 *
 * - `glossary`: the extraction and rewriting core:
 *   - `glossary::scanner`: definition/reference markup recognition
 *   - `glossary::extractor`: key → display name mapping
 *   - `glossary::rewriter`: occurrence matching, exclusion and application
 *   - `glossary::model`: shared data types
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod glossary;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOptions, RunSummary};
pub use errors::{AppError, ConfigError, GlossaryError};
pub use glossary::{
    ChangeRecord, Glossary, GlossaryEntry, GlossaryProcessor, MarkupSyntax, RewriteOutcome,
    extract_glossary_terms, replace_terms_with_references,
};
