/*!
 * End-to-end tests for document rewriting
 */

use anyhow::Result;
use std::fs;
use glsmark::app_config::Config;
use glsmark::app_controller::{Controller, RunOptions};
use glsmark::glossary::{GlossaryProcessor, MarkupSyntax};
use crate::common;

/// Test the full pipeline on the sample document
#[test]
fn test_run_sampleDocument_shouldRewriteBodyAndOtherDefinitions() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_document(temp_dir.path(), "doc.tex")?;

    let summary = controller.run(&input, None, RunOptions::default())?;
    let output = fs::read_to_string(temp_dir.path().join("doc.gls.tex"))?;

    assert_eq!(summary.term_count, 2);
    assert!(summary.written);

    let positions: Vec<(&str, usize, usize)> = summary
        .changes
        .iter()
        .map(|c| (c.name.as_str(), c.line, c.column))
        .collect();
    assert_eq!(positions, vec![("C++", 3, 29), ("C++", 8, 1), ("compiler", 9, 3)]);

    assert!(output.starts_with(r"\newglossaryentry{cpp}{name={C++}, description={A language; not to be confused with C}}"));
    assert!(output.contains(r"description={Translates \gls{cpp} into machine code}"));
    assert!(output.contains(r"\gls{cpp} is fast. \gls{cpp} is already marked."));
    assert!(output.contains(r"A \gls{compiler} reads source files; the compilers we use"));
    Ok(())
}

/// Test the bundled thesis resource, including overlapping names
#[test]
fn test_processor_thesisResource_shouldResolveOverlapsAndStayIdempotent() -> Result<()> {
    let text = fs::read_to_string(common::test_resource_path("thesis.tex"))?;
    let processor = GlossaryProcessor::new(MarkupSyntax::default())?;

    let (glossary, outcome) = processor.process(&text)?;
    assert_eq!(glossary.len(), 3);
    assert_eq!(outcome.replacement_count(), 7);

    assert!(outcome.text.contains(r"name={\gls{vector} space}"));
    assert!(outcome.text.contains(r"description={An element of a \gls{vspace}}"));
    assert!(outcome.text.contains(r"A \gls{vector} space contains every linear combination of a \gls{vector} and another \gls{vector}."));
    assert!(outcome.text.contains(r"but \gls{ml} is also written"));
    assert!(outcome.text.contains("Vectors and vectorized code are not matched."));

    let rewriter = glsmark::glossary::ReferenceRewriter::new(MarkupSyntax::default())?;
    let second = rewriter.rewrite(&outcome.text, &glossary)?;
    assert!(second.is_unchanged());
    Ok(())
}

/// Test folder mode over nested documents
#[test]
fn test_run_folder_withNestedDocuments_shouldRewriteEachAndSkipOutputs() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let temp_dir = common::create_temp_dir()?;
    common::create_test_document(temp_dir.path(), "a.tex")?;
    common::create_test_file(
        temp_dir.path(),
        "chapters/b.tex",
        "\\newglossaryentry{x}{name={ex}}\nAn ex here.",
    )?;
    common::create_test_file(temp_dir.path(), "old.gls.tex", "ex")?;
    common::create_test_file(temp_dir.path(), "refs.bib", "@book{}")?;

    let summaries = controller.run_folder(temp_dir.path(), RunOptions::default())?;

    assert_eq!(summaries.len(), 2);
    assert!(temp_dir.path().join("a.gls.tex").exists());
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("chapters").join("b.gls.tex"))?,
        "\\newglossaryentry{x}{name={ex}}\nAn \\gls{x} here."
    );
    assert!(!temp_dir.path().join("old.gls.gls.tex").exists());
    Ok(())
}

/// Test custom markup configured through the config
#[test]
fn test_run_customMarkup_shouldUseConfiguredCommands() -> Result<()> {
    let mut config = Config::default();
    config.markup.definition_command = "newacronym".to_string();
    config.markup.reference_command = "acrshort".to_string();
    config.output.suffix = "linked".to_string();
    let controller = Controller::with_config(config)?;

    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "paper.tex",
        "\\newacronym{gpu}{name={GPU}, description={Graphics processor}}\nA GPU, \\acrshort{gpu}, \\gls{gpu}.",
    )?;

    let summary = controller.run(&input, None, RunOptions::default())?;

    assert_eq!(summary.replacement_count(), 2);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("paper.linked.tex"))?,
        "\\newacronym{gpu}{name={GPU}, description={Graphics processor}}\nA \\acrshort{gpu}, \\acrshort{gpu}, \\gls{\\acrshort{gpu}}."
    );
    Ok(())
}

/// Test the preview list bounded by the limit
#[test]
fn test_preview_shouldListEarliestChangesOnly() -> Result<()> {
    let processor = GlossaryProcessor::new(MarkupSyntax::default())?;
    let (_, outcome) = processor.process("\\newglossaryentry{t}{name={tick}}\ntick tick\ntick")?;

    let preview = Controller::preview(&outcome.changes, 2);
    assert_eq!(preview, vec![
        "tick at position 34 (2:1)".to_string(),
        "tick at position 39 (2:6)".to_string(),
    ]);
    Ok(())
}
