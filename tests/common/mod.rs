/*!
 * Common test utilities for the glsmark test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A small document with two entries, an existing reference and body text
pub const SAMPLE_DOCUMENT: &str = r"\newglossaryentry{cpp}{name={C++}, description={A language; not to be confused with C}}
\newglossaryentry{compiler}{
    description={Translates C++ into machine code},
    name={compiler}
}

\begin{document}
C++ is fast. \gls{cpp} is already marked.
A Compiler reads source files; the compilers we use are many.
\end{document}
";

/// Creates a sample document for testing
pub fn create_test_document(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_DOCUMENT)
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}
