//! Directory-level generation.
//!
//! Every `*.json` file in the layouts directory is generated in sorted path
//! order. A file that fails to load or generate is logged and skipped; the
//! remaining files are still written and all failures are reported at the
//! end. A layout whose output name was already produced in the same run
//! fails instead of overwriting the earlier file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use widget_core::WidgetLayout;

use crate::error::{CodegenError, Result};
use crate::generators::CodeGenerator;

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written, in processing order.
    pub written: Vec<PathBuf>,
    /// Input files that failed, with the error message.
    pub failed: Vec<(PathBuf, String)>,
    /// Warnings recorded across all widgets.
    pub warnings: usize,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of input files processed.
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    /// Turn any failure into [`CodegenError::Batch`].
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(CodegenError::Batch {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }
}

/// Layout files in `dir`, sorted by path.
pub fn layout_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Generate every layout in `layouts_dir` into `out_dir`, or only the
/// widget named `only` when given.
pub fn generate_dir(
    generator: &dyn CodeGenerator,
    layouts_dir: &Path,
    out_dir: &Path,
    only: Option<&str>,
) -> Result<BatchReport> {
    let inputs = match only {
        Some(name) => {
            let path = layouts_dir.join(format!("{name}.json"));
            if !path.is_file() {
                return Err(CodegenError::WidgetNotFound(path));
            }
            vec![path]
        }
        None => layout_files(layouts_dir)?,
    };
    fs::create_dir_all(out_dir)?;

    let mut report = BatchReport::default();
    let mut sources: HashMap<PathBuf, PathBuf> = HashMap::new();
    for input in inputs {
        match generate_file(generator, &input, out_dir, &sources) {
            Ok((written, warnings)) => {
                tracing::info!(
                    framework = generator.framework_name(),
                    output = %written.display(),
                    "generated"
                );
                report.warnings += warnings;
                sources.insert(written.clone(), input);
                report.written.push(written);
            }
            Err(e) => {
                tracing::error!(input = %input.display(), error = %e, "skipping layout");
                report.failed.push((input, e.to_string()));
            }
        }
    }
    Ok(report)
}

fn generate_file(
    generator: &dyn CodeGenerator,
    input: &Path,
    out_dir: &Path,
    sources: &HashMap<PathBuf, PathBuf>,
) -> Result<(PathBuf, usize)> {
    let layout = WidgetLayout::from_path(input)?;
    let file = generator.generate(&layout)?;
    let path = out_dir.join(&file.path);
    if let Some(previous) = sources.get(&path) {
        return Err(CodegenError::OutputCollision {
            output: path,
            previous: previous.clone(),
        });
    }
    fs::write(&path, file.content)?;
    Ok((path, file.warnings.len()))
}
