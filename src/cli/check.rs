//! Check command implementation.
//!
//! Walks the given paths for map (`.tmx`) and tileset (`.tsx`) documents
//! and loads each one, reporting which fail.

use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::error::{TmxError, Result};
use crate::loader::Loader;
use crate::output::{display_path, plural, Printer};

/// Load every map and tileset under the given paths
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,
}

/// Returns `Ok(false)` when at least one document failed to load.
pub fn run(args: CheckArgs, printer: &Printer) -> Result<bool> {
    let files = collect_documents(&args.paths)?;
    let loader = Loader::new();

    let mut failed = 0;
    for file in &files {
        match check_document(&loader, file) {
            Ok(()) => printer.status("Checked", &display_path(file)),
            Err(e) => {
                failed += 1;
                printer.error("Failed", &format!("{}: {}", display_path(file), e));
            }
        }
    }

    if failed > 0 {
        printer.error(
            "Finished",
            &format!("{} of {} failed", failed, plural(files.len(), "document", "documents")),
        );
        return Ok(false);
    }

    printer.status("Finished", &plural(files.len(), "document", "documents"));
    Ok(true)
}

fn check_document(loader: &Loader, path: &Path) -> Result<()> {
    match document_kind(path) {
        Some("tsx") => loader.load_tileset(path).map(|_| ()),
        _ => loader.load_map(path).map(|_| ()),
    }
}

fn document_kind(path: &Path) -> Option<&str> {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| matches!(*e, "tmx" | "tsx"))
}

/// Expand the given paths into a sorted list of documents.
///
/// Files are taken as given; directories are walked recursively for
/// `.tmx` and `.tsx` files.
pub fn collect_documents(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.exists() {
            return Err(TmxError::ResourceNotFound { path: path.clone() });
        }

        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|p| document_kind(p).is_some())
            .collect();
        found.sort();
        files.extend(found);
    }

    Ok(files)
}
