//! Source-tree traversal and the build loop.
//!
//! Walks the source depth-first, one document at a time: HTML-ish files run
//! through the extraction engine and are re-serialized into the bundle,
//! everything else is copied verbatim. A failing document is reported and
//! skipped; the build keeps going. Nothing here is parallel: the engine's
//! anchor counter is threaded through sequentially.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::bundle::Bundle;
use crate::config::Config;
use crate::engine::{Document, Engine};
use crate::error::Result;
use crate::index::SearchIndex;

/// Extensions treated as HTML documents.
const HTML_EXTENSIONS: &[&str] = &["html", "htm", "xhtml", "html5"];

/// Build inputs besides the configuration itself.
pub struct BuildOptions<'a> {
    /// Root of the documentation tree to ingest.
    pub source: &'a Path,
    /// Directory the `{package}.docset` bundle is created in.
    pub out_dir: &'a Path,
    /// Configuration file path; files with the same name are not ingested.
    pub config_file: Option<&'a Path>,
    /// Suppress per-document progress output.
    pub quiet: bool,
}

/// What a build did.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub documents: usize,
    pub copied: usize,
    pub references: usize,
    pub failed: usize,
}

/// Build a complete docset bundle from the source tree.
pub fn build(config: &Config, opts: &BuildOptions<'_>) -> Result<BuildReport> {
    let bundle = Bundle::create(opts.out_dir, &config.package)?;
    bundle.write_plist(config)?;
    if let Some(icon) = &config.icon32x32 {
        bundle.install_icon(icon)?;
    }
    let index = SearchIndex::create(&bundle.search_index_path())?;

    let mut engine = Engine::new(config);
    let mut report = BuildReport::default();

    let bundle_dir = Bundle::dir_name(&config.package);
    let config_name = opts.config_file.and_then(|p| p.file_name());

    let walker = WalkDir::new(opts.source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !skip_subtree(e, &bundle_dir));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("skipping unreadable entry: {err}");
                report.failed += 1;
                continue;
            }
        };
        // Symlinks are ingested through their target; only real directories
        // are skipped here.
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if config_name.is_some_and(|name| path.file_name() == Some(name)) {
            continue;
        }

        let relative = relative_path(opts.source, path);
        if is_htmlish(path) {
            match ingest_document(path, &relative, &mut engine, &bundle, &index) {
                Ok(count) => {
                    report.documents += 1;
                    report.references += count;
                    if !opts.quiet {
                        println!("{relative} ({count} entries)");
                    }
                }
                Err(err) => {
                    eprintln!("skipping {relative}: {err}");
                    report.failed += 1;
                }
            }
        } else {
            match bundle.copy_verbatim(&relative, path) {
                Ok(()) => report.copied += 1,
                Err(err) => {
                    eprintln!("skipping {relative}: {err}");
                    report.failed += 1;
                }
            }
        }
    }

    Ok(report)
}

/// One document through the whole pipeline: parse, extract, serialize,
/// write, and index.
fn ingest_document(
    path: &Path,
    relative: &str,
    engine: &mut Engine<'_>,
    bundle: &Bundle,
    index: &SearchIndex,
) -> Result<usize> {
    let html = fs::read(path)?;
    let mut doc = Document::parse(relative, html.as_slice());
    let refs = engine.process(&mut doc);

    bundle.write_document(relative, &crate::dom::render(&doc.dom))?;
    for reference in &refs {
        index.insert(reference)?;
    }
    Ok(refs.len())
}

/// Subtrees never ingested: VCS metadata and a previous bundle inside the
/// source tree.
fn skip_subtree(entry: &DirEntry, bundle_dir: &str) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    match entry.file_name().to_str() {
        Some(name) => name == ".git" || name == ".svn" || name == bundle_dir,
        None => false,
    }
}

fn is_htmlish(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            HTML_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Path relative to the source root, with forward slashes on every platform
/// (it doubles as the `href` prefix in the index).
fn relative_path(source: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(source).unwrap_or(path);
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    parts.join("/")
}
