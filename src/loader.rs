//! Reads documents from files, directories and zip archives and feeds them to
//! the [`DocumentParser`], one document at a time, into the same index.
//!
//! The first document that fails stops the batch. Documents loaded before it
//! stay in the index.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{NetexError, Result};
use crate::index::NetexIndex;
use crate::model::PublicationDelivery;
use crate::parser::{DocumentParser, ParseSummary};

const DOCUMENT_EXTENSION: &str = "json";
const ARCHIVE_EXTENSION: &str = "zip";

pub struct NetexLoader<'a> {
    index: &'a NetexIndex,
}
impl<'a> NetexLoader<'a> {
    pub fn new(index: &'a NetexIndex) -> Self {
        Self { index }
    }
    pub fn index(&self) -> &NetexIndex {
        self.index
    }
    /// Parses one document. `document` names it in errors and logs.
    pub fn load<R: Read>(&self, document: &str, reader: R) -> Result<ParseSummary> {
        let delivery: PublicationDelivery = serde_json::from_reader(BufReader::new(reader))
            .map_err(|source| NetexError::Document {
                document: document.to_owned(),
                source,
            })?;
        let summary = DocumentParser::parse_and_populate_index(self.index, delivery)?;
        info!(
            %document,
            frames = summary.frames.values().sum::<usize>(),
            skipped = summary.diagnostics.skipped().len(),
            dropped = summary.diagnostics.dropped().len(),
            "document loaded"
        );
        Ok(summary)
    }
    pub fn load_file(&self, path: &Path) -> Result<ParseSummary> {
        let document = path.display().to_string();
        let file = File::open(path).map_err(|source| NetexError::Io {
            document: document.clone(),
            source,
        })?;
        self.load(&document, file)
    }
    /// Loads every document in a directory, in file name order.
    pub fn load_dir(&self, dir: &Path) -> Result<ParseSummary> {
        let document = dir.display().to_string();
        let io_error = |source| NetexError::Io {
            document: document.clone(),
            source,
        };
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && has_extension(&path, DOCUMENT_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();
        let mut summary = ParseSummary::default();
        for path in paths {
            summary.merge(self.load_file(&path)?);
        }
        Ok(summary)
    }
    /// Loads every document in a zip archive, in entry order.
    pub fn load_zip(&self, path: &Path) -> Result<ParseSummary> {
        let archive_name = path.display().to_string();
        let file = File::open(path).map_err(|source| NetexError::Io {
            document: archive_name.clone(),
            source,
        })?;
        let mut archive = zip::ZipArchive::new(file).map_err(|e| NetexError::Archive {
            document: archive_name.clone(),
            message: e.to_string(),
        })?;
        let mut summary = ParseSummary::default();
        for i in 0..archive.len() {
            let entry = archive.by_index(i).map_err(|e| NetexError::Archive {
                document: archive_name.clone(),
                message: format!("entry {}: {}", i, e),
            })?;
            if entry.is_dir() {
                continue;
            }
            let document = format!("{}!{}", archive_name, entry.name());
            if !has_extension(Path::new(entry.name()), DOCUMENT_EXTENSION) {
                debug!(%document, "not a document");
                summary.diagnostics.record_skipped(document);
                continue;
            }
            summary.merge(self.load(&document, entry)?);
        }
        Ok(summary)
    }
    /// A directory, a zip archive or a single document, told apart by the path.
    pub fn load_path(&self, path: &Path) -> Result<ParseSummary> {
        if path.is_dir() {
            self.load_dir(path)
        } else if has_extension(path, ARCHIVE_EXTENSION) {
            self.load_zip(path)
        } else {
            self.load_file(path)
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Builds a fresh index from a batch of paths, loaded in the given order.
pub fn parse_paths<P: AsRef<Path>>(paths: &[P]) -> Result<(NetexIndex, ParseSummary)> {
    let index = NetexIndex::new();
    let mut summary = ParseSummary::default();
    {
        let loader = NetexLoader::new(&index);
        for path in paths {
            summary.merge(loader.load_path(path.as_ref())?);
        }
    }
    Ok((index, summary))
}
