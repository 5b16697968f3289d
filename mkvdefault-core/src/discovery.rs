//! File discovery module for finding media files to process.
//!
//! A single file is accepted as-is when its extension matches; a library
//! directory is walked down to a configurable depth, keeping files whose
//! extension matches and, optionally, whose name matches a regex filter
//! anchored at the start of the name.

use crate::error::{CoreError, CoreResult};

use regex::Regex;
use walkdir::WalkDir;

use std::path::{Path, PathBuf};

/// Selection rules for [`find_media_files`].
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Directory levels below the library root to search (0 = root only).
    pub depth: usize,
    /// Accepted extensions, with or without a leading dot.
    pub extensions: Vec<String>,
    /// Pattern the file name must match from its first character.
    pub regex_filter: Option<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            depth: 0,
            extensions: vec![".mkv".to_string()],
            regex_filter: None,
        }
    }
}

impl DiscoveryOptions {
    fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    fn compile_filter(&self) -> CoreResult<Option<Regex>> {
        self.regex_filter
            .as_deref()
            .map(|pattern| Regex::new(&format!("^(?:{pattern})")))
            .transpose()
            .map_err(CoreError::from)
    }
}

/// Finds media files under `input` according to `options`.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Matching files, sorted by path
/// * `Err(CoreError::InvalidFilter)` - If the regex filter does not compile
/// * `Err(CoreError::Walkdir)` - If the library cannot be traversed
/// * `Err(CoreError::NoFilesFound)` - If nothing matched
///
/// # Examples
///
/// ```rust,no_run
/// use mkvdefault_core::discovery::{DiscoveryOptions, find_media_files};
/// use std::path::Path;
///
/// let options = DiscoveryOptions { depth: 2, ..DiscoveryOptions::default() };
/// match find_media_files(Path::new("/srv/media"), &options) {
///     Ok(files) => println!("Found {} media files", files.len()),
///     Err(e) => println!("Error finding media files: {}", e),
/// }
/// ```
pub fn find_media_files(input: &Path, options: &DiscoveryOptions) -> CoreResult<Vec<PathBuf>> {
    let filter = options.compile_filter()?;

    let files = if input.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(input)
            .min_depth(1)
            .max_depth(options.depth.saturating_add(1))
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !options.matches_extension(path) {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if filter.as_ref().is_some_and(|re| !re.is_match(&name)) {
                log::debug!("Filtered out by regex: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }
        files.sort();
        files
    } else if input.is_file() && options.matches_extension(input) {
        vec![input.to_path_buf()]
    } else {
        Vec::new()
    };

    if files.is_empty() {
        log::debug!("No media files matched under {}", input.display());
        Err(CoreError::NoFilesFound)
    } else {
        log::debug!("Discovered {} media file(s) under {}", files.len(), input.display());
        Ok(files)
    }
}
