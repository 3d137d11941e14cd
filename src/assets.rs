//! Static asset publication.
//!
//! The site root (the directory holding `config.toml`) may provide:
//!
//! ```text
//! site-root/
//! ├── config.toml
//! ├── style.css      # stylesheet referenced by every topic page
//! ├── assets/        # images, fonts, favicons; copied as a tree
//! └── .nojekyll      # tells GitHub Pages not to run Jekyll
//! ```
//!
//! Everything is layered onto the output directory with overwrite
//! semantics: existing pages stay, conflicting files are replaced. A missing
//! `style.css` is replaced by the built-in stylesheet, a missing `.nojekyll`
//! by an empty marker, and a missing `assets/` is skipped.

use crate::target::WriteError;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub const STYLESHEET_FILENAME: &str = "style.css";
pub const ASSETS_DIRNAME: &str = "assets";
pub const MARKER_FILENAME: &str = ".nojekyll";

const DEFAULT_STYLESHEET: &str = include_str!("../static/style.css");

/// Write `style.css` into the output root, from the site root if it has one.
pub fn publish_stylesheet(site_root: &Path, output_root: &Path) -> Result<(), WriteError> {
    let source = site_root.join(STYLESHEET_FILENAME);
    let dest = output_root.join(STYLESHEET_FILENAME);
    fs::create_dir_all(output_root).map_err(|e| WriteError::new(output_root, e))?;
    if source.is_file() {
        fs::copy(&source, &dest).map_err(|e| WriteError::new(&dest, e))?;
    } else {
        fs::write(&dest, DEFAULT_STYLESHEET).map_err(|e| WriteError::new(&dest, e))?;
    }
    Ok(())
}

/// Copy the `assets/` tree and the `.nojekyll` marker into the output root.
///
/// Returns the number of files written.
pub fn publish_assets(site_root: &Path, output_root: &Path) -> Result<usize, WriteError> {
    let mut written = 0;
    fs::create_dir_all(output_root).map_err(|e| WriteError::new(output_root, e))?;

    let assets = site_root.join(ASSETS_DIRNAME);
    if assets.is_dir() {
        written += copy_dir_recursive(&assets, &output_root.join(ASSETS_DIRNAME))?;
    }

    let marker = site_root.join(MARKER_FILENAME);
    let dest = output_root.join(MARKER_FILENAME);
    if marker.is_file() {
        fs::copy(&marker, &dest).map_err(|e| WriteError::new(&dest, e))?;
    } else {
        fs::write(&dest, "").map_err(|e| WriteError::new(&dest, e))?;
    }
    written += 1;

    Ok(written)
}

/// Merge-copy `src` onto `dst`, overwriting files that already exist.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, WriteError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            WriteError::new(path, e.into())
        })?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| WriteError::new(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| WriteError::new(&target, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}
