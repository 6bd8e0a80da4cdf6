// src/empty_dirs.rs - Bottom-up search for directory trees without content files
use crate::fs_utils::{walk_dirs, DirListing, WalkOrder};
use crate::pattern::PathPattern;
use anyhow::Result;
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Directories under `root` with no file matching `content_files` anywhere
/// beneath them, collapsed so that no result is inside another. Directories
/// matching `subdir_exclusion` are never reported and block their parent.
pub fn find_empty_dirs(
    root: &Path,
    content_files: &PathPattern,
    subdir_exclusion: Option<&PathPattern>,
) -> Result<BTreeSet<PathBuf>> {
    let mut empty_dirs = BTreeSet::new();
    for listing in walk_dirs(root, WalkOrder::BottomUp) {
        let listing = listing?;
        if let Some(exclusion) = subdir_exclusion {
            if exclusion.is_match(&listing.path.to_string_lossy()) {
                debug!("excluded {}", listing.path.display());
                continue;
            }
        }
        collect_dir(&listing, content_files, &mut empty_dirs);
    }
    info!(
        "found {} empty director{} under {}",
        empty_dirs.len(),
        if empty_dirs.len() == 1 { "y" } else { "ies" },
        root.display()
    );
    Ok(empty_dirs)
}

// All subdirectories of `listing` must already have been folded in.
pub fn collect_dir(
    listing: &DirListing,
    content_files: &PathPattern,
    empty_dirs: &mut BTreeSet<PathBuf>,
) {
    let has_content = listing
        .file_names
        .iter()
        .any(|name| content_files.is_match(&name.to_string_lossy()));
    if has_content {
        return;
    }

    if listing.subdir_names.is_empty() {
        empty_dirs.insert(listing.path.clone());
        return;
    }

    let subdirs: Vec<PathBuf> = listing.subdir_paths().collect();
    if subdirs.iter().all(|sub| empty_dirs.contains(sub)) {
        for sub in &subdirs {
            empty_dirs.remove(sub);
        }
        debug!(
            "collapsed {} subdirectories into {}",
            subdirs.len(),
            listing.path.display()
        );
        empty_dirs.insert(listing.path.clone());
    }
}
