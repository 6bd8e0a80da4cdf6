// src/rename.rs - Lazy computation of Windows-safe names for every file in a tree
use crate::fs_utils::{relative_path, walk_dirs, DirListing, WalkOrder};
use crate::sanitize::sanitize_path;
use anyhow::{Context, Result};
use log::debug;
use std::collections::VecDeque;
use std::env;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedPath {
    pub original: PathBuf,
    pub sanitized: PathBuf,
}

/// Iterator over the files under a root whose relative paths are not
/// Windows-compatible, in top-down walk order. Driven by a live walk, so it
/// is consumed once.
pub struct RenameTree {
    dirs: Box<dyn Iterator<Item = Result<DirListing>>>,
    base: PathBuf,
    pending: VecDeque<RenamedPath>,
}

/// Walks `root` (following links) and yields a [`RenamedPath`] for each file
/// whose path relative to `base` contains illegal characters.
pub fn rename_tree(root: &Path, base: &Path) -> RenameTree {
    RenameTree {
        dirs: Box::new(walk_dirs(root, WalkOrder::TopDown)),
        base: base.to_path_buf(),
        pending: VecDeque::new(),
    }
}

pub fn rename_tree_from_cwd(root: &Path) -> Result<RenameTree> {
    let cwd = env::current_dir().context("cannot determine current directory")?;
    Ok(rename_tree(root, &cwd))
}

impl RenameTree {
    fn queue_renames(&mut self, listing: &DirListing) -> Result<()> {
        let rel_dir = relative_path(&listing.path, &self.base)?;
        for name in &listing.file_names {
            let original = rel_dir.join(name);
            if let Some(sanitized) = sanitize_path(&original) {
                debug!(
                    "{} needs renaming to {}",
                    original.display(),
                    sanitized.display()
                );
                self.pending.push_back(RenamedPath {
                    original,
                    sanitized,
                });
            }
        }
        Ok(())
    }
}

impl Iterator for RenameTree {
    type Item = Result<RenamedPath>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(renamed) = self.pending.pop_front() {
                return Some(Ok(renamed));
            }
            let listing = match self.dirs.next()? {
                Ok(listing) => listing,
                Err(e) => return Some(Err(e)),
            };
            if let Err(e) = self.queue_renames(&listing) {
                return Some(Err(e));
            }
        }
    }
}

/// Drops one leading `./`, `../` (or any run of dots) or root separator so the
/// path can be joined under a destination root without escaping it.
pub fn strip_relative_prefix(path: &Path) -> &Path {
    let mut components = path.components();
    match components.next() {
        Some(Component::CurDir | Component::ParentDir | Component::RootDir) => {
            components.as_path()
        }
        Some(Component::Normal(first))
            if first.as_encoded_bytes().iter().all(|&b| b == b'.') =>
        {
            components.as_path()
        }
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn strips_exactly_one_prefix() {
        assert_eq!(strip_relative_prefix(Path::new("./a/b")), Path::new("a/b"));
        assert_eq!(strip_relative_prefix(Path::new("../a")), Path::new("a"));
        assert_eq!(strip_relative_prefix(Path::new(".../a")), Path::new("a"));
        assert_eq!(strip_relative_prefix(Path::new("../../a")), Path::new("../a"));
        assert_eq!(strip_relative_prefix(Path::new(".hidden/a")), Path::new(".hidden/a"));
        assert_eq!(strip_relative_prefix(Path::new("plain")), Path::new("plain"));
        #[cfg(unix)]
        assert_eq!(strip_relative_prefix(Path::new("/abs/a")), Path::new("abs/a"));
    }

    #[cfg(unix)]
    #[test]
    fn yields_only_illegal_names_in_walk_order() -> Result<()> {
        let tmp = tempdir()?;
        let root = tmp.path();
        fs::create_dir(root.join("What?"))?;
        fs::write(root.join("a:b.mp3"), b"")?;
        fs::write(root.join("ok.mp3"), b"")?;
        fs::write(root.join("What?/fine.txt"), b"")?;

        let renamed: Vec<RenamedPath> = rename_tree(root, root).collect::<Result<_>>()?;
        assert_eq!(
            renamed,
            vec![
                RenamedPath {
                    original: PathBuf::from("./a:b.mp3"),
                    sanitized: PathBuf::from("./a-b.mp3"),
                },
                RenamedPath {
                    original: PathBuf::from("What?/fine.txt"),
                    sanitized: PathBuf::from("What_/fine.txt"),
                },
            ]
        );
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn paths_are_relative_to_base() -> Result<()> {
        let tmp = tempdir()?;
        let root = tmp.path().join("src");
        fs::create_dir_all(root.join("deep"))?;
        fs::write(root.join("deep/<x>"), b"")?;

        let renamed: Vec<RenamedPath> = rename_tree(&root, tmp.path()).collect::<Result<_>>()?;
        assert_eq!(renamed.len(), 1);
        assert_eq!(renamed[0].original, PathBuf::from("src/deep/<x>"));
        assert_eq!(renamed[0].sanitized, PathBuf::from("src/deep/_x_"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_do_not_stop_the_walk() -> Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempdir()?;
        let root = tmp.path();
        fs::write(root.join(OsStr::from_bytes(b"caf\xe9.mp3")), b"")?;
        fs::write(root.join(OsStr::from_bytes(b"b\xe9?.mp3")), b"")?;
        fs::write(root.join("z?.mp3"), b"")?;

        let renamed: Vec<RenamedPath> = rename_tree(root, root).collect::<Result<_>>()?;
        let sanitized: Vec<&Path> = renamed.iter().map(|r| r.sanitized.as_path()).collect();
        assert_eq!(
            sanitized,
            vec![
                Path::new(OsStr::from_bytes(b"./b\xe9_.mp3")),
                Path::new("./z_.mp3"),
            ]
        );
        assert_eq!(
            renamed[0].original,
            PathBuf::from(OsStr::from_bytes(b"./b\xe9?.mp3"))
        );
        Ok(())
    }

    #[test]
    fn compliant_tree_yields_nothing() -> Result<()> {
        let tmp = tempdir()?;
        fs::create_dir(tmp.path().join("album"))?;
        fs::write(tmp.path().join("album/01.flac"), b"")?;
        assert_eq!(rename_tree(tmp.path(), tmp.path()).count(), 0);
        Ok(())
    }
}
