// src/fs_utils.rs - Directory walking, copy-with-mkdir, recursive remove and path helpers
use anyhow::{Context, Result};
use log::{debug, warn};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    TopDown,
    BottomUp,
}

// Children are classified by following links; a dangling link is a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    pub path: PathBuf,
    pub subdir_names: Vec<OsString>,
    pub file_names: Vec<OsString>,
}

impl DirListing {
    pub fn subdir_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.subdir_names.iter().map(|name| self.path.join(name))
    }
}

/// Every directory under `root`, itself included, following links and sorted
/// by file name. A link cycle is yielded as an error.
pub fn walk_dirs(root: &Path, order: WalkOrder) -> impl Iterator<Item = Result<DirListing>> {
    WalkDir::new(root)
        .follow_links(true)
        .contents_first(order == WalkOrder::BottomUp)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => Some(list_dir(entry.into_path())),
            Ok(_) => None,
            Err(e) if is_dangling_link(&e) => {
                warn!("skipping dangling link: {e}");
                None
            }
            Err(e) => Some(Err(anyhow::Error::from(e).context("directory walk failed"))),
        })
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.depth() > 0
        && err.loop_ancestor().is_none()
        && err
            .io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}

fn list_dir(path: PathBuf) -> Result<DirListing> {
    let mut subdir_names = Vec::new();
    let mut file_names = Vec::new();
    let entries =
        fs::read_dir(&path).with_context(|| format!("cannot read directory {}", path.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot read entry in {}", path.display()))?;
        let is_dir = fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if is_dir {
            subdir_names.push(entry.file_name());
        } else {
            file_names.push(entry.file_name());
        }
    }
    subdir_names.sort();
    file_names.sort();
    debug!(
        "listed {}: {} subdirs, {} files",
        path.display(),
        subdir_names.len(),
        file_names.len()
    );
    Ok(DirListing {
        path,
        subdir_names,
        file_names,
    })
}

pub fn copy_path(source: &Path, dest: &Path) -> Result<()> {
    eprint!("{} > ", source.display());
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {}", parent.display()))?;
    }
    fs::copy(source, dest).with_context(|| {
        format!("cannot copy {} to {}", source.display(), dest.display())
    })?;
    eprintln!("{}", dest.display());
    Ok(())
}

pub fn remove_recursively(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
    .with_context(|| format!("cannot remove {}", path.display()))
}

// `..` above the root is dropped; above a relative start it is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.iter().collect()
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        let cwd = env::current_dir().context("cannot determine current directory")?;
        Ok(normalize(&cwd.join(path)))
    }
}

/// Lexical path of `path` relative to `base`; equal paths yield `.`.
pub fn relative_path(path: &Path, base: &Path) -> Result<PathBuf> {
    let path = absolutize(path)?;
    let base = absolutize(base)?;
    let path_parts: Vec<_> = path.components().collect();
    let base_parts: Vec<_> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_parts.len() {
        rel.push("..");
    }
    for part in &path_parts[common..] {
        rel.push(part.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Ok(rel)
}
