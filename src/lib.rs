// src/lib.rs - media-utils: housekeeping for media file trees
//!
//! Two independent tools share this crate:
//! - `format-copy-files` copies a tree under Windows-safe names ([`rename`], [`sanitize`]);
//! - `remove-empty-dirs` deletes subtrees without media files ([`empty_dirs`], [`confirm`]).
pub mod confirm;
pub mod empty_dirs;
pub mod fs_utils;
pub mod pattern;
pub mod rename;
pub mod sanitize;

pub use confirm::{deletion_prompt, parse_confirmation, prompt_confirmation};
pub use empty_dirs::find_empty_dirs;
pub use pattern::PathPattern;
pub use rename::{rename_tree, rename_tree_from_cwd, strip_relative_prefix, RenamedPath};
pub use sanitize::{sanitize, sanitize_path};
