// src/pattern.rs - Start-anchored regex predicates for file names and directory paths
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::str::FromStr;

/// Extensions (as regex fragments) of the media files that count as content
/// by default.
const MEDIA_EXTENSIONS: &[&str] = &[
    "aif[cf]?", "wav", "flac", "m4[ap]", "ape", "wm[av]", "mp[234]", "aac", "midi?", "ogg", "avi",
    "flv", "m[1234]v", "mov", "mpe?g", "mpe",
];

const ARTWORK_DIRS: &[&str] = &[".*/artwork"];

/// A regular expression that must match at the start of its subject. Trailing
/// text after the match is allowed unless the pattern ends in `$`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Self::build(pattern, false)
    }

    pub fn case_insensitive(pattern: &str) -> Result<Self, regex::Error> {
        Self::build(pattern, true)
    }

    fn build(pattern: &str, case_insensitive: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    fn any_of(patterns: impl IntoIterator<Item = String>) -> Result<Self, regex::Error> {
        let joined = patterns
            .into_iter()
            .map(|p| format!("(?:{p})"))
            .collect::<Vec<_>>()
            .join("|");
        Self::case_insensitive(&joined)
    }

    /// File names ending in a common audio or video extension.
    pub fn default_content_files() -> Result<Self, regex::Error> {
        Self::any_of(MEDIA_EXTENSIONS.iter().map(|ext| format!(r"^.*\.{ext}$")))
    }

    /// Paths of `artwork` folders, which are kept even without media files.
    pub fn default_subdir_exclusion() -> Result<Self, regex::Error> {
        Self::any_of(ARTWORK_DIRS.iter().map(|p| (*p).to_owned()))
    }

    // The leftmost match starts at 0 whenever any match does.
    pub fn is_match(&self, subject: &str) -> bool {
        self.regex
            .find(subject)
            .is_some_and(|m| m.start() == 0)
    }
}

impl FromStr for PathPattern {
    type Err = regex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
