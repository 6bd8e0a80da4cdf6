// src/sanitize.rs - Replacement of characters that Windows forbids in paths
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// No stand-in appears on the left-hand side, and every entry is ASCII.
pub const REPLACEMENTS: [(char, char); 8] = [
    ('<', '_'),
    ('>', '_'),
    (':', '-'),
    ('"', '\''),
    ('\\', '_'),
    ('|', '_'),
    ('?', '_'),
    ('*', '_'),
];

fn replacement_for(c: char) -> Option<char> {
    REPLACEMENTS
        .iter()
        .find_map(|&(bad, good)| (bad == c).then_some(good))
}

fn byte_replacement(b: u8) -> Option<u8> {
    if !b.is_ascii() {
        return None;
    }
    replacement_for(char::from(b)).map(|c| c as u8)
}

/// Rewrites every illegal character in `path`.
///
/// Returns `None` when the path is already compliant, so callers can tell an
/// untouched path apart from a rewritten one.
pub fn sanitize(path: &str) -> Option<String> {
    if !path.chars().any(|c| replacement_for(c).is_some()) {
        return None;
    }
    Some(
        path.chars()
            .map(|c| replacement_for(c).unwrap_or(c))
            .collect(),
    )
}

/// [`sanitize`] for paths that need not be valid UTF-8. Only ASCII bytes are
/// rewritten, so the rest of the name is kept byte for byte.
pub fn sanitize_path(path: &Path) -> Option<PathBuf> {
    let bytes = path.as_os_str().as_encoded_bytes();
    if !bytes.iter().any(|&b| byte_replacement(b).is_some()) {
        return None;
    }
    let rewritten: Vec<u8> = bytes
        .iter()
        .map(|&b| byte_replacement(b).unwrap_or(b))
        .collect();
    Some(PathBuf::from(os_string_from_bytes(rewritten)))
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
    // SAFETY: the bytes came from `as_encoded_bytes` with single ASCII bytes
    // swapped for other ASCII bytes, which keeps the encoding valid.
    unsafe { std::ffi::OsStr::from_encoded_bytes_unchecked(&bytes) }.to_os_string()
}
