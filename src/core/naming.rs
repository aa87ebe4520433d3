//! Unit name normalization

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Remove the first occurrence of `strip` from the basename of `path`.
///
/// The token may appear anywhere in the name. Two units that normalize to the
/// same name land on the same destination; the later one wins. Names that are
/// not valid UTF-8 are stripped byte-wise and otherwise kept as they are.
pub fn normalize_name(path: &Path, strip: &str) -> OsString {
    let Some(base) = path.file_name() else {
        return OsString::new();
    };
    if strip.is_empty() {
        return base.to_os_string();
    }
    match base.to_str() {
        Some(name) => OsString::from(name.replacen(strip, "", 1)),
        None => strip_os(base, strip),
    }
}

#[cfg(unix)]
fn strip_os(name: &OsStr, strip: &str) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let bytes = name.as_bytes();
    let needle = strip.as_bytes();
    match bytes.windows(needle.len()).position(|w| w == needle) {
        Some(at) => {
            let mut out = Vec::with_capacity(bytes.len() - needle.len());
            out.extend_from_slice(&bytes[..at]);
            out.extend_from_slice(&bytes[at + needle.len()..]);
            OsString::from_vec(out)
        }
        None => name.to_os_string(),
    }
}

// Other platforms keep the token in names that are not valid UTF-8
#[cfg(not(unix))]
fn strip_os(name: &OsStr, _strip: &str) -> OsString {
    name.to_os_string()
}

/// Case-insensitive containment test used by discovery
pub fn contains_marker(name: &str, marker: &str) -> bool {
    name.to_lowercase().contains(&marker.to_lowercase())
}
