//! Version stamping for the primary package's init file.
//!
//! Operates on raw bytes so the file's encoding and line endings pass
//! through untouched.

use crate::error::{Error, Result};

const VERSION_PREFIX: &[u8] = b"__version__ = ";

/// Append a build tag to the version literal in `source`.
///
/// The unique line `__version__ = '<value>'` becomes
/// `__version__ = '<value> <tag>'`; every other byte of the buffer is
/// preserved. An empty tag returns the input unchanged. Fails with
/// [`Error::MissingVersion`] when no version line exists and with
/// [`Error::MalformedVersion`] when the line carries no quoted value,
/// because a malformed primary package must not silently produce an
/// unstamped artifact.
pub fn stamp(source: &[u8], tag: &str) -> Result<Vec<u8>> {
    if tag.is_empty() {
        return Ok(source.to_vec());
    }

    let line = source
        .split_inclusive(|&b| b == b'\n')
        .find(|line| line.starts_with(VERSION_PREFIX))
        .ok_or(Error::MissingVersion)?;

    let literal = line[VERSION_PREFIX.len()..].trim_ascii_end();
    if literal.len() < 2 {
        return Err(Error::MalformedVersion);
    }

    // Drop the closing quote, append " <tag>", put the quote back
    let (value, quote) = literal.split_at(literal.len() - 1);
    let mut stamped = Vec::with_capacity(literal.len() + tag.len() + 1);
    stamped.extend_from_slice(value);
    stamped.push(b' ');
    stamped.extend_from_slice(tag.as_bytes());
    stamped.extend_from_slice(quote);

    Ok(replace_first(source, literal, &stamped))
}

/// Replace the first occurrence of `needle` in `haystack`.
fn replace_first(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    match haystack
        .windows(needle.len())
        .position(|window| window == needle)
    {
        Some(at) => {
            let mut out =
                Vec::with_capacity(haystack.len() - needle.len() + replacement.len());
            out.extend_from_slice(&haystack[..at]);
            out.extend_from_slice(replacement);
            out.extend_from_slice(&haystack[at + needle.len()..]);
            out
        }
        None => haystack.to_vec(),
    }
}
