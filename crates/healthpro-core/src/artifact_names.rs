//! Artifact file naming conventions.
//!
//! Pure string functions with no filesystem access. These define the canonical
//! layout of files in the report output directory.

use crate::models::artifact::NamingScheme;

pub const PREFIX: &str = "report_";

pub const EXTENSION: &str = "pdf";

pub const CONTENT_TYPE: &str = "application/pdf";

/// Escape marker for session-id bytes outside `[A-Za-z0-9_-]`.
const ESCAPE: char = '.';

/// File name for a session's report under `scheme`.
///
/// `generated_at_ms` is only used by [`NamingScheme::Timestamped`].
/// Distinct session ids always map to distinct names.
pub fn report_file_name(session_id: &str, scheme: NamingScheme, generated_at_ms: i64) -> String {
    let session = encode_session_id(session_id);
    match scheme {
        NamingScheme::Session => format!("{PREFIX}{session}.{EXTENSION}"),
        NamingScheme::Timestamped => format!("{PREFIX}{session}_{generated_at_ms}.{EXTENSION}"),
    }
}

/// Whether `file_name` is something this engine could have produced.
///
/// Rejects anything that could escape the output directory.
pub fn is_safe_file_name(file_name: &str) -> bool {
    file_name.starts_with(PREFIX)
        && file_name.len() > PREFIX.len() + EXTENSION.len() + 1
        && file_name.ends_with(&format!(".{EXTENSION}"))
        && !file_name.contains("..")
        && file_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// One-to-one encoding of a session id into file-name-safe characters.
///
/// `[A-Za-z0-9_-]` pass through; every other byte (including `.`) becomes
/// `.XX` with two uppercase hex digits. The escape is always followed by hex,
/// so the output never contains `..`.
pub fn encode_session_id(session_id: &str) -> String {
    let mut out = String::with_capacity(session_id.len());
    for byte in session_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(char::from(byte));
        } else {
            out.push(ESCAPE);
            out.push_str(&format!("{byte:02X}"));
        }
    }
    out
}
