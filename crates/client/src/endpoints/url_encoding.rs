//! URL encoding utilities for constructing safe API paths.
//!
//! Connection ids, API key ids and provider keys are interpolated into paths
//! like `/api/connections/{id}`; they are percent-encoded so a value such as
//! `a/b` or `x?y` cannot escape its segment.
//!
//! # Example
//!
//! ```
//! use apiconn_client::endpoints::url_encoding::encode_path_segment;
//!
//! let encoded = encode_path_segment("team/alpha");
//! assert_eq!(encoded, "team%2Falpha");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters percent-encoded in a path segment: RFC 3986 section 3.3
/// delimiters, `%` (no double decoding), and `/` (no traversal).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a URL path segment.
///
/// Use for every caller-provided value placed in a URL path: connection ids,
/// API key ids and provider keys.
///
/// # Examples
///
/// ```
/// use apiconn_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("42"), "42");
/// assert_eq!(encode_path_segment("my key"), "my%20key");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
