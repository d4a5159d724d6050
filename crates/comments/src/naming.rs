use crate::{CommentsError, Result};
use std::collections::HashSet;

/// Highest sequence number tried before creation fails.
pub const MAX_COMMENT_SEQUENCE: u32 = 999;

/// Smallest free `{prefix}{n}-{host}` name, scanning n = 1, 2, 3, …
///
/// Bounded at [`MAX_COMMENT_SEQUENCE`]: a tree holding every candidate
/// yields [`CommentsError::NamingExhausted`] rather than scanning forever.
/// Pure; creating the file is the caller's job.
pub fn next_comment_name(
    host_file_name: &str,
    prefix: &str,
    existing: &HashSet<String>,
) -> Result<String> {
    for sequence in 1..=MAX_COMMENT_SEQUENCE {
        let candidate = format!("{prefix}{sequence}-{host_file_name}");
        if !existing.contains(&candidate) {
            return Ok(candidate);
        }
    }
    Err(CommentsError::NamingExhausted {
        host: host_file_name.to_string(),
        bound: MAX_COMMENT_SEQUENCE,
    })
}
