//! String splitting used to tokenize dotted key paths.
//!
//! The splitter partitions a string on the first occurrence of a delimiter
//! and keeps splitting the remainder, emitting segments left to right with
//! the delimiters discarded.
//!
//! # Rules
//!
//! 1. An empty source produces no segments.
//! 2. An empty delimiter produces the individual characters of the source.
//! 3. Otherwise the source is split on every occurrence of the delimiter.
//!    A trailing delimiter does not produce an empty trailing segment,
//!    because the remainder after it is empty (rule 1).
//!
//! # Examples
//!
//! ```
//! use keylens::split::split;
//!
//! assert_eq!(split("a.b.c", "."), vec!["a", "b", "c"]);
//! assert_eq!(split("", "."), Vec::<&str>::new());
//! assert_eq!(split("a.b.c", ""), vec!["a", ".", "b", ".", "c"]);
//! ```

use std::collections::BTreeSet;

/// Splits `source` into an ordered sequence of segments on `delimiter`.
///
/// # Arguments
///
/// * `source` - The string to split
/// * `delimiter` - The separator; may be empty, in which case the source is
///   split into its characters
///
/// # Returns
///
/// The segments in their original left-to-right order. Each segment borrows
/// from `source`.
///
/// # Examples
///
/// ```
/// use keylens::split::split;
///
/// assert_eq!(split("a-b-c-d", "-"), vec!["a", "b", "c", "d"]);
/// assert_eq!(split("abcd", ""), vec!["a", "b", "c", "d"]);
/// assert_eq!(split("a", "."), vec!["a"]);
/// ```
pub fn split<'a>(source: &'a str, delimiter: &str) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut remainder = source;

    // Each step strictly shrinks the remainder.
    while !remainder.is_empty() {
        match split_first(remainder, delimiter) {
            Some((head, tail)) => {
                segments.push(head);
                remainder = tail;
            }
            None => {
                segments.push(remainder);
                break;
            }
        }
    }

    segments
}

/// Splits `source` into the set of distinct segments on `delimiter`.
///
/// Unlike [`split`], an empty source yields the single empty segment and a
/// trailing delimiter contributes an empty segment, mirroring a union of the
/// head segment with the union of the remainder.
///
/// # Examples
///
/// ```
/// use keylens::split::split_union;
/// use std::collections::BTreeSet;
///
/// let expected: BTreeSet<&str> = ["a", "b", "c"].into_iter().collect();
/// assert_eq!(split_union("a.b.c", "."), expected);
///
/// let empty: BTreeSet<&str> = [""].into_iter().collect();
/// assert_eq!(split_union("", "."), empty);
/// ```
pub fn split_union<'a>(source: &'a str, delimiter: &str) -> BTreeSet<&'a str> {
    let mut segments = BTreeSet::new();
    let mut remainder = source;

    loop {
        if remainder.is_empty() {
            segments.insert("");
            break;
        }
        match split_first(remainder, delimiter) {
            Some((head, tail)) => {
                segments.insert(head);
                remainder = tail;
            }
            None => {
                segments.insert(remainder);
                break;
            }
        }
    }

    segments
}

/// Partitions a non-empty `source` on the first occurrence of `delimiter`.
///
/// With an empty delimiter the head is the first character.
fn split_first<'a>(source: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    if delimiter.is_empty() {
        let first = source.chars().next()?;
        let boundary = first.len_utf8();
        if boundary == source.len() {
            return None;
        }
        return Some((&source[..boundary], &source[boundary..]));
    }
    source.split_once(delimiter)
}
