//! Field splitting for DICT protocol lines.
//!
//! Listing lines and definition headers carry space-separated fields, any of
//! which may be a double-quoted span containing spaces. Embedded quote
//! characters cannot be escaped; a `"` inside a quoted span always ends it.

use std::borrow::Cow;

const QUOTE: char = '"';

/// Splits a protocol line into atoms.
///
/// Runs of whitespace separate atoms. An atom that starts with `"` extends to
/// the next `"` (or the end of the line), and the quotes are stripped. Any
/// other atom is passed through verbatim, including stray quote characters
/// that do not open it.
///
/// # Examples
///
/// ```
/// use dict_client::split_atoms;
///
/// assert_eq!(split_atoms(r#""quoted phrase" tail"#), ["quoted phrase", "tail"]);
/// assert!(split_atoms("").is_empty());
/// ```
#[must_use]
pub fn split_atoms(line: &str) -> Vec<String> {
    let mut atoms = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|ch| ch.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        let mut atom = String::new();
        if first == QUOTE {
            chars.next();
            for ch in chars.by_ref() {
                if ch == QUOTE {
                    break;
                }
                atom.push(ch);
            }
        } else {
            while let Some(ch) = chars.next_if(|ch| !ch.is_whitespace()) {
                atom.push(ch);
            }
        }
        atoms.push(atom);
    }

    atoms
}

/// Prepares a word for use as a command argument.
///
/// Words containing whitespace (and the empty word, which would otherwise
/// vanish from the command line) are wrapped in double quotes; anything else
/// is sent bare.
#[must_use]
pub fn quote_atom(word: &str) -> Cow<'_, str> {
    if word.is_empty() || word.chars().any(char::is_whitespace) {
        Cow::Owned(format!("{QUOTE}{word}{QUOTE}"))
    } else {
        Cow::Borrowed(word)
    }
}
