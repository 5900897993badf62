//! Line-driven record parser for the PO subset.
//!
//! Each physical line is matched against four patterns:
//!
//! - `#. comment`: a translator comment for the next record
//! - `msgid "key"`
//! - `msgstr "value"`
//! - `"fragment"`: continues the `msgid`/`msgstr` right above it
//!
//! Everything else is skipped. The pending record lives in a
//! [`ParserState`]; once a record boundary is reached (a blank line, the
//! next comment/key/value line, or the end of input) and both key and value
//! are non-empty, a [`ParsedUnit`] is emitted and the state is reset.

use std::io::BufRead;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    encoding::LineReader,
    error::Error,
    escape::{CONTINUATION_MARKER, strip_continuations, unescape},
};

lazy_static! {
    static ref COMMENT_REGEX: Regex = Regex::new(r"^\s*#\.\s?(.*)$").unwrap();
    static ref KEY_REGEX: Regex = Regex::new(r#"^\s*msgid\s*"(.*)"\s*$"#).unwrap();
    static ref VALUE_REGEX: Regex = Regex::new(r#"^\s*msgstr\s*"(.*)"\s*$"#).unwrap();
    static ref CONTINUATION_REGEX: Regex = Regex::new(r#"^\s*"(.*)"\s*$"#).unwrap();
}

/// Comment text that marks a section boundary. Comments starting with it
/// are never attached to a row.
pub const SECTION_MARKER: &str = "--------- ";

/// A complete record: a key, its value and an optional comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedUnit {
    pub comment: Option<String>,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Key,
    Value,
}

/// The record being accumulated.
///
/// `key` and `value` hold the raw quoted text, with fragments of multi-line
/// strings joined by [`CONTINUATION_MARKER`]; they are only unescaped when
/// the unit is taken.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParserState {
    pub comment: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
    open: Option<Field>,
}

impl ParserState {
    /// Clears every pending field.
    pub fn reset(&mut self) {
        *self = ParserState::default();
    }

    /// Whether both key and value are non-empty once decoded.
    pub fn is_complete(&self) -> bool {
        let key = self.key.as_deref().map(decode_field).unwrap_or_default();
        let value = self.value.as_deref().map(decode_field).unwrap_or_default();
        !key.is_empty() && !value.is_empty()
    }

    /// Emits the pending record if it is complete, resetting the state.
    /// An incomplete record is left untouched.
    pub fn take_unit(&mut self) -> Option<ParsedUnit> {
        let key = self.key.as_deref().map(decode_field).unwrap_or_default();
        let value = self.value.as_deref().map(decode_field).unwrap_or_default();
        if key.is_empty() || value.is_empty() {
            return None;
        }

        let comment = self
            .comment
            .take()
            .filter(|comment| !comment.is_empty() && !is_section_marker(comment));
        self.reset();
        Some(ParsedUnit {
            comment,
            key,
            value,
        })
    }

    fn append(&mut self, field: Field, fragment: &str) {
        let slot = match field {
            Field::Key => &mut self.key,
            Field::Value => &mut self.value,
        };
        let text = slot.get_or_insert_with(String::new);
        text.push_str(CONTINUATION_MARKER);
        text.push_str(fragment);
    }
}

fn decode_field(raw: &str) -> String {
    unescape(&strip_continuations(raw))
}

fn is_section_marker(comment: &str) -> bool {
    comment.starts_with(SECTION_MARKER) || comment == SECTION_MARKER.trim_end()
}

fn clean_comment(raw: &str) -> String {
    let trimmed = raw.trim_end();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unescape(unquoted)
}

/// Single-pass PO record parser.
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    consume_comments: bool,
    state: ParserState,
    line_number: usize,
}

impl RecordParser {
    /// Creates a parser. With `consume_comments` off, comment lines are
    /// recognised but never captured.
    pub fn new(consume_comments: bool) -> Self {
        Self {
            consume_comments,
            ..Self::default()
        }
    }

    /// The record accumulated so far.
    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Feeds one physical line (without terminator). Returns the unit
    /// completed by this line, if any.
    pub fn feed_line(&mut self, line: &str) -> Option<ParsedUnit> {
        self.line_number += 1;

        if let Some(field) = self.state.open
            && let Some(captures) = CONTINUATION_REGEX.captures(line)
        {
            self.state.append(field, &captures[1]);
            return None;
        }
        self.state.open = None;

        if line.trim().is_empty() {
            let unit = self.state.take_unit();
            self.state.reset();
            return unit;
        }

        if let Some(captures) = COMMENT_REGEX.captures(line) {
            let unit = self.state.take_unit();
            if self.consume_comments {
                self.state.comment = Some(clean_comment(&captures[1]));
            }
            return unit;
        }

        if let Some(captures) = KEY_REGEX.captures(line) {
            let unit = self.state.take_unit();
            self.state.key = Some(captures[1].to_string());
            self.state.open = Some(Field::Key);
            return unit;
        }

        if let Some(captures) = VALUE_REGEX.captures(line) {
            let unit = self.state.take_unit();
            self.state.value = Some(captures[1].to_string());
            self.state.open = Some(Field::Value);
            return unit;
        }

        tracing::trace!(line = self.line_number, "skipping unrecognized line");
        None
    }

    /// Signals end of input. Returns the pending unit if it is complete;
    /// an incomplete one is discarded.
    pub fn finish(&mut self) -> Option<ParsedUnit> {
        let unit = self.state.take_unit();
        if unit.is_none() && self.state.key.is_some() {
            tracing::trace!("discarding msgid without msgstr at end of input");
        }
        self.state.reset();
        unit
    }
}

/// Parses every line of `lines`, handing each completed unit to `emit`.
///
/// Only I/O failures are reported; malformed lines are skipped.
pub fn for_each_unit<R, F>(
    lines: LineReader<R>,
    consume_comments: bool,
    mut emit: F,
) -> Result<(), Error>
where
    R: BufRead,
    F: FnMut(ParsedUnit),
{
    let mut parser = RecordParser::new(consume_comments);
    for line in lines {
        if let Some(unit) = parser.feed_line(&line?) {
            tracing::trace!(key = %unit.key, "parsed unit");
            emit(unit);
        }
    }
    if let Some(unit) = parser.finish() {
        tracing::trace!(key = %unit.key, "parsed unit");
        emit(unit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;
    use indoc::indoc;
    use std::io::Cursor;

    fn parse(content: &str, consume_comments: bool) -> Vec<ParsedUnit> {
        let lines = LineReader::new(Cursor::new(content.as_bytes().to_vec()), TextEncoding::Utf8);
        let mut units = Vec::new();
        for_each_unit(lines, consume_comments, |unit| units.push(unit)).unwrap();
        units
    }

    #[test]
    fn test_parse_basic_record_with_comment() {
        let units = parse(
            indoc! {r#"
                #. Greeting for the user
                # base translation: "Hello"
                msgid "greeting"
                msgstr "Bonjour"
            "#},
            true,
        );
        assert_eq!(
            units,
            vec![ParsedUnit {
                comment: Some("Greeting for the user".to_string()),
                key: "greeting".to_string(),
                value: "Bonjour".to_string(),
            }]
        );
    }

    #[test]
    fn test_unescapes_key_and_value() {
        let units = parse(
            indoc! {r#"
                msgid "say \"hi\""
                msgstr "He said \"hi\""
            "#},
            true,
        );
        assert_eq!(units[0].key, r#"say "hi""#);
        assert_eq!(units[0].value, r#"He said "hi""#);
    }

    #[test]
    fn test_multiline_value_collapses_to_one_string() {
        let units = parse(
            indoc! {r#"
                msgid "long"
                msgstr ""
                "This is line 1. "
                "This is line 2."
            "#},
            true,
        );
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].value, "This is line 1. This is line 2.");
        assert!(!units[0].value.contains('"'));
    }

    #[test]
    fn test_multiline_key() {
        let units = parse(
            indoc! {r#"
                msgid ""
                "long."
                "key"
                msgstr "v"
            "#},
            true,
        );
        assert_eq!(units[0].key, "long.key");
    }

    #[test]
    fn test_section_marker_comment_is_not_attached() {
        let units = parse(
            indoc! {r#"
                #. --------- General ---------#
                msgid "a"
                msgstr "b"
            "#},
            true,
        );
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].comment, None);
    }

    #[test]
    fn test_comments_ignored_when_not_consumed() {
        let units = parse(
            indoc! {r#"
                #. A comment
                msgid "a"
                msgstr "b"
            "#},
            false,
        );
        assert_eq!(units[0].comment, None);
    }

    #[test]
    fn test_comment_does_not_leak_into_next_record() {
        let units = parse(
            indoc! {r#"
                #. First
                msgid "one"
                msgstr "1"

                msgid "two"
                msgstr "2"
            "#},
            true,
        );
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].comment.as_deref(), Some("First"));
        assert_eq!(units[1].comment, None);
        assert_eq!(units[1].key, "two");
        assert_eq!(units[1].value, "2");
    }

    #[test]
    fn test_records_without_blank_lines() {
        let units = parse(
            indoc! {r#"
                msgid "one"
                msgstr "1"
                #. Second
                msgid "two"
                msgstr "2"
            "#},
            true,
        );
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].comment, None);
        assert_eq!(units[1].comment.as_deref(), Some("Second"));
    }

    #[test]
    fn test_msgid_without_msgstr_is_discarded() {
        let units = parse(
            indoc! {r#"
                msgid "orphan"

                msgid "a"
                msgstr "b"

                msgid "dangling"
            "#},
            true,
        );
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].key, "a");
    }

    #[test]
    fn test_blank_line_between_msgid_and_msgstr_drops_record() {
        let units = parse("msgid \"k\"\n\nmsgstr \"v\"\n", true);
        assert!(units.is_empty());
    }

    #[test]
    fn test_empty_key_or_value_is_not_emitted() {
        let units = parse(
            indoc! {r#"
                msgid ""
                msgstr "Content-Type: text/plain; charset=UTF-8"

                msgid "untranslated"
                msgstr ""
            "#},
            true,
        );
        assert!(units.is_empty());
    }

    #[test]
    fn test_unrecognized_lines_are_skipped() {
        let units = parse(
            indoc! {r#"
                ##
                 # PO Strings File
                #, fuzzy
                msgctxt "menu"
                garbage line
                msgid "a"
                msgstr "b"
            "#},
            true,
        );
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].comment, None);
    }

    #[test]
    fn test_quoted_comment_is_unwrapped() {
        let units = parse(
            indoc! {r#"
                #. "Shown on \"Save\""
                msgid "save"
                msgstr "Save"
            "#},
            true,
        );
        assert_eq!(units[0].comment.as_deref(), Some(r#"Shown on "Save""#));
    }

    #[test]
    fn test_state_is_reset_after_emission() {
        let mut parser = RecordParser::new(true);
        assert_eq!(parser.feed_line("#. note"), None);
        assert_eq!(parser.feed_line(r#"msgid "k""#), None);
        assert_eq!(parser.feed_line(r#"msgstr "v""#), None);
        assert!(parser.state().is_complete());

        let unit = parser.feed_line("").unwrap();
        assert_eq!(unit.comment.as_deref(), Some("note"));
        assert_eq!(parser.state(), &ParserState::default());
        assert_eq!(parser.finish(), None);
    }
}
