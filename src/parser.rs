//! Line format of rule files.
//!
//! One rule per LF-terminated line, fields separated by the literal
//! delimiter `[^o^]`. The delimiter was chosen by the rule corpus to be a
//! sequence that never occurs in a regex or URL, so no field escaping
//! exists. Lines starting with `#` are comments.

pub(crate) const FIELD_DELIMITER: &str = "[^o^]";

/// Fields of one retained rule line, borrowed from the line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RuleLine<'a> {
    pub regex: &'a str,
    pub payload: &'a str,
    pub shortcut: Option<&'a str>,
}

/// Splits a rule file line into its fields.
///
/// Returns `None` for blank lines and comments. A missing payload field is
/// an empty payload.
pub(crate) fn parse_line(line: &str) -> Option<RuleLine<'_>> {
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields = line.splitn(3, FIELD_DELIMITER);
    let regex = fields.next()?;
    let payload = fields.next().unwrap_or("");
    let shortcut = fields.next();

    Some(RuleLine {
        regex,
        payload,
        shortcut,
    })
}
