//! Classification of single `.stew` lines.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// One non-blank, trimmed line of a `.stew` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `[[Section]]`, kept verbatim.
    Section(&'a str),
    /// `[key]`, kept verbatim including the brackets.
    Key(&'a str),
    /// `left = right`, both sides trimmed.
    Translation { left: &'a str, right: &'a str },
    /// Anything else. This is a structural error inside a key block.
    Malformed(&'a str),
}

impl<'a> Line<'a> {
    /// Classify a trimmed, non-empty line.
    pub fn classify(line: &'a str) -> Line<'a> {
        if line.starts_with("[[") {
            Line::Section(line)
        } else if line.starts_with('[') {
            Line::Key(line)
        } else {
            match line.split_once('=') {
                Some((left, right)) => Line::Translation {
                    left: left.trim(),
                    right: right.trim(),
                },
                None => Line::Malformed(line),
            }
        }
    }
}

/// Metadata attached to a key instead of a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataKind {
    Comment,
    Tags,
}

impl MetadataKind {
    /// The left-hand side used for this kind in a `.stew` file.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKind::Comment => "comment",
            MetadataKind::Tags => "tags",
        }
    }

    fn from_str(name: &str) -> Option<MetadataKind> {
        match name {
            "comment" => Some(MetadataKind::Comment),
            "tags" => Some(MetadataKind::Tags),
            _ => None,
        }
    }
}

/// What the left-hand side of a translation line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Metadata(MetadataKind),
    Singular(&'a str),
    Plural(&'a str, usize),
}

/// The left-hand side could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    Empty,
    BadIndex,
}

/// Decode `comment`, `tags`, `lang` or `lang[N]`.
pub fn parse_target(left: &str) -> Result<Target<'_>, TargetError> {
    if left.is_empty() {
        return Err(TargetError::Empty);
    }
    if let Some(kind) = MetadataKind::from_str(left) {
        return Ok(Target::Metadata(kind));
    }
    let Some((lang, rest)) = left.split_once('[') else {
        return Ok(Target::Singular(left));
    };
    let lang = lang.trim_end();
    if lang.is_empty() {
        return Err(TargetError::Empty);
    }
    let index = rest
        .strip_suffix(']')
        .map(str::trim)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .ok_or(TargetError::BadIndex)?;
    Ok(Target::Plural(lang, index))
}

fn dots_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.{3,}").expect("well-formed regex"))
}

/// Returns true if `text` contains a run of four or more dots.
pub fn has_many_dots(text: &str) -> bool {
    dots_re().find_iter(text).any(|m| m.len() >= 4)
}

/// Replace every run of exactly three dots with `…`.
///
/// Longer runs are left untouched.
pub fn normalize_value(text: &str) -> Cow<'_, str> {
    dots_re().replace_all(text, |caps: &regex::Captures| {
        let run = &caps[0];
        if run.len() == 3 {
            String::from("…")
        } else {
            String::from(run)
        }
    })
}
