// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! BIND zone file parser
//!
//! This module turns BIND-format zone file text into a [`ParsedZone`]. The
//! parser is lenient: lines it cannot understand are skipped and reported
//! as warnings, so a file with a few malformed lines still yields the
//! well-formed remainder.
//!
//! Supported syntax:
//! - `$ORIGIN` and `$TTL` directives (other directives are skipped with a warning)
//! - `;` comments, except inside quoted strings
//! - Parenthesized multi-line records
//! - Optional TTL (with `s`/`m`/`h`/`d`/`w`/`y` suffixes) and `IN` class, in either order
//! - `@`, relative and absolute owner names, and owner inheritance on indented lines
//!
//! # Examples
//!
//! ```rust
//! use zonecar::zone_parser::ZoneFileParser;
//!
//! let zone = r#"
//! $ORIGIN example.com.
//! $TTL 3600
//! @    IN  SOA  ns1.example.com. admin.example.com. 2024010101 3600 900 1209600 86400
//! www  IN  A    192.0.2.1
//! "#;
//!
//! let parsed = ZoneFileParser::new(300).parse(zone);
//! assert_eq!(parsed.origin.as_deref(), Some("example.com"));
//! assert_eq!(parsed.records[1].name, "www.example.com");
//! ```

use crate::zone_types::{ParsedRecord, ParsedZone, RecordType};
use nom::{
    branch::alt,
    bytes::complete::{is_not, take_while1},
    character::complete::{anychar, char, digit1, multispace0, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::{many0, many1},
    sequence::{pair, preceded, tuple},
    IResult,
};
use tracing::debug;

/// Default TTL when the file has no `$TTL` directive
pub const DEFAULT_ZONE_TTL: u32 = 86400;

/// Default value substituted for the auto TTL placeholder
pub const DEFAULT_AUTO_TTL_VALUE: u32 = 300;

/// TTL some providers (Cloudflare) export for "automatic"
pub const AUTO_TTL_PLACEHOLDER: u32 = 1;

// ========== TTL Grammar ==========

fn ttl_unit_seconds(unit: char) -> u64 {
    match unit.to_ascii_lowercase() {
        'm' => 60,
        'h' => 3_600,
        'd' => 86_400,
        'w' => 604_800,
        'y' => 31_536_000,
        _ => 1,
    }
}

/// Parse one TTL group: digits with an optional unit suffix (e.g., "1d", "30")
fn ttl_group(input: &str) -> IResult<&str, u64> {
    let (input, value) = map_res(digit1, |s: &str| s.parse::<u64>())(input)?;
    let (input, unit) = opt(one_of("smhdwySMHDWY"))(input)?;
    Ok((input, value.saturating_mul(unit.map_or(1, ttl_unit_seconds))))
}

/// Parse a TTL made of one or more groups: "3600", "1d1h", "1w2d3h"
fn ttl_value(input: &str) -> IResult<&str, u32> {
    let (input, groups) = many1(ttl_group)(input)?;
    let total = groups
        .into_iter()
        .fold(0u64, |acc, seconds| acc.saturating_add(seconds));
    Ok((input, u32::try_from(total).unwrap_or(u32::MAX)))
}

/// Parse a TTL value in seconds
///
/// Accepts bare integers and compound unit notation. Returns `None` when the
/// value is not a TTL.
///
/// ```rust
/// use zonecar::zone_parser::parse_ttl;
///
/// assert_eq!(parse_ttl("1d1h"), Some(90000));
/// assert_eq!(parse_ttl("1w2d"), Some(777600));
/// assert_eq!(parse_ttl("IN"), None);
/// ```
pub fn parse_ttl(value: &str) -> Option<u32> {
    all_consuming(ttl_value)(value.trim())
        .ok()
        .map(|(_, ttl)| ttl)
}

// ========== Line Tokenizer ==========

/// Parse a double-quoted string, keeping quotes and escapes verbatim
fn quoted_token(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        char('"'),
        many0(alt((recognize(pair(char('\\'), anychar)), is_not("\\\"")))),
        opt(char('"')),
    )))(input)
}

/// Parse a run of non-whitespace, non-quote characters
fn bare_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '"')(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    alt((quoted_token, bare_token))(input)
}

/// Split a logical line into tokens
fn tokenize(line: &str) -> Vec<&str> {
    match many0(preceded(multispace0, token))(line) {
        Ok((_, tokens)) => tokens,
        Err(_) => Vec::new(),
    }
}

// ========== Comments and Continuations ==========

/// Tracks whether characters of a line sit inside a quoted string
#[derive(Debug, Default)]
struct QuoteTracker {
    in_quote: bool,
    escaped: bool,
}

impl QuoteTracker {
    /// Feed one character; returns true for characters outside any quoted string
    fn outside(&mut self, c: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match c {
            '\\' if self.in_quote => {
                self.escaped = true;
                false
            }
            '"' => {
                self.in_quote = !self.in_quote;
                false
            }
            _ => !self.in_quote,
        }
    }

    fn is_closed(&self) -> bool {
        !self.in_quote
    }
}

/// Remove a `;` comment, leaving semicolons inside quotes alone
fn strip_comment(line: &str) -> &str {
    let mut quotes = QuoteTracker::default();
    for (i, c) in line.char_indices() {
        if quotes.outside(c) && c == ';' {
            return &line[..i];
        }
    }
    line
}

/// Net number of unquoted open parentheses on a comment-free line
fn paren_depth_delta(line: &str) -> i32 {
    let mut quotes = QuoteTracker::default();
    line.chars().fold(0, |depth, c| match (quotes.outside(c), c) {
        (true, '(') => depth + 1,
        (true, ')') => depth - 1,
        _ => depth,
    })
}

fn remove_unquoted_parens(line: &str) -> String {
    let mut quotes = QuoteTracker::default();
    line.chars()
        .filter(|&c| !(quotes.outside(c) && (c == '(' || c == ')')))
        .collect()
}

/// A comment-free logical line with the source line number it started on
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogicalLine {
    number: usize,
    text: String,
}

/// Strip comments and join parenthesized multi-line records into single lines
fn join_multiline_records(content: &str) -> Vec<LogicalLine> {
    let mut result = Vec::new();
    let mut pending: Option<(usize, String, i32)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = strip_comment(raw);
        let delta = paren_depth_delta(line);

        match pending.take() {
            Some((number, mut buffer, depth)) => {
                buffer.push(' ');
                buffer.push_str(line.trim());
                let depth = depth + delta;
                if depth <= 0 {
                    result.push(LogicalLine {
                        number,
                        text: remove_unquoted_parens(&buffer),
                    });
                } else {
                    pending = Some((number, buffer, depth));
                }
            }
            None if delta > 0 => pending = Some((idx + 1, line.to_string(), delta)),
            None => result.push(LogicalLine {
                number: idx + 1,
                text: remove_unquoted_parens(line),
            }),
        }
    }

    // Unclosed group at end of input
    if let Some((number, buffer, _)) = pending {
        debug!("unbalanced parentheses starting at line {}", number);
        result.push(LogicalLine {
            number,
            text: remove_unquoted_parens(&buffer),
        });
    }

    result
}

// ========== Names ==========

/// Qualify a name against the origin, returning it without trailing dot
fn qualify(name: &str, origin: Option<&str>) -> String {
    if name == "@" || name.is_empty() {
        return origin.unwrap_or_default().to_string();
    }
    if let Some(absolute) = name.strip_suffix('.') {
        return absolute.to_string();
    }
    match origin {
        Some(origin) if !origin.is_empty() => format!("{}.{}", name, origin),
        _ => name.to_string(),
    }
}

/// Qualify a target that must stay visible when it is the root
fn qualify_or_root(name: &str, origin: Option<&str>) -> String {
    let qualified = qualify(name, origin);
    if qualified.is_empty() {
        ".".to_string()
    } else {
        qualified
    }
}

/// Infer the zone origin from record names
///
/// Returns the longest label suffix shared by every name (case-insensitive),
/// provided it has at least two labels.
pub fn infer_origin(records: &[ParsedRecord]) -> Option<String> {
    let mut names = records.iter().map(|r| r.name.to_ascii_lowercase());
    let first = names.next()?;
    let mut suffix: Vec<String> = first.split('.').rev().map(str::to_string).collect();

    for name in names {
        let common = suffix
            .iter()
            .zip(name.split('.').rev())
            .take_while(|(a, b)| a.as_str() == *b)
            .count();
        suffix.truncate(common);
    }

    if suffix.len() < 2 || suffix.iter().any(|label| label.is_empty()) {
        return None;
    }

    suffix.reverse();
    Some(suffix.join("."))
}

// ========== Record Data ==========

/// Wrap every character-string in quotes, keeping quoted ones verbatim
fn quote_strings(tokens: &[&str]) -> String {
    tokens
        .iter()
        .map(|t| {
            if t.starts_with('"') {
                let mut quotes = QuoteTracker::default();
                t.chars().for_each(|c| {
                    quotes.outside(c);
                });
                if quotes.is_closed() {
                    t.to_string()
                } else {
                    format!("{}\"", t)
                }
            } else {
                format!("\"{}\"", t)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the stored content and priority for a record
///
/// Returns `None` when mandatory fields are missing or a priority is not numeric.
fn build_rdata(
    record_type: RecordType,
    rdata: &[&str],
    origin: Option<&str>,
) -> Option<(String, u16)> {
    match record_type {
        RecordType::Mx | RecordType::Kx => match rdata {
            [priority, target, ..] => Some((qualify(target, origin), priority.parse().ok()?)),
            _ => None,
        },
        RecordType::Srv => match rdata {
            [priority, weight, port, target, ..] => Some((
                format!("{} {} {}", weight, port, qualify_or_root(target, origin)),
                priority.parse().ok()?,
            )),
            _ => None,
        },
        RecordType::Soa => match rdata {
            [mname, rname, serial, refresh, retry, expire, minimum, ..] => Some((
                format!(
                    "{} {} {} {} {} {} {}",
                    qualify_or_root(mname, origin),
                    qualify_or_root(rname, origin),
                    serial,
                    refresh,
                    retry,
                    expire,
                    minimum
                ),
                0,
            )),
            _ => None,
        },
        RecordType::Afsdb => match rdata {
            [subtype, host, ..] => Some((qualify(host, origin), subtype.parse().ok()?)),
            [host] => Some((qualify(host, origin), 0)),
            [] => None,
        },
        RecordType::Ns | RecordType::Cname | RecordType::Ptr | RecordType::Dname => {
            rdata.first().map(|target| (qualify(target, origin), 0))
        }
        text if text.is_text() => Some((quote_strings(rdata), 0)),
        RecordType::Caa => match rdata {
            [flags, tag, value @ ..] if !value.is_empty() => {
                Some((format!("{} {} {}", flags, tag, value.join(" ")), 0))
            }
            _ => None,
        },
        RecordType::Naptr => match rdata {
            [order, preference, flags, services, regexp, replacement, ..] => Some((
                format!(
                    "{} {} {} {} {} {}",
                    order,
                    preference,
                    flags,
                    services,
                    regexp,
                    qualify_or_root(replacement, origin)
                ),
                0,
            )),
            _ => None,
        },
        _ => Some((rdata.join(" "), 0)),
    }
}

// ========== Parser ==========

/// Parser state threaded through the lines of a zone file
#[derive(Debug)]
struct ParseState {
    origin: Option<String>,
    default_ttl: u32,
    previous_name: Option<String>,
    records: Vec<ParsedRecord>,
    warnings: Vec<String>,
}

impl ParseState {
    fn new() -> Self {
        Self {
            origin: None,
            default_ttl: DEFAULT_ZONE_TTL,
            previous_name: None,
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn apply(mut self, line: &LogicalLine, auto_ttl_value: Option<u32>) -> Self {
        let trimmed = line.text.trim();
        if trimmed.is_empty() {
            return self;
        }

        if trimmed.starts_with('$') {
            return self.apply_directive(line.number, trimmed);
        }

        match self.parse_record_line(&line.text) {
            Some(mut record) => {
                if record.ttl == AUTO_TTL_PLACEHOLDER {
                    if let Some(value) = auto_ttl_value {
                        record.ttl = value;
                    }
                }
                self.previous_name = Some(record.name.clone());
                self.records.push(record);
            }
            None => {
                debug!("skipping unparseable line {}: {}", line.number, trimmed);
                self.warnings.push(format!(
                    "Line {}: Could not parse record, skipped",
                    line.number
                ));
            }
        }

        self
    }

    fn apply_directive(mut self, number: usize, line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let directive = parts.next().unwrap_or_default().to_ascii_uppercase();

        match (directive.as_str(), parts.next()) {
            ("$ORIGIN", Some(origin)) => {
                let origin = origin.trim_end_matches('.').to_string();
                debug!("origin set to '{}' at line {}", origin, number);
                self.origin = Some(origin);
            }
            ("$ORIGIN", None) => {
                self.warnings.push(format!(
                    "Line {}: $ORIGIN without a domain, ignored",
                    number
                ));
            }
            ("$TTL", Some(value)) => match parse_ttl(value) {
                Some(ttl) => {
                    debug!("default ttl set to {} at line {}", ttl, number);
                    self.default_ttl = ttl;
                }
                None => {
                    self.warnings.push(format!(
                        "Line {}: Invalid $TTL value \"{}\", keeping {}",
                        number, value, self.default_ttl
                    ));
                }
            },
            ("$TTL", None) => self.default_ttl = DEFAULT_ZONE_TTL,
            _ => {
                debug!("skipping unsupported directive {} at line {}", directive, number);
                self.warnings.push(format!(
                    "Line {}: Unsupported directive \"{}\", skipped",
                    number, directive
                ));
            }
        }

        self
    }

    /// Parse `[name] [ttl] [class] type rdata...`
    fn parse_record_line(&self, line: &str) -> Option<ParsedRecord> {
        let inherits_name = line.starts_with(&[' ', '\t'][..]);
        let tokens = tokenize(line);
        if tokens.len() < 2 {
            return None;
        }

        let origin = self.origin.as_deref();
        let mut rest = tokens.as_slice();

        let name = if inherits_name {
            self.previous_name
                .clone()
                .unwrap_or_else(|| origin.unwrap_or_default().to_string())
        } else {
            let (owner, tail) = rest.split_first()?;
            rest = tail;
            qualify(owner, origin)
        };

        // TTL and class may appear in either order before the type
        let mut ttl = None;
        let mut class_seen = false;
        for _ in 0..2 {
            let Some((candidate, tail)) = rest.split_first() else {
                break;
            };
            if !class_seen && candidate.eq_ignore_ascii_case("IN") {
                class_seen = true;
                rest = tail;
            } else if let (None, Some(value)) = (ttl, parse_ttl(candidate)) {
                ttl = Some(value);
                rest = tail;
            } else {
                break;
            }
        }

        let (type_token, rdata) = rest.split_first()?;
        let record_type = RecordType::parse(type_token)?;
        if rdata.is_empty() {
            return None;
        }

        let (content, priority) = build_rdata(record_type, rdata, origin)?;

        Some(ParsedRecord::new(
            name,
            ttl.unwrap_or(self.default_ttl),
            record_type,
            content,
            priority,
        ))
    }

    fn finish(self) -> ParsedZone {
        let ParseState {
            origin,
            default_ttl,
            records,
            warnings,
            ..
        } = self;

        let origin = origin.or_else(|| infer_origin(&records));

        ParsedZone {
            origin,
            default_ttl,
            records,
            warnings,
        }
    }
}

/// BIND zone file parser
///
/// The parser holds only its auto TTL policy; every call to [`parse`](Self::parse)
/// is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneFileParser {
    auto_ttl_value: Option<u32>,
}

impl Default for ZoneFileParser {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_TTL_VALUE)
    }
}

impl ZoneFileParser {
    /// Create a parser that maps a TTL of `1` to `auto_ttl_value`
    pub fn new(auto_ttl_value: u32) -> Self {
        Self {
            auto_ttl_value: Some(auto_ttl_value),
        }
    }

    /// Create a parser that takes a TTL of `1` literally
    pub fn without_auto_ttl() -> Self {
        Self {
            auto_ttl_value: None,
        }
    }

    /// The value substituted for the auto TTL placeholder, if enabled
    pub fn auto_ttl_value(&self) -> Option<u32> {
        self.auto_ttl_value
    }

    /// Parse zone file content
    ///
    /// Never fails: unparseable lines and unsupported directives end up in
    /// [`ParsedZone::warnings`].
    pub fn parse(&self, content: &str) -> ParsedZone {
        let zone = join_multiline_records(content)
            .iter()
            .fold(ParseState::new(), |state, line| {
                state.apply(line, self.auto_ttl_value)
            })
            .finish();

        debug!(
            "parsed zone file: {} records, {} warnings",
            zone.record_count(),
            zone.warnings.len()
        );

        zone
    }
}

#[cfg(test)]
#[path = "zone_parser_tests.rs"]
mod tests;
