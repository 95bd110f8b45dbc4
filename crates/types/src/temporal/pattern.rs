//! Culture date/time patterns
//!
//! Patterns use the familiar token letters:
//!
//! | Token          | Meaning                                   |
//! |----------------|-------------------------------------------|
//! | `d` `dd`       | day of month, unpadded / two digits       |
//! | `ddd` `dddd`   | abbreviated / full day name               |
//! | `M` `MM`       | month number, unpadded / two digits       |
//! | `MMM` `MMMM`   | abbreviated / full month name             |
//! | `yy` `yyyy`    | two / four digit year                     |
//! | `H` `HH`       | 24-hour clock                             |
//! | `h` `hh`       | 12-hour clock                             |
//! | `m` `mm`       | minutes                                   |
//! | `s` `ss`       | seconds                                   |
//! | `t` `tt`       | first letter / full AM-PM designator      |
//! | `'...'`        | quoted literal                            |
//!
//! Formatting is exact. Parsing is forgiving: numbers may have one or two
//! digits, month names may be full or abbreviated in any case, day names
//! are skipped, `/ - .` stand in for each other, and tokens left over once
//! the input runs out are simply not filled in.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use formtype_culture::CultureInfo;

// ============================================================================
// TOKENS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Day(usize),
    Month(usize),
    Year(usize),
    Hour24(usize),
    Hour12(usize),
    Minute(usize),
    Second(usize),
    Designator(usize),
    Literal(String),
}

/// A tokenized pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Pattern {
    tokens: Vec<Token>,
}

/// Date and time parts read from or written to text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Fields {
    pub(crate) year: Option<i32>,
    pub(crate) month: Option<u32>,
    pub(crate) day: Option<u32>,
    /// Days from Sunday.
    pub(crate) weekday: Option<u32>,
    pub(crate) hour: Option<u32>,
    pub(crate) minute: Option<u32>,
    pub(crate) second: Option<u32>,
}

impl Fields {
    pub(crate) fn from_date(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year()),
            month: Some(date.month()),
            day: Some(date.day()),
            weekday: Some(date.weekday().num_days_from_sunday()),
            ..Self::default()
        }
    }

    pub(crate) fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self {
            hour: Some(datetime.hour()),
            minute: Some(datetime.minute()),
            second: Some(datetime.second()),
            ..Self::from_date(datetime.date())
        }
    }

    pub(crate) fn from_clock(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: Some(hour),
            minute: Some(minute),
            second: Some(second),
            ..Self::default()
        }
    }

    /// Builds a calendar date when year, month and day are all present and
    /// form a real date.
    pub(crate) fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }

    /// Seconds since midnight. Hour and minute are required, seconds
    /// default to zero.
    pub(crate) fn clock_seconds(&self) -> Option<i64> {
        let (hour, minute, second) = (self.hour?, self.minute?, self.second.unwrap_or(0));
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(i64::from(hour) * 3600 + i64::from(minute) * 60 + i64::from(second))
    }
}

impl Pattern {
    pub(crate) fn new(pattern: &str) -> Self {
        let mut tokens: Vec<Token> = Vec::new();
        let mut chars = pattern.chars().peekable();
        let push_literal = |tokens: &mut Vec<Token>, text: &str| {
            if let Some(Token::Literal(last)) = tokens.last_mut() {
                last.push_str(text);
            } else {
                tokens.push(Token::Literal(text.to_string()));
            }
        };

        while let Some(ch) = chars.next() {
            match ch {
                '\'' | '"' => {
                    let mut literal = String::new();
                    for next in chars.by_ref() {
                        if next == ch {
                            break;
                        }
                        literal.push(next);
                    }
                    push_literal(&mut tokens, &literal);
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        push_literal(&mut tokens, &next.to_string());
                    }
                }
                'd' | 'M' | 'y' | 'H' | 'h' | 'm' | 's' | 't' => {
                    let mut count = 1;
                    while chars.peek() == Some(&ch) {
                        chars.next();
                        count += 1;
                    }
                    tokens.push(match ch {
                        'd' => Token::Day(count),
                        'M' => Token::Month(count),
                        'y' => Token::Year(count),
                        'H' => Token::Hour24(count),
                        'h' => Token::Hour12(count),
                        'm' => Token::Minute(count),
                        's' => Token::Second(count),
                        _ => Token::Designator(count),
                    });
                }
                other => push_literal(&mut tokens, &other.to_string()),
            }
        }
        Self { tokens }
    }

    /// Whether the pattern contains month or day names.
    pub(crate) fn uses_names(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, Token::Day(n) | Token::Month(n) if *n >= 3))
    }

    // ------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------

    pub(crate) fn format(&self, fields: &Fields, culture: &CultureInfo) -> String {
        let names = &culture.date;
        let mut out = String::new();
        for token in &self.tokens {
            match *token {
                Token::Day(n) if n >= 3 => {
                    let list = if n == 3 {
                        &names.abbreviated_day_names
                    } else {
                        &names.day_names
                    };
                    if let Some(name) = fields.weekday.and_then(|w| list.get(w as usize)) {
                        out.push_str(name);
                    }
                }
                Token::Day(n) => push_number(&mut out, fields.day.unwrap_or(0), n),
                Token::Month(n) if n >= 3 => {
                    let list = if n == 3 {
                        &names.abbreviated_month_names
                    } else {
                        &names.month_names
                    };
                    let index = fields.month.and_then(|m| (m as usize).checked_sub(1));
                    if let Some(name) = index.and_then(|i| list.get(i)) {
                        out.push_str(name);
                    }
                }
                Token::Month(n) => push_number(&mut out, fields.month.unwrap_or(0), n),
                Token::Year(n) => {
                    let year = fields.year.unwrap_or(0);
                    if n <= 2 {
                        push_number(&mut out, year.rem_euclid(100) as u32, 2);
                    } else {
                        out.push_str(&format!("{year:0width$}", width = n.min(4)));
                    }
                }
                Token::Hour24(n) => push_number(&mut out, fields.hour.unwrap_or(0), n),
                Token::Hour12(n) => {
                    let hour = fields.hour.unwrap_or(0) % 12;
                    push_number(&mut out, if hour == 0 { 12 } else { hour }, n);
                }
                Token::Minute(n) => push_number(&mut out, fields.minute.unwrap_or(0), n),
                Token::Second(n) => push_number(&mut out, fields.second.unwrap_or(0), n),
                Token::Designator(n) => {
                    let designator = if fields.hour.unwrap_or(0) < 12 {
                        &culture.time.am_designator
                    } else {
                        &culture.time.pm_designator
                    };
                    if n == 1 {
                        out.extend(designator.chars().next());
                    } else {
                        out.push_str(designator);
                    }
                }
                Token::Literal(ref text) => out.push_str(text),
            }
        }
        out.trim().to_string()
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Reads `text` against the pattern. Returns `None` when the text does
    /// not fit; range checks are left to the caller.
    pub(crate) fn parse(&self, text: &str, culture: &CultureInfo) -> Option<Fields> {
        let input = text.trim().to_lowercase();
        let mut rest = input.as_str();
        let mut fields = Fields::default();
        let mut pm = None;

        for token in &self.tokens {
            if rest.trim_start().is_empty() {
                break;
            }
            match token {
                Token::Literal(literal) => rest = match_literal(rest, literal)?,
                Token::Day(n) if *n >= 3 => {
                    let names = culture.date.day_names.iter();
                    let abbreviated = culture.date.abbreviated_day_names.iter();
                    if let Some((_, after)) = match_name(rest, names.chain(abbreviated)) {
                        rest = after;
                    }
                }
                Token::Day(_) => {
                    let (day, after) = read_number(rest, 2)?;
                    fields.day = Some(day);
                    rest = after;
                }
                Token::Month(_) => {
                    let names = culture.date.month_names.iter();
                    let abbreviated = culture.date.abbreviated_month_names.iter();
                    let (month, after) = match read_number(rest, 2) {
                        Some(found) => found,
                        None => {
                            let (index, after) = match_name(rest, names.chain(abbreviated))?;
                            ((index % 12) as u32 + 1, after)
                        }
                    };
                    fields.month = Some(month);
                    rest = after;
                }
                Token::Year(_) => {
                    let start = rest.trim_start();
                    let width = start.chars().take_while(char::is_ascii_digit).take(4).count();
                    let (year, after) = read_number(start, 4)?;
                    let year = year as i32;
                    fields.year = Some(if width <= 2 {
                        culture.expand_two_digit_year(year)
                    } else {
                        year
                    });
                    rest = after;
                }
                Token::Hour24(_) | Token::Hour12(_) => {
                    let (hour, after) = read_number(rest, 2)?;
                    fields.hour = Some(hour);
                    rest = after;
                }
                Token::Minute(_) => {
                    let (minute, after) = read_number(rest, 2)?;
                    fields.minute = Some(minute);
                    rest = after;
                }
                Token::Second(_) => {
                    let (second, after) = read_number(rest, 2)?;
                    fields.second = Some(second);
                    rest = after;
                }
                Token::Designator(_) => {
                    if let Some((is_pm, after)) = match_designator(rest, culture) {
                        pm = Some(is_pm);
                        rest = after;
                    }
                }
            }
        }

        if !rest.trim().is_empty() {
            return None;
        }
        if let (Some(is_pm), Some(hour)) = (pm, fields.hour) {
            fields.hour = Some(match (is_pm, hour) {
                (true, h) if h < 12 => h + 12,
                (false, 12) => 0,
                (_, h) => h,
            });
        }
        Some(fields)
    }
}

fn push_number(out: &mut String, value: u32, width: usize) {
    if width >= 2 {
        out.push_str(&format!("{value:02}"));
    } else {
        out.push_str(&value.to_string());
    }
}

fn read_number(text: &str, max_digits: usize) -> Option<(u32, &str)> {
    let text = text.trim_start();
    let len = text
        .bytes()
        .take(max_digits)
        .take_while(u8::is_ascii_digit)
        .count();
    if len == 0 {
        return None;
    }
    let value = text[..len].parse().ok()?;
    Some((value, &text[len..]))
}

fn is_date_separator(ch: char) -> bool {
    matches!(ch, '/' | '-' | '.')
}

fn match_literal<'a>(mut rest: &'a str, literal: &str) -> Option<&'a str> {
    for expected in literal.to_lowercase().chars() {
        rest = rest.trim_start();
        if expected.is_whitespace() || rest.is_empty() {
            continue;
        }
        let found = rest.chars().next()?;
        let matched = if is_date_separator(expected) {
            is_date_separator(found)
        } else {
            found == expected
        };
        if matched {
            rest = &rest[found.len_utf8()..];
        } else if !matches!(expected, '.' | ',') {
            return None;
        }
    }
    Some(rest)
}

/// Longest case-insensitive match among `names`, tolerating a missing
/// trailing period. Returns the index within `names`.
fn match_name<'a, 'n>(
    text: &'a str,
    names: impl Iterator<Item = &'n String>,
) -> Option<(usize, &'a str)> {
    let text = text.trim_start();
    let mut best: Option<(usize, usize)> = None;
    for (index, name) in names.enumerate() {
        let name = name.to_lowercase();
        for candidate in [name.as_str(), name.trim_end_matches('.')] {
            if candidate.is_empty() || !text.starts_with(candidate) {
                continue;
            }
            let followed_by_letter = text[candidate.len()..]
                .chars()
                .next()
                .is_some_and(char::is_alphabetic);
            if !followed_by_letter && best.is_none_or(|(_, len)| candidate.len() > len) {
                best = Some((index, candidate.len()));
            }
        }
    }
    best.map(|(index, len)| (index, &text[len..]))
}

fn match_designator<'a>(text: &'a str, culture: &CultureInfo) -> Option<(bool, &'a str)> {
    let text = text.trim_start();
    let am = culture.time.am_designator.to_lowercase();
    let pm = culture.time.pm_designator.to_lowercase();
    for (is_pm, designator) in [(false, &am), (true, &pm)] {
        if !designator.is_empty() && text.starts_with(designator.as_str()) {
            return Some((is_pm, &text[designator.len()..]));
        }
    }
    for (is_pm, designator) in [(false, &am), (true, &pm)] {
        if let Some(first) = designator.chars().next() {
            if text.starts_with(first) {
                return Some((is_pm, &text[first.len_utf8()..]));
            }
        }
    }
    None
}
