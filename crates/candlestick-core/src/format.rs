// File: crates/candlestick-core/src/format.rs
// Summary: Value formatting (format hints, display units, precision) and date label formats.

use chrono::{Duration, NaiveDateTime};

/// Numeric format parsed from a host format hint such as `\$#,0.00` or `0.0 %`.
///
/// Only the first `;` section is honoured. Hints without any digit
/// placeholder (`General`, empty) format like [`format_general`].
#[derive(Clone, Debug, PartialEq)]
pub struct NumberFormat {
    prefix: String,
    suffix: String,
    min_decimals: usize,
    max_decimals: usize,
    grouping: bool,
    percent: bool,
    general: bool,
}

impl NumberFormat {
    pub fn general() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            min_decimals: 0,
            max_decimals: 0,
            grouping: false,
            percent: false,
            general: true,
        }
    }

    pub fn parse(hint: Option<&str>) -> Self {
        let Some(hint) = hint else { return Self::general() };
        let section = unescape(hint.split(';').next().unwrap_or(""));
        let chars: Vec<char> = section.chars().collect();
        let is_digit = |c: &char| *c == '0' || *c == '#';
        let (Some(first), Some(last)) =
            (chars.iter().position(is_digit), chars.iter().rposition(is_digit))
        else {
            return Self::general();
        };

        let numeric: String = chars[first..=last].iter().collect();
        let (int_part, frac_part) = match numeric.split_once('.') {
            Some((i, f)) => (i.to_string(), f.to_string()),
            None => (numeric.clone(), String::new()),
        };
        let min_decimals = frac_part.chars().filter(|c| *c == '0').count();
        let max_decimals = frac_part.chars().filter(|c| *c == '0' || *c == '#').count();

        Self {
            prefix: chars[..first].iter().collect::<String>(),
            suffix: chars[last + 1..].iter().collect::<String>(),
            min_decimals,
            max_decimals,
            grouping: int_part.contains(','),
            percent: section.contains('%'),
            general: false,
        }
    }

    pub fn is_percent(&self) -> bool {
        self.percent
    }

    pub fn format(&self, value: f64) -> String {
        self.format_with(value, None, "")
    }

    /// Format with an optional fixed precision and a display-unit suffix
    /// placed between the digits and the hint's own suffix.
    fn format_with(&self, value: f64, precision: Option<u8>, unit_suffix: &str) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let v = if self.percent { value * 100.0 } else { value };
        let digits = match (precision, self.general) {
            (Some(p), _) => fixed(v.abs(), p as usize, p as usize, self.grouping),
            (None, true) => format_general(v.abs()),
            (None, false) => fixed(v.abs(), self.min_decimals, self.max_decimals, self.grouping),
        };
        let negative = v < 0.0 && digits.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };
        format!("{sign}{}{digits}{unit_suffix}{}", self.prefix, self.suffix)
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::general()
    }
}

/// Divisor applied to axis values before formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayUnit {
    None,
    Thousands,
    Millions,
    Billions,
    Trillions,
}

impl DisplayUnit {
    /// Resolve the `yAxis.unit` setting. `0` picks a unit from the magnitude of `reference`.
    pub fn from_setting(unit: f64, reference: f64) -> Self {
        if unit == 0.0 {
            return Self::auto(reference);
        }
        match unit {
            u if u == 1e3 => Self::Thousands,
            u if u == 1e6 => Self::Millions,
            u if u == 1e9 => Self::Billions,
            u if u == 1e12 => Self::Trillions,
            _ => Self::None,
        }
    }

    fn auto(reference: f64) -> Self {
        let r = reference.abs();
        if r >= 1e12 {
            Self::Trillions
        } else if r >= 1e9 {
            Self::Billions
        } else if r >= 1e6 {
            Self::Millions
        } else if r >= 1e3 {
            Self::Thousands
        } else {
            Self::None
        }
    }

    pub fn divisor(&self) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Thousands => 1e3,
            Self::Millions => 1e6,
            Self::Billions => 1e9,
            Self::Trillions => 1e12,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Thousands => "K",
            Self::Millions => "M",
            Self::Billions => "bn",
            Self::Trillions => "T",
        }
    }
}

/// Unit- and precision-aware formatter for value axis labels.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueFormatter {
    number: NumberFormat,
    unit: DisplayUnit,
    precision: Option<u8>,
}

impl ValueFormatter {
    pub fn new(hint: Option<&str>, unit: f64, precision: Option<u8>, reference: f64) -> Self {
        let number = NumberFormat::parse(hint);
        let unit = if number.is_percent() {
            DisplayUnit::None
        } else {
            DisplayUnit::from_setting(unit, reference)
        };
        Self { number, unit, precision }
    }

    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    pub fn format(&self, value: f64) -> String {
        if self.unit == DisplayUnit::None {
            return self.number.format_with(value, self.precision, "");
        }
        let scaled = value / self.unit.divisor();
        // Scaled values need room for fractions even when the hint has none.
        let mut number = self.number.clone();
        if self.precision.is_none() {
            number.general = false;
            number.max_decimals = number.max_decimals.max(2);
        }
        number.format_with(scaled, self.precision, self.unit.suffix())
    }
}

/// Format a plain number: integers without decimals, fractions trimmed to at most six places.
pub fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Label format for a continuous date axis, chosen from the overall span.
pub fn date_axis_format(min: NaiveDateTime, max: NaiveDateTime) -> &'static str {
    let span = max - min;
    if span < Duration::days(2) {
        "%H:%M"
    } else if span < Duration::days(120) {
        "%b %d"
    } else if span < Duration::days(365 * 4) {
        "%b %Y"
    } else {
        "%Y"
    }
}

/// Label format for dates shown on an ordinal (categorical) axis.
pub const CATEGORICAL_DATE_FORMAT: &str = "%m/%d/%y";

fn fixed(value: f64, min_decimals: usize, max_decimals: usize, grouping: bool) -> String {
    // `{:.N}` rounds halves to even; labels round half away from zero.
    let scale = 10f64.powi(max_decimals as i32);
    let rounded = (value * scale).round() / scale;
    let value = if rounded.is_finite() { rounded } else { value };
    let s = format!("{value:.max_decimals$}");
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (s.clone(), String::new()),
    };
    let mut frac = frac_part;
    while frac.len() > min_decimals && frac.ends_with('0') {
        frac.pop();
    }
    let int_part = if grouping { group_thousands(&int_part) } else { int_part };
    if frac.is_empty() { int_part } else { format!("{int_part}.{frac}") }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Drop format-string escapes: `\x` becomes `x`, quoted runs lose their quotes.
fn unescape(section: &str) -> String {
    let mut out = String::with_capacity(section.len());
    let mut chars = section.chars();
    let mut quoted = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' if !quoted => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '"' => quoted = !quoted,
            _ => out.push(c),
        }
    }
    out
}
