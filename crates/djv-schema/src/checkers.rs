//! # Semantic Checkers
//!
//! Named predicates attached to string formats (`EMAIL`, `UUID`, ...). A
//! checker receives the string plus the node's length bounds; most ignore
//! the bounds, the `*.IF.EXIST` and `MIN.MAX.STRING` checkers use them.
//!
//! Patterns are compiled once per process and shared read-only.

use std::sync::LazyLock;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;

use djv_core::value::char_len;

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Fa-f0-9]{2})*$").unwrap());
static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{9,11}$").unwrap());
static YYYYMMDD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-2][0-9]{3}-?(?:0[1-9]|1[0-2])-?(?:0[1-9]|[1-2][0-9]|3[0-1])$").unwrap()
});
static YYMMDD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}-?(?:0[1-9]|1[0-2])-?(?:0[1-9]|[1-2][0-9]|3[0-1])$").unwrap()
});
static HHMMSS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-1][0-9]|2[0-3]):?[0-5][0-9]:?[0-5][0-9]$").unwrap());
static HHMM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-1][0-9]|2[0-3]):?[0-5][0-9]$").unwrap());
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9A-Za-z_.\-]*[A-Za-z0-9]+[0-9A-Za-z_.\-]*[A-Za-z0-9]+[0-9A-Za-z_.\-]+@(?:[A-Za-z0-9]+\.)+[A-Za-z0-9]{2,8}$",
    )
    .unwrap()
});
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89abAB][0-9a-f]{3}-[0-9a-f]{12}$")
        .unwrap()
});
static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:\+[0-9]{1,2})?[-.\s]?[0-9]{2}|[0-9]{2,3}|\([0-9]{2,3}\))[-.\s]?[0-9]{3,4}[-.\s]?[0-9]{4}$",
    )
    .unwrap()
});
static BIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-1]*$").unwrap());
static DEC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:0|[1-9][0-9]*)$").unwrap());

/// ISO 3166-1 alpha-2 country codes.
pub const COUNTRY_CODES: &[&str] = &[
    "GH", "GA", "GY", "GM", "GG", "GP", "GT", "GU", "GD", "GR", "GL", "GW", "GN", "NA", "NR", "NG",
    "AQ", "SS", "ZA", "AN", "NL", "NP", "NO", "NF", "NC", "NZ", "NU", "NE", "NI", "KR", "DK", "DO",
    "DM", "DE", "TL", "LA", "LR", "LV", "RU", "LB", "LS", "RE", "RO", "LU", "RW", "LY", "LT", "LI",
    "MG", "MQ", "MH", "YT", "MO", "MW", "MY", "ML", "IM", "MX", "MC", "MA", "MU", "MR", "MZ", "ME",
    "MS", "MD", "MV", "MT", "MN", "UM", "VI", "US", "MM", "FM", "VU", "BH", "BB", "VA", "BS", "BD",
    "BM", "BJ", "VE", "VN", "BE", "BY", "BZ", "BA", "BW", "BO", "BI", "BF", "BV", "BT", "MP", "MK",
    "BG", "BR", "BN", "WS", "SA", "GS", "SM", "ST", "PM", "EH", "SN", "RS", "SC", "LC", "VC", "KN",
    "SH", "SO", "SB", "SD", "SR", "LK", "SJ", "SE", "CH", "ES", "SK", "SI", "SY", "SL", "SX", "SG",
    "AE", "AW", "AM", "AR", "AS", "IS", "HT", "IE", "AZ", "AF", "AD", "AL", "DZ", "AO", "AG", "AI",
    "ER", "SZ", "EE", "EC", "ET", "SV", "VG", "IO", "GB", "YE", "OM", "AU", "AT", "HN", "AX", "WF",
    "JO", "UG", "UY", "UZ", "UA", "IQ", "IR", "IL", "EG", "IT", "ID", "IN", "JP", "JM", "ZM", "JE",
    "GQ", "KP", "GE", "CN", "CF", "DJ", "GI", "ZW", "TD", "CZ", "CL", "CM", "CV", "KZ", "QA", "KH",
    "CA", "KE", "KY", "KM", "CR", "CC", "CI", "CO", "CG", "CD", "CU", "KW", "CK", "HR", "CX", "KG",
    "KI", "CY", "TW", "TJ", "TZ", "TH", "TC", "TR", "TG", "TK", "TO", "TM", "TV", "TN", "TT", "PA",
    "PY", "PK", "PG", "PW", "PS", "FO", "PE", "PT", "FK", "PL", "PR", "GF", "TF", "PF", "FR", "FJ",
    "FI", "PH", "PN", "HM", "HU", "HK",
];

/// Semantic predicate attached to a string node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checker {
    /// 9–11 ASCII digits.
    Timestamp,
    /// `YYYY-MM-DD`, separators optional.
    Date,
    /// `YY-MM-DD`, separators optional.
    ShortDate,
    /// `HH:MM:SS`, separators optional.
    Time,
    /// `HH:MM`, separator optional.
    ShortTime,
    Email,
    IntString,
    FloatString,
    BoolString,
    Uuid,
    CountryCode,
    SubdivisionCode,
    Base64,
    Telephone,
    Binary,
    Decimal,
    Hex,
    /// Length is exactly `min_len` or `max_len`, then hex.
    HexIfExist,
    /// Length is exactly `min_len` or `max_len`.
    MinOrMaxLength,
}

impl Checker {
    /// Name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Checker::Timestamp => "timestamp",
            Checker::Date => "date",
            Checker::ShortDate => "short date",
            Checker::Time => "time",
            Checker::ShortTime => "short time",
            Checker::Email => "email",
            Checker::IntString => "integer string",
            Checker::FloatString => "float string",
            Checker::BoolString => "boolean string",
            Checker::Uuid => "uuid",
            Checker::CountryCode => "country code",
            Checker::SubdivisionCode => "subdivision code",
            Checker::Base64 => "base64",
            Checker::Telephone => "telephone",
            Checker::Binary => "binary digits",
            Checker::Decimal => "decimal digits",
            Checker::Hex => "hex",
            Checker::HexIfExist => "fixed-width hex",
            Checker::MinOrMaxLength => "exact length",
        }
    }

    /// Run the predicate.
    pub fn check(&self, value: &str, min_len: usize, max_len: usize) -> bool {
        match self {
            Checker::Timestamp => TIMESTAMP_RE.is_match(value),
            Checker::Date => YYYYMMDD_RE.is_match(value),
            Checker::ShortDate => YYMMDD_RE.is_match(value),
            Checker::Time => HHMMSS_RE.is_match(value),
            Checker::ShortTime => HHMM_RE.is_match(value),
            Checker::Email => EMAIL_RE.is_match(value),
            Checker::IntString => value.parse::<i64>().is_ok(),
            Checker::FloatString => value.parse::<f64>().is_ok(),
            Checker::BoolString => {
                value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
            }
            Checker::Uuid => UUID_RE.is_match(value),
            Checker::CountryCode => is_country_code(value),
            Checker::SubdivisionCode => is_subdivision_code(value),
            Checker::Base64 => STANDARD.decode(value).is_ok(),
            Checker::Telephone => TELEPHONE_RE.is_match(value),
            Checker::Binary => BIN_RE.is_match(value),
            Checker::Decimal => DEC_RE.is_match(value),
            Checker::Hex => HEX_RE.is_match(value),
            Checker::HexIfExist => {
                is_min_or_max_len(value, min_len, max_len) && HEX_RE.is_match(value)
            }
            Checker::MinOrMaxLength => is_min_or_max_len(value, min_len, max_len),
        }
    }
}

fn is_min_or_max_len(value: &str, min_len: usize, max_len: usize) -> bool {
    let len = char_len(value);
    len == min_len || len == max_len
}

/// ISO 3166-1 alpha-2 lookup, case-insensitive.
pub fn is_country_code(value: &str) -> bool {
    if value.len() != 2 {
        return false;
    }
    let upper = value.to_ascii_uppercase();
    COUNTRY_CODES.contains(&upper.as_str())
}

/// ISO 3166-2 shape: a valid alpha-2 country code, a hyphen, then at least
/// one more character (`KR-11`, `GH-AA`).
pub fn is_subdivision_code(value: &str) -> bool {
    if value.len() < 4 || value.as_bytes()[2] != b'-' {
        return false;
    }
    value.get(0..2).is_some_and(is_country_code)
}
