//! # Format Registry
//!
//! Fixed table mapping DSL type names (`"INT"`, `"EMAIL"`, `"HEX256.IF.EXIST"`,
//! ...) to a [`FormatDescriptor`]: the node kind a name compiles to, its
//! default bounds, an optional [`Checker`], and whether object-form
//! `min`/`max`/`size` may override those bounds.
//!
//! Generic formats (`STRING`, `ARRAY`, `HEX`, ...) are overridable. Semantic
//! formats (`EMAIL`, `UUID`, `TELEPHONE`, ...) always keep their fixed
//! bounds and checker, even when written in object form next to
//! `required` or `regexp`.
//!
//! Lookup is exact and case-sensitive. Unknown names are not an error; the
//! compiler turns them into an inert node.

use djv_core::ValidatorConfig;

use crate::checkers::Checker;
use crate::node::Kind;

/// Largest integer exactly representable in an IEEE-754 double.
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Upper length bound of a string or array format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthLimit {
    Fixed(usize),
    /// [`ValidatorConfig::max_string_len`].
    Configured,
    /// [`MAX_SAFE_INTEGER`].
    Unbounded,
}

impl LengthLimit {
    pub fn resolve(self, config: &ValidatorConfig) -> usize {
        match self {
            LengthLimit::Fixed(n) => n,
            LengthLimit::Configured => config.max_string_len,
            LengthLimit::Unbounded => MAX_SAFE_INTEGER as usize,
        }
    }
}

/// Default bounds carried by a format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultBounds {
    None,
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    Length { min: usize, max: LengthLimit },
}

/// Everything the compiler needs to instantiate a node for a format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatDescriptor {
    pub kind: Kind,
    pub bounds: DefaultBounds,
    pub checker: Option<Checker>,
    /// Object-form `min` / `max` / `size` replace the default bounds.
    pub overridable: bool,
    /// Configured minimums below this value are raised to it.
    pub min_floor: i64,
}

impl FormatDescriptor {
    const fn new(kind: Kind, bounds: DefaultBounds) -> Self {
        Self {
            kind,
            bounds,
            checker: None,
            overridable: true,
            min_floor: i64::MIN,
        }
    }

    const fn checked(mut self, checker: Checker) -> Self {
        self.checker = Some(checker);
        self
    }

    const fn fixed(mut self) -> Self {
        self.overridable = false;
        self
    }

    const fn floor(mut self, min_floor: i64) -> Self {
        self.min_floor = min_floor;
        self
    }
}

const SAFE_INT: DefaultBounds = DefaultBounds::Int {
    min: -MAX_SAFE_INTEGER,
    max: MAX_SAFE_INTEGER,
};
const UNSIGNED_INT: DefaultBounds = DefaultBounds::Int {
    min: 0,
    max: MAX_SAFE_INTEGER,
};
const ANY_FLOAT: DefaultBounds = DefaultBounds::Float {
    min: f64::MIN,
    max: f64::MAX,
};

const fn text(min: usize, max: LengthLimit) -> DefaultBounds {
    DefaultBounds::Length { min, max }
}

const fn fixed_text(min: usize, max: usize) -> DefaultBounds {
    DefaultBounds::Length {
        min,
        max: LengthLimit::Fixed(max),
    }
}

/// Every type name the DSL recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Int,
    Uint,
    UnixTime,
    Float,
    Number,
    String,
    EmptyString,
    NonEmptyString,
    MinMaxString,
    Bin,
    Dec,
    Hex,
    Object,
    Array,
    NonEmptyArray,
    Bool,
    Timestamp,
    YyyyMmDd,
    YyMmDd,
    HhMmSs,
    HhMm,
    Email,
    IntString,
    FloatString,
    BoolString,
    Uuid,
    Iso31661A2,
    Iso31662,
    Base64,
    Telephone,
    Hex64IfExist,
    Hex128IfExist,
    Hex256IfExist,
}

impl Format {
    /// The whole registry, in display order.
    pub const ALL: [Format; 33] = [
        Format::Int,
        Format::Uint,
        Format::UnixTime,
        Format::Float,
        Format::Number,
        Format::String,
        Format::EmptyString,
        Format::NonEmptyString,
        Format::MinMaxString,
        Format::Bin,
        Format::Dec,
        Format::Hex,
        Format::Object,
        Format::Array,
        Format::NonEmptyArray,
        Format::Bool,
        Format::Timestamp,
        Format::YyyyMmDd,
        Format::YyMmDd,
        Format::HhMmSs,
        Format::HhMm,
        Format::Email,
        Format::IntString,
        Format::FloatString,
        Format::BoolString,
        Format::Uuid,
        Format::Iso31661A2,
        Format::Iso31662,
        Format::Base64,
        Format::Telephone,
        Format::Hex64IfExist,
        Format::Hex128IfExist,
        Format::Hex256IfExist,
    ];

    /// Resolve a DSL type name. The underscore spellings of the
    /// `*.STRING` conversions are accepted as aliases.
    pub fn from_name(name: &str) -> Option<Format> {
        let format = match name {
            "INT" => Format::Int,
            "UINT" => Format::Uint,
            "UNIXTIME" => Format::UnixTime,
            "FLOAT" => Format::Float,
            "NUMBER" => Format::Number,
            "STRING" => Format::String,
            "EMPTY.STRING" => Format::EmptyString,
            "NONEMPTY.STRING" => Format::NonEmptyString,
            "MIN.MAX.STRING" => Format::MinMaxString,
            "BIN" => Format::Bin,
            "DEC" => Format::Dec,
            "HEX" => Format::Hex,
            "OBJECT" => Format::Object,
            "ARRAY" => Format::Array,
            "NONEMPTY.ARRAY" => Format::NonEmptyArray,
            "BOOL" => Format::Bool,
            "TIMESTAMP" => Format::Timestamp,
            "YYYYMMDD" => Format::YyyyMmDd,
            "YYMMDD" => Format::YyMmDd,
            "HHMMSS" => Format::HhMmSs,
            "HHMM" => Format::HhMm,
            "EMAIL" => Format::Email,
            "INT.STRING" | "INT_STRING" => Format::IntString,
            "FLOAT.STRING" | "FLOAT_STRING" => Format::FloatString,
            "BOOL.STRING" | "BOOL_STRING" => Format::BoolString,
            "UUID" => Format::Uuid,
            "ISO31661A2" => Format::Iso31661A2,
            "ISO31662" => Format::Iso31662,
            "BASE64" => Format::Base64,
            "TELEPHONE" => Format::Telephone,
            "HEX64.IF.EXIST" => Format::Hex64IfExist,
            "HEX128.IF.EXIST" => Format::Hex128IfExist,
            "HEX256.IF.EXIST" => Format::Hex256IfExist,
            _ => return None,
        };
        Some(format)
    }

    /// Canonical DSL spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Int => "INT",
            Format::Uint => "UINT",
            Format::UnixTime => "UNIXTIME",
            Format::Float => "FLOAT",
            Format::Number => "NUMBER",
            Format::String => "STRING",
            Format::EmptyString => "EMPTY.STRING",
            Format::NonEmptyString => "NONEMPTY.STRING",
            Format::MinMaxString => "MIN.MAX.STRING",
            Format::Bin => "BIN",
            Format::Dec => "DEC",
            Format::Hex => "HEX",
            Format::Object => "OBJECT",
            Format::Array => "ARRAY",
            Format::NonEmptyArray => "NONEMPTY.ARRAY",
            Format::Bool => "BOOL",
            Format::Timestamp => "TIMESTAMP",
            Format::YyyyMmDd => "YYYYMMDD",
            Format::YyMmDd => "YYMMDD",
            Format::HhMmSs => "HHMMSS",
            Format::HhMm => "HHMM",
            Format::Email => "EMAIL",
            Format::IntString => "INT.STRING",
            Format::FloatString => "FLOAT.STRING",
            Format::BoolString => "BOOL.STRING",
            Format::Uuid => "UUID",
            Format::Iso31661A2 => "ISO31661A2",
            Format::Iso31662 => "ISO31662",
            Format::Base64 => "BASE64",
            Format::Telephone => "TELEPHONE",
            Format::Hex64IfExist => "HEX64.IF.EXIST",
            Format::Hex128IfExist => "HEX128.IF.EXIST",
            Format::Hex256IfExist => "HEX256.IF.EXIST",
        }
    }

    /// Descriptor for this format.
    pub const fn descriptor(&self) -> FormatDescriptor {
        use FormatDescriptor as D;
        use LengthLimit::{Configured, Unbounded};

        match self {
            Format::Int => D::new(Kind::Int, SAFE_INT),
            Format::Uint | Format::UnixTime => D::new(Kind::Int, UNSIGNED_INT).floor(0),
            Format::Float => D::new(Kind::Float, ANY_FLOAT),
            Format::Number => D::new(Kind::Number, ANY_FLOAT),
            Format::String => D::new(Kind::String, text(0, Configured)),
            Format::EmptyString => D::new(Kind::String, fixed_text(0, 0)).fixed(),
            Format::NonEmptyString => D::new(Kind::String, text(1, Configured)).floor(1),
            Format::MinMaxString => {
                D::new(Kind::String, text(0, Configured)).checked(Checker::MinOrMaxLength)
            }
            Format::Bin => D::new(Kind::String, text(0, Configured)).checked(Checker::Binary),
            Format::Dec => D::new(Kind::String, text(0, Configured)).checked(Checker::Decimal),
            Format::Hex => D::new(Kind::String, text(0, Configured)).checked(Checker::Hex),
            Format::Object => D::new(Kind::Object, DefaultBounds::None),
            Format::Array => D::new(Kind::Array, text(0, Unbounded)).floor(0),
            Format::NonEmptyArray => D::new(Kind::Array, text(1, Unbounded)).floor(1),
            Format::Bool => D::new(Kind::Bool, DefaultBounds::None),
            Format::Timestamp => D::new(Kind::String, fixed_text(0, 10))
                .checked(Checker::Timestamp)
                .fixed(),
            Format::YyyyMmDd => D::new(Kind::String, fixed_text(8, 10))
                .checked(Checker::Date)
                .fixed(),
            Format::YyMmDd => D::new(Kind::String, fixed_text(6, 8))
                .checked(Checker::ShortDate)
                .fixed(),
            Format::HhMmSs => D::new(Kind::String, fixed_text(6, 8))
                .checked(Checker::Time)
                .fixed(),
            Format::HhMm => D::new(Kind::String, fixed_text(4, 5))
                .checked(Checker::ShortTime)
                .fixed(),
            Format::Email => D::new(Kind::String, fixed_text(3, 255))
                .checked(Checker::Email)
                .fixed(),
            Format::IntString => D::new(Kind::String, fixed_text(1, 17))
                .checked(Checker::IntString)
                .fixed(),
            Format::FloatString => D::new(Kind::String, fixed_text(1, 24))
                .checked(Checker::FloatString)
                .fixed(),
            Format::BoolString => D::new(Kind::String, fixed_text(4, 5))
                .checked(Checker::BoolString)
                .fixed(),
            Format::Uuid => D::new(Kind::String, fixed_text(36, 36))
                .checked(Checker::Uuid)
                .fixed(),
            Format::Iso31661A2 => D::new(Kind::String, fixed_text(2, 2))
                .checked(Checker::CountryCode)
                .fixed(),
            Format::Iso31662 => D::new(Kind::String, fixed_text(5, 5))
                .checked(Checker::SubdivisionCode)
                .fixed(),
            Format::Base64 => D::new(Kind::String, text(0, Configured))
                .checked(Checker::Base64)
                .fixed(),
            Format::Telephone => D::new(Kind::String, fixed_text(4, 20))
                .checked(Checker::Telephone)
                .fixed(),
            Format::Hex64IfExist => D::new(Kind::String, fixed_text(0, 16))
                .checked(Checker::HexIfExist)
                .fixed(),
            Format::Hex128IfExist => D::new(Kind::String, fixed_text(0, 32))
                .checked(Checker::HexIfExist)
                .fixed(),
            Format::Hex256IfExist => D::new(Kind::String, fixed_text(0, 64))
                .checked(Checker::HexIfExist)
                .fixed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_format_round_trips_its_name() {
        for format in Format::ALL {
            assert_eq!(Format::from_name(format.name()), Some(format), "{format:?}");
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Format::from_name("INT_STRING"), Some(Format::IntString));
        assert_eq!(Format::from_name("FLOAT_STRING"), Some(Format::FloatString));
        assert_eq!(Format::from_name("BOOL_STRING"), Some(Format::BoolString));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Format::from_name("email"), None);
        assert_eq!(Format::from_name(""), None);
        assert_eq!(Format::from_name("DATE"), None);
    }

    #[test]
    fn test_semantic_formats_are_fixed() {
        for format in [Format::Email, Format::Uuid, Format::Telephone, Format::Hex256IfExist] {
            let d = format.descriptor();
            assert!(!d.overridable, "{format:?} must not be overridable");
            assert_eq!(d.kind, Kind::String);
            assert!(d.checker.is_some());
        }
    }

    #[test]
    fn test_unsigned_and_nonempty_floors() {
        assert_eq!(Format::Uint.descriptor().min_floor, 0);
        assert_eq!(Format::UnixTime.descriptor().min_floor, 0);
        assert_eq!(Format::NonEmptyString.descriptor().min_floor, 1);
        assert_eq!(Format::NonEmptyArray.descriptor().min_floor, 1);
    }

    #[test]
    fn test_configured_limit_resolves_from_config() {
        let config = ValidatorConfig::default().with_max_string_len(99);
        assert_eq!(LengthLimit::Configured.resolve(&config), 99);
        assert_eq!(LengthLimit::Fixed(7).resolve(&config), 7);
        assert_eq!(
            LengthLimit::Unbounded.resolve(&config),
            MAX_SAFE_INTEGER as usize
        );
    }

    #[test]
    fn test_uuid_is_fixed_width() {
        assert_eq!(
            Format::Uuid.descriptor().bounds,
            DefaultBounds::Length {
                min: 36,
                max: LengthLimit::Fixed(36)
            }
        );
    }
}
