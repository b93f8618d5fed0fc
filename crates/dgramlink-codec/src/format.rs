use serde::{Deserialize, Serialize};

/// Element format: width, signedness, and byte order of every integer in a
/// payload.
///
/// Multi-byte widths carry an explicit endianness suffix; the default is the
/// original single-byte unsigned format, where byte order does not apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementFormat {
    /// Unsigned 8-bit. The default.
    #[default]
    U8,
    /// Signed 8-bit.
    I8,
    /// Unsigned 16-bit, little-endian.
    U16Le,
    /// Unsigned 16-bit, big-endian.
    U16Be,
    /// Signed 16-bit, little-endian.
    I16Le,
    /// Signed 16-bit, big-endian.
    I16Be,
    /// Unsigned 32-bit, little-endian.
    U32Le,
    /// Unsigned 32-bit, big-endian.
    U32Be,
    /// Signed 32-bit, little-endian.
    I32Le,
    /// Signed 32-bit, big-endian.
    I32Be,
}

impl ElementFormat {
    /// Element width in bytes.
    pub fn width(self) -> usize {
        match self {
            ElementFormat::U8 | ElementFormat::I8 => 1,
            ElementFormat::U16Le
            | ElementFormat::U16Be
            | ElementFormat::I16Le
            | ElementFormat::I16Be => 2,
            ElementFormat::U32Le
            | ElementFormat::U32Be
            | ElementFormat::I32Le
            | ElementFormat::I32Be => 4,
        }
    }

    /// Inclusive range of values representable in this format.
    pub fn value_range(self) -> (i64, i64) {
        match self {
            ElementFormat::U8 => (0, u8::MAX as i64),
            ElementFormat::I8 => (i8::MIN as i64, i8::MAX as i64),
            ElementFormat::U16Le | ElementFormat::U16Be => (0, u16::MAX as i64),
            ElementFormat::I16Le | ElementFormat::I16Be => (i16::MIN as i64, i16::MAX as i64),
            ElementFormat::U32Le | ElementFormat::U32Be => (0, u32::MAX as i64),
            ElementFormat::I32Le | ElementFormat::I32Be => (i32::MIN as i64, i32::MAX as i64),
        }
    }

    /// Whether `value` fits this format without truncation.
    pub fn fits(self, value: i64) -> bool {
        let (min, max) = self.value_range();
        (min..=max).contains(&value)
    }
}

impl std::fmt::Display for ElementFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ElementFormat::U8 => "u8",
            ElementFormat::I8 => "i8",
            ElementFormat::U16Le => "u16le",
            ElementFormat::U16Be => "u16be",
            ElementFormat::I16Le => "i16le",
            ElementFormat::I16Be => "i16be",
            ElementFormat::U32Le => "u32le",
            ElementFormat::U32Be => "u32be",
            ElementFormat::I32Le => "i32le",
            ElementFormat::I32Be => "i32be",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_u8() {
        assert_eq!(ElementFormat::default(), ElementFormat::U8);
        assert_eq!(ElementFormat::default().width(), 1);
    }

    #[test]
    fn widths_match_declared_size() {
        assert_eq!(ElementFormat::I8.width(), 1);
        assert_eq!(ElementFormat::U16Be.width(), 2);
        assert_eq!(ElementFormat::I32Le.width(), 4);
    }

    #[test]
    fn fits_honors_signedness() {
        assert!(ElementFormat::U8.fits(255));
        assert!(!ElementFormat::U8.fits(256));
        assert!(!ElementFormat::U8.fits(-1));
        assert!(ElementFormat::I8.fits(-128));
        assert!(!ElementFormat::I8.fits(128));
        assert!(ElementFormat::U32Le.fits(u32::MAX as i64));
        assert!(!ElementFormat::U32Le.fits(u32::MAX as i64 + 1));
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&ElementFormat::U16Le).expect("format should serialize");
        assert_eq!(json, "\"u16_le\"");

        let back: ElementFormat =
            serde_json::from_str("\"i32_be\"").expect("format should deserialize");
        assert_eq!(back, ElementFormat::I32Be);
    }
}
