use std::fmt;

/// Parses a `#RRGGBB` (or bare `RRGGBB`) colour into the integer the platform expects.
///
/// Anything that is not exactly six hex digits after the optional `#` yields
/// `None`; callers treat that the same as an unset colour.
pub fn parse_hex_color(raw: &str) -> Option<u32> {
    let digits = raw.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_u32(value: u32) -> Self {
        Self(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        )
    }

    pub fn parse(raw: &str) -> Option<Self> {
        parse_hex_color(raw).map(Self::from_u32)
    }

    pub fn to_u32(self) -> u32 {
        (u32::from(self.0) << 16) | (u32::from(self.1) << 8) | u32::from(self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(parse_hex_color("#5865F2"), Some(5_793_266));
        assert_eq!(parse_hex_color("5865F2"), Some(5_793_266));
        assert_eq!(parse_hex_color("#00b894"), Some(0x00B894));
    }

    #[test]
    fn rejects_short_long_and_non_hex_input() {
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#5865F2AA"), None);
        assert_eq!(parse_hex_color("#58 5F2"), None);
        assert_eq!(parse_hex_color("blurple"), None);
        assert_eq!(parse_hex_color("#+865F2"), None);
    }

    #[test]
    fn rgb_round_trips_through_integer_and_display() {
        let rgb = Rgb::parse("#e84393").expect("valid");
        assert_eq!(rgb, Rgb(0xE8, 0x43, 0x93));
        assert_eq!(rgb.to_u32(), 0xE84393);
        assert_eq!(rgb.to_string(), "#E84393");
    }
}
