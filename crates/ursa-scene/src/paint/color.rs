use std::fmt;

/// Premultiplied RGBA color with `f32` channels in `[0, 1]`.
///
/// Invariant:
/// - `rgb` components are already multiplied by `a`.
///
/// Backends that want straight alpha call [`Color::to_straight`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::from_premul(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::from_premul(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Creates a premultiplied color from straight sRGB bytes.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Parses a CSS hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// ```
    /// use ursa_scene::Color;
    ///
    /// let magenta = Color::from_hex("#C25").unwrap();
    /// assert_eq!(magenta, Color::from_rgba8(0xCC, 0x22, 0x55, 0xFF));
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::new(s, "missing leading '#'"))?;

        let digits = hex
            .bytes()
            .map(hex_digit)
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| ColorParseError::new(s, "non-hex digit"))?;

        let [r, g, b, a] = match digits.as_slice() {
            [r, g, b] => [r * 17, g * 17, b * 17, 0xFF],
            [r, g, b, a] => [r * 17, g * 17, b * 17, a * 17],
            [r1, r0, g1, g0, b1, b0] => [r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0, 0xFF],
            [r1, r0, g1, g0, b1, b0, a1, a0] => {
                [r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0, a1 << 4 | a0]
            }
            _ => return Err(ColorParseError::new(s, "expected 3, 4, 6 or 8 hex digits")),
        };

        Ok(Self::from_rgba8(r, g, b, a))
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }
}

#[inline]
fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// A color literal that could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorParseError {
    pub input: String,
    pub reason: &'static str,
}

impl ColorParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self { input: input.to_string(), reason }
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_hex_agree() {
        assert_eq!(Color::from_hex("#E62"), Color::from_hex("#EE6622"));
        assert_eq!(Color::from_hex("#19f"), Color::from_hex("#1199FF"));
    }

    #[test]
    fn alpha_digits_premultiply() {
        let c = Color::from_hex("#ffffff80").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.r - c.a).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_literals() {
        assert!(Color::from_hex("C25").is_err());
        assert!(Color::from_hex("#12").is_err());
        assert!(Color::from_hex("#ggg").is_err());
    }

    #[test]
    fn straight_round_trip() {
        let c = Color::from_straight(0.2, 0.4, 0.6, 0.5);
        let (r, g, b, a) = c.to_straight();
        assert!((r - 0.2).abs() < 1e-6 && (g - 0.4).abs() < 1e-6 && (b - 0.6).abs() < 1e-6);
        assert_eq!(a, 0.5);
    }
}
