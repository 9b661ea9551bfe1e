use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color parsed from a hex literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB`. Anything else (named colors, `rgb()`,
    /// `#RRGGBBAA`) is not a plain hex color and yields `None`.
    pub fn from_hex(input: &str) -> Option<Self> {
        let hex = input.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                let expand = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|v| v * 17);
                Some(Self {
                    r: expand(0).ok()?,
                    g: expand(1).ok()?,
                    b: expand(2).ok()?,
                })
            }
            _ => None,
        }
    }

    /// `rgba(r, g, b, a)` with `alpha` clamped to `0..=1` and rounded to three
    /// decimals.
    pub fn to_rgba_css(self, alpha: f64) -> String {
        let alpha = (alpha.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#3b82f6"), Some(Rgb::new(59, 130, 246)));
        assert_eq!(Rgb::from_hex("#fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::from_hex("red"), None);
        assert_eq!(Rgb::from_hex("#3b82f6ff"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn formats_rgba() {
        let rgb = Rgb::new(59, 130, 246);
        assert_eq!(rgb.to_rgba_css(0.5), "rgba(59, 130, 246, 0.5)");
        assert_eq!(rgb.to_rgba_css(0.0), "rgba(59, 130, 246, 0)");
        assert_eq!(rgb.to_hex(), "#3b82f6");
    }
}
