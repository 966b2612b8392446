//! Hex ↔ HSL color math for deriving section backgrounds from the brand palette.
//!
//! Hue is in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
//! Values stay floating point between conversions; rounding happens once, when
//! a channel is written back as a hex byte.

/// A color in HSL space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional) into RGB bytes.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.is_ascii() {
        return None;
    }
    match digits.len() {
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some([r, g, b])
        }
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 16 + v;
            }
            Some(rgb)
        }
        _ => None,
    }
}

pub fn rgb_to_hsl([r, g, b]: [u8; 3]) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h * 60.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

pub fn hex_to_hsl(hex: &str) -> Option<Hsl> {
    parse_hex(hex).map(rgb_to_hsl)
}

/// Convert back to lowercase `#rrggbb`, rounding and clamping each channel.
pub fn hsl_to_hex(hsl: Hsl) -> String {
    let h = hsl.h.rem_euclid(360.0);
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", byte(r1), byte(g1), byte(b1))
}

/// Lower lightness by `amount` points. Unparseable input comes back unchanged.
pub fn darken(hex: &str, amount: f64) -> String {
    match hex_to_hsl(hex) {
        Some(hsl) => hsl_to_hex(Hsl {
            l: (hsl.l - amount).clamp(0.0, 100.0),
            ..hsl
        }),
        None => hex.to_string(),
    }
}

/// Raise lightness by `amount` points and take 10 points of saturation off.
/// Unparseable input comes back unchanged.
pub fn lighten(hex: &str, amount: f64) -> String {
    match hex_to_hsl(hex) {
        Some(hsl) => hsl_to_hex(Hsl {
            h: hsl.h,
            s: (hsl.s - 10.0).max(0.0),
            l: (hsl.l + amount).clamp(0.0, 100.0),
        }),
        None => hex.to_string(),
    }
}
