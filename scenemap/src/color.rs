// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static node type colors.
//!
//! Adding a type means adding a row to the table; there is no per-type logic.

use core::fmt;

/// An opaque sRGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Color {
    /// Color from a `0xRRGGBB` value.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "each channel is masked to its byte"
    )]
    pub const fn from_rgb24(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// A brighter variant, `factor` percent of the current value.
    ///
    /// Works in HSV: the value is scaled, and once it saturates at full
    /// brightness the excess is taken out of the saturation instead, so very
    /// bright colors wash out toward white rather than clipping.
    pub fn lighter(self, factor: u32) -> Self {
        let (h, s, v) = self.to_hsv();
        let mut s = i64::from(s);
        let mut v = i64::from(v) * i64::from(factor) / 100;
        if v > 255 {
            s -= v - 255;
            s = s.max(0);
            v = 255;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "both are clamped to 0..=255 above"
        )]
        let (s, v) = (s as u8, v as u8);
        from_hsv(h, s, v)
    }

    /// Hover highlight.
    pub fn hover(self) -> Self {
        self.lighter(110)
    }

    /// Focus highlight.
    pub fn focus(self) -> Self {
        self.lighter(150)
    }

    /// Hue in degrees (`None` for grays), saturation and value in `0..=255`.
    fn to_hsv(self) -> (Option<f64>, u8, u8) {
        let (r, g, b) = (i32::from(self.r), i32::from(self.g), i32::from(self.b));
        let value = self.r.max(self.g).max(self.b);
        let max = i32::from(value);
        let min = r.min(g).min(b);
        let delta = max - min;
        if max == 0 || delta == 0 {
            return (None, 0, value);
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "delta <= max, so the quotient is at most 255"
        )]
        let s = (delta * 255 / max) as u8;
        let d = f64::from(delta);
        let h = if max == r {
            f64::from(g - b) / d
        } else if max == g {
            2.0 + f64::from(b - r) / d
        } else {
            4.0 + f64::from(r - g) / d
        };
        (Some((h * 60.0).rem_euclid(360.0)), s, value)
    }
}

fn from_hsv(h: Option<f64>, s: u8, v: u8) -> Color {
    let Some(h) = h.filter(|_| s > 0) else {
        return Color { r: v, g: v, b: v };
    };
    let v_f = f64::from(v);
    let s_f = f64::from(s) / 255.0;
    let sector = h / 60.0;
    let f = sector - sector.floor();
    let p = v_f * (1.0 - s_f);
    let q = v_f * (1.0 - s_f * f);
    let t = v_f * (1.0 - s_f * (1.0 - f));
    #[allow(
        clippy::cast_possible_truncation,
        reason = "hue is in 0..360, so the sector is in 0..6"
    )]
    let (r, g, b) = match sector.floor() as i32 % 6 {
        0 => (v_f, t, p),
        1 => (q, v_f, p),
        2 => (p, v_f, t),
        3 => (p, q, v_f),
        4 => (t, p, v_f),
        _ => (v_f, p, q),
    };
    Color {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "clamped to the channel range first"
)]
fn channel(x: f64) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color of node types missing from the table.
pub const DEFAULT_COLOR: Color = Color::from_rgb24(0x999999);

const ANIM_CURVE: Color = Color::from_rgb24(0xD474EC);

/// Known node types and their colors.
pub const TYPE_COLORS: &[(&str, Color)] = &[
    ("transform", Color::from_rgb24(0x75BCE1)),
    ("nurbsCurve", Color::from_rgb24(0xEDD377)),
    ("mesh", Color::from_rgb24(0xC0935E)),
    ("joint", Color::from_rgb24(0x91DC73)),
    ("camera", Color::from_rgb24(0xDD6A6A)),
    ("skinCluster", Color::from_rgb24(0xE17839)),
    ("dagPose", Color::from_rgb24(0xE14530)),
    ("animCurve", ANIM_CURVE),
    ("animCurveTA", ANIM_CURVE),
    ("animCurveTL", ANIM_CURVE),
    ("animCurveTT", ANIM_CURVE),
    ("animCurveTU", ANIM_CURVE),
    ("animCurveUA", ANIM_CURVE),
    ("animCurveUL", ANIM_CURVE),
    ("animCurveUT", ANIM_CURVE),
    ("animCurveUU", ANIM_CURVE),
];

/// Color for a node type.
pub fn color_for(node_type: &str) -> Color {
    TYPE_COLORS
        .iter()
        .find(|(t, _)| *t == node_type)
        .map_or(DEFAULT_COLOR, |&(_, c)| c)
}
