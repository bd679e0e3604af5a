//! RGB color value type with HSV conversion

use serde::{Deserialize, Serialize};

/// An RGB color with float components.
///
/// Components are nominally in [0, 1] but are not clamped: scene-linear
/// colors routinely exceed 1, and the HSV conversions preserve that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const BLACK: Color3 = Color3 { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color3 = Color3 { r: 1.0, g: 1.0, b: 1.0 };

    /// Creates a color from individual components
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a gray color with all components equal
    pub fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Gets a component by index (0 = r/h, 1 = g/s, 2 = b/v)
    pub fn component(&self, index: usize) -> f32 {
        match index {
            0 => self.r,
            1 => self.g,
            _ => self.b,
        }
    }

    /// Sets a component by index (0 = r/h, 1 = g/s, 2 = b/v)
    pub fn set_component(&mut self, index: usize, value: f32) {
        match index {
            0 => self.r = value,
            1 => self.g = value,
            _ => self.b = value,
        }
    }

    /// Converts an RGB color to HSV, reusing the same component layout.
    ///
    /// Hue is in [0, 1) and is 0 for achromatic colors. Value carries
    /// the unclamped maximum component.
    pub fn rgb_to_hsv(self) -> Color3 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        let v = max;
        let s = if max != 0.0 { delta / max } else { 0.0 };

        let h = if delta == 0.0 {
            0.0
        } else {
            let h = if max == self.r {
                (self.g - self.b) / delta
            } else if max == self.g {
                2.0 + (self.b - self.r) / delta
            } else {
                4.0 + (self.r - self.g) / delta
            };
            let h = h / 6.0;
            if h < 0.0 {
                h + 1.0
            } else {
                h
            }
        };

        Color3::new(h, s, v)
    }

    /// Converts an HSV color back to RGB. Hue wraps outside [0, 1).
    pub fn hsv_to_rgb(self) -> Color3 {
        let (h, s, v) = (self.r, self.g, self.b);

        if s == 0.0 {
            return Color3::splat(v);
        }

        let h = (h - h.floor()) * 6.0;
        let sector = h.floor() as i32 % 6;
        let f = h - h.floor();

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match sector {
            0 => Color3::new(v, t, p),
            1 => Color3::new(q, v, p),
            2 => Color3::new(p, v, t),
            3 => Color3::new(p, q, v),
            4 => Color3::new(t, p, v),
            _ => Color3::new(v, p, q),
        }
    }

    /// Linear interpolation between two colors, used for gradient stops
    pub fn lerp(self, other: Color3, t: f32) -> Color3 {
        Color3::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }
}

impl Default for Color3 {
    fn default() -> Self {
        Color3::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Color3, b: Color3) {
        assert!(
            (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        assert_close(Color3::new(1.0, 0.0, 0.0).rgb_to_hsv(), Color3::new(0.0, 1.0, 1.0));
        assert_close(
            Color3::new(0.0, 1.0, 0.0).rgb_to_hsv(),
            Color3::new(1.0 / 3.0, 1.0, 1.0),
        );
        assert_close(
            Color3::new(0.0, 0.0, 1.0).rgb_to_hsv(),
            Color3::new(2.0 / 3.0, 1.0, 1.0),
        );
    }

    #[test]
    fn test_achromatic_has_zero_hue() {
        let hsv = Color3::splat(0.5).rgb_to_hsv();
        assert_eq!(hsv.r, 0.0);
        assert_eq!(hsv.g, 0.0);
        assert_eq!(hsv.b, 0.5);

        assert_eq!(Color3::BLACK.rgb_to_hsv(), Color3::BLACK);
    }

    #[test]
    fn test_hsv_round_trip() {
        let c = Color3::new(0.25, 0.6, 0.9);
        assert_close(c.rgb_to_hsv().hsv_to_rgb(), c);
    }

    #[test]
    fn test_value_above_one_preserved() {
        // Scene-linear colors can exceed 1; conversion must not clamp
        let hsv = Color3::new(2.0, 0.0, 0.0).rgb_to_hsv();
        assert_eq!(hsv.b, 2.0);
        assert_close(hsv.hsv_to_rgb(), Color3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_lerp() {
        let a = Color3::BLACK;
        let b = Color3::new(1.0, 0.5, 0.0);
        assert_close(a.lerp(b, 0.0), a);
        assert_close(a.lerp(b, 1.0), b);
        assert_close(a.lerp(b, 0.5), Color3::new(0.5, 0.25, 0.0));
    }
}
