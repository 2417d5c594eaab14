//! Interpolation helpers and cubic-bezier easing curves.

/// Linear blend from `from` to `to` by `t` (not clamped).
#[inline]
pub fn lerp(t: f32, from: f32, to: f32) -> f32 {
    from + (to - from) * t
}

/// Clamp a progress value into [0, 1]; NaN collapses to 0.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Piecewise-linear map of `value` over `input` breakpoints onto `output`,
/// clamped to the outer breakpoints.
///
/// `input` must be ascending and the same length as `output`.
pub fn interpolate_clamped(value: f32, input: &[f32], output: &[f32]) -> f32 {
    debug_assert_eq!(input.len(), output.len());
    debug_assert!(input.len() >= 2);
    let last = input.len() - 1;
    if value <= input[0] {
        return output[0];
    }
    if value >= input[last] {
        return output[last];
    }
    for i in 0..last {
        let (a, b) = (input[i], input[i + 1]);
        if value <= b {
            let span = b - a;
            let t = if span.abs() < f32::EPSILON {
                1.0
            } else {
                (value - a) / span
            };
            return lerp(t, output[i], output[i + 1]);
        }
    }
    output[last]
}

/// CSS-style cubic bezier easing through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Easing {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl Easing {
    pub const fn bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Ease-out cubic, used for settles and reverts.
    pub const CUBIC_OUT: Easing = Easing::bezier(0.215, 0.61, 0.355, 1.0);
    /// Ease-out quart, used for mount-in and swipe exits.
    pub const QUART_OUT: Easing = Easing::bezier(0.165, 0.84, 0.44, 1.0);
    pub const LINEAR: Easing = Easing::bezier(0.0, 0.0, 1.0, 1.0);

    /// Eased value for time fraction `t` in [0, 1].
    pub fn apply(&self, t: f32) -> f32 {
        let t = clamp_unit(t);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = self.solve_x(t);
        bezier_axis(s, self.y1, self.y2)
    }

    // Newton first, bisection when the slope is too flat.
    fn solve_x(&self, x: f32) -> f32 {
        let mut s = x;
        for _ in 0..8 {
            let err = bezier_axis(s, self.x1, self.x2) - x;
            if err.abs() < 1e-6 {
                return s;
            }
            let slope = bezier_slope(s, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = x;
        for _ in 0..32 {
            let value = bezier_axis(s, self.x1, self.x2);
            if (value - x).abs() < 1e-6 {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        s
    }
}

#[inline]
fn bezier_axis(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

#[inline]
fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}
