use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Multi-stop colour gradient
// ---------------------------------------------------------------------------

/// Evenly spaced colour stops, blended in linear RGB.
#[derive(Debug, Clone)]
pub struct Gradient {
    stops: Vec<LinSrgb>,
}

impl Gradient {
    /// Build from 8-bit sRGB stops. Needs at least one stop.
    pub fn new(stops: &[(u8, u8, u8)]) -> Self {
        assert!(!stops.is_empty(), "a gradient needs at least one stop");
        let stops = stops
            .iter()
            .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear())
            .collect();
        Gradient { stops }
    }

    /// Yellow → orange → red.
    pub fn abundance() -> Self {
        Gradient::new(&[(255, 255, 0), (255, 165, 0), (255, 0, 0)])
    }

    /// Colour at position `t` in `[0, 1]`; out-of-range values are clamped.
    pub fn at(&self, t: f64) -> (u8, u8, u8) {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } as f32;
        let segments = self.stops.len() - 1;
        if segments == 0 {
            return to_rgb8(self.stops[0]);
        }

        let scaled = t * segments as f32;
        let idx = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - idx as f32;
        to_rgb8(self.stops[idx].mix(self.stops[idx + 1], local))
    }
}

fn to_rgb8(color: LinSrgb) -> (u8, u8, u8) {
    let rgb: Srgb = Srgb::from_linear(color);
    let rgb: Srgb<u8> = rgb.into_format();
    (rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Value normalisation
// ---------------------------------------------------------------------------

/// Maps raw abundances linearly onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    pub min: f64,
    pub max: f64,
}

impl Normalizer {
    pub fn new(min: f64, max: f64) -> Self {
        Normalizer { min, max }
    }

    /// A zero-width range maps everything to 0.
    pub fn scale(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            0.0
        } else {
            (value - self.min) / range
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_stops() {
        let g = Gradient::abundance();
        assert_eq!(g.at(0.0), (255, 255, 0));
        assert_eq!(g.at(0.5), (255, 165, 0));
        assert_eq!(g.at(1.0), (255, 0, 0));
    }

    #[test]
    fn out_of_range_is_clamped() {
        let g = Gradient::abundance();
        assert_eq!(g.at(-3.0), g.at(0.0));
        assert_eq!(g.at(7.0), g.at(1.0));
    }

    #[test]
    fn green_channel_decreases() {
        let g = Gradient::abundance();
        let greens: Vec<u8> = (0..=10).map(|i| g.at(i as f64 / 10.0).1).collect();
        assert!(greens.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn single_stop() {
        let g = Gradient::new(&[(10, 20, 30)]);
        assert_eq!(g.at(0.7), (10, 20, 30));
    }

    #[test]
    fn normalizer() {
        let n = Normalizer::new(2.0, 12.0);
        assert_eq!(n.scale(2.0), 0.0);
        assert_eq!(n.scale(7.0), 0.5);
        assert_eq!(n.scale(12.0), 1.0);
        assert_eq!(Normalizer::new(4.0, 4.0).scale(4.0), 0.0);
    }
}
