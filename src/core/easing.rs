// Easing curves for switch timelines.
//
// Every curve maps normalized progress in \[0, 1\] to an eased fraction with
// `apply(0) == 0` and `apply(1) == 1`. Elastic curves overshoot in between.

use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    QuadOut,
    /// Cubic ease-out, the "power2.out" curve used for presses.
    CubicOut,
    /// Decaying sine that overshoots the target before settling.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    #[must_use]
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }

    /// Value between `from` and `to` at progress `t`.
    #[must_use]
    #[inline]
    pub fn interpolate(&self, from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * self.apply(t)
    }
}

fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    // Amplitudes below 1 scale the period rather than the swing
    let amp = amplitude.max(1.0);
    let period = if period > 0.0 { period } else { 0.3 };
    let period = period / amplitude.clamp(f32::EPSILON, 1.0);
    let phase = period / TAU * (1.0 / amp).asin();
    amp * 2.0_f32.powf(-10.0 * t) * ((t - phase) * TAU / period).sin() + 1.0
}
