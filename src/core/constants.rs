// Switch motion, audio and layout tuning shared by the controller and the web adapters.
// Kept free of `crate::` paths so tests can include this file directly.

// Housing tilt (radians about X). The model is authored lying down, so neutral is a quarter turn.
pub const NEUTRAL_TILT: f32 = std::f32::consts::FRAC_PI_2;
pub const PRESSED_TILT: f32 = NEUTRAL_TILT + 0.1;

// Stem travel along local Z when fully depressed
pub const STEM_TRAVEL: f32 = 0.005;

// Press is snappy, release is springy
pub const PRESS_TILT_MS: u64 = 50;
pub const PRESS_STEM_MS: u64 = 80;
pub const RELEASE_TILT_MS: u64 = 600;
pub const RELEASE_STEM_MS: u64 = 150;

// Elastic release overshoot
pub const RELEASE_ELASTIC_AMPLITUDE: f32 = 1.0;
pub const RELEASE_ELASTIC_PERIOD: f32 = 0.3;

// Audio
pub const CUTOFF_FALLBACK_MS: u64 = 400;
pub const CUE_VOLUME: f64 = 0.6;
pub const CUES_PER_COLOR: usize = 3;

// Scene layout
pub const HOUSING_SCALE: f32 = 10.0; // the switch mesh is authored at 1/10 scene scale
pub const HIT_BOX_SIZE: f32 = 0.15;
pub const HIT_BOX_CENTER: [f32; 3] = [0.0, 0.05, 0.0];

// Checkout
pub const CHECKOUT_ENDPOINT: &str = "/api/checkout/vapor75";
