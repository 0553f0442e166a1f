use std::fmt;

/// Number of gauge segments drawn across the cell.
pub const SEGMENT_COUNT: usize = 5;

/// Charge shown when the monitor starts.
pub const DEFAULT_CHARGE: f64 = 0.67;

const LOW_CHARGE_COLOR: Rgb = Rgb::new(220, 60, 45);
const HIGH_CHARGE_COLOR: Rgb = Rgb::new(45, 220, 60);

/// Normalized state of charge, always inside `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ChargeLevel(f64);

impl ChargeLevel {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Builds a charge level from a percent-scale control (slider, CLI flag).
    pub fn from_percent(percent: u8) -> Self {
        Self::new(f64::from(percent) / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for ChargeLevel {
    fn default() -> Self {
        Self(DEFAULT_CHARGE)
    }
}

impl fmt::Display for ChargeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a packed `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgb8(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_channel(low: u8, high: u8, t: f64) -> u8 {
    lerp(f64::from(low), f64::from(high), t).floor() as u8
}

/// Straight per-channel RGB blend from red (empty) to green (full).
pub fn charge_to_color(charge: f64) -> Rgb {
    let t = if charge.is_nan() {
        0.0
    } else {
        charge.clamp(0.0, 1.0)
    };
    Rgb {
        r: lerp_channel(LOW_CHARGE_COLOR.r, HIGH_CHARGE_COLOR.r, t),
        g: lerp_channel(LOW_CHARGE_COLOR.g, HIGH_CHARGE_COLOR.g, t),
        b: lerp_channel(LOW_CHARGE_COLOR.b, HIGH_CHARGE_COLOR.b, t),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentFill {
    Full,
    /// Fraction of the segment width in `(0, 1)` rendered as charged.
    Partial(f64),
    Empty,
}

impl SegmentFill {
    pub fn is_full(self) -> bool {
        matches!(self, SegmentFill::Full)
    }

    /// Overlay scale factor; zero for full and empty segments.
    pub fn partial(self) -> f64 {
        match self {
            SegmentFill::Partial(amount) => amount,
            _ => 0.0,
        }
    }
}

/// Fill state of segment `index` (0-based) out of `total` for the given charge.
pub fn segment_fill(index: usize, total: usize, charge: f64) -> SegmentFill {
    let total_f = total as f64;
    let index_f = index as f64;
    let segment_fraction = (index_f + 1.0) / total_f;

    // Tolerance keeps exact boundaries (0.6 for segment 2) from flickering to partial.
    if charge >= segment_fraction - 1.0 / total_f * 0.01 {
        return SegmentFill::Full;
    }

    let start = index_f / total_f;
    if charge > start {
        SegmentFill::Partial((charge - start) * total_f)
    } else {
        SegmentFill::Empty
    }
}

pub fn segment_fills(charge: ChargeLevel) -> Vec<SegmentFill> {
    (0..SEGMENT_COUNT)
        .map(|index| segment_fill(index, SEGMENT_COUNT, charge.value()))
        .collect()
}

pub fn glow_intensity(charge: f64) -> f64 {
    0.6 + charge * 1.4
}

/// Opacity handed to the renderer for the glow plane.
pub fn glow_opacity(charge: f64) -> f64 {
    0.18 * glow_intensity(charge)
}

/// Readouts derived from the charge level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatteryMetrics {
    pub voltage: f64,
    pub temperature: f64,
    pub runtime_hours: u32,
    pub health_percent: u32,
}

impl BatteryMetrics {
    pub fn from_charge(charge: ChargeLevel) -> Self {
        let c = charge.value();
        Self {
            voltage: c * 3.7 + 0.4,
            temperature: 24.0 + c * 12.0,
            runtime_hours: (c * 12.0).round() as u32,
            health_percent: (86.0 + c * 12.0).round() as u32,
        }
    }

    pub fn voltage_label(&self) -> String {
        format!("{:.2} V", self.voltage)
    }

    pub fn temperature_label(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    pub fn runtime_label(&self) -> String {
        format!("{} h", self.runtime_hours)
    }

    pub fn health_label(&self) -> String {
        format!("{}%", self.health_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_charge_level_clamps_out_of_range() {
        assert_eq!(ChargeLevel::new(-0.5).value(), 0.0);
        assert_eq!(ChargeLevel::new(1.7).value(), 1.0);
        assert_eq!(ChargeLevel::new(f64::NAN).value(), 0.0);
        assert_eq!(ChargeLevel::from_percent(250).value(), 1.0);
    }

    #[test]
    fn test_charge_level_percent_scale() {
        assert_eq!(ChargeLevel::from_percent(0).value(), 0.0);
        assert_eq!(ChargeLevel::from_percent(100).value(), 1.0);
        assert_eq!(ChargeLevel::from_percent(42).percent(), 42);
        assert_eq!(ChargeLevel::default().percent(), 67);
        assert_eq!(ChargeLevel::default().to_string(), "67%");
    }

    #[test]
    fn test_charge_to_color_endpoints() {
        assert_eq!(charge_to_color(0.0), Rgb::new(220, 60, 45));
        assert_eq!(charge_to_color(1.0), Rgb::new(45, 220, 60));
        // Out-of-range input is clamped before blending.
        assert_eq!(charge_to_color(-3.0), Rgb::new(220, 60, 45));
        assert_eq!(charge_to_color(9.0), Rgb::new(45, 220, 60));
    }

    #[test]
    fn test_charge_to_color_floors_each_channel() {
        // 220 - 175 * 0.5 = 132.5, 60 + 160 * 0.5 = 140, 45 + 15 * 0.5 = 52.5
        assert_eq!(charge_to_color(0.5), Rgb::new(132, 140, 52));
        assert_eq!(charge_to_color(0.5).to_string(), "rgb(132, 140, 52)");
    }

    #[test]
    fn test_charge_to_color_bounded_and_monotonic() {
        let mut previous = charge_to_color(0.0);
        for step in 0..=1000 {
            let color = charge_to_color(step as f64 / 1000.0);
            for channel in [color.r, color.g, color.b] {
                assert!((45..=220).contains(&channel), "channel {channel} out of bounds");
            }
            assert!(color.r <= previous.r, "red must not increase");
            assert!(color.g >= previous.g, "green must not decrease");
            previous = color;
        }
    }

    #[test]
    fn test_segment_fill_at_default_charge() {
        let fills = segment_fills(ChargeLevel::default());
        assert_eq!(fills.len(), SEGMENT_COUNT);
        assert!(fills[0].is_full());
        assert!(fills[1].is_full());
        assert!(fills[2].is_full());
        match fills[3] {
            SegmentFill::Partial(amount) => assert!((amount - 0.35).abs() < EPS, "got {amount}"),
            other => panic!("segment 3 should be partial, got {other:?}"),
        }
        assert_eq!(fills[4], SegmentFill::Empty);
        assert_eq!(fills[4].partial(), 0.0);
    }

    #[test]
    fn test_segment_fill_boundaries() {
        // Exact boundary counts as full thanks to the tolerance.
        assert!(segment_fill(2, 5, 0.6).is_full());
        assert_eq!(segment_fill(3, 5, 0.6), SegmentFill::Empty);
        // Just below the tolerance window stays partial.
        assert!(segment_fill(2, 5, 0.599).is_full());
        assert!(matches!(segment_fill(2, 5, 0.59), SegmentFill::Partial(_)));
    }

    #[test]
    fn test_segment_fill_extremes() {
        for index in 0..SEGMENT_COUNT {
            assert_eq!(segment_fill(index, SEGMENT_COUNT, 0.0), SegmentFill::Empty);
            assert!(segment_fill(index, SEGMENT_COUNT, 1.0).is_full());
        }
    }

    #[test]
    fn test_partial_fill_stays_below_one() {
        for step in 0..=1000 {
            let charge = step as f64 / 1000.0;
            for index in 0..SEGMENT_COUNT {
                let partial = segment_fill(index, SEGMENT_COUNT, charge).partial();
                assert!((0.0..1.0).contains(&partial), "partial {partial} at {charge}");
            }
        }
    }

    #[test]
    fn test_glow_scales_with_charge() {
        assert!((glow_intensity(0.0) - 0.6).abs() < EPS);
        assert!((glow_intensity(1.0) - 2.0).abs() < EPS);
        assert!((glow_opacity(0.0) - 0.108).abs() < EPS);
        assert!((glow_opacity(1.0) - 0.36).abs() < EPS);
    }

    #[test]
    fn test_metrics_boundaries() {
        let empty = BatteryMetrics::from_charge(ChargeLevel::new(0.0));
        assert!((empty.voltage - 0.4).abs() < EPS);
        assert_eq!(empty.temperature, 24.0);
        assert_eq!(empty.runtime_hours, 0);
        assert_eq!(empty.health_percent, 86);

        let full = BatteryMetrics::from_charge(ChargeLevel::new(1.0));
        assert!((full.voltage - 4.1).abs() < EPS);
        assert_eq!(full.temperature, 36.0);
        assert_eq!(full.runtime_hours, 12);
        assert_eq!(full.health_percent, 98);
    }

    #[test]
    fn test_voltage_strictly_increasing() {
        let mut previous = f64::MIN;
        for percent in 0..=100u8 {
            let voltage = BatteryMetrics::from_charge(ChargeLevel::from_percent(percent)).voltage;
            assert!(voltage > previous);
            assert!((0.4 - EPS..=4.1 + EPS).contains(&voltage));
            previous = voltage;
        }
    }

    #[test]
    fn test_metric_labels() {
        let metrics = BatteryMetrics::from_charge(ChargeLevel::default());
        assert_eq!(metrics.voltage_label(), "2.88 V");
        assert_eq!(metrics.temperature_label(), "32.0°C");
        assert_eq!(metrics.runtime_label(), "8 h");
        assert_eq!(metrics.health_label(), "94%");
    }
}
