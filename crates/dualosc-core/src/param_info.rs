//! Parameter metadata for discoverable synth parameters.
//!
//! A [`ParamDescriptor`] carries everything a front end needs to show, step,
//! validate and persist one parameter: display names, a stable string ID,
//! unit, range, default and normalization curve.
//!
//! Descriptors are plain `Copy` data built with `const fn` constructors, so a
//! parameter table can live in a `static` and be read from any thread.
//!
//! # Example
//!
//! ```rust
//! use dualosc_core::{ParamDescriptor, ParamScale, ParamUnit};
//!
//! const CUTOFF: ParamDescriptor =
//!     ParamDescriptor::new("Filter Cutoff", "Cutoff", "filter_cutoff", 20.0, 20000.0, 1200.0)
//!         .with_unit(ParamUnit::Hertz)
//!         .with_scale(ParamScale::Logarithmic);
//!
//! assert_eq!(CUTOFF.clamp(50_000.0), 20000.0);
//! assert!((CUTOFF.denormalize(CUTOFF.normalize(440.0)) - 440.0).abs() < 0.1);
//! ```

/// Scaling curve for parameter normalization.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values. Requires `min > 0.0`.
    Logarithmic,
}

/// Unit of measurement for parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz, for cutoff and LFO rate.
    Hertz,
    /// Seconds, for envelope stage times.
    Seconds,
    /// Cents, for unison detune.
    Cents,
    /// Semitones, for oscillator transpose.
    Semitones,
    /// Bits, for crusher depth.
    Bits,
    /// Samples, for crusher hold length.
    Samples,
    /// Dimensionless (shape, depth, amounts, selectors).
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use dualosc_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Seconds => " s",
            ParamUnit::Cents => " ct",
            ParamUnit::Semitones => " st",
            ParamUnit::Bits => " bit",
            ParamUnit::Samples => " smp",
            ParamUnit::None => "",
        }
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Filter Cutoff").
    pub name: &'static str,
    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,
    /// Stable ID used in presets and on the command line (e.g., `"filter_cutoff"`).
    pub string_id: &'static str,
    /// Unit type for formatting the value.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value at initialization.
    pub default: f32,
    /// Recommended step increment for encoder-style control.
    pub step: f32,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Whether the parameter only takes whole-number values.
    pub stepped: bool,
    /// Allowed values for a choice parameter, ascending. Empty means any
    /// value in `[min, max]`.
    pub choices: &'static [f32],
}

impl ParamDescriptor {
    /// Continuous, unitless, linear parameter.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        string_id: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            string_id,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            scale: ParamScale::Linear,
            stepped: false,
            choices: &[],
        }
    }

    /// Set the display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the normalization curve.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Set the encoder step.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Mark as integer-valued with a step of 1.
    pub const fn stepped(mut self) -> Self {
        self.stepped = true;
        self.step = 1.0;
        self
    }

    /// Restrict to a fixed set of values. `choices` must be ascending and
    /// span `[min, max]`.
    pub const fn with_choices(mut self, choices: &'static [f32]) -> Self {
        self.stepped = true;
        self.choices = choices;
        self
    }

    /// Clamp `value` into `[min, max]`. NaN maps to the default.
    ///
    /// Choice parameters snap to the nearest choice; a value halfway between
    /// two choices takes the upper one.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let value = value.clamp(self.min, self.max);
        if !self.choices.is_empty() {
            return self.nearest_choice(value);
        }
        if self.stepped {
            libm::roundf(value)
        } else {
            value
        }
    }

    /// Whether `value` is already a legal value: inside `[min, max]`, and one
    /// of the choices if there are any.
    pub fn contains(&self, value: f32) -> bool {
        if self.choices.is_empty() {
            value >= self.min && value <= self.max
        } else {
            self.choices.contains(&value)
        }
    }

    fn nearest_choice(&self, value: f32) -> f32 {
        let mut best = self.default;
        let mut best_dist = f32::INFINITY;
        for &choice in self.choices {
            let dist = (value - choice).abs();
            if dist <= best_dist {
                best = choice;
                best_dist = dist;
            }
        }
        best
    }

    /// Convert a plain value to normalized 0.0–1.0, honoring [`ParamScale`].
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let value = self.clamp(value);
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return (value - self.min) / range;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Convert normalized 0.0–1.0 back to a plain value.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        let value = match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    self.min + normalized * (self.max - self.min)
                } else {
                    self.min * libm::powf(self.max / self.min, normalized)
                }
            }
        };
        self.clamp(value)
    }
}
