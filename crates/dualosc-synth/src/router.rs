//! One-hot modulation router for the voice LFO.
//!
//! The voice has a single LFO and it reaches exactly one destination at a
//! time. [`ModRouting`] turns the destination into five multipliers, one per
//! destination, of which at most one is `1.0`. The router does no scaling of
//! its own; each consumer applies its musical range:
//!
//! | Code | Destination | Consumer scaling                        |
//! |------|-------------|-----------------------------------------|
//! | 0    | none        | -                                       |
//! | 1    | pitch       | ±[`PITCH_MOD_SEMITONES`] semitones      |
//! | 2    | cutoff      | ±[`CUTOFF_MOD_HZ`] Hz                   |
//! | 3    | amplitude   | tremolo `1 + TREMOLO_DEPTH·lfo`         |
//! | 4    | fold        | added to fold drive                     |
//! | 5    | crush       | crush mix, applied outside the voice    |
//!
//! Any other code routes nowhere.

/// Pitch modulation range at full LFO depth, in semitones.
pub const PITCH_MOD_SEMITONES: f32 = 12.0;
/// Cutoff modulation range at full LFO depth, in Hz.
pub const CUTOFF_MOD_HZ: f32 = 2000.0;
/// Tremolo depth applied to the amplitude envelope at full LFO depth.
pub const TREMOLO_DEPTH: f32 = 0.5;

/// Where the voice LFO is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ModDestination {
    /// LFO disconnected.
    #[default]
    None = 0,
    /// Both oscillators' pitch (vibrato).
    Pitch = 1,
    /// Filter cutoff.
    Cutoff = 2,
    /// Amplitude (tremolo).
    Amplitude = 3,
    /// Wavefolder drive.
    Fold = 4,
    /// Downstream bit crusher mix.
    Crush = 5,
}

impl ModDestination {
    /// All destinations in code order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Pitch,
        Self::Cutoff,
        Self::Amplitude,
        Self::Fold,
        Self::Crush,
    ];

    /// Map an integer code to a destination. Out-of-range codes give `None`.
    ///
    /// ```rust
    /// use dualosc_synth::ModDestination;
    ///
    /// assert_eq!(ModDestination::from_code(2), ModDestination::Cutoff);
    /// assert_eq!(ModDestination::from_code(9), ModDestination::None);
    /// assert_eq!(ModDestination::from_code(-1), ModDestination::None);
    /// ```
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Pitch,
            2 => Self::Cutoff,
            3 => Self::Amplitude,
            4 => Self::Fold,
            5 => Self::Crush,
            _ => Self::None,
        }
    }

    /// Map a stored parameter value (the code as `f32`) to a destination.
    pub fn from_param(value: f32) -> Self {
        if value.is_finite() {
            Self::from_code(libm::roundf(value) as i32)
        } else {
            Self::None
        }
    }

    /// Integer code of this destination.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Lower-case name used in presets and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pitch => "pitch",
            Self::Cutoff => "cutoff",
            Self::Amplitude => "amplitude",
            Self::Fold => "fold",
            Self::Crush => "crush",
        }
    }

    /// Look up a destination by [`name`](Self::name), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Per-destination multipliers, at most one of which is `1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModRouting {
    /// Pitch multiplier.
    pub pitch: f32,
    /// Cutoff multiplier.
    pub cutoff: f32,
    /// Amplitude multiplier.
    pub amplitude: f32,
    /// Fold drive multiplier.
    pub fold: f32,
    /// Crush mix multiplier.
    pub crush: f32,
}

impl ModRouting {
    /// Route to `destination`.
    ///
    /// ```rust
    /// use dualosc_synth::{ModDestination, ModRouting};
    ///
    /// let r = ModRouting::new(ModDestination::Fold);
    /// assert_eq!(r.as_array(), [0.0, 0.0, 0.0, 1.0, 0.0]);
    /// ```
    pub fn new(destination: ModDestination) -> Self {
        let mut routing = Self::default();
        match destination {
            ModDestination::None => {}
            ModDestination::Pitch => routing.pitch = 1.0,
            ModDestination::Cutoff => routing.cutoff = 1.0,
            ModDestination::Amplitude => routing.amplitude = 1.0,
            ModDestination::Fold => routing.fold = 1.0,
            ModDestination::Crush => routing.crush = 1.0,
        }
        routing
    }

    /// Route by integer code; unknown codes route nowhere.
    pub fn from_code(code: i32) -> Self {
        Self::new(ModDestination::from_code(code))
    }

    /// Multipliers in code order: pitch, cutoff, amplitude, fold, crush.
    pub fn as_array(&self) -> [f32; 5] {
        [self.pitch, self.cutoff, self.amplitude, self.fold, self.crush]
    }
}
