//! Voice parameters: the per-block snapshot and its lock-free store.
//!
//! [`SynthParams`] is a plain `Copy` value holding everything a block needs.
//! The audio thread takes one snapshot per block from [`SharedParams`] and
//! passes it by value into the voices, so nothing a voice reads can change
//! mid-block.
//!
//! [`ParamKey`] enumerates every parameter once and carries its
//! [`ParamDescriptor`]; the store, preset validation and the command line all
//! go through it.

use core::sync::atomic::{AtomicU32, Ordering};

use dualosc_core::{ParamDescriptor, ParamScale, ParamUnit};

use crate::envelope::EnvelopeParams;
use crate::router::ModDestination;
use crate::unison::UnisonMode;

/// Everything the voice renderer reads, snapshotted once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParams {
    /// Oscillator 1 morph (0 sine, 0.5 saw, 1 square).
    pub osc1_shape: f32,
    /// Oscillator 2 morph.
    pub osc2_shape: f32,
    /// Oscillator 1 transpose in semitones.
    pub osc1_semitones: f32,
    /// Oscillator 2 transpose in semitones.
    pub osc2_semitones: f32,
    /// Oscillators per slot.
    pub unison: UnisonMode,
    /// Unison spread in cents.
    pub detune_cents: f32,
    /// Base wavefolder drive (0–1).
    pub fold_drive: f32,
    /// Base filter cutoff in Hz.
    pub cutoff_hz: f32,
    /// Filter Q.
    pub resonance: f32,
    /// Cutoff offset in Hz at full filter envelope.
    pub filter_env_amount: f32,
    /// LFO rate in Hz.
    pub lfo_rate: f32,
    /// LFO depth (0–1).
    pub lfo_depth: f32,
    /// LFO destination.
    pub lfo_destination: ModDestination,
    /// Amplitude envelope.
    pub amp_env: EnvelopeParams,
    /// Filter envelope.
    pub filter_env: EnvelopeParams,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            osc1_shape: 0.0,
            osc2_shape: 0.0,
            osc1_semitones: 0.0,
            osc2_semitones: 0.0,
            unison: UnisonMode::Single,
            detune_cents: 8.0,
            fold_drive: 0.0,
            cutoff_hz: 1200.0,
            resonance: 0.7,
            filter_env_amount: 0.0,
            lfo_rate: 5.0,
            lfo_depth: 0.0,
            lfo_destination: ModDestination::None,
            amp_env: EnvelopeParams::default(),
            filter_env: EnvelopeParams::default(),
        }
    }
}

impl VoiceParams {
    /// Clamp every field to its descriptor range; NaN takes the default.
    pub fn sanitized(self) -> Self {
        SynthParams {
            voice: self,
            crusher: CrusherParams::default(),
        }
        .sanitized()
        .voice
    }
}

/// Settings for the downstream bit crusher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrusherParams {
    /// Bit depth (1–24).
    pub bits: f32,
    /// Hold length in samples (1 and up).
    pub downsample: u32,
    /// Base wet mix (0–1) before crush modulation.
    pub mix: f32,
}

impl Default for CrusherParams {
    fn default() -> Self {
        Self {
            bits: 16.0,
            downsample: 1,
            mix: 0.0,
        }
    }
}

/// Voice parameters plus the crusher: one block's complete parameter set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SynthParams {
    /// Pushed into every voice.
    pub voice: VoiceParams,
    /// Applied to the mixed output.
    pub crusher: CrusherParams,
}

/// Every automatable parameter, in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ParamKey {
    Osc1Shape,
    Osc2Shape,
    Osc1Semitones,
    Osc2Semitones,
    UnisonVoices,
    UnisonDetune,
    FoldDrive,
    FilterCutoff,
    FilterResonance,
    FilterEnvAmount,
    LfoRate,
    LfoDepth,
    LfoDestination,
    AmpAttack,
    AmpDecay,
    AmpSustain,
    AmpRelease,
    FilterAttack,
    FilterDecay,
    FilterSustain,
    FilterRelease,
    CrushBits,
    CrushDownsample,
    CrushMix,
}

const fn env_time(name: &'static str, short: &'static str, id: &'static str, default: f32) -> ParamDescriptor {
    ParamDescriptor::new(name, short, id, 0.0, EnvelopeParams::MAX_TIME, default)
        .with_unit(ParamUnit::Seconds)
        .with_step(0.001)
}

const fn env_sustain(name: &'static str, id: &'static str) -> ParamDescriptor {
    ParamDescriptor::new(name, "Sustain", id, 0.0, 1.0, 0.8)
}

const DESCRIPTORS: [ParamDescriptor; ParamKey::COUNT] = [
    ParamDescriptor::new("Osc 1 Shape", "Shape 1", "osc1_shape", 0.0, 1.0, 0.0),
    ParamDescriptor::new("Osc 2 Shape", "Shape 2", "osc2_shape", 0.0, 1.0, 0.0),
    ParamDescriptor::new("Osc 1 Pitch", "Pitch 1", "osc1_semitones", -24.0, 24.0, 0.0)
        .with_unit(ParamUnit::Semitones)
        .with_step(1.0),
    ParamDescriptor::new("Osc 2 Pitch", "Pitch 2", "osc2_semitones", -24.0, 24.0, 0.0)
        .with_unit(ParamUnit::Semitones)
        .with_step(1.0),
    ParamDescriptor::new("Unison Voices", "Unison", "unison_voices", 1.0, 3.0, 1.0)
        .with_choices(&[1.0, 3.0]),
    ParamDescriptor::new("Unison Detune", "Detune", "unison_detune", 0.0, 100.0, 8.0)
        .with_unit(ParamUnit::Cents)
        .with_step(0.5),
    ParamDescriptor::new("Fold Drive", "Fold", "fold_drive", 0.0, 1.0, 0.0),
    ParamDescriptor::new("Filter Cutoff", "Cutoff", "filter_cutoff", 20.0, 20000.0, 1200.0)
        .with_unit(ParamUnit::Hertz)
        .with_scale(ParamScale::Logarithmic)
        .with_step(1.0),
    ParamDescriptor::new("Filter Resonance", "Reso", "filter_resonance", 0.5, 20.0, 0.7),
    ParamDescriptor::new("Filter Env Amount", "Env Amt", "filter_env_amount", -10000.0, 10000.0, 0.0)
        .with_unit(ParamUnit::Hertz)
        .with_step(10.0),
    ParamDescriptor::new("LFO Rate", "Rate", "lfo_rate", 0.1, 20.0, 5.0)
        .with_unit(ParamUnit::Hertz)
        .with_scale(ParamScale::Logarithmic),
    ParamDescriptor::new("LFO Depth", "Depth", "lfo_depth", 0.0, 1.0, 0.0),
    ParamDescriptor::new("LFO Destination", "LFO Dest", "lfo_destination", 0.0, 5.0, 0.0).stepped(),
    env_time("Amp Attack", "Attack", "amp_attack", 0.1),
    env_time("Amp Decay", "Decay", "amp_decay", 0.1),
    env_sustain("Amp Sustain", "amp_sustain"),
    env_time("Amp Release", "Release", "amp_release", 0.3),
    env_time("Filter Attack", "F Attack", "filter_attack", 0.1),
    env_time("Filter Decay", "F Decay", "filter_decay", 0.1),
    env_sustain("Filter Sustain", "filter_sustain"),
    env_time("Filter Release", "F Rel", "filter_release", 0.3),
    ParamDescriptor::new("Crush Bits", "Bits", "crush_bits", 1.0, 24.0, 16.0)
        .with_unit(ParamUnit::Bits)
        .stepped(),
    ParamDescriptor::new("Crush Downsample", "Hold", "crush_downsample", 1.0, 64.0, 1.0)
        .with_unit(ParamUnit::Samples)
        .stepped(),
    ParamDescriptor::new("Crush Mix", "Crush", "crush_mix", 0.0, 1.0, 0.0),
];

impl ParamKey {
    /// Number of parameters.
    pub const COUNT: usize = 24;

    /// All keys in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Osc1Shape,
        Self::Osc2Shape,
        Self::Osc1Semitones,
        Self::Osc2Semitones,
        Self::UnisonVoices,
        Self::UnisonDetune,
        Self::FoldDrive,
        Self::FilterCutoff,
        Self::FilterResonance,
        Self::FilterEnvAmount,
        Self::LfoRate,
        Self::LfoDepth,
        Self::LfoDestination,
        Self::AmpAttack,
        Self::AmpDecay,
        Self::AmpSustain,
        Self::AmpRelease,
        Self::FilterAttack,
        Self::FilterDecay,
        Self::FilterSustain,
        Self::FilterRelease,
        Self::CrushBits,
        Self::CrushDownsample,
        Self::CrushMix,
    ];

    /// Position in [`ALL`](Self::ALL).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Metadata for this parameter.
    pub fn descriptor(self) -> &'static ParamDescriptor {
        &DESCRIPTORS[self.index()]
    }

    /// Stable string ID, e.g. `"filter_cutoff"`.
    pub fn id(self) -> &'static str {
        self.descriptor().string_id
    }

    /// Look up a key by its string ID.
    ///
    /// ```rust
    /// use dualosc_synth::ParamKey;
    ///
    /// assert_eq!(ParamKey::from_id("lfo_rate"), Some(ParamKey::LfoRate));
    /// assert_eq!(ParamKey::from_id("volume"), None);
    /// ```
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

impl SynthParams {
    /// Read one parameter as the `f32` the store holds.
    pub fn get(&self, key: ParamKey) -> f32 {
        let v = &self.voice;
        match key {
            ParamKey::Osc1Shape => v.osc1_shape,
            ParamKey::Osc2Shape => v.osc2_shape,
            ParamKey::Osc1Semitones => v.osc1_semitones,
            ParamKey::Osc2Semitones => v.osc2_semitones,
            ParamKey::UnisonVoices => v.unison.count() as f32,
            ParamKey::UnisonDetune => v.detune_cents,
            ParamKey::FoldDrive => v.fold_drive,
            ParamKey::FilterCutoff => v.cutoff_hz,
            ParamKey::FilterResonance => v.resonance,
            ParamKey::FilterEnvAmount => v.filter_env_amount,
            ParamKey::LfoRate => v.lfo_rate,
            ParamKey::LfoDepth => v.lfo_depth,
            ParamKey::LfoDestination => v.lfo_destination.code() as f32,
            ParamKey::AmpAttack => v.amp_env.attack,
            ParamKey::AmpDecay => v.amp_env.decay,
            ParamKey::AmpSustain => v.amp_env.sustain,
            ParamKey::AmpRelease => v.amp_env.release,
            ParamKey::FilterAttack => v.filter_env.attack,
            ParamKey::FilterDecay => v.filter_env.decay,
            ParamKey::FilterSustain => v.filter_env.sustain,
            ParamKey::FilterRelease => v.filter_env.release,
            ParamKey::CrushBits => self.crusher.bits,
            ParamKey::CrushDownsample => self.crusher.downsample as f32,
            ParamKey::CrushMix => self.crusher.mix,
        }
    }

    /// Write one parameter, clamped to its descriptor range.
    pub fn set(&mut self, key: ParamKey, value: f32) {
        let value = key.descriptor().clamp(value);
        let v = &mut self.voice;
        match key {
            ParamKey::Osc1Shape => v.osc1_shape = value,
            ParamKey::Osc2Shape => v.osc2_shape = value,
            ParamKey::Osc1Semitones => v.osc1_semitones = value,
            ParamKey::Osc2Semitones => v.osc2_semitones = value,
            ParamKey::UnisonVoices => v.unison = UnisonMode::from_param(value),
            ParamKey::UnisonDetune => v.detune_cents = value,
            ParamKey::FoldDrive => v.fold_drive = value,
            ParamKey::FilterCutoff => v.cutoff_hz = value,
            ParamKey::FilterResonance => v.resonance = value,
            ParamKey::FilterEnvAmount => v.filter_env_amount = value,
            ParamKey::LfoRate => v.lfo_rate = value,
            ParamKey::LfoDepth => v.lfo_depth = value,
            ParamKey::LfoDestination => v.lfo_destination = ModDestination::from_param(value),
            ParamKey::AmpAttack => v.amp_env.attack = value,
            ParamKey::AmpDecay => v.amp_env.decay = value,
            ParamKey::AmpSustain => v.amp_env.sustain = value,
            ParamKey::AmpRelease => v.amp_env.release = value,
            ParamKey::FilterAttack => v.filter_env.attack = value,
            ParamKey::FilterDecay => v.filter_env.decay = value,
            ParamKey::FilterSustain => v.filter_env.sustain = value,
            ParamKey::FilterRelease => v.filter_env.release = value,
            ParamKey::CrushBits => self.crusher.bits = value,
            ParamKey::CrushDownsample => self.crusher.downsample = value as u32,
            ParamKey::CrushMix => self.crusher.mix = value,
        }
    }

    /// Clamp every parameter to its descriptor range; NaN takes the default.
    pub fn sanitized(mut self) -> Self {
        for key in ParamKey::ALL {
            self.set(key, self.get(key));
        }
        self
    }
}

/// Lock-free parameter store shared between a control thread and the audio
/// thread.
///
/// One `AtomicU32` per [`ParamKey`] holds the `f32` bit pattern. Writers call
/// [`set`](Self::set) or [`publish`](Self::publish); the audio thread calls
/// [`snapshot`](Self::snapshot) once per block. Every read and write is a
/// single atomic operation, so no value is ever observed half-written and
/// neither side ever blocks.
///
/// # Example
///
/// ```rust
/// use dualosc_synth::{ParamKey, SharedParams};
///
/// let shared = SharedParams::new();
/// shared.set(ParamKey::FilterCutoff, 50_000.0);
///
/// let block = shared.snapshot();
/// assert_eq!(block.voice.cutoff_hz, 20000.0);
/// ```
#[derive(Debug)]
pub struct SharedParams {
    values: [AtomicU32; ParamKey::COUNT],
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedParams {
    /// Create a store holding every descriptor default.
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|i| AtomicU32::new(DESCRIPTORS[i].default.to_bits())),
        }
    }

    /// Create a store holding `params`.
    pub fn from_params(params: &SynthParams) -> Self {
        let store = Self::new();
        store.publish(params);
        store
    }

    /// Store one value, clamped to its range. Returns the stored value.
    pub fn set(&self, key: ParamKey, value: f32) -> f32 {
        let value = key.descriptor().clamp(value);
        self.values[key.index()].store(value.to_bits(), Ordering::Release);
        value
    }

    /// Load one value.
    pub fn get(&self, key: ParamKey) -> f32 {
        f32::from_bits(self.values[key.index()].load(Ordering::Acquire))
    }

    /// Store a complete parameter set.
    pub fn publish(&self, params: &SynthParams) {
        for key in ParamKey::ALL {
            self.set(key, params.get(key));
        }
    }

    /// Read every value into a block snapshot.
    pub fn snapshot(&self) -> SynthParams {
        let mut params = SynthParams::default();
        for key in ParamKey::ALL {
            params.set(key, self.get(key));
        }
        params
    }
}
