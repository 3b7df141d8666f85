//! Frame stepping and sound triggering for one sprite sheet row.
//!
//! [`AnimationPlayer`] is driven by whoever owns the clock: the editor preview
//! ticks it at a fixed `1000 / fps` interval, exported bundles feed it
//! wall-clock deltas. Both get identical frame sequences and sound events for
//! the same total elapsed time.
//!
//! This file depends only on `std` and `serde` so it can be shipped unchanged
//! inside exported bundles.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum gap between two fires of a once-per-visit sound (`repeat_ms == 0`).
pub const ONCE_PER_VISIT_DEBOUNCE_MS: f64 = 50.0;

/// Last-fired timestamp of a sound that has not fired since configuration.
const NEVER_FIRED: f64 = f64::NEG_INFINITY;

/// Key used for sounds that have no name.
const UNNAMED_SOUND: &str = "sound";

/// How playback continues after the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LoopMode {
    /// Wrap around to the first frame
    Loop,
    /// Reverse direction at either end
    #[default]
    Pingpong,
}

impl LoopMode {
    /// Parse a loop mode name. Anything other than `loop` is pingpong.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("loop") {
            LoopMode::Loop
        } else {
            LoopMode::Pingpong
        }
    }

    /// Name as written to metadata files.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopMode::Loop => "loop",
            LoopMode::Pingpong => "pingpong",
        }
    }
}

impl From<String> for LoopMode {
    fn from(value: String) -> Self {
        LoopMode::parse_lenient(&value)
    }
}

impl std::fmt::Display for LoopMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_volume() -> f32 {
    1.0
}

/// A sound bound to a frame index of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundBinding {
    /// Sound name. Bindings sharing a name share one debounce slot.
    #[serde(default)]
    pub name: String,
    /// Path to the audio file
    #[serde(default)]
    pub file: String,
    /// Index into the row's rendered frame sequence
    #[serde(default)]
    pub trigger_frame: usize,
    /// Minimum milliseconds between repeats; 0 fires once per visit
    #[serde(default)]
    pub repeat_ms: u64,
    /// Playback volume, 0.0 to 1.0
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl SoundBinding {
    /// Create a binding that fires once each time `trigger_frame` is entered.
    pub fn new(name: impl Into<String>, file: impl Into<String>, trigger_frame: usize) -> Self {
        Self { name: name.into(), file: file.into(), trigger_frame, repeat_ms: 0, volume: 1.0 }
    }

    /// Set the repeat interval in milliseconds.
    pub fn with_repeat(mut self, repeat_ms: u64) -> Self {
        self.repeat_ms = repeat_ms;
        self
    }

    /// Set the volume, clamped to 0.0..=1.0.
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    fn key(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_SOUND
        } else {
            &self.name
        }
    }
}

/// A sound that should start playing now.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEvent {
    pub name: String,
    pub file: String,
    pub volume: f32,
}

/// Outcome of one [`AnimationPlayer::advance`] call.
#[derive(Debug, PartialEq)]
pub struct Step<'a, F> {
    /// Frame to display, `None` when the player has no frames
    pub frame: Option<&'a F>,
    /// Sounds fired by this call, in binding declaration order
    pub events: Vec<SoundEvent>,
}

/// Frame-stepping and sound-trigger state machine.
///
/// Frames are opaque handles: file paths in the editor, atlas rectangles at
/// runtime.
///
/// ```ignore
/// use spritesheet_builder::runtime::{AnimationPlayer, LoopMode};
///
/// let mut player = AnimationPlayer::new();
/// player.configure(vec!["a", "b", "c"], 10, LoopMode::Loop, vec![]);
/// assert_eq!(player.advance(100.0).frame, Some(&"b"));
/// assert_eq!(player.advance(250.0).frame, Some(&"a"));
/// ```
#[derive(Debug, Clone)]
pub struct AnimationPlayer<F> {
    frames: Vec<F>,
    fps: u32,
    loop_mode: LoopMode,
    sounds: Vec<SoundBinding>,
    index: usize,
    direction: i8,
    accumulator_ms: f64,
    clock_ms: f64,
    last_fired: HashMap<String, f64>,
}

impl<F> Default for AnimationPlayer<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> AnimationPlayer<F> {
    /// Create an empty player (6 fps, pingpong).
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            fps: 6,
            loop_mode: LoopMode::Pingpong,
            sounds: Vec::new(),
            index: 0,
            direction: 1,
            accumulator_ms: 0.0,
            clock_ms: 0.0,
            last_fired: HashMap::new(),
        }
    }

    /// Replace the animation and rewind to the first frame.
    ///
    /// `fps` below 1 is treated as 1.
    pub fn configure(
        &mut self,
        frames: Vec<F>,
        fps: u32,
        loop_mode: LoopMode,
        sounds: Vec<SoundBinding>,
    ) {
        self.frames = frames;
        self.fps = fps.max(1);
        self.loop_mode = loop_mode;
        self.sounds = sounds;
        self.index = 0;
        self.direction = 1;
        self.accumulator_ms = 0.0;
        self.last_fired = self
            .sounds
            .iter()
            .map(|s| (s.key().to_string(), NEVER_FIRED))
            .collect();
    }

    /// Change the frame rate without rewinding.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.max(1);
    }

    /// Change the loop mode. Pingpong restarts moving forward.
    pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
        self.loop_mode = loop_mode;
        self.direction = 1;
    }

    /// Milliseconds per frame step.
    pub fn interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps)
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    pub fn sounds(&self) -> &[SoundBinding] {
        &self.sounds
    }

    /// Current frame index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pingpong direction: `1` forward, `-1` backward.
    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn current_frame(&self) -> Option<&F> {
        self.frames.get(self.index)
    }

    /// Advance playback by `dt_ms` milliseconds.
    ///
    /// Steps once per elapsed interval (a long `dt_ms` walks through every
    /// intermediate frame), then fires the sounds bound to the resulting
    /// frame. Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt_ms: f64) -> Step<'_, F> {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.clock_ms += dt_ms;
        self.accumulator_ms += dt_ms;

        let interval = self.interval_ms();
        while self.accumulator_ms >= interval {
            self.accumulator_ms -= interval;
            self.step();
        }

        let events = self.fire_sounds();
        Step { frame: self.frames.get(self.index), events }
    }

    fn step(&mut self) {
        let n = self.frames.len();
        if n <= 1 {
            return;
        }
        match self.loop_mode {
            LoopMode::Loop => {
                self.index = (self.index + 1) % n;
            }
            LoopMode::Pingpong => {
                let next = self.index as isize + isize::from(self.direction);
                if next > (n - 1) as isize {
                    self.index = if n >= 2 { n - 2 } else { 0 };
                    self.direction = -1;
                } else if next < 0 {
                    self.index = if n >= 2 { 1 } else { 0 };
                    self.direction = 1;
                } else {
                    self.index = next as usize;
                }
                if self.index == n - 1 {
                    self.direction = -1;
                } else if self.index == 0 {
                    self.direction = 1;
                }
            }
        }
    }

    fn fire_sounds(&mut self) -> Vec<SoundEvent> {
        let now = self.clock_ms;
        let mut events = Vec::new();
        for sound in &self.sounds {
            if sound.trigger_frame != self.index {
                continue;
            }
            let key = sound.key();
            let last = self.last_fired.get(key).copied().unwrap_or(NEVER_FIRED);
            let elapsed = now - last;
            let due = if sound.repeat_ms == 0 {
                elapsed > ONCE_PER_VISIT_DEBOUNCE_MS
            } else {
                elapsed >= sound.repeat_ms as f64
            };
            if due {
                events.push(SoundEvent {
                    name: key.to_string(),
                    file: sound.file.clone(),
                    volume: sound.volume,
                });
                self.last_fired.insert(key.to_string(), now);
            }
        }
        events
    }
}
