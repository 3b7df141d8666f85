//! Fixed slots for engine trigger sounds

use serde::{Deserialize, Serialize, Serializer};

/// Number of engine trigger slots (trigger ids 0-15).
pub const TRIGGER_SLOT_COUNT: usize = 16;

fn default_volume() -> f32 {
    1.0
}

/// Sound played when the engine raises a trigger id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerSound {
    /// Audio file path, empty for an unused slot
    #[serde(default)]
    pub file: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for TriggerSound {
    fn default() -> Self {
        Self { file: String::new(), volume: 1.0 }
    }
}

impl TriggerSound {
    pub fn new(file: impl Into<String>, volume: f32) -> Self {
        Self { file: file.into(), volume: volume.clamp(0.0, 1.0) }
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }
}

/// Exactly [`TRIGGER_SLOT_COUNT`] trigger sounds.
///
/// Shorter lists are padded with empty slots and longer ones truncated,
/// both when built from a list and when deserialized. `null` deserializes to
/// all-empty slots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Option<Vec<TriggerSound>>")]
pub struct TriggerSounds([TriggerSound; TRIGGER_SLOT_COUNT]);

impl Default for TriggerSounds {
    fn default() -> Self {
        Self(std::array::from_fn(|_| TriggerSound::default()))
    }
}

impl TriggerSounds {
    /// Build from any number of sounds, padding or truncating to 16.
    pub fn from_vec(sounds: Vec<TriggerSound>) -> Self {
        let mut slots = Self::default();
        for (slot, sound) in slots.0.iter_mut().zip(sounds) {
            *slot = sound;
        }
        slots
    }

    pub fn get(&self, index: usize) -> Option<&TriggerSound> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TriggerSound> {
        self.0.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TriggerSound> {
        self.0.iter()
    }

    /// Always [`TRIGGER_SLOT_COUNT`].
    pub fn len(&self) -> usize {
        TRIGGER_SLOT_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of slots with a file assigned.
    pub fn assigned(&self) -> usize {
        self.0.iter().filter(|s| !s.is_empty()).count()
    }

    /// Apply `f` to every slot, producing a new set.
    pub fn map(&self, mut f: impl FnMut(usize, &TriggerSound) -> TriggerSound) -> Self {
        Self(std::array::from_fn(|i| f(i, &self.0[i])))
    }
}

impl From<Option<Vec<TriggerSound>>> for TriggerSounds {
    fn from(sounds: Option<Vec<TriggerSound>>) -> Self {
        sounds.map(Self::from_vec).unwrap_or_default()
    }
}

impl From<Vec<TriggerSound>> for TriggerSounds {
    fn from(sounds: Vec<TriggerSound>) -> Self {
        Self::from_vec(sounds)
    }
}

impl Serialize for TriggerSounds {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'a> IntoIterator for &'a TriggerSounds {
    type Item = &'a TriggerSound;
    type IntoIter = std::slice::Iter<'a, TriggerSound>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
