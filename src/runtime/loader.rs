//! Bundle loading for exported sprite sheets.
//!
//! Reads a bundle's `meta.json` and returns the atlas path, the row
//! animations keyed by name and the 16 engine trigger sounds with their
//! files resolved inside the bundle.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::player::{AnimationPlayer, LoopMode, SoundBinding};

/// Number of engine trigger sound slots.
pub const TRIGGER_SLOTS: usize = 16;

/// Metadata file name inside a bundle.
pub const META_FILE: &str = "meta.json";

/// Atlas rectangle `[x, y, width, height]`.
pub type FrameBox = [u32; 4];

/// Error loading a bundle
#[derive(Debug)]
pub enum LoadError {
    /// Bundle directory or metadata could not be read
    Io { path: PathBuf, source: io::Error },
    /// Metadata is not valid JSON for a bundle
    Parse(serde_json::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "Cannot read bundle '{}': {}", path.display(), source)
            }
            LoadError::Parse(e) => write!(f, "Invalid bundle metadata: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

fn default_fps() -> u32 {
    6
}

fn default_volume() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
struct MetaFile {
    image: String,
    #[serde(default)]
    rows: Vec<MetaRow>,
    #[serde(default)]
    trigger_sounds: Option<Vec<MetaTrigger>>,
}

#[derive(Debug, Deserialize)]
struct MetaRow {
    #[serde(default)]
    name: String,
    #[serde(default = "default_fps")]
    fps: u32,
    #[serde(default)]
    loop_mode: LoopMode,
    #[serde(default)]
    frames: Vec<FrameBox>,
    #[serde(default)]
    sounds: Vec<SoundBinding>,
}

#[derive(Debug, Deserialize)]
struct MetaTrigger {
    #[serde(default)]
    file: String,
    #[serde(default = "default_volume")]
    volume: f32,
}

/// One row of the sheet, ready to play.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub frames: Vec<FrameBox>,
    pub fps: u32,
    pub loop_mode: LoopMode,
    /// Sound bindings with files relative to the bundle directory
    pub sounds: Vec<SoundBinding>,
}

impl Animation {
    /// Create a player configured for this animation.
    pub fn player(&self) -> AnimationPlayer<FrameBox> {
        let mut player = AnimationPlayer::new();
        self.configure(&mut player);
        player
    }

    /// Load this animation into an existing player, rewinding it.
    pub fn configure(&self, player: &mut AnimationPlayer<FrameBox>) {
        player.configure(self.frames.clone(), self.fps, self.loop_mode, self.sounds.clone());
    }
}

/// An engine trigger sound slot.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerCue {
    /// Absolute path of the sound, `None` for an empty slot
    pub file: Option<PathBuf>,
    pub volume: f32,
}

/// A loaded bundle.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Bundle directory
    pub dir: PathBuf,
    /// Path of the atlas image
    pub image_path: PathBuf,
    /// Row animations keyed by name (last row wins on duplicate names)
    pub animations: BTreeMap<String, Animation>,
    /// Exactly [`TRIGGER_SLOTS`] trigger sounds
    pub trigger_sounds: Vec<TriggerCue>,
}

impl Bundle {
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.get(name)
    }

    /// Resolve a bundle-relative sound path (as found in [`SoundBinding::file`]).
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.dir.join(relative)
    }
}

/// Load an exported bundle directory.
pub fn load_bundle(dir: impl AsRef<Path>) -> Result<Bundle, LoadError> {
    let dir = dir.as_ref();
    let dir = fs::canonicalize(dir).map_err(|source| LoadError::Io { path: dir.to_path_buf(), source })?;

    let meta_path = dir.join(META_FILE);
    let contents = fs::read_to_string(&meta_path)
        .map_err(|source| LoadError::Io { path: meta_path.clone(), source })?;
    let meta: MetaFile = serde_json::from_str(&contents)?;

    let mut animations = BTreeMap::new();
    for row in meta.rows {
        let name = if row.name.is_empty() { "row".to_string() } else { row.name };
        animations.insert(
            name,
            Animation {
                frames: row.frames,
                fps: row.fps.max(1),
                loop_mode: row.loop_mode,
                sounds: row.sounds,
            },
        );
    }

    let mut trigger_sounds: Vec<TriggerCue> = meta
        .trigger_sounds
        .unwrap_or_default()
        .into_iter()
        .take(TRIGGER_SLOTS)
        .map(|t| TriggerCue {
            file: if t.file.is_empty() {
                None
            } else {
                let joined = dir.join(&t.file);
                Some(fs::canonicalize(&joined).unwrap_or(joined))
            },
            volume: t.volume,
        })
        .collect();
    trigger_sounds.resize(TRIGGER_SLOTS, TriggerCue { file: None, volume: 1.0 });

    Ok(Bundle { image_path: dir.join(&meta.image), dir, animations, trigger_sounds })
}
