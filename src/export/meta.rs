//! `meta.json` document

use serde::Serialize;

use super::SoundCollector;
use crate::models::{FrameRect, GridConfig, ProjectModel, RowMeta, TriggerSounds};
use crate::runtime::{LoopMode, SoundBinding};

/// One grid row as an animation clip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowEntry {
    pub name: String,
    pub fps: u32,
    pub loop_mode: LoopMode,
    /// Rendered frames in playback order
    pub frames: Vec<FrameRect>,
    pub sounds: Vec<SoundBinding>,
}

/// Complete bundle metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleMeta {
    pub sheet_name: String,
    pub image: String,
    pub grid: GridConfig,
    pub rows: Vec<RowEntry>,
    /// Always exactly 16 entries
    pub trigger_sounds: TriggerSounds,
}

impl BundleMeta {
    /// Assemble metadata for a composited sheet, relocating every sound
    /// through `sounds`.
    pub fn build(
        project: &ProjectModel,
        frames: &[Vec<FrameRect>],
        sounds: &mut SoundCollector,
    ) -> Self {
        let default_meta = RowMeta::default();
        let rows = (0..project.grid.rows as usize)
            .map(|r| {
                let meta = project.row_meta(r).unwrap_or(&default_meta);
                RowEntry {
                    name: meta.display_name(r),
                    fps: meta.effective_fps(),
                    loop_mode: meta.loop_mode,
                    frames: frames.get(r).cloned().unwrap_or_default(),
                    sounds: meta
                        .sounds
                        .iter()
                        .map(|s| SoundBinding { file: sounds.relocate(&s.file), ..s.clone() })
                        .collect(),
                }
            })
            .collect();

        let trigger_sounds = project.trigger_sounds.map(|_, slot| {
            let mut slot = slot.clone();
            slot.file = sounds.relocate(&slot.file);
            slot
        });

        Self {
            sheet_name: project.sheet_name.trim().to_string(),
            image: super::ATLAS_FILE_NAME.to_string(),
            grid: project.grid.clone(),
            rows,
            trigger_sounds,
        }
    }
}
