//! Data models for sprite sheet projects (grid, rows, trigger sounds, cells)

mod cells;
mod grid;
mod project;
mod row;
mod trigger;

pub use cells::CellGrid;
pub use grid::{FrameRect, GridConfig, MAX_SOURCE_SCALE, MIN_SOURCE_SCALE};
pub use project::{ProjectModel, ValidationError};
pub use row::{default_row_name, RowMeta, DEFAULT_FPS, MAX_FPS, MIN_FPS};
pub use trigger::{TriggerSound, TriggerSounds, TRIGGER_SLOT_COUNT};

pub use crate::runtime::{LoopMode, SoundBinding};
