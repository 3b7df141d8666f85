//! Playback runtime shared by the editor preview and exported bundles.
//!
//! The same two source files compiled here are written into every bundle as
//! [`HELPER_FILE_NAME`], so the preview and the shipped game step frames and
//! fire sounds identically.

pub mod loader;
pub mod player;

pub use loader::{load_bundle, Animation, Bundle, FrameBox, LoadError, TriggerCue, TRIGGER_SLOTS};
pub use player::{
    AnimationPlayer, LoopMode, SoundBinding, SoundEvent, Step, ONCE_PER_VISIT_DEBOUNCE_MS,
};

/// File name of the runtime helper inside a bundle.
pub const HELPER_FILE_NAME: &str = "sprite_runtime.rs";

const HELPER_HEADER: &str = "\
// Generated by spritesheet-builder. Do not edit.
//
// Sprite sheet runtime: add this file to your crate as a module. It needs
// `serde` (with the `derive` feature) and `serde_json`.
//
//     let bundle = sprite_runtime::load_bundle(\"path/to/bundle\")?;
//     let mut player = bundle.animations[\"walk\"].player();
//     let step = player.advance(dt_ms);

";

const PLAYER_SOURCE: &str = include_str!("player.rs");
const LOADER_SOURCE: &str = include_str!("loader.rs");

/// Source of the standalone runtime helper written into bundles.
pub fn helper_source() -> String {
    let mut out = String::with_capacity(
        HELPER_HEADER.len() + PLAYER_SOURCE.len() + LOADER_SOURCE.len() + 256,
    );
    out.push_str(HELPER_HEADER);
    out.push_str("pub use loader::{load_bundle, Animation, Bundle, FrameBox, LoadError, TriggerCue};\n");
    out.push_str("pub use player::{AnimationPlayer, LoopMode, SoundBinding, SoundEvent, Step};\n\n");
    push_module(&mut out, "player", PLAYER_SOURCE);
    out.push('\n');
    push_module(&mut out, "loader", LOADER_SOURCE);
    out
}

/// Source up to its `#[cfg(test)]` module, without trailing blank lines.
fn without_tests(source: &str) -> &str {
    let end = source.find("\n#[cfg(test)]").unwrap_or(source.len());
    source[..end].trim_end()
}

fn push_module(out: &mut String, name: &str, source: &str) {
    out.push_str("pub mod ");
    out.push_str(name);
    out.push_str(" {\n");
    for line in without_tests(source).lines() {
        if !line.is_empty() {
            out.push_str("    ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push_str("}\n");
}
