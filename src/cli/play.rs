//! Play command implementation

use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use crate::runtime::{load_bundle, Step};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the play command
pub fn run_play(
    bundle_dir: &Path,
    row: Option<&str>,
    duration_ms: u64,
    step_ms: u64,
    realtime: bool,
) -> ExitCode {
    let bundle = match load_bundle(bundle_dir) {
        Ok(bundle) => bundle,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let name = match row {
        Some(name) => name.to_string(),
        None => match bundle.animations.keys().next() {
            Some(name) => name.clone(),
            None => {
                eprintln!("Error: Bundle has no rows");
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };
    let Some(animation) = bundle.animation(&name) else {
        let available: Vec<&str> = bundle.animations.keys().map(String::as_str).collect();
        eprintln!("Error: No row named '{}' (available: {})", name, available.join(", "));
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    println!(
        "Playing '{}': {} frame(s) at {} fps ({})",
        name,
        animation.frames.len(),
        animation.fps,
        animation.loop_mode
    );

    let mut player = animation.player();
    let mut last_index = None;
    let mut elapsed = 0;
    let mut dt = 0.0;
    while elapsed <= duration_ms {
        let Step { frame, events } = player.advance(dt);
        let frame = frame.copied();
        if last_index != Some(player.index()) {
            if let Some([x, y, w, h]) = frame {
                println!("{:>6}ms  frame {:>2}  [{}, {}, {}, {}]", elapsed, player.index(), x, y, w, h);
            }
            last_index = Some(player.index());
        }
        for event in events {
            println!(
                "{:>6}ms  sound '{}' {} (volume {:.2})",
                elapsed,
                event.name,
                bundle.resolve(&event.file).display(),
                event.volume
            );
        }

        if realtime {
            thread::sleep(Duration::from_millis(step_ms));
        }
        elapsed += step_ms;
        dt = step_ms as f64;
    }
    ExitCode::from(EXIT_SUCCESS)
}
