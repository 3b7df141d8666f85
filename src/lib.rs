//! Sprite sheet builder - Library for packing numbered frames into atlas bundles
//!
//! This library provides functionality to:
//! - Plan a grid layout and composite transformed frames into an atlas
//! - Export a bundle with metadata, sounds and a standalone runtime helper
//! - Play row animations with frame-bound sound triggers

pub mod atlas;
pub mod cli;
pub mod config;
pub mod export;
pub mod frame;
pub mod layout;
pub mod models;
pub mod playback;
pub mod project;
pub mod runtime;
