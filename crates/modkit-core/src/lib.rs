//! Lifecycle driver and configuration for the modkit host.
//!
//! This crate sits between the host game and the player event registry:
//! it turns per-tick player snapshots into `invoke_*` calls on
//! [`PlayerEvents`](modkit_events::PlayerEvents).
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `modkit-config.yaml` into
//!   strongly-typed structs.
//! - [`inventory`] -- Item-level inventory diffing.
//! - [`tracker`] -- [`PlayerTracker`]: snapshot comparison and event raising.
//!
//! [`PlayerTracker`]: tracker::PlayerTracker

pub mod config;
pub mod inventory;
pub mod tracker;
