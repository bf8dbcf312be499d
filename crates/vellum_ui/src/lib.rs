//! # VELLUM UI
//!
//! Retained-mode, canvas-painted UI toolkit for full-screen game menus.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         UI PIPELINE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  HostEvent → InputNormalizer → Core → Page → Scene → Widget  │
//! │                                  ↓                           │
//! │                 update(dt) → paint(Surface) → RenderCommand  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`scene::Scene`]: node arena with translate-only transforms, front-to-back
//!   hit-testing and an overlay pass for open dropdowns.
//! - [`core::Core`]: page stack, hover/active tracking, overlay-aware dispatch
//!   and the frame loop.
//! - [`widget`]: labels, buttons, images and the interactive widgets
//!   (checkbox, slider, text input, dropdown, virtualized lists).
//! - [`render::Surface`]: records paint commands; the host replays them.
//!
//! Everything on the input/update/paint path is infallible. Only
//! configuration loading returns [`UiResult`].

#![deny(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod input;
pub mod page;
pub mod render;
pub mod scene;
pub mod scrollbar;
pub mod style;
pub mod widget;

pub use crate::core::{Core, FrameClock};
pub use assets::{AudioSink, ImageHandle, ImageProvider, NullAudio, SoundCue};
pub use config::UiConfig;
pub use error::{UiError, UiResult};
pub use geometry::{Point, Rect, Size};
pub use input::{HostEvent, InputEvent, InputNormalizer, Key, KeyInput, MouseButton, Viewport};
pub use page::{BasePage, Page};
pub use render::{RenderCommand, Surface};
pub use scene::{EventCtx, Node, NodeId, Scene, Widget};
pub use scrollbar::{scroll_from_pointer_y, scroll_metrics, ScrollMetrics, ScrollTrack};
pub use style::{Color, Theme};
