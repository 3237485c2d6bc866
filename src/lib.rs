//! yoloseg-panel: parameter panel for a YOLOv8 segmentation workflow node
//!
//! This library provides the pieces a visual workflow host needs to let a
//! user configure its segmentation node:
//! - The parameter set the node consumes ([`YoloSegParams`])
//! - A GTK4 widget that edits it ([`YoloSegConfigWidget`])
//! - The factory and registry the host uses to locate the widget by the
//!   node's name

pub mod core;
pub mod plugin;
pub mod ui;

// Re-export commonly used types
pub use core::{ModelVariant, ParamError, SharedParams, YoloSegParams};
pub use plugin::{register_widgets, YoloSegWidgetFactory, WIDGET_NAME};
pub use ui::YoloSegConfigWidget;
