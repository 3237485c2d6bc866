//! Core types for the parameter panel

pub mod gpu;
mod params;
mod registry;

pub use params::{ModelVariant, ParamError, SharedParams, YoloSegParams};
pub use registry::{with_registry, BoxedTaskWidget, TaskWidget, WidgetFactory, WidgetRegistry};
