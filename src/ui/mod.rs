//! UI components

mod seg_config_widget;
pub mod widget_builder;

pub use seg_config_widget::{OnApplyCallback, YoloSegConfigWidget};
