//! Plugin surface the workflow host sees
//!
//! The factory name ties this widget to the segmentation processing node:
//! the host pairs widget and node factories registered under the same name.

use serde::{Deserialize, Serialize};

use crate::core::{with_registry, BoxedTaskWidget, SharedParams, WidgetFactory};
use crate::ui::YoloSegConfigWidget;

/// Name the processing node and this widget are registered under.
pub const WIDGET_NAME: &str = "infer_yolo_v8_seg";

/// Metadata about the plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Plugin name
    pub name: String,
    /// Plugin version
    pub version: String,
    /// Plugin author
    pub author: String,
    /// Plugin description
    pub description: String,
}

/// Metadata reported to the host when it enumerates plugins.
pub fn metadata() -> PluginMetadata {
    PluginMetadata {
        name: WIDGET_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        author: "yoloseg-panel Contributors".to_string(),
        description: env!("CARGO_PKG_DESCRIPTION").to_string(),
    }
}

/// Factory building the parameter widget for the segmentation node.
pub struct YoloSegWidgetFactory;

impl WidgetFactory for YoloSegWidgetFactory {
    fn name(&self) -> &'static str {
        WIDGET_NAME
    }

    fn create(&self, params: Option<SharedParams>) -> BoxedTaskWidget {
        Box::new(YoloSegConfigWidget::new(params))
    }
}

/// Install this plugin's widget factory into the global registry.
pub fn register_widgets() {
    with_registry(|registry| registry.register(Box::new(YoloSegWidgetFactory)));
    log::info!("Registered widget factory '{}'", WIDGET_NAME);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_name_matches_node_name() {
        assert_eq!(YoloSegWidgetFactory.name(), "infer_yolo_v8_seg");
    }

    #[test]
    fn test_metadata_serialization() {
        let meta = metadata();
        assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));

        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("infer_yolo_v8_seg"));
    }
}
