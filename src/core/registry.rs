//! Registry for node parameter widgets
//!
//! The host pairs a processing node with its parameter panel by name: the
//! widget factory registers itself under the same identifier the node's
//! factory uses, and the host looks the panel up here when the user opens
//! the node's parameter view.

use super::params::{SharedParams, YoloSegParams};
use anyhow::{anyhow, Result};
use gtk4::Box as GtkBox;
use std::cell::RefCell;
use std::collections::HashMap;

/// Host-facing surface of a parameter panel.
pub trait TaskWidget {
    /// Root container the host embeds in its parameter area.
    fn root(&self) -> &GtkBox;

    /// Flush the form into the parameter set and notify the host.
    fn apply(&self);

    /// Register the host's apply notification. Invoked exactly once per
    /// [`TaskWidget::apply`] call, with the freshly mutated parameter set.
    fn set_on_apply(&self, callback: Box<dyn Fn(&YoloSegParams)>);
}

pub type BoxedTaskWidget = Box<dyn TaskWidget>;

/// Builds the parameter widget for one processing-node type.
///
/// Stateless apart from the fixed name, which must equal the name the
/// corresponding processing node is registered under.
pub trait WidgetFactory {
    fn name(&self) -> &'static str;

    /// Build a widget bound to `params`, or to a fresh default set when the
    /// host has none yet.
    fn create(&self, params: Option<SharedParams>) -> BoxedTaskWidget;
}

/// Registry mapping node names to widget factories.
pub struct WidgetRegistry {
    factories: HashMap<String, Box<dyn WidgetFactory>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register(&mut self, factory: Box<dyn WidgetFactory>) {
        self.factories.insert(factory.name().to_string(), factory);
    }

    /// Create the widget registered under `name`.
    pub fn create(&self, name: &str, params: Option<SharedParams>) -> Result<BoxedTaskWidget> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| anyhow!("Unknown widget: {}", name))?;
        Ok(factory.create(params))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// List all registered widget names.
    pub fn list(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static REGISTRY: RefCell<WidgetRegistry> = RefCell::new(WidgetRegistry::new());
}

/// Run `f` against the process-wide registry.
///
/// The registry lives on the GTK main thread; widgets are created and used
/// there only, so any thread other than the main one would only ever see an
/// empty registry.
pub fn with_registry<R>(f: impl FnOnce(&mut WidgetRegistry) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::YoloSegWidgetFactory;

    #[test]
    fn test_unknown_widget_errors() {
        let registry = WidgetRegistry::new();
        let err = registry.create("no_such_node", None).err().unwrap();
        assert!(err.to_string().contains("no_such_node"));
    }

    #[test]
    fn test_register_and_list() {
        let mut registry = WidgetRegistry::new();
        assert!(!registry.contains("infer_yolo_v8_seg"));

        registry.register(Box::new(YoloSegWidgetFactory));
        assert!(registry.contains("infer_yolo_v8_seg"));
        assert_eq!(registry.list(), vec!["infer_yolo_v8_seg".to_string()]);
    }
}
