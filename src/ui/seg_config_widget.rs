//! Parameter configuration widget for the YOLOv8 segmentation node
//!
//! Presents the node's parameters as a form: CUDA toggle, model variant
//! drop-down, optional custom weights file, input size and the two
//! inference thresholds. Control values reach the shared parameter set
//! only when [`YoloSegConfigWidget::apply`] runs; the one live reaction is
//! the "Custom model" checkbox showing or hiding the weights row.

use gtk4::prelude::*;
use gtk4::{
    Box as GtkBox, Button, CheckButton, DropDown, Entry, FileDialog, Orientation, SpinButton,
};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{gpu, ModelVariant, SharedParams, TaskWidget, YoloSegParams};
use crate::ui::widget_builder::{
    create_double_spin_row, create_dropdown_row, create_labeled_row, create_page_container,
    create_spin_row, ROW_SPACING,
};

/// Type alias for the host's apply notification
pub type OnApplyCallback = Rc<RefCell<Option<Box<dyn Fn(&YoloSegParams)>>>>;

/// Values read out of the form controls at apply time.
///
/// Kept as plain data so the apply contract is testable without a display.
/// The weights path is only written through when the custom-model box is
/// checked; unchecking it keeps the previously browsed path so re-checking
/// restores it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FormSnapshot {
    pub model_name: ModelVariant,
    pub cuda: bool,
    pub custom_weights: bool,
    pub weight_path: String,
    pub input_size: u32,
    pub conf_thres: f64,
    pub iou_thres: f64,
}

impl FormSnapshot {
    pub fn apply_to(&self, params: &mut YoloSegParams) {
        params.model_name = self.model_name;
        params.cuda = self.cuda;
        params.input_size = self.input_size;
        params.conf_thres = self.conf_thres;
        params.iou_thres = self.iou_thres;
        if self.custom_weights {
            params.model_weight_file = self.weight_path.clone();
        }
        params.update = true;
    }
}

/// Widget for configuring the segmentation node parameters.
pub struct YoloSegConfigWidget {
    widget: GtkBox,
    params: SharedParams,
    cuda_check: CheckButton,
    model_combo: DropDown,
    custom_check: CheckButton,
    weight_entry: Entry,
    input_size_spin: SpinButton,
    conf_spin: SpinButton,
    iou_spin: SpinButton,
    on_apply: OnApplyCallback,
}

impl YoloSegConfigWidget {
    /// Build the form from `params`, or from a fresh default set when the
    /// host has none yet. The supplied set stays shared: apply mutates it
    /// in place rather than swapping in a copy.
    pub fn new(params: Option<SharedParams>) -> Self {
        let params = params.unwrap_or_else(|| YoloSegParams::default().shared());
        let initial = params.borrow().clone();

        let widget = create_page_container();

        // Cuda
        let cuda_available = gpu::cuda_available();
        let cuda_check = CheckButton::with_label("Cuda");
        cuda_check.set_active(initial.cuda && cuda_available);
        cuda_check.set_sensitive(cuda_available);
        widget.append(&cuda_check);

        // Model name
        let variant_names: Vec<&str> = ModelVariant::ALL.iter().map(|v| v.as_str()).collect();
        let (model_row, model_combo) = create_dropdown_row("Model name", &variant_names);
        model_combo.set_selected(initial.model_name.index());
        widget.append(&model_row);

        // Custom model
        let custom_weights = initial.has_custom_weights();
        let custom_check = CheckButton::with_label("Custom model");
        custom_check.set_active(custom_weights);
        widget.append(&custom_check);

        // Model weight path, hidden until "Custom model" is checked
        let weight_entry = Entry::new();
        weight_entry.set_text(&initial.model_weight_file);
        weight_entry.set_placeholder_text(Some("Path to .pt weights"));
        weight_entry.set_hexpand(true);
        let browse_button = Button::with_label("Browse…");

        let weight_box = GtkBox::new(Orientation::Horizontal, ROW_SPACING);
        weight_box.append(&weight_entry);
        weight_box.append(&browse_button);

        let weight_row = create_labeled_row("Model weight (.pt)", &weight_box);
        weight_row.set_visible(custom_weights);
        widget.append(&weight_row);

        // Input size
        let (size_row, input_size_spin) =
            create_spin_row("Input size", initial.input_size as f64, 32.0, 4096.0, 32.0);
        widget.append(&size_row);

        // Confidence threshold
        let (conf_row, conf_spin) =
            create_double_spin_row("Confidence threshold", initial.conf_thres, 0.0, 1.0, 0.01);
        widget.append(&conf_row);

        // Confidence IoU
        let (iou_row, iou_spin) =
            create_double_spin_row("Confidence IoU", initial.iou_thres, 0.0, 1.0, 0.01);
        widget.append(&iou_row);

        // Toggling "Custom model" only affects visibility; the stored path
        // is left alone until apply
        let weight_row_clone = weight_row.clone();
        custom_check.connect_toggled(move |check| {
            weight_row_clone.set_visible(check.is_active());
        });

        // Browse for an existing weights file
        let entry_clone = weight_entry.clone();
        browse_button.connect_clicked(move |btn| {
            let entry = entry_clone.clone();

            if let Some(root) = btn.root() {
                if let Some(window) = root.downcast_ref::<gtk4::Window>() {
                    let window_clone = window.clone();

                    gtk4::glib::MainContext::default().spawn_local(async move {
                        let filters = gtk4::gio::ListStore::new::<gtk4::FileFilter>();

                        let weights_filter = gtk4::FileFilter::new();
                        weights_filter.set_name(Some("Model weights"));
                        weights_filter.add_pattern("*.pt");
                        filters.append(&weights_filter);

                        let all_filter = gtk4::FileFilter::new();
                        all_filter.set_name(Some("All files"));
                        all_filter.add_pattern("*");
                        filters.append(&all_filter);

                        let file_dialog = FileDialog::builder()
                            .title("Select model weights")
                            .modal(true)
                            .filters(&filters)
                            .build();

                        if let Ok(file) = file_dialog.open_future(Some(&window_clone)).await {
                            if let Some(path) = file.path() {
                                entry.set_text(&path.to_string_lossy());
                            }
                        }
                    });
                }
            }
        });

        Self {
            widget,
            params,
            cuda_check,
            model_combo,
            custom_check,
            weight_entry,
            input_size_spin,
            conf_spin,
            iou_spin,
            on_apply: Rc::new(RefCell::new(None)),
        }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }

    /// The parameter set this panel edits, shared with the host.
    pub fn params(&self) -> SharedParams {
        self.params.clone()
    }

    /// Register the host's apply notification.
    pub fn set_on_apply<F: Fn(&YoloSegParams) + 'static>(&self, callback: F) {
        *self.on_apply.borrow_mut() = Some(Box::new(callback));
    }

    /// Flush the form into the shared parameter set, raise the update flag
    /// and notify the host once.
    pub fn apply(&self) {
        self.snapshot().apply_to(&mut self.params.borrow_mut());
        debug!("Applied parameters: {:?}", self.params.borrow());

        if let Some(callback) = self.on_apply.borrow().as_ref() {
            callback(&self.params.borrow());
        }
    }

    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            model_name: ModelVariant::from_index(self.model_combo.selected()),
            cuda: self.cuda_check.is_active(),
            custom_weights: self.custom_check.is_active(),
            weight_path: self.weight_entry.text().to_string(),
            input_size: self.input_size_spin.value() as u32,
            conf_thres: self.conf_spin.value(),
            iou_thres: self.iou_spin.value(),
        }
    }
}

impl TaskWidget for YoloSegConfigWidget {
    fn root(&self) -> &GtkBox {
        &self.widget
    }

    fn apply(&self) {
        YoloSegConfigWidget::apply(self);
    }

    fn set_on_apply(&self, callback: Box<dyn Fn(&YoloSegParams)>) {
        *self.on_apply.borrow_mut() = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> FormSnapshot {
        FormSnapshot {
            model_name: ModelVariant::Small,
            cuda: false,
            custom_weights: false,
            weight_path: String::new(),
            input_size: 480,
            conf_thres: 0.5,
            iou_thres: 0.45,
        }
    }

    #[test]
    fn test_apply_copies_form_values() {
        let mut params = YoloSegParams::default();
        snapshot().apply_to(&mut params);

        assert_eq!(params.model_name, ModelVariant::Small);
        assert!(!params.cuda);
        assert_eq!(params.input_size, 480);
        assert_eq!(params.conf_thres, 0.5);
        assert_eq!(params.iou_thres, 0.45);
    }

    #[test]
    fn test_apply_raises_update_flag() {
        let mut params = YoloSegParams::default();
        assert!(!params.update);
        snapshot().apply_to(&mut params);
        assert!(params.update);
    }

    #[test]
    fn test_apply_without_custom_model_keeps_weight_file() {
        let mut params = YoloSegParams {
            model_weight_file: "/models/browsed-earlier.pt".to_string(),
            ..YoloSegParams::default()
        };

        // Custom model unchecked: the hidden field's content is irrelevant
        let mut snap = snapshot();
        snap.weight_path = "/tmp/stale-entry-text.pt".to_string();
        snap.apply_to(&mut params);

        assert_eq!(params.model_weight_file, "/models/browsed-earlier.pt");
    }

    #[test]
    fn test_apply_with_custom_model_sets_weight_file() {
        let mut params = YoloSegParams::default();

        let mut snap = snapshot();
        snap.custom_weights = true;
        snap.weight_path = "/models/finetuned.pt".to_string();
        snap.apply_to(&mut params);

        assert_eq!(params.model_weight_file, "/models/finetuned.pt");
    }

    #[test]
    fn test_applied_thresholds_pass_validation() {
        let mut params = YoloSegParams::default();
        snapshot().apply_to(&mut params);
        params.validate().unwrap();
    }
}
