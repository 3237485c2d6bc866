//! Widget builder helpers for consistent UI construction
//!
//! Small helpers for the label + control rows the parameter form is built
//! from, so every row gets the same spacing and expansion behavior.

use gtk4::prelude::*;
use gtk4::{Adjustment, Box as GtkBox, DropDown, Label, Orientation, SpinButton, StringList, Widget};

/// Default margin used for the form container
pub const DEFAULT_MARGIN: i32 = 12;

/// Default spacing between form rows
pub const DEFAULT_SPACING: i32 = 12;

/// Spacing between a row's label and its control
pub const ROW_SPACING: i32 = 6;

/// Creates the vertical container the form rows are appended to.
pub fn create_page_container() -> GtkBox {
    let page = GtkBox::new(Orientation::Vertical, DEFAULT_SPACING);
    page.set_margin_start(DEFAULT_MARGIN);
    page.set_margin_end(DEFAULT_MARGIN);
    page.set_margin_top(DEFAULT_MARGIN);
    page.set_margin_bottom(DEFAULT_MARGIN);
    page
}

/// Creates a horizontal box containing a label and a control.
///
/// This is the two-column form row used throughout the panel: label on the
/// left, expanding control on the right.
pub fn create_labeled_row<W: IsA<Widget>>(label_text: &str, widget: &W) -> GtkBox {
    let row = GtkBox::new(Orientation::Horizontal, ROW_SPACING);
    row.append(&Label::new(Some(label_text)));
    widget.set_hexpand(true);
    row.append(widget);
    row
}

/// Creates a drop-down row with the given options.
///
/// Returns (row, dropdown) so the drop-down can be stored for later reads.
pub fn create_dropdown_row(label_text: &str, options: &[&str]) -> (GtkBox, DropDown) {
    let string_list = StringList::new(options);
    let dropdown = DropDown::new(Some(string_list), Option::<gtk4::Expression>::None);
    dropdown.set_selected(0);
    let row = create_labeled_row(label_text, &dropdown);
    (row, dropdown)
}

/// Creates an integer spin-button row.
pub fn create_spin_row(
    label_text: &str,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
) -> (GtkBox, SpinButton) {
    let adjustment = Adjustment::new(value, min, max, step, step * 4.0, 0.0);
    let spin = SpinButton::new(Some(&adjustment), step, 0);
    let row = create_labeled_row(label_text, &spin);
    (row, spin)
}

/// Creates a two-decimal spin-button row; the adjustment clamps entered
/// values to `[min, max]`.
pub fn create_double_spin_row(
    label_text: &str,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
) -> (GtkBox, SpinButton) {
    let adjustment = Adjustment::new(value, min, max, step, step * 10.0, 0.0);
    let spin = SpinButton::new(Some(&adjustment), step, 2);
    let row = create_labeled_row(label_text, &spin);
    (row, spin)
}
