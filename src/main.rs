//! Standalone preview window for the segmentation parameter panel.
//!
//! Stands in for the workflow host during development: it creates the
//! parameter set, asks the registry for the panel and provides the Apply
//! button the host normally renders below every parameter view.

use clap::Parser;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, Box as GtkBox, Button, Orientation};
use log::{error, info, warn};
use yoloseg_panel::core::with_registry;
use yoloseg_panel::{plugin, ParamError, YoloSegParams};

const APP_ID: &str = "io.github.yoloseg_panel";

/// yoloseg-panel - preview window for the YOLOv8 segmentation parameter panel
#[derive(Parser, Debug, Clone)]
#[command(name = "yoloseg-panel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pre-fill a custom model weights file (.pt)
    #[arg(short = 'm', long = "weights", value_name = "FILE")]
    weights: Option<String>,

    /// Override the confidence threshold (0.0 - 1.0)
    #[arg(long = "conf", value_name = "THRESHOLD")]
    conf: Option<f64>,

    /// Override the IoU threshold (0.0 - 1.0)
    #[arg(long = "iou", value_name = "THRESHOLD")]
    iou: Option<f64>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

/// Global CLI options accessible from build_ui
static CLI_OPTIONS: std::sync::OnceLock<Cli> = std::sync::OnceLock::new();

fn main() {
    let cli = Cli::parse();

    // Allow RUST_LOG to override the -d/--debug flag
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting yoloseg-panel v{}", env!("CARGO_PKG_VERSION"));

    CLI_OPTIONS.set(cli).expect("CLI options already set");

    plugin::register_widgets();

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(build_ui);
    // Keep our own CLI flags away from GTK's argument parsing
    app.run_with_args(&["yoloseg-panel"]);
}

/// Build the parameter set from the CLI overrides.
fn initial_params(cli: &Cli) -> Result<YoloSegParams, ParamError> {
    let mut params = YoloSegParams::default();

    if let Some(ref weights) = cli.weights {
        params.model_weight_file = weights.clone();
    }
    if let Some(conf) = cli.conf {
        params.conf_thres = conf;
    }
    if let Some(iou) = cli.iou {
        params.iou_thres = iou;
    }

    params.validate()?;
    Ok(params)
}

fn build_ui(app: &Application) {
    let cli = CLI_OPTIONS.get().expect("CLI options not set");

    let params = match initial_params(cli) {
        Ok(params) => params,
        Err(e) => {
            error!("Invalid parameter override: {}", e);
            YoloSegParams::default()
        }
    };

    let widget = with_registry(|registry| registry.create(plugin::WIDGET_NAME, Some(params.shared())))
        .expect("widget factory not registered");

    widget.set_on_apply(Box::new(|params| {
        match serde_json::to_string_pretty(params) {
            Ok(json) => info!("Parameters applied:\n{}", json),
            Err(e) => warn!("Failed to serialize parameters: {}", e),
        }
    }));

    // The host renders an Apply bar under every parameter view; mirror it
    let container = GtkBox::new(Orientation::Vertical, 0);
    container.append(widget.root());

    let apply_button = Button::with_label("Apply");
    apply_button.set_margin_start(12);
    apply_button.set_margin_end(12);
    apply_button.set_margin_bottom(12);
    apply_button.set_halign(gtk4::Align::End);
    container.append(&apply_button);

    apply_button.connect_clicked(move |_| widget.apply());

    let window = ApplicationWindow::builder()
        .application(app)
        .title("YOLOv8 segmentation parameters")
        .default_width(440)
        .default_height(340)
        .build();
    window.set_child(Some(&container));
    window.present();
}
