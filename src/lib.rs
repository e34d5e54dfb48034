#[cfg(feature = "cli")]
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod fit;
pub mod graph;
pub mod layout;
pub mod render;
pub mod shape;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use clipboard::{ClipboardTree, clipboard_json, clipboard_tree};
pub use config::{Config, RenderOptions, load_config};
pub use error::Error;
pub use export::{CopyTarget, DownloadTarget, ExportMethod, ExportOutcome, export_graph};
pub use fit::{FitResult, fit_text};
pub use graph::{Connection, FlowNode, Graph, NodeKind};
pub use layout::{Scene, build_scene};
pub use render::render_svg;
pub use shape::{ShapeGeometry, ShapePrimitive, resolve_shape};
pub use text_metrics::{FontMetrics, HeuristicMetrics, TextMetrics, metrics_for};
pub use theme::Theme;
