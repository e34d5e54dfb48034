use crate::config::load_config;
use crate::export::{FileDownloadTarget, WriterCopyTarget, export_graph};
use crate::graph::Graph;
use crate::layout::build_scene;
use crate::render::{render_svg, write_output_svg};
use crate::text_metrics::metrics_for;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "flowr", version, about = "Flowchart renderer: SVG and design-tool clipboard export")]
pub struct Args {
    /// Input graph snapshot (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for svg/clipboard if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "svg")]
    pub format: OutputFormat,

    /// Config JSON/JSON5 file (render options + theme)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Force the heuristic text-metrics provider (machine-independent output)
    #[arg(long = "fastMetrics", default_value_t = false)]
    pub fast_metrics: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Clipboard,
    #[cfg(feature = "png")]
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if args.fast_metrics {
        config.render.fast_text_metrics = true;
    }

    let input = read_input(args.input.as_deref())?;
    let graph: Graph = json5::from_str(&input)?;
    let metrics = metrics_for(&config.theme.font_family, config.render.fast_text_metrics);

    match args.format {
        OutputFormat::Svg => {
            let scene = build_scene(&graph, &config.render, metrics.as_ref())?;
            let svg = render_svg(&scene, &config.theme);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Clipboard => {
            let dir = args
                .output
                .as_deref()
                .and_then(Path::parent)
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();
            let mut download = FileDownloadTarget::new(dir);
            let outcome = match args.output.as_deref() {
                Some(path) => {
                    let file = std::fs::File::create(path)?;
                    let mut copy = WriterCopyTarget::new(file);
                    export_graph(
                        &graph,
                        &config.render,
                        &config.theme,
                        metrics.as_ref(),
                        &mut copy,
                        &mut download,
                    )?
                }
                None => {
                    let mut copy = WriterCopyTarget::new(io::stdout().lock());
                    export_graph(
                        &graph,
                        &config.render,
                        &config.theme,
                        metrics.as_ref(),
                        &mut copy,
                        &mut download,
                    )?
                }
            };
            if outcome.success {
                eprintln!("delivered via {}", outcome.method.as_str());
            } else {
                eprintln!("nothing to export (empty graph)");
            }
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let scene = build_scene(&graph, &config.render, metrics.as_ref())?;
            let svg = render_svg(&scene, &config.theme);
            let output = args
                .output
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            crate::render::write_output_png(&svg, output)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
