use crate::clipboard::clipboard_json;
use crate::config::RenderOptions;
use crate::error::Error;
use crate::graph::Graph;
use crate::layout::build_scene;
use crate::text_metrics::TextMetrics;
use crate::theme::Theme;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name used by the fallback download strategy.
pub const DOWNLOAD_FILENAME: &str = "flowchart.json";

/// Which delivery strategy actually produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMethod {
    Primary,
    Download,
    None,
}

impl ExportMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportMethod::Primary => "primary",
            ExportMethod::Download => "download",
            ExportMethod::None => "none",
        }
    }
}

/// Outcome returned to the caller: a definite success/method pair, never a
/// silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportOutcome {
    pub success: bool,
    pub method: ExportMethod,
}

/// Primary copy mechanism. Must complete synchronously within the user
/// action that triggered the export; permission models tie the copy to that
/// action, so no suspension is allowed before the attempt.
pub trait CopyTarget {
    fn copy(&mut self, payload: &str) -> Result<(), Error>;
}

/// Fallback save-as mechanism. Has no failure mode the orchestrator could
/// recover from, so it is infallible from this side of the contract.
pub trait DownloadTarget {
    fn download(&mut self, filename: &str, contents: &[u8]);
}

/// Drives the clipboard payload through the delivery strategies in fixed
/// order: primary copy, then file download. Strategies are never retried and
/// partial output is never mixed; the first terminal state wins. An empty
/// graph short-circuits to a non-success outcome before anything is built.
///
/// `Err` is returned only for contract violations in the input graph
/// (non-positive node dimensions); every delivery-level failure is absorbed
/// into the outcome.
pub fn export_graph(
    graph: &Graph,
    options: &RenderOptions,
    theme: &Theme,
    metrics: &dyn TextMetrics,
    copy: &mut dyn CopyTarget,
    download: &mut dyn DownloadTarget,
) -> Result<ExportOutcome, Error> {
    if graph.nodes.is_empty() {
        return Ok(ExportOutcome {
            success: false,
            method: ExportMethod::None,
        });
    }

    let scene = build_scene(graph, options, metrics)?;
    let payload = clipboard_json(&scene, theme);

    if copy.copy(&payload).is_ok() {
        return Ok(ExportOutcome {
            success: true,
            method: ExportMethod::Primary,
        });
    }

    download.download(DOWNLOAD_FILENAME, payload.as_bytes());
    Ok(ExportOutcome {
        success: true,
        method: ExportMethod::Download,
    })
}

/// Copies the payload into any writer. An I/O error is reported as a copy
/// rejection, which sends the orchestrator down the download path.
pub struct WriterCopyTarget<W: Write> {
    writer: W,
}

impl<W: Write> WriterCopyTarget<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> CopyTarget for WriterCopyTarget<W> {
    fn copy(&mut self, payload: &str) -> Result<(), Error> {
        self.writer
            .write_all(payload.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|err| Error::CopyRejected(err.to_string()))
    }
}

/// Saves the payload as a file under a directory, standing in for a browser
/// download. Records where the file landed so the caller can report it.
pub struct FileDownloadTarget {
    dir: PathBuf,
    pub written: Option<PathBuf>,
}

impl FileDownloadTarget {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            written: None,
        }
    }
}

impl DownloadTarget for FileDownloadTarget {
    fn download(&mut self, filename: &str, contents: &[u8]) {
        let path = self.dir.join(filename);
        if std::fs::write(&path, contents).is_ok() {
            self.written = Some(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{FlowNode, NodeKind};
    use crate::text_metrics::HeuristicMetrics;

    struct RecordingCopy {
        fail: bool,
        payloads: Vec<String>,
    }

    impl CopyTarget for RecordingCopy {
        fn copy(&mut self, payload: &str) -> Result<(), Error> {
            self.payloads.push(payload.to_string());
            if self.fail {
                Err(Error::CopyRejected("denied".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct RecordingDownload {
        saved: Vec<(String, Vec<u8>)>,
    }

    impl DownloadTarget for RecordingDownload {
        fn download(&mut self, filename: &str, contents: &[u8]) {
            self.saved.push((filename.to_string(), contents.to_vec()));
        }
    }

    fn one_node_graph() -> Graph {
        Graph {
            nodes: vec![FlowNode {
                id: "a".to_string(),
                kind: NodeKind::Start,
                text: "Begin".to_string(),
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 60.0,
            }],
            connections: vec![],
        }
    }

    fn run(graph: &Graph, fail_copy: bool) -> (ExportOutcome, RecordingCopy, RecordingDownload) {
        let mut copy = RecordingCopy {
            fail: fail_copy,
            payloads: Vec::new(),
        };
        let mut download = RecordingDownload::default();
        let outcome = export_graph(
            graph,
            &RenderOptions::default(),
            &Theme::flowchart_default(),
            &HeuristicMetrics,
            &mut copy,
            &mut download,
        )
        .unwrap();
        (outcome, copy, download)
    }

    #[test]
    fn empty_graph_is_a_non_success_with_no_attempts() {
        let (outcome, copy, download) = run(&Graph::new(), false);
        assert!(!outcome.success);
        assert_eq!(outcome.method, ExportMethod::None);
        assert!(copy.payloads.is_empty());
        assert!(download.saved.is_empty());
    }

    #[test]
    fn successful_copy_terminates_at_primary() {
        let (outcome, copy, download) = run(&one_node_graph(), false);
        assert!(outcome.success);
        assert_eq!(outcome.method, ExportMethod::Primary);
        assert_eq!(copy.payloads.len(), 1);
        assert!(download.saved.is_empty());
    }

    #[test]
    fn failing_copy_falls_through_to_download() {
        let (outcome, copy, download) = run(&one_node_graph(), true);
        assert!(outcome.success);
        assert_eq!(outcome.method, ExportMethod::Download);
        assert_eq!(copy.payloads.len(), 1, "primary must not be retried");
        assert_eq!(download.saved.len(), 1);
        let (filename, contents) = &download.saved[0];
        assert_eq!(filename, DOWNLOAD_FILENAME);
        // The download receives the same serialized payload, never a remix.
        assert_eq!(contents, copy.payloads[0].as_bytes());
    }

    #[test]
    fn invalid_node_dimensions_fail_fast() {
        let mut graph = one_node_graph();
        graph.nodes[0].height = -1.0;
        let mut copy = RecordingCopy {
            fail: false,
            payloads: Vec::new(),
        };
        let mut download = RecordingDownload::default();
        let result = export_graph(
            &graph,
            &RenderOptions::default(),
            &Theme::flowchart_default(),
            &HeuristicMetrics,
            &mut copy,
            &mut download,
        );
        assert!(matches!(result, Err(Error::InvalidNode { .. })));
    }

    #[test]
    fn method_serializes_to_lowercase_tags() {
        assert_eq!(serde_json::to_string(&ExportMethod::Primary).unwrap(), "\"primary\"");
        assert_eq!(serde_json::to_string(&ExportMethod::Download).unwrap(), "\"download\"");
        assert_eq!(serde_json::to_string(&ExportMethod::None).unwrap(), "\"none\"");
    }

    #[test]
    fn writer_copy_target_reports_io_errors_as_rejections() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("pipe closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let mut target = WriterCopyTarget::new(Broken);
        assert!(matches!(target.copy("payload"), Err(Error::CopyRejected(_))));
    }
}
