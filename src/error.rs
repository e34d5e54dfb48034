use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Contract violation from the authoring layer: node dimensions must be
    /// positive. Fails fast instead of producing degenerate geometry.
    #[error("node '{id}' has non-positive dimensions {width}x{height}")]
    InvalidNode { id: String, width: f32, height: f32 },

    /// Primary copy target rejected the payload. Handled inside the export
    /// orchestrator; never crosses its public contract.
    #[error("clipboard copy rejected: {0}")]
    CopyRejected(String),
}
