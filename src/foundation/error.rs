/// Convenience result type used across gridreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is fatal to a run. Caption overflow (too many lines, a single over-wide word) is
/// defined truncation behavior and never surfaces here.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// The image resource did not resolve.
    #[error("image not found: '{resource}'")]
    ImageNotFound {
        /// Resource id (a path for filesystem decoders).
        resource: String,
    },

    /// The image resource resolved but its bytes could not be decoded.
    #[error("image unreadable: '{resource}': {reason}")]
    ImageUnreadable {
        /// Resource id (a path for filesystem decoders).
        resource: String,
        /// Decoder message.
        reason: String,
    },

    /// The video sink could not create or open its output.
    #[error("failed to open video sink: {0}")]
    SinkOpenFailed(String),

    /// The video sink rejected a frame or failed while writing it.
    #[error("failed to write frame {frame}: {reason}")]
    SinkWriteFailed {
        /// 0-based output frame index.
        frame: u64,
        /// Sink message.
        reason: String,
    },

    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font bytes could not be registered or used for layout.
    #[error("font error: {0}")]
    Font(String),

    /// An error raised while preparing the tiles of one batch.
    #[error("batch {index}: {source}")]
    Batch {
        /// 0-based batch index.
        index: usize,
        /// Underlying failure.
        #[source]
        source: Box<ReelError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ReelError::SinkOpenFailed`] value.
    pub fn sink_open(msg: impl Into<String>) -> Self {
        Self::SinkOpenFailed(msg.into())
    }

    /// Build a [`ReelError::SinkWriteFailed`] value.
    pub fn sink_write(frame: u64, reason: impl Into<String>) -> Self {
        Self::SinkWriteFailed {
            frame,
            reason: reason.into(),
        }
    }

    /// Attach the batch index to an error raised while preparing that batch.
    pub fn in_batch(self, index: usize) -> Self {
        Self::Batch {
            index,
            source: Box::new(self),
        }
    }

    /// Batch index recorded on this error, if any.
    pub fn batch_index(&self) -> Option<usize> {
        match self {
            Self::Batch { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The error with any batch context peeled off.
    pub fn innermost(&self) -> &ReelError {
        match self {
            Self::Batch { source, .. } => source.innermost(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
