/// Convenience result type used across the crate.
pub type BvhResult<T> = Result<T, BvhError>;

/// Everything that can go wrong while parsing a .bvh file or resolving
/// a frame transform. Parse-time variants abort the parse; no partial
/// document is ever returned alongside one of these.
#[derive(thiserror::Error, Debug)]
pub enum BvhError {
    /// The HIERARCHY keyword never appears in the token stream.
    #[error("missing HIERARCHY keyword")]
    MissingHierarchyKeyword,

    /// The first structural token after HIERARCHY is not ROOT.
    #[error("missing ROOT keyword, found `{found}`")]
    MissingRootKeyword { found: String },

    /// A `}` with no matching open block, or MOTION reached while
    /// blocks are still open.
    #[error("unbalanced braces in hierarchy")]
    UnbalancedBraces,

    /// The token stream ended before an open block or section header
    /// was complete.
    #[error("truncated block: unexpected end of file")]
    TruncatedBlock,

    /// A CHANNELS declaration names something other than the six
    /// standard channel types.
    #[error("unknown channel type `{0}`")]
    UnknownChannelType(String),

    /// The motion section holds fewer values than the declared frame
    /// count times the skeleton's channel count.
    #[error("truncated motion data: expected {expected} values, found {found}")]
    TruncatedMotionData { expected: usize, found: usize },

    /// A resolve query asked for a frame past the end of the table.
    #[error("frame index {frame_index} out of range (frame count {frame_count})")]
    FrameIndexOutOfRange {
        frame_index: usize,
        frame_count: usize,
    },

    /// The source could not be read or decoded as text, a token that
    /// had to be numeric was not, or query inputs were structurally
    /// inconsistent with the document.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl BvhError {
    /// Build a [`BvhError::MalformedInput`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}
