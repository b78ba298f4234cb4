use std::path::Path;

use tracing::debug;

use crate::error::{BvhError, BvhResult};
use crate::hierarchy::{assign_channel_indices, parse_hierarchy};
use crate::motion::parse_motion;
use crate::tokenize::Tokens;
use crate::types::BvhDocument;

/// Parse a .bvh document from an in-memory string.
pub fn load_bvh_from_string(text: &str) -> BvhResult<BvhDocument> {
    let mut tokens = Tokens::new(text);

    let mut joints = parse_hierarchy(&mut tokens)?;
    let total_channel_count = assign_channel_indices(&mut joints);
    let motion = parse_motion(&mut tokens, total_channel_count)?;

    debug!(
        joints = joints.len(),
        channels = total_channel_count,
        frames = motion.frame_count,
        frame_time = motion.frame_time,
        "parsed bvh document"
    );

    Ok(BvhDocument { joints, motion })
}

/// Parse a .bvh document from a file path. Unreadable files and
/// non-UTF-8 content fail with [`BvhError::MalformedInput`].
pub fn load_bvh_from_file(path: impl AsRef<Path>) -> BvhResult<BvhDocument> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| BvhError::malformed(format!("cannot read {}: {e}", path.display())))?;
    load_bvh_from_string(&text)
}
