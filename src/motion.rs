use crate::error::{BvhError, BvhResult};
use crate::tokenize::Tokens;
use crate::types::MotionTable;

/// Parse the MOTION section: frame count, frame time and the dense
/// row-major value matrix.
///
/// The cursor must sit immediately after the MOTION keyword. The loading
/// policy is strict: if the stream holds fewer than
/// `frame_count * total_channel_count` values the whole parse fails with
/// [`BvhError::TruncatedMotionData`] and no partial rows are exposed.
/// Surplus tokens after the matrix are ignored.
pub fn parse_motion(tokens: &mut Tokens, total_channel_count: usize) -> BvhResult<MotionTable> {
    tokens.expect_keyword("Frames")?;
    let frame_count = tokens.next_usize()?;

    //// "Frame Time:" arrives as `Frame` + `Time:` or `Frame` + `Time` + `:`
    let frame = tokens.next_or_truncated()?;
    if frame != "Frame" {
        return Err(BvhError::malformed(format!(
            "expected `Frame Time:`, found `{frame}`"
        )));
    }
    tokens.expect_keyword("Time")?;
    let frame_time = tokens.next_f64()?;

    let expected = frame_count
        .checked_mul(total_channel_count)
        .ok_or_else(|| {
            BvhError::malformed(format!(
                "frame count {frame_count} overflows the motion table size"
            ))
        })?;
    // the declared size is untrusted, so it is a capacity hint at most
    let mut values = Vec::with_capacity(expected.min(1 << 16));
    while values.len() < expected {
        match tokens.next() {
            Some(token) => {
                let value = token.parse::<f64>().map_err(|_| {
                    BvhError::malformed(format!("expected a motion value, found `{token}`"))
                })?;
                values.push(value);
            }
            None => {
                return Err(BvhError::TruncatedMotionData {
                    expected,
                    found: values.len(),
                })
            }
        }
    }

    Ok(MotionTable {
        frame_count,
        frame_time,
        total_channel_count,
        values,
    })
}

/////////////////////////////////////////////////////////////////////////////////////////////////
