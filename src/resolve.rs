use cgmath::{One, Rad, Rotation3, Vector3};

use crate::convert::{convert_position, convert_rotation, Convention};
use crate::error::{BvhError, BvhResult};
use crate::types::{Channel, Joint, MotionTable, Position, Quaternion};

/// Resolve one joint's local transform at one frame.
///
/// Translation starts at the static offset; if the joint declares any
/// position channel, the channel values fully replace it (axes with no
/// declared position channel stay 0, not the offset). Rotation is built
/// by right-multiplying an axis-angle quaternion per rotation channel,
/// in file declaration order — BVH's rotation order is whatever the
/// CHANNELS line says, so composing in any other order gives a
/// different pose. Angles are degrees in the file.
pub fn resolve(
    joint: &Joint,
    motion: &MotionTable,
    frame_index: usize,
    convention: Convention,
) -> BvhResult<(Position, Quaternion)> {
    let frame = motion
        .frame(frame_index)
        .ok_or(BvhError::FrameIndexOutOfRange {
            frame_index,
            frame_count: motion.frame_count,
        })?;

    let mut translation = joint.offset;
    let mut channel_position = Position::new(0.0, 0.0, 0.0);
    let mut has_position = false;
    let mut rotation = Quaternion::one();

    for (i, channel) in joint.channels.iter().enumerate() {
        // `get` rather than indexing: a joint borrowed from another,
        // wider document must error, not panic
        let value = joint
            .channel_start_index
            .checked_add(i)
            .and_then(|column| frame.get(column))
            .copied()
            .ok_or_else(|| {
                BvhError::malformed(format!(
                    "joint `{}` reads channel column {} but the motion table has {} columns",
                    joint.name,
                    joint.channel_start_index.saturating_add(i),
                    motion.total_channel_count
                ))
            })?;
        match channel {
            Channel::PositionX => {
                channel_position.x = value;
                has_position = true;
            }
            Channel::PositionY => {
                channel_position.y = value;
                has_position = true;
            }
            Channel::PositionZ => {
                channel_position.z = value;
                has_position = true;
            }
            Channel::RotationX => {
                rotation = rotation
                    * Quaternion::from_axis_angle(
                        Vector3::new(1.0, 0.0, 0.0),
                        Rad(value.to_radians()),
                    );
            }
            Channel::RotationY => {
                rotation = rotation
                    * Quaternion::from_axis_angle(
                        Vector3::new(0.0, 1.0, 0.0),
                        Rad(value.to_radians()),
                    );
            }
            Channel::RotationZ => {
                rotation = rotation
                    * Quaternion::from_axis_angle(
                        Vector3::new(0.0, 0.0, 1.0),
                        Rad(value.to_radians()),
                    );
            }
        }
    }

    //// position channels replace the static offset outright
    if has_position {
        translation = channel_position;
    }

    Ok((
        convert_position(translation, convention),
        convert_rotation(rotation, convention),
    ))
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::InnerSpace;

    fn table(channels: usize, rows: &[&[f64]]) -> MotionTable {
        MotionTable {
            frame_count: rows.len(),
            frame_time: 0.033333,
            total_channel_count: channels,
            values: rows.iter().flat_map(|r| r.iter().copied()).collect(),
        }
    }

    fn joint(offset: Position, channels: Vec<Channel>, start: usize) -> Joint {
        Joint {
            name: "test".to_string(),
            index: 0,
            parent: -1,
            depth: 0,
            children: Vec::new(),
            offset,
            channels,
            channel_start_index: start,
            is_end_site: false,
        }
    }

    #[test]
    fn static_offset_when_no_position_channels() {
        let j = joint(
            Position::new(1.0, 2.0, 3.0),
            vec![Channel::RotationZ, Channel::RotationX, Channel::RotationY],
            0,
        );
        let m = table(3, &[&[0.0, 0.0, 0.0]]);
        let (t, r) = resolve(&j, &m, 0, Convention::Native).unwrap();
        assert_eq!(t, Position::new(1.0, 2.0, 3.0));
        assert_relative_eq!(r.s, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn position_channels_override_the_offset() {
        // the offset must not leak into any axis once position channels exist
        let j = joint(
            Position::new(100.0, 100.0, 100.0),
            vec![Channel::PositionX, Channel::PositionY, Channel::PositionZ],
            0,
        );
        let m = table(3, &[&[10.0, 20.0, 30.0]]);
        let (t, _) = resolve(&j, &m, 0, Convention::Native).unwrap();
        assert_eq!(t, Position::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn undeclared_position_axes_stay_zero() {
        let j = joint(
            Position::new(5.0, 5.0, 5.0),
            vec![Channel::PositionX, Channel::RotationY],
            0,
        );
        let m = table(2, &[&[7.0, 0.0]]);
        let (t, _) = resolve(&j, &m, 0, Convention::Native).unwrap();
        assert_eq!(t, Position::new(7.0, 0.0, 0.0));
    }

    #[test]
    fn rotation_composes_in_declaration_order() {
        // Z=30, X=45: ZX and XZ compositions must differ
        let m = table(2, &[&[30.0, 45.0]]);
        let zx = joint(
            Position::new(0.0, 0.0, 0.0),
            vec![Channel::RotationZ, Channel::RotationX],
            0,
        );
        let m_swapped = table(2, &[&[45.0, 30.0]]);
        let xz = joint(
            Position::new(0.0, 0.0, 0.0),
            vec![Channel::RotationX, Channel::RotationZ],
            0,
        );
        let (_, r_zx) = resolve(&zx, &m, 0, Convention::Native).unwrap();
        let (_, r_xz) = resolve(&xz, &m_swapped, 0, Convention::Native).unwrap();

        let expected_zx =
            Quaternion::from_axis_angle(Vector3::new(0.0, 0.0, 1.0), Rad(30f64.to_radians()))
                * Quaternion::from_axis_angle(Vector3::new(1.0, 0.0, 0.0), Rad(45f64.to_radians()));
        assert_relative_eq!(r_zx.s, expected_zx.s, epsilon = 1e-12);
        assert_relative_eq!(r_zx.v.x, expected_zx.v.x, epsilon = 1e-12);
        assert_relative_eq!(r_zx.v.y, expected_zx.v.y, epsilon = 1e-12);
        assert_relative_eq!(r_zx.v.z, expected_zx.v.z, epsilon = 1e-12);

        // same angles, different declaration order, different pose
        let dot = r_zx.dot(r_xz).abs();
        assert!(dot < 1.0 - 1e-6, "orders must not commute, dot = {dot}");
    }

    #[test]
    fn channel_start_index_selects_the_right_columns() {
        let j = joint(
            Position::new(0.0, 0.0, 0.0),
            vec![Channel::PositionX, Channel::PositionY, Channel::PositionZ],
            3,
        );
        let m = table(6, &[&[9.0, 9.0, 9.0, 1.0, 2.0, 3.0]]);
        let (t, _) = resolve(&j, &m, 0, Convention::Native).unwrap();
        assert_eq!(t, Position::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn foreign_joint_past_table_width_errors() {
        // a joint allocated against a wider document must not panic
        // when resolved against a narrower table
        let j = joint(
            Position::new(0.0, 0.0, 0.0),
            vec![Channel::RotationX, Channel::RotationY],
            10,
        );
        let m = table(3, &[&[1.0, 2.0, 3.0]]);
        assert!(matches!(
            resolve(&j, &m, 0, Convention::Native),
            Err(BvhError::MalformedInput(_))
        ));
    }

    #[test]
    fn frame_index_out_of_range() {
        let j = joint(Position::new(0.0, 0.0, 0.0), vec![], 0);
        let m = table(0, &[]);
        assert!(matches!(
            resolve(&j, &m, 0, Convention::Native),
            Err(BvhError::FrameIndexOutOfRange {
                frame_index: 0,
                frame_count: 0
            })
        ));
    }

    #[test]
    fn conversion_applies_to_both_parts() {
        let j = joint(
            Position::new(0.0, 0.0, 0.0),
            vec![
                Channel::PositionX,
                Channel::PositionY,
                Channel::PositionZ,
                Channel::RotationY,
            ],
            0,
        );
        let m = table(4, &[&[1.0, 2.0, 3.0, 90.0]]);
        let (t, r) = resolve(&j, &m, 0, Convention::ZUpLeftHanded).unwrap();
        assert_eq!(t, Position::new(1.0, -3.0, 2.0));
        // Y-axis rotation lands on the target's Z axis (y -> z slot)
        let native =
            Quaternion::from_axis_angle(Vector3::new(0.0, 1.0, 0.0), Rad(90f64.to_radians()));
        assert_relative_eq!(r.v.z, native.v.y, epsilon = 1e-12);
        assert_relative_eq!(r.v.y, -native.v.z, epsilon = 1e-12);
        assert_relative_eq!(r.s, native.s, epsilon = 1e-12);
    }
}
