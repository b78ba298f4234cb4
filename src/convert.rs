use crate::types::{Position, Quaternion};

/// Target coordinate convention for resolved transforms.
///
/// This module is the single place axis convention lives; nothing else
/// in the crate swaps or negates axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convention {
    /// BVH's native axes: Y-up, right-handed. Identity conversion.
    #[default]
    Native,
    /// Z-up, left-handed engine axes. Component mapping
    /// `(x, y, z) -> (x, -z, y)`, applied identically to translations
    /// and to the quaternion vector part (scalar part unchanged).
    ZUpLeftHanded,
}

pub fn convert_position(position: Position, convention: Convention) -> Position {
    match convention {
        Convention::Native => position,
        Convention::ZUpLeftHanded => Position::new(position.x, -position.z, position.y),
    }
}

pub fn convert_rotation(rotation: Quaternion, convention: Convention) -> Quaternion {
    match convention {
        Convention::Native => rotation,
        Convention::ZUpLeftHanded => Quaternion::new(
            rotation.s,
            rotation.v.x,
            -rotation.v.z,
            rotation.v.y,
        ),
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{InnerSpace, Rad, Rotation3};

    #[test]
    fn native_is_identity() {
        let p = Position::new(1.0, 2.0, 3.0);
        assert_eq!(convert_position(p, Convention::Native), p);
        let q = Quaternion::from_axis_angle(Position::new(0.0, 1.0, 0.0), Rad(0.7));
        assert_eq!(convert_rotation(q, Convention::Native), q);
    }

    #[test]
    fn z_up_remaps_components() {
        let p = convert_position(Position::new(1.0, 2.0, 3.0), Convention::ZUpLeftHanded);
        assert_eq!(p, Position::new(1.0, -3.0, 2.0));
    }

    #[test]
    fn rotation_gets_the_same_remap_as_translation() {
        let q = Quaternion::new(0.9, 0.1, 0.2, 0.3);
        let converted = convert_rotation(q, Convention::ZUpLeftHanded);
        assert_eq!(converted.s, 0.9);
        assert_eq!(converted.v.x, 0.1);
        assert_eq!(converted.v.y, -0.3);
        assert_eq!(converted.v.z, 0.2);
    }

    #[test]
    fn conversion_preserves_quaternion_norm() {
        let q = Quaternion::from_axis_angle(
            Position::new(1.0, 2.0, 3.0).normalize(),
            Rad(1.1),
        );
        let converted = convert_rotation(q, Convention::ZUpLeftHanded);
        assert_relative_eq!(converted.magnitude(), 1.0, epsilon = 1e-12);
    }
}
