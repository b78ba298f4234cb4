use cgmath::{Quaternion as CgQuaternion, Vector3};

use crate::convert::Convention;
use crate::error::BvhResult;
use crate::resolve;

/////////////////////////////////////////////////////////////////////////////////////////////////

pub type Index = usize;
pub type ParentIndex = isize; // can be -1 if joint has no parent
pub type Depth = usize;
pub type Quaternion = CgQuaternion<f64>;
pub type Position = Vector3<f64>;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// One animated degree of freedom declared in a joint's CHANNELS line.
/// File order is significant and is never normalized to XYZ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
}

impl Channel {
    /// Map a channel name token to its tag. `None` for anything outside
    /// the six standard names.
    pub fn from_token(token: &str) -> Option<Channel> {
        match token {
            "Xposition" => Some(Channel::PositionX),
            "Yposition" => Some(Channel::PositionY),
            "Zposition" => Some(Channel::PositionZ),
            "Xrotation" => Some(Channel::RotationX),
            "Yrotation" => Some(Channel::RotationY),
            "Zrotation" => Some(Channel::RotationZ),
            _ => None,
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// One hierarchy node. Joints live in a flat arena owned by [`BvhDocument`]
/// and refer to each other by index, so the tree can be walked from either
/// direction without ownership cycles.
#[derive(Debug)]
pub struct Joint {
    pub name: String,
    pub index: Index,
    pub parent: ParentIndex,
    pub depth: Depth,
    pub children: Vec<Index>,
    /// Static local translation from the parent, in BVH's native axes.
    pub offset: Position,
    /// Channels in file declaration order. Empty for end sites.
    pub channels: Vec<Channel>,
    /// Column of this joint's first channel in the motion table.
    /// Assigned by the allocator after the whole tree is built.
    pub channel_start_index: Index,
    /// True for the synthetic leaf created from an `End Site` block.
    pub is_end_site: bool,
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// The dense per-frame channel-value matrix from the MOTION section,
/// stored row-major: one row of `total_channel_count` values per frame.
#[derive(Debug)]
pub struct MotionTable {
    pub frame_count: usize,
    pub frame_time: f64,
    pub(crate) total_channel_count: usize,
    pub(crate) values: Vec<f64>,
}

impl MotionTable {
    /// Frames per second derived from the frame time.
    pub fn fps(&self) -> f64 {
        if self.frame_time > 0.0 {
            1.0 / self.frame_time
        } else {
            0.0
        }
    }

    /// All channel values of one frame, in motion-table column order.
    pub fn frame(&self, frame_index: usize) -> Option<&[f64]> {
        if frame_index >= self.frame_count {
            return None;
        }
        let start = frame_index * self.total_channel_count;
        Some(&self.values[start..start + self.total_channel_count])
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// A fully parsed .bvh file: the joint arena (index 0 is the root) and
/// the motion table. Immutable after parsing, so it can be shared across
/// threads and queried concurrently without coordination.
#[derive(Debug)]
pub struct BvhDocument {
    pub(crate) joints: Vec<Joint>,
    pub(crate) motion: MotionTable,
}

impl BvhDocument {
    pub fn root(&self) -> &Joint {
        &self.joints[0]
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint(&self, index: Index) -> Option<&Joint> {
        self.joints.get(index)
    }

    /// First joint with the given name. Names are not guaranteed unique
    /// across a file, so this returns the earliest declaration.
    pub fn find_joint(&self, name: &str) -> Option<&Joint> {
        self.joints.iter().find(|j| j.name == name)
    }

    pub fn motion(&self) -> &MotionTable {
        &self.motion
    }

    pub fn total_channel_count(&self) -> usize {
        self.motion.total_channel_count
    }

    /// Resolve the local transform of one joint at one frame, in the
    /// requested coordinate convention. See [`crate::resolve`].
    pub fn resolve(
        &self,
        joint: &Joint,
        frame_index: usize,
        convention: Convention,
    ) -> BvhResult<(Position, Quaternion)> {
        resolve::resolve(joint, &self.motion, frame_index, convention)
    }
}
