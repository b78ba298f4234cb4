//! Parser and frame-transform resolver for the Biovision Hierarchy
//! (BVH) motion-capture text format.
//!
//! A .bvh file combines a skeletal hierarchy (joint names, static
//! offsets, channel lists) with a dense per-frame channel-value table.
//! [`load_bvh_from_string`] / [`load_bvh_from_file`] parse a whole file
//! into an immutable [`BvhDocument`]; [`BvhDocument::resolve`] then
//! returns any joint's local translation and rotation at any frame, in
//! a caller-chosen coordinate [`Convention`].
//!
//! ```
//! use bvh_motion::{load_bvh_from_string, Convention};
//!
//! let doc = load_bvh_from_string(
//!     "HIERARCHY
//!      ROOT Hip
//!      {
//!          OFFSET 0 0 0
//!          CHANNELS 3 Xposition Yposition Zposition
//!      }
//!      MOTION
//!      Frames: 1
//!      Frame Time: 0.0333333
//!      10 20 30",
//! )
//! .unwrap();
//! let hip = doc.find_joint("Hip").unwrap();
//! let (translation, _rotation) = doc.resolve(hip, 0, Convention::Native).unwrap();
//! assert_eq!(translation.x, 10.0);
//! ```

pub mod cache;
pub mod convert;
pub mod error;
pub mod hierarchy;
pub mod motion;
pub mod parse;
pub mod resolve;
pub mod tokenize;
pub mod types;

pub use cache::DocumentCache;
pub use convert::Convention;
pub use error::{BvhError, BvhResult};
pub use parse::{load_bvh_from_file, load_bvh_from_string};
pub use types::{BvhDocument, Channel, Joint, MotionTable, Position, Quaternion};
