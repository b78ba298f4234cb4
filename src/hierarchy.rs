use cgmath::Vector3;

use crate::error::{BvhError, BvhResult};
use crate::tokenize::Tokens;
use crate::types::{Channel, Depth, Index, Joint, ParentIndex, Position};

/////////////////////////////////////////////////////////////////////////////////////////////////

fn new_joint(name: String, index: Index, parent: ParentIndex, depth: Depth) -> Joint {
    Joint {
        name,
        index,
        parent,
        depth,
        children: Vec::new(),
        offset: Vector3::new(0.0, 0.0, 0.0),
        channels: Vec::new(),
        channel_start_index: 0,
        is_end_site: false,
    }
}

fn read_offset(tokens: &mut Tokens) -> BvhResult<Position> {
    let x = tokens.next_f64()?;
    let y = tokens.next_f64()?;
    let z = tokens.next_f64()?;
    Ok(Vector3::new(x, y, z))
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Build the joint arena from the HIERARCHY section.
///
/// Runs as an iterative state machine over the token stream (an explicit
/// block-scope stack plus an end-site flag), so arbitrarily deep
/// skeletons cannot overflow the call stack. Anything before the
/// HIERARCHY keyword is skipped. On success the cursor is left
/// positioned immediately after the MOTION keyword.
pub fn parse_hierarchy(tokens: &mut Tokens) -> BvhResult<Vec<Joint>> {
    //// Skip leading garbage up to HIERARCHY
    loop {
        match tokens.next() {
            Some("HIERARCHY") => break,
            Some(_) => continue,
            None => return Err(BvhError::MissingHierarchyKeyword),
        }
    }

    //// The first structural token must open the root joint
    match tokens.peek() {
        Some("ROOT") => {}
        Some(other) => {
            return Err(BvhError::MissingRootKeyword {
                found: other.to_string(),
            })
        }
        None => return Err(BvhError::TruncatedBlock),
    }

    let mut joints: Vec<Joint> = Vec::new();
    // Indices of joints whose `{` block is currently open.
    let mut scope: Vec<Index> = Vec::new();
    // Joint that OFFSET / CHANNELS / `{` currently apply to.
    let mut current: Option<Index> = None;
    // Index of the synthetic leaf while inside an `End Site` block.
    let mut end_site: Option<Index> = None;

    loop {
        let token = tokens.next().ok_or(BvhError::TruncatedBlock)?;
        match token {
            "ROOT" | "JOINT" => {
                let name = tokens.next_or_truncated()?.to_string();
                let index = joints.len();
                let parent = match scope.last() {
                    Some(&p) => p as ParentIndex,
                    None => -1,
                };
                let joint = new_joint(name, index, parent, scope.len());
                if parent != -1 {
                    joints[parent as Index].children.push(index);
                }
                joints.push(joint);
                current = Some(index);
            }
            "End" => {
                let site = tokens.next_or_truncated()?;
                if site != "Site" {
                    return Err(BvhError::malformed(format!(
                        "expected `Site` after `End`, found `{site}`"
                    )));
                }
                let owner = current
                    .ok_or_else(|| BvhError::malformed("End Site outside of a joint block"))?;
                //// Synthetic leaf: no channels, named after its owner
                let index = joints.len();
                let name = format!("{}_End", joints[owner].name);
                let depth = joints[owner].depth + 1;
                let mut leaf = new_joint(name, index, owner as ParentIndex, depth);
                leaf.is_end_site = true;
                joints[owner].children.push(index);
                joints.push(leaf);
                end_site = Some(index);
            }
            "{" => {
                if end_site.is_none() {
                    let index = current
                        .ok_or_else(|| BvhError::malformed("`{` outside of a joint block"))?;
                    scope.push(index);
                }
            }
            "}" => {
                if end_site.is_some() {
                    end_site = None;
                } else {
                    scope.pop().ok_or(BvhError::UnbalancedBraces)?;
                    current = scope.last().copied();
                }
            }
            "OFFSET" => {
                let offset = read_offset(tokens)?;
                let target = end_site
                    .or(current)
                    .ok_or_else(|| BvhError::malformed("OFFSET outside of a joint block"))?;
                joints[target].offset = offset;
            }
            "CHANNELS" => {
                let index = current
                    .ok_or_else(|| BvhError::malformed("CHANNELS outside of a joint block"))?;
                let count = tokens.next_usize()?;
                for _ in 0..count {
                    let name = tokens.next_or_truncated()?;
                    let channel = Channel::from_token(name)
                        .ok_or_else(|| BvhError::UnknownChannelType(name.to_string()))?;
                    joints[index].channels.push(channel);
                }
            }
            "MOTION" => {
                if !scope.is_empty() {
                    return Err(BvhError::UnbalancedBraces);
                }
                break;
            }
            _ => {} // unknown tokens inside the hierarchy are skipped
        }
    }

    Ok(joints)
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Assign every joint's `channel_start_index` as the running sum of the
/// channel counts of all joints preceding it in depth-first pre-order
/// (root first, children in declaration order). That traversal order is
/// exactly the order joints were declared in the file, which is how the
/// format lays out motion-table columns. End sites contribute zero.
///
/// Returns the total channel count of the skeleton.
pub fn assign_channel_indices(joints: &mut [Joint]) -> usize {
    if joints.is_empty() {
        return 0;
    }
    let mut next = 0;
    let mut stack: Vec<Index> = vec![0];
    while let Some(index) = stack.pop() {
        joints[index].channel_start_index = next;
        next += joints[index].channels.len();
        // reversed so declaration order comes off the stack first
        for &child in joints[index].children.iter().rev() {
            stack.push(child);
        }
    }
    next
}

/////////////////////////////////////////////////////////////////////////////////////////////////
