//! Draft subtree resolution
//!
//! Draft nodes arrive as a flat set. Exporting the draft-preferred subtree of
//! every draft node would write descendants more than once, so only the
//! topmost drafts are exported: a draft is a root when no ancestor of it is
//! itself one of the drafts.
//!
//! ```text
//!   chapter (published)
//!   └── sequential  [draft]        <- root
//!       └── vertical (published)
//!           └── html [draft]       <- covered by the sequential
//! ```
//!
//! Ancestors are found by walking parent pointers: the parent recorded on
//! the draft node first, then a parent lookup upward. Every ancestor visited
//! is memoized with its answer, so each location is looked up at most once
//! per resolution.

use coursepack_core::{ContentNode, Location};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A draft node together with its parent pointer
#[derive(Debug, Clone, PartialEq)]
pub struct DraftNode {
    /// The draft content node
    pub node: ContentNode,
    /// Location of the node
    pub location: Location,
    /// URL form of the location
    pub url: String,
    /// Location of the node's parent
    pub parent_location: Location,
    /// URL form of the parent location
    pub parent_url: String,
}

impl DraftNode {
    /// Pair a node with its parent
    pub fn new(node: ContentNode, parent_location: Location) -> Self {
        let location = node.location.clone();
        Self {
            url: location.to_deprecated_string(),
            parent_url: parent_location.to_deprecated_string(),
            node,
            location,
            parent_location,
        }
    }
}

/// Topmost draft nodes, in input order
///
/// `parent_of` answers the parent of any location above the recorded parents;
/// it is only called for locations not already resolved. A lookup error is
/// returned unchanged. Cycles in the parent relation end the walk.
pub fn resolve_roots<F, E>(nodes: Vec<DraftNode>, mut parent_of: F) -> Result<Vec<DraftNode>, E>
where
    F: FnMut(&Location) -> Result<Option<Location>, E>,
{
    let drafts: HashSet<Location> = nodes.iter().map(|d| d.location.clone()).collect();
    // location -> "some ancestor of this location, or the location itself, is a draft"
    let mut covered: HashMap<Location, bool> = HashMap::new();

    let mut roots = Vec::with_capacity(nodes.len());
    for draft in nodes {
        if !has_draft_ancestor(&draft, &drafts, &mut covered, &mut parent_of)? {
            roots.push(draft);
        }
    }

    debug!(target: "coursepack::drafts", roots = roots.len(), drafts = drafts.len(), "Draft roots resolved");
    Ok(roots)
}

fn has_draft_ancestor<F, E>(
    draft: &DraftNode,
    drafts: &HashSet<Location>,
    covered: &mut HashMap<Location, bool>,
    parent_of: &mut F,
) -> Result<bool, E>
where
    F: FnMut(&Location) -> Result<Option<Location>, E>,
{
    let mut path: Vec<Location> = Vec::new();
    let mut on_path: HashSet<Location> = HashSet::new();
    on_path.insert(draft.location.clone());

    let mut current = Some(draft.parent_location.clone());
    let answer = loop {
        let Some(location) = current else {
            break false;
        };
        if !on_path.insert(location.clone()) {
            break false;
        }
        if let Some(&known) = covered.get(&location) {
            break known;
        }
        if drafts.contains(&location) {
            covered.insert(location, true);
            break true;
        }
        current = parent_of(&location)?;
        path.push(location);
    };

    for location in path {
        covered.insert(location, answer);
    }
    Ok(answer)
}
