//! Beachline tree: arcs as leaves, breakpoints as internal nodes.
//!
//! Nodes live in an arena addressed by `NodeId`; parent/child links and the
//! pending circle event of an arc are plain handle fields, so restructuring is
//! handle reassignment. Detached nodes stay in the arena unreachable.
//!
//! Invariants (for nodes reachable from `root`):
//! - Leaves are exactly the live arcs, left to right in x-order along the sweep line.
//! - Every breakpoint has two children; its bounding arcs are the rightmost leaf
//!   of its left subtree and the leftmost leaf of its right subtree.

use super::types::{EdgeId, EventId, NodeId, Site, SiteId};
use crate::geom2::breakpoint_x;

#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    Arc {
        site: SiteId,
        /// Weak link: the queue owns the event.
        event: Option<EventId>,
    },
    Breakpoint {
        edge: EdgeId,
        left: NodeId,
        right: NodeId,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

#[derive(Clone, Debug, Default)]
pub struct Beachline {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Beachline {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Install a lone arc as the whole beachline.
    pub fn set_root_arc(&mut self, site: SiteId) -> NodeId {
        let arc = self.new_arc(site);
        self.root = Some(arc);
        arc
    }

    pub fn new_arc(&mut self, site: SiteId) -> NodeId {
        self.push(Node {
            parent: None,
            kind: NodeKind::Arc { site, event: None },
        })
    }

    /// New breakpoint adopting `left` and `right` as children.
    pub fn new_breakpoint(&mut self, edge: EdgeId, left: NodeId, right: NodeId) -> NodeId {
        let id = self.push(Node {
            parent: None,
            kind: NodeKind::Breakpoint { edge, left, right },
        });
        self.nodes[left.0].parent = Some(id);
        self.nodes[right.0].parent = Some(id);
        id
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn parent(&self, n: NodeId) -> Option<NodeId> {
        self.nodes[n.0].parent
    }

    #[inline]
    pub fn is_arc(&self, n: NodeId) -> bool {
        matches!(self.nodes[n.0].kind, NodeKind::Arc { .. })
    }

    /// Site of an arc. Panics on a breakpoint handle.
    pub fn site_of(&self, arc: NodeId) -> SiteId {
        match self.nodes[arc.0].kind {
            NodeKind::Arc { site, .. } => site,
            NodeKind::Breakpoint { .. } => panic!("site_of on breakpoint {arc:?}"),
        }
    }

    pub fn event_of(&self, arc: NodeId) -> Option<EventId> {
        match self.nodes[arc.0].kind {
            NodeKind::Arc { event, .. } => event,
            NodeKind::Breakpoint { .. } => None,
        }
    }

    pub fn set_event(&mut self, arc: NodeId, id: Option<EventId>) {
        if let NodeKind::Arc { event, .. } = &mut self.nodes[arc.0].kind {
            *event = id;
        }
    }

    /// Clear and return the pending event of an arc.
    pub fn take_event(&mut self, arc: NodeId) -> Option<EventId> {
        match &mut self.nodes[arc.0].kind {
            NodeKind::Arc { event, .. } => event.take(),
            NodeKind::Breakpoint { .. } => None,
        }
    }

    /// Edge traced by a breakpoint. Panics on an arc handle.
    pub fn edge_of(&self, bp: NodeId) -> EdgeId {
        match self.nodes[bp.0].kind {
            NodeKind::Breakpoint { edge, .. } => edge,
            NodeKind::Arc { .. } => panic!("edge_of on arc {bp:?}"),
        }
    }

    pub fn set_edge(&mut self, bp: NodeId, new_edge: EdgeId) {
        if let NodeKind::Breakpoint { edge, .. } = &mut self.nodes[bp.0].kind {
            *edge = new_edge;
        }
    }

    #[inline]
    pub fn children(&self, n: NodeId) -> Option<(NodeId, NodeId)> {
        match self.nodes[n.0].kind {
            NodeKind::Breakpoint { left, right, .. } => Some((left, right)),
            NodeKind::Arc { .. } => None,
        }
    }

    /// Put `new` where `old` hangs (parent slot or root). `old` becomes detached.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        let parent = self.nodes[old.0].parent;
        self.nodes[new.0].parent = parent;
        self.nodes[old.0].parent = None;
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                if let NodeKind::Breakpoint { left, right, .. } = &mut self.nodes[p.0].kind {
                    if *left == old {
                        *left = new;
                    } else if *right == old {
                        *right = new;
                    }
                }
            }
        }
    }

    /// Unlink `arc` together with its parent breakpoint; the arc's sibling
    /// takes the parent's slot. Returns the removed breakpoint.
    pub fn remove_arc(&mut self, arc: NodeId) -> Option<NodeId> {
        let parent = self.parent(arc)?;
        let (l, r) = self.children(parent)?;
        let sibling = if l == arc { r } else { l };
        self.replace(parent, sibling);
        self.nodes[arc.0].parent = None;
        Some(parent)
    }

    /// `true` if `ancestor` lies on the path from `node` to the root (exclusive).
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    pub fn leftmost_leaf(&self, mut n: NodeId) -> NodeId {
        while let Some((l, _)) = self.children(n) {
            n = l;
        }
        n
    }

    pub fn rightmost_leaf(&self, mut n: NodeId) -> NodeId {
        while let Some((_, r)) = self.children(n) {
            n = r;
        }
        n
    }

    /// Breakpoint separating `arc` from its predecessor: the first ancestor
    /// reached from a right child.
    pub fn left_breakpoint(&self, arc: NodeId) -> Option<NodeId> {
        let mut cur = arc;
        while let Some(p) = self.parent(cur) {
            if let Some((_, r)) = self.children(p) {
                if r == cur {
                    return Some(p);
                }
            }
            cur = p;
        }
        None
    }

    /// Mirror of `left_breakpoint`.
    pub fn right_breakpoint(&self, arc: NodeId) -> Option<NodeId> {
        let mut cur = arc;
        while let Some(p) = self.parent(cur) {
            if let Some((l, _)) = self.children(p) {
                if l == cur {
                    return Some(p);
                }
            }
            cur = p;
        }
        None
    }

    /// Arc immediately left of `arc`, `None` for the leftmost arc.
    pub fn predecessor_arc(&self, arc: NodeId) -> Option<NodeId> {
        let bp = self.left_breakpoint(arc)?;
        let (l, _) = self.children(bp)?;
        Some(self.rightmost_leaf(l))
    }

    /// Arc immediately right of `arc`, `None` for the rightmost arc.
    pub fn successor_arc(&self, arc: NodeId) -> Option<NodeId> {
        let bp = self.right_breakpoint(arc)?;
        let (_, r) = self.children(bp)?;
        Some(self.leftmost_leaf(r))
    }

    /// Arcs adjacent to a breakpoint, as `(left, right)`.
    pub fn bounding_arcs(&self, bp: NodeId) -> Option<(NodeId, NodeId)> {
        let (l, r) = self.children(bp)?;
        Some((self.rightmost_leaf(l), self.leftmost_leaf(r)))
    }

    /// Arc above `x` for the sweep at `directrix`. Ties go right.
    pub fn locate_arc(&self, x: f64, directrix: f64, sites: &[Site]) -> Option<NodeId> {
        let mut cur = self.root?;
        while let Some((l, r)) = self.children(cur) {
            let (la, ra) = self.bounding_arcs(cur)?;
            let bx = breakpoint_x(
                sites[self.site_of(la).0].pos,
                sites[self.site_of(ra).0].pos,
                directrix,
            );
            cur = if bx > x { l } else { r };
        }
        Some(cur)
    }

    /// Live arcs, left to right.
    pub fn arcs(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut cur = self.root;
        loop {
            while let Some(n) = cur {
                stack.push(n);
                cur = self.children(n).map(|(l, _)| l);
            }
            let Some(n) = stack.pop() else {
                break;
            };
            match self.children(n) {
                Some((_, r)) => cur = Some(r),
                None => out.push(n),
            }
        }
        out
    }

    /// Live breakpoints in pre-order (explicit stack, no recursion).
    pub fn breakpoints(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(n) = stack.pop() {
            if let Some((l, r)) = self.children(n) {
                out.push(n);
                stack.push(r);
                stack.push(l);
            }
        }
        out
    }
}
