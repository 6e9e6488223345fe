use std::collections::BTreeSet;

use crate::{
    Axis, CompensationOffset, HostSurface, ScrollOptions, ScrollSurface, SurfaceId, Vec2,
};

/// One attached scroll surface.
pub(crate) struct SurfaceNode {
    pub(crate) host: Box<dyn HostSurface>,
    pub(crate) options: ScrollOptions,
    pub(crate) parent: Option<SurfaceId>,
    pub(crate) children: Vec<SurfaceId>,
    /// Descendants whose gestures currently delegate to this surface.
    pub(crate) nested_children: BTreeSet<SurfaceId>,
    pub(crate) compensation: CompensationOffset,
}

impl SurfaceNode {
    pub(crate) fn new(host: Box<dyn HostSurface>, options: ScrollOptions) -> Self {
        Self {
            host,
            options,
            parent: None,
            children: Vec::new(),
            nested_children: BTreeSet::new(),
            compensation: CompensationOffset::new(),
        }
    }

    pub(crate) fn offsets(&self) -> Vec2 {
        Vec2::new(self.offset(Axis::X), self.offset(Axis::Y))
    }
}

/// Locked-out axes report a zero offset and zero extent, and ignore deltas.
impl ScrollSurface for SurfaceNode {
    fn offset(&self, axis: Axis) -> f64 {
        if !self.options.axis_lock.allows(axis) {
            return 0.0;
        }
        self.host.offset(axis)
    }

    fn max_offset(&self, axis: Axis) -> f64 {
        if !self.options.axis_lock.allows(axis) {
            return 0.0;
        }
        let extent = self.host.axis_extent(axis);
        if extent.is_finite() { extent.max(0.0) } else { 0.0 }
    }

    fn apply_offset_delta(&mut self, axis: Axis, delta: f64) {
        if self.options.axis_lock.allows(axis) {
            self.host.apply_offset_delta(axis, delta);
        }
    }
}

struct Slot {
    generation: u32,
    node: Option<SurfaceNode>,
}

/// Arena of surfaces with generational handles.
///
/// Parent links are relations only: a node never owns its parent or children.
#[derive(Default)]
pub(crate) struct SurfaceTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl SurfaceTree {
    pub(crate) fn insert(&mut self, node: SurfaceNode) -> SurfaceId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return SurfaceId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        SurfaceId {
            index,
            generation: 0,
        }
    }

    /// Removes a node and unlinks it from its parent and children.
    pub(crate) fn remove(&mut self, id: SurfaceId) -> Option<SurfaceNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;

        if let Some(parent) = node.parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|c| *c != id);
            parent.nested_children.remove(&id);
        }
        for child in &node.children {
            if let Some(child) = self.get_mut(*child) {
                child.parent = None;
            }
        }
        for surface in self.ids().collect::<Vec<_>>() {
            if let Some(node) = self.get_mut(surface) {
                node.nested_children.remove(&id);
            }
        }
        Some(node)
    }

    pub(crate) fn get(&self, id: SurfaceId) -> Option<&SurfaceNode> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: SurfaceId) -> Option<&mut SurfaceNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    pub(crate) fn contains(&self, id: SurfaceId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.node.as_ref().map(|_| SurfaceId {
                index: i as u32,
                generation: slot.generation,
            })
        })
    }

    /// Returns `true` if `ancestor` is `id` or one of its ancestors.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: SurfaceId, id: SurfaceId) -> bool {
        let mut cur = Some(id);
        let mut steps = 0usize;
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.len {
                break;
            }
            cur = self.get(c).and_then(|n| n.parent);
        }
        false
    }

    /// Sets (or clears) the nesting parent of `child`.
    ///
    /// Returns `false` when either surface is unknown or the link would create a cycle.
    pub(crate) fn link(&mut self, child: SurfaceId, parent: Option<SurfaceId>) -> bool {
        if !self.contains(child) {
            return false;
        }
        if let Some(p) = parent {
            if !self.contains(p) || self.is_ancestor_or_self(child, p) {
                return false;
            }
        }

        let old = self.get(child).and_then(|n| n.parent);
        if old == parent {
            return true;
        }
        if let Some(old) = old.and_then(|p| self.get_mut(p)) {
            old.children.retain(|c| *c != child);
            old.nested_children.remove(&child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
        if let Some(new) = parent.and_then(|p| self.get_mut(p)) {
            new.children.push(child);
        }
        true
    }

    /// `origin` followed by every ancestor reachable through `scroll_with_parent` links.
    pub(crate) fn nested_chain(&self, origin: SurfaceId) -> Vec<SurfaceId> {
        let mut chain = Vec::new();
        let mut cur = Some(origin);
        while let Some(id) = cur {
            let Some(node) = self.get(id) else {
                break;
            };
            chain.push(id);
            if chain.len() > self.len {
                break;
            }
            cur = if node.options.scroll_with_parent {
                node.parent
            } else {
                None
            };
        }
        chain
    }
}
