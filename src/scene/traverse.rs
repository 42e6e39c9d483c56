//! Iterative pre-order and post-order walks over a shape hierarchy.

/// Anything that can list the children of a node by id.
pub trait Hierarchy {
    type Id: Copy;

    /// Children in z-order (first drawn first). Leaves return an empty slice.
    fn child_ids(&self, id: Self::Id) -> &[Self::Id];
}

/// Visits `root` and its descendants parents-first, children left to right.
pub fn each_before<H, F>(hierarchy: &H, root: H::Id, mut callback: F)
where
    H: Hierarchy + ?Sized,
    F: FnMut(H::Id),
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        callback(node);
        stack.extend(hierarchy.child_ids(node).iter().rev().copied());
    }
}

/// Visits `root` and its descendants children-first, left to right, `root` last.
pub fn each_after<H, F>(hierarchy: &H, root: H::Id, mut callback: F)
where
    H: Hierarchy + ?Sized,
    F: FnMut(H::Id),
{
    let mut stack = vec![root];
    let mut order = Vec::new();
    while let Some(node) = stack.pop() {
        order.push(node);
        stack.extend(hierarchy.child_ids(node).iter().copied());
    }
    while let Some(node) = order.pop() {
        callback(node);
    }
}

/// Pre-order snapshot, for callers that mutate the tree while iterating.
pub fn collect_before<H>(hierarchy: &H, root: H::Id) -> Vec<H::Id>
where
    H: Hierarchy + ?Sized,
{
    let mut ids = Vec::new();
    each_before(hierarchy, root, |id| ids.push(id));
    ids
}

/// Post-order snapshot.
pub fn collect_after<H>(hierarchy: &H, root: H::Id) -> Vec<H::Id>
where
    H: Hierarchy + ?Sized,
{
    let mut ids = Vec::new();
    each_after(hierarchy, root, |id| ids.push(id));
    ids
}
