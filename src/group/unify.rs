//! Sharing of common ancestors across independently built group chains.

use std::collections::{HashMap, HashSet};

use super::{GroupArena, GroupId, OrderedGroup};

/// Outcome of [`GroupArena::unify_parents`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifyReport {
    /// Canonical ancestor nodes after unification, one per ancestor path.
    pub canonical: usize,
    /// Nodes whose parent link was cut because it closed a cycle. Each of
    /// them is now a root.
    pub broken_cycles: Vec<GroupId>,
}

impl GroupArena {
    /// Makes every ancestor path shared by the given leaf groups resolve to
    /// a single node.
    ///
    /// An ancestor's path is the dot-joined names from the root down to it
    /// (`"root.A"`). The first node seen for a path becomes canonical: its
    /// stale sub-group list is cleared and it is attached under its
    /// canonical parent. Later nodes with the same path are dropped from the
    /// tree (they stay in the arena, unreferenced). Each leaf is then
    /// re-parented to its canonical parent and appended to its sub-groups.
    ///
    /// Does nothing for fewer than two groups. Running it again on the same
    /// groups rebuilds the same tree.
    ///
    /// A parent chain that loops back on itself is cut at the node whose
    /// parent was already visited; that node is reported in
    /// [`UnifyReport::broken_cycles`] and treated as a root.
    pub fn unify_parents(&mut self, groups: &[OrderedGroup]) -> UnifyReport {
        let mut report = UnifyReport::default();
        if groups.len() <= 1 {
            return report;
        }
        let mut lookup: HashMap<String, GroupId> = HashMap::new();

        for g in groups {
            let Some(parent) = self.get(g.group).parent else {
                continue;
            };
            let canonical = self.resolve(parent, Some(g.group), &mut lookup, &mut report);
            self.nodes[g.group.0].parent = Some(canonical);
            self.nodes[canonical.0].sub_groups.push(g.group);
        }

        report.canonical = lookup.len();
        report
    }

    /// Resolves `node` and its ancestors to their canonical instances and
    /// returns the canonical node for `node`'s path.
    ///
    /// `leaf` is the group whose parent chain is walked; it takes part in
    /// cycle detection but is not itself registered.
    fn resolve(
        &mut self,
        node: GroupId,
        leaf: Option<GroupId>,
        lookup: &mut HashMap<String, GroupId>,
        report: &mut UnifyReport,
    ) -> GroupId {
        // walk up once, remembering the chain; cut a loop where it closes
        let mut seen: HashSet<GroupId> = leaf.into_iter().collect();
        seen.insert(node);
        let mut chain = vec![node];
        let mut current = node;
        while let Some(p) = self.nodes[current.0].parent {
            if !seen.insert(p) {
                self.nodes[current.0].parent = None;
                report.broken_cycles.push(current);
                break;
            }
            chain.push(p);
            current = p;
        }

        // then register root first, so each path id extends its parent's
        let mut canonical_parent: Option<GroupId> = None;
        let mut path = String::new();
        for &n in chain.iter().rev() {
            self.nodes[n.0].parent = canonical_parent;
            let id = match canonical_parent {
                Some(_) => format!("{path}.{}", self.nodes[n.0].name),
                None => self.nodes[n.0].name.clone(),
            };
            let canonical = match lookup.get(&id) {
                Some(&existing) => existing,
                None => {
                    if let Some(p) = canonical_parent {
                        self.nodes[p.0].sub_groups.push(n);
                    }
                    self.nodes[n.0].sub_groups.clear();
                    lookup.insert(id.clone(), n);
                    n
                }
            };
            canonical_parent = Some(canonical);
            path = id;
        }

        canonical_parent.unwrap_or(node)
    }
}
