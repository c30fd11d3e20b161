//! Group hierarchies over a ranking's row order.
//!
//! Groups live in a [`GroupArena`] and are addressed by [`GroupId`]
//! handles. A child's `parent` is a plain handle with no claim on the
//! parent's lifetime: the arena owns every node, and the host owns the
//! arena for as long as it renders the grouping.
//!
//! A group's `name` is its identity. Two nodes with the same name under the
//! same ancestor path are the same logical group; [`GroupArena::unify_parents`]
//! collapses such duplicates into one shared node so that collapsing or
//! expanding an ancestor affects every descendant.

mod palette;
mod unify;

pub use palette::{ColorPool, MAX_COLORS};
pub use unify::UnifyReport;

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Separator between the names of a composite group.
pub const JOIN_SEPARATOR: &str = " ∩ ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("cannot join an empty list of groups")]
    EmptyJoin,
    #[error("group id {0:?} does not belong to this arena")]
    UnknownGroup(GroupId),
}

/// Handle of a group inside its [`GroupArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of a group tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub color: String,
    pub parent: Option<GroupId>,
    pub sub_groups: Vec<GroupId>,
}

/// A group together with the row indices currently assigned to it, in
/// display order. A ranking's full order is the concatenation of its
/// ordered groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedGroup {
    pub group: GroupId,
    pub order: Vec<usize>,
}

/// Position of a row inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMeta {
    First,
    Last,
    FirstLast,
}

/// A row as rendered inside a grouped ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupItem {
    pub row: usize,
    pub group: GroupId,
    pub relative_index: usize,
    pub meta: Option<GroupMeta>,
}

/// Identity key of a group: its name.
pub fn group_id(group: &Group) -> &str {
    &group.name
}

/// Owner of all group nodes of one grouping.
#[derive(Debug, Clone, Default)]
pub struct GroupArena {
    nodes: Vec<Group>,
}

impl GroupArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a root group.
    pub fn insert(&mut self, name: impl Into<String>, color: impl Into<String>) -> GroupId {
        let id = GroupId(self.nodes.len());
        self.nodes.push(Group {
            name: name.into(),
            color: color.into(),
            parent: None,
            sub_groups: Vec::new(),
        });
        id
    }

    /// Adds a group under `parent` and lists it among the parent's
    /// sub-groups.
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this arena.
    pub fn insert_child(
        &mut self,
        parent: GroupId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> GroupId {
        let id = self.insert(name, color);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].sub_groups.push(id);
        id
    }

    /// The group used for a ranking without grouping criteria.
    pub fn default_group(&mut self) -> GroupId {
        self.insert("Default", "gray")
    }

    /// # Panics
    /// Panics if `id` does not belong to this arena.
    pub fn get(&self, id: GroupId) -> &Group {
        &self.nodes[id.0]
    }

    pub fn try_get(&self, id: GroupId) -> Result<&Group, GroupError> {
        self.nodes.get(id.0).ok_or(GroupError::UnknownGroup(id))
    }

    pub fn name(&self, id: GroupId) -> &str {
        &self.get(id).name
    }

    pub fn parent(&self, id: GroupId) -> Option<GroupId> {
        self.get(id).parent
    }

    pub fn sub_groups(&self, id: GroupId) -> &[GroupId] {
        &self.get(id).sub_groups
    }

    /// Ancestors of `id` from its parent up to the root.
    ///
    /// Stops at the first repeated node, so a cyclic chain yields each of
    /// its nodes once instead of looping.
    pub fn ancestors(&self, id: GroupId) -> Vec<GroupId> {
        let mut seen = HashSet::from([id]);
        let mut out = Vec::new();
        let mut current = self.get(id).parent;
        while let Some(p) = current {
            if !seen.insert(p) {
                break;
            }
            out.push(p);
            current = self.get(p).parent;
        }
        out
    }

    /// Number of ancestors.
    pub fn depth(&self, id: GroupId) -> usize {
        self.ancestors(id).len()
    }

    /// Combines the groups a row subset falls into under several criteria
    /// into one composite group representing their intersection.
    ///
    /// A single group is returned unchanged. Otherwise every input is cloned
    /// into a linear parent chain (`groups[i+1]`'s parent is `groups[i]`;
    /// the first clone keeps the first input's parent) and a new leaf named
    /// `"A ∩ B ∩ …"`, colored like the first input, is appended under the
    /// last chain node.
    ///
    /// # Panics
    /// Panics if `groups` is empty; see [`try_join_groups`](Self::try_join_groups).
    pub fn join_groups(&mut self, groups: &[GroupId]) -> GroupId {
        assert!(!groups.is_empty(), "join_groups needs at least one group");
        if groups.len() == 1 {
            return groups[0];
        }

        let mut chain: Vec<GroupId> = Vec::with_capacity(groups.len());
        for &g in groups {
            let source = self.get(g).clone();
            let id = GroupId(self.nodes.len());
            self.nodes.push(Group {
                sub_groups: Vec::new(),
                ..source
            });
            if let Some(&prev) = chain.last() {
                self.nodes[id.0].parent = Some(prev);
                self.nodes[prev.0].sub_groups.push(id);
            }
            chain.push(id);
        }

        let name = chain
            .iter()
            .map(|&id| self.name(id))
            .collect::<Vec<_>>()
            .join(JOIN_SEPARATOR);
        let color = self.get(chain[0]).color.clone();
        let last = chain[chain.len() - 1];
        self.insert_child(last, name, color)
    }

    /// Like [`join_groups`](Self::join_groups), but reports bad input.
    ///
    /// # Errors
    /// [`GroupError::EmptyJoin`] for an empty slice,
    /// [`GroupError::UnknownGroup`] for a foreign id.
    pub fn try_join_groups(&mut self, groups: &[GroupId]) -> Result<GroupId, GroupError> {
        if groups.is_empty() {
            return Err(GroupError::EmptyJoin);
        }
        for &g in groups {
            self.try_get(g)?;
        }
        Ok(self.join_groups(groups))
    }

    /// Partitions `order` into groups.
    ///
    /// Each criterion maps a row to a group name. Per criterion, one base
    /// group is created for each distinct name, colored from `pool` in
    /// discovery order. Rows with the same tuple of names share one
    /// composite group built by [`join_groups`](Self::join_groups). Groups
    /// appear in the order their first row appears in `order`, rows keep
    /// their relative order, and shared ancestors are unified at the end.
    ///
    /// Without criteria every row lands in the [default group](Self::default_group).
    pub fn group_by<F>(
        &mut self,
        order: &[usize],
        criteria: &mut [F],
        pool: &mut ColorPool,
    ) -> Vec<OrderedGroup>
    where
        F: FnMut(usize) -> String,
    {
        if criteria.is_empty() {
            let group = self.default_group();
            return vec![OrderedGroup {
                group,
                order: order.to_vec(),
            }];
        }

        let mut bases: Vec<HashMap<String, GroupId>> = vec![HashMap::new(); criteria.len()];
        let mut composites: HashMap<Vec<GroupId>, usize> = HashMap::new();
        let mut groups: Vec<OrderedGroup> = Vec::new();

        for &row in order {
            let mut key = Vec::with_capacity(criteria.len());
            for (criterion, base) in criteria.iter_mut().zip(bases.iter_mut()) {
                let name = criterion(row);
                let id = match base.get(&name) {
                    Some(&id) => id,
                    None => {
                        let id = self.insert(name.clone(), pool.next_color());
                        base.insert(name, id);
                        id
                    }
                };
                key.push(id);
            }
            let slot = match composites.get(&key) {
                Some(&slot) => slot,
                None => {
                    let group = self.join_groups(&key);
                    groups.push(OrderedGroup {
                        group,
                        order: Vec::new(),
                    });
                    composites.insert(key, groups.len() - 1);
                    groups.len() - 1
                }
            };
            groups[slot].order.push(row);
        }

        self.unify_parents(&groups);
        groups
    }

    /// Flattens ordered groups into row items, marking each group's first
    /// and last row.
    pub fn flatten(groups: &[OrderedGroup]) -> Vec<GroupItem> {
        let mut items = Vec::with_capacity(groups.iter().map(|g| g.order.len()).sum());
        for g in groups {
            let last = g.order.len().saturating_sub(1);
            for (i, &row) in g.order.iter().enumerate() {
                let meta = match (i == 0, i == last) {
                    (true, true) => Some(GroupMeta::FirstLast),
                    (true, false) => Some(GroupMeta::First),
                    (false, true) => Some(GroupMeta::Last),
                    (false, false) => None,
                };
                items.push(GroupItem {
                    row,
                    group: g.group,
                    relative_index: i,
                    meta,
                });
            }
        }
        items
    }
}
