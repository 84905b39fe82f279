//! Arena ownership and overload-chain operations
//!
//! The pool owns every node of one tree. All structural mutation goes
//! through it: attaching children, re-parenting, cloning, and the overload
//! chains threaded through function siblings of the same name. Handles stay
//! valid for the life of the pool; nothing is ever deallocated mid-run.

use crate::function::Parameters;
use crate::node::{Genus, Node, NodeData, NodeId};
use ql_arena::Arena;
use ql_intern::{Interner, Symbol};

/// Two functions under one name documenting the same signature
///
/// Reported by [`NodePool::normalize_overloads`]; `node` repeats the
/// documented signature of the earlier `twin`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DuplicateDoc {
    pub node: NodeId,
    pub twin: NodeId,
}

/// Arena of nodes plus the ownership operations over them
#[derive(Debug, Default)]
pub struct NodePool {
    nodes: Arena<Node>,
}

impl NodePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a detached node; attach it with [`NodePool::add_child`].
    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.alloc(node)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// The ordered children of `parent`, or empty for non-aggregates.
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        self.nodes[parent]
            .aggregate()
            .map_or(&[], |aggregate| aggregate.children.as_slice())
    }

    /// The head of `parent`'s overload chain for `name`, if any.
    pub fn chain_head(&self, parent: NodeId, name: Symbol) -> Option<NodeId> {
        self.nodes[parent]
            .aggregate()?
            .functions
            .get(&name)
            .copied()
    }

    /// Appends `child` to `parent`'s child sequence and records ownership.
    ///
    /// A function child is also registered in the parent's overload-chain
    /// map: it becomes the head when its name is new, otherwise it is
    /// appended to the tail of the existing chain.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        let name = self.nodes[child].name;
        let is_function = self.nodes[child].is_function();
        match self.nodes[parent].aggregate_mut() {
            Some(aggregate) => aggregate.children.push(child),
            None => return,
        }
        if is_function {
            match self.chain_head(parent, name) {
                Some(head) => self.append_overload(head, child),
                None => {
                    if let Some(aggregate) = self.nodes[parent].aggregate_mut() {
                        aggregate.functions.insert(name, child);
                    }
                }
            }
        }
    }

    /// Transfers `child` to a new owner, detaching it from the old one
    /// first. Adopting a shared comment adopts its whole collective.
    pub fn adopt_child(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[child].parent == Some(parent) {
            return;
        }
        self.detach_child(child);
        self.add_child(parent, child);
        let collective = match &self.nodes[child].data {
            NodeData::SharedComment(shared) => shared.collective.clone(),
            _ => Vec::new(),
        };
        for member in collective {
            self.adopt_child(parent, member);
        }
    }

    /// Removes `child` from its current owner, splicing function children
    /// out of their overload chain. The node itself stays allocated.
    pub fn detach_child(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child].parent else {
            return;
        };
        if self.nodes[child].is_function() {
            self.remove_overload(parent, child);
        }
        if let Some(aggregate) = self.nodes[parent].aggregate_mut() {
            aggregate.children.retain(|&id| id != child);
        }
        self.nodes[child].parent = None;
    }

    /// Shallow-copies `node` under `new_parent`.
    ///
    /// The copy starts with no parent or chain link of its own, and an
    /// aggregate copy starts empty: children stay owned by the original.
    /// Later mutation of either copy never affects the other.
    pub fn clone_node(&mut self, node: NodeId, new_parent: NodeId) -> NodeId {
        let mut copy = self.nodes[node].clone();
        copy.parent = None;
        if let Some(function) = copy.function_mut() {
            function.next_overload = None;
        }
        if let Some(aggregate) = copy.aggregate_mut() {
            aggregate.children.clear();
            aggregate.functions.clear();
        }
        let id = self.nodes.alloc(copy);
        self.add_child(new_parent, id);
        id
    }

    /// Appends `function` at the tail of the chain starting at `head`,
    /// regardless of overload markers.
    pub fn append_overload(&mut self, head: NodeId, function: NodeId) {
        if head == function {
            return;
        }
        if let Some(data) = self.nodes[function].function_mut() {
            data.next_overload = None;
        }
        let mut tail = head;
        while let Some(next) = self.next_overload(tail) {
            tail = next;
        }
        if let Some(data) = self.nodes[tail].function_mut() {
            data.next_overload = Some(function);
        }
    }

    /// Splices `function` out of its name's chain under `parent`. Removing
    /// the head re-points the map entry at the rest of the chain, or drops
    /// the entry when the chain becomes empty.
    pub fn remove_overload(&mut self, parent: NodeId, function: NodeId) {
        let name = self.nodes[function].name;
        let Some(head) = self.chain_head(parent, name) else {
            return;
        };
        let next = self.next_overload(function);
        if head == function {
            if let Some(aggregate) = self.nodes[parent].aggregate_mut() {
                match next {
                    // IndexMap keeps the entry's position on re-insert.
                    Some(rest) => {
                        aggregate.functions.insert(name, rest);
                    }
                    None => {
                        aggregate.functions.shift_remove(&name);
                    }
                }
            }
        } else {
            self.unlink_from_chain(head, function);
        }
        if let Some(data) = self.nodes[function].function_mut() {
            data.next_overload = None;
        }
    }

    /// Re-points the predecessor of `function` past it. The target's own
    /// next pointer is left for the caller to manage.
    fn unlink_from_chain(&mut self, head: NodeId, function: NodeId) {
        let mut cursor = head;
        while let Some(next) = self.next_overload(cursor) {
            if next == function {
                let after = self.next_overload(function);
                if let Some(data) = self.nodes[cursor].function_mut() {
                    data.next_overload = after;
                }
                return;
            }
            cursor = next;
        }
    }

    /// The first chain entry not explicitly marked as an overload.
    pub fn find_primary_function(&self, head: NodeId) -> Option<NodeId> {
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            let function = self.nodes[id].function()?;
            if !function.overload_flag {
                return Some(id);
            }
            cursor = function.next_overload;
        }
        None
    }

    /// Normalizes every overload chain under `aggregate`, recursively.
    ///
    /// Per chain: a head carrying an explicit overload marker is displaced
    /// by the first unmarked chain entry; internal-status functions move to
    /// the tail; the primary is numbered 0 and the rest ascend in
    /// declaration order. A function repeating the documented signature of
    /// an earlier chain entry is flagged as a duplicate and given its
    /// twin's number instead of a fresh one. The operation is idempotent.
    pub fn normalize_overloads(&mut self, aggregate: NodeId) -> Vec<DuplicateDoc> {
        let mut duplicates = Vec::new();
        self.normalize_aggregate(aggregate, &mut duplicates);
        duplicates
    }

    fn normalize_aggregate(&mut self, aggregate: NodeId, duplicates: &mut Vec<DuplicateDoc>) {
        let names: Vec<Symbol> = match self.nodes[aggregate].aggregate() {
            Some(data) => data.functions.keys().copied().collect(),
            None => return,
        };
        for name in names {
            self.normalize_chain(aggregate, name, duplicates);
        }
        let children = self.children(aggregate).to_vec();
        for child in children {
            if self.nodes[child].is_aggregate() {
                self.normalize_aggregate(child, duplicates);
            }
        }
    }

    fn normalize_chain(&mut self, aggregate: NodeId, name: Symbol, duplicates: &mut Vec<DuplicateDoc>) {
        let Some(mut head) = self.chain_head(aggregate, name) else {
            return;
        };

        // Promote the first unmarked function over a marked head.
        let head_is_marked = self.nodes[head]
            .function()
            .is_some_and(|function| function.overload_flag);
        if head_is_marked {
            if let Some(primary) = self.find_primary_function(head) {
                self.unlink_from_chain(head, primary);
                if let Some(function) = self.nodes[primary].function_mut() {
                    function.next_overload = Some(head);
                }
                if let Some(data) = self.nodes[aggregate].aggregate_mut() {
                    data.functions.insert(name, primary);
                }
                head = primary;
            }
        }

        // Flatten the chain, moving internal functions behind the rest
        // without disturbing their relative order.
        let mut active = Vec::new();
        let mut internal = Vec::new();
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            cursor = self.next_overload(id);
            if id != head && self.nodes[id].is_internal() {
                internal.push(id);
            } else {
                active.push(id);
            }
        }
        active.extend(internal);

        // Relink and renumber. `numbered` holds the non-duplicate entries
        // seen so far, in chain order.
        let mut number: u16 = 0;
        let mut numbered: Vec<NodeId> = Vec::new();
        for position in 0..active.len() {
            let id = active[position];
            let next = active.get(position + 1).copied();
            let mut twin = None;
            for &earlier in &numbered {
                let same = match (self.nodes[id].function(), self.nodes[earlier].function()) {
                    (Some(lhs), Some(rhs)) => lhs.same_documented_signature(rhs),
                    _ => false,
                };
                if same {
                    let twin_number = self.nodes[earlier]
                        .function()
                        .map_or(0, |function| function.overload_number);
                    twin = Some((earlier, twin_number));
                    break;
                }
            }
            let assigned = match twin {
                Some((_, twin_number)) => twin_number,
                None => {
                    let fresh = number;
                    number += 1;
                    fresh
                }
            };
            if let Some(function) = self.nodes[id].function_mut() {
                function.next_overload = next;
                function.overload_number = assigned;
                function.overload_flag = assigned != 0 || twin.is_some();
                function.duplicate = twin.is_some();
            }
            match twin {
                Some((twin_id, _)) => duplicates.push(DuplicateDoc {
                    node: id,
                    twin: twin_id,
                }),
                None => numbered.push(id),
            }
        }
    }

    /// Finds the overload of `name` under `parent` whose parameter types
    /// match `parameters`.
    ///
    /// An empty query prefers a parameterless overload, then falls back to
    /// the first non-internal chain entry, then to the head itself. A typed
    /// query with no exact match finds nothing.
    pub fn find_function_child(
        &self,
        parent: NodeId,
        name: Symbol,
        parameters: &Parameters,
    ) -> Option<NodeId> {
        let head = self.chain_head(parent, name)?;
        let head_data = self.nodes[head].function()?;
        if parameters.is_empty() && head_data.parameters.is_empty() && !self.nodes[head].is_internal()
        {
            return Some(head);
        }

        let mut cursor = Some(head);
        while let Some(id) = cursor {
            let function = self.nodes[id].function()?;
            if function.parameters.count() == parameters.count()
                && !self.nodes[id].is_internal()
                && (parameters.is_empty() || parameters.match_types(&function.parameters))
            {
                return Some(id);
            }
            cursor = function.next_overload;
        }

        if parameters.is_empty() {
            let mut cursor = Some(head);
            while let Some(id) = cursor {
                if !self.nodes[id].is_internal() {
                    return Some(id);
                }
                cursor = self.next_overload(id);
            }
            return Some(head);
        }
        None
    }

    /// Finds a direct child of `parent` named `name` with a compatible
    /// genus. Non-function children win over function chains.
    pub fn find_child_by_name(&self, parent: NodeId, name: Symbol, genus: Genus) -> Option<NodeId> {
        let aggregate = self.nodes[parent].aggregate()?;
        aggregate
            .children
            .iter()
            .copied()
            .find(|&child| {
                let node = &self.nodes[child];
                node.name == name && !node.is_function() && genus.matches(node.genus)
            })
            .or_else(|| aggregate.functions.get(&name).copied())
    }

    /// The `::`-joined path from the root down to `id`. Root nodes with an
    /// empty name contribute nothing.
    pub fn qualified_name(&self, id: NodeId, interner: &Interner) -> String {
        let mut parts = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.nodes[current];
            let name = interner.resolve(&node.name);
            if !name.is_empty() {
                parts.push(name);
            }
            cursor = node.parent;
        }
        parts.reverse();
        parts.join("::")
    }

    /// Whether `shared` is a shared comment whose collective consists of
    /// UI-language properties (a property group).
    pub fn is_property_group(&self, shared: NodeId) -> bool {
        match &self.nodes[shared].data {
            NodeData::SharedComment(data) => {
                !data.collective.is_empty()
                    && data
                        .collective
                        .iter()
                        .all(|&member| self.nodes[member].is_qml_property())
            }
            _ => false,
        }
    }

    fn next_overload(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].function().and_then(|function| function.next_overload)
    }
}
