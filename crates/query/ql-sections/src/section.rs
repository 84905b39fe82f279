//! One ordered bucket of members

use crate::sort::sort_name;
use ql_model::NodeId;
use ql_tree::Tree;

/// What a section is being built for. `AllMembers` lists inherited members
/// individually; the other styles summarize them per owner.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SectionStyle {
    Summary,
    Details,
    AllMembers,
}

/// One named bucket of an aggregate's members
///
/// Members are collected with their sort keys and flattened into ordered
/// lists by [`Section::reduce`]; equal keys keep insertion order. Deprecated
/// members land in the parallel obsolete list instead of the primary one.
#[derive(Debug)]
pub struct Section {
    title: &'static str,
    style: SectionStyle,
    /// The aggregate whose page this section belongs to
    aggregate: NodeId,
    entries: Vec<(String, NodeId)>,
    obsolete_entries: Vec<(String, NodeId)>,
    reimplemented_entries: Vec<(String, NodeId)>,
    /// Per-owner inherited-member counts, in first-seen owner order
    inherited: Vec<(NodeId, usize)>,
    members: Vec<NodeId>,
    obsolete: Vec<NodeId>,
    reimplemented: Vec<NodeId>,
}

impl Section {
    pub fn new(title: &'static str, style: SectionStyle, aggregate: NodeId) -> Self {
        Self {
            title,
            style,
            aggregate,
            entries: Vec::new(),
            obsolete_entries: Vec::new(),
            reimplemented_entries: Vec::new(),
            inherited: Vec::new(),
            members: Vec::new(),
            obsolete: Vec::new(),
            reimplemented: Vec::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn style(&self) -> SectionStyle {
        self.style
    }

    /// Inserts `node` if it is relevant to this section.
    ///
    /// Private and internal members never appear. A member owned by another
    /// aggregate counts as inherited: inherited constructors/destructors
    /// are dropped, inherited non-functions appear only in the all-members
    /// style, and every other inherited member is summarized into the
    /// per-owner count instead of the member list (again except in
    /// all-members). Deprecated members go to the obsolete list.
    pub fn insert(&mut self, tree: &Tree, node: NodeId) {
        let member = tree.node(node);
        // Members of an abstract UI ancestor document as if declared on
        // the type being processed, so they are not inherited.
        let inherited = !member.related
            && member.parent.is_some_and(|parent| {
                let owner = tree.node(parent);
                parent != self.aggregate
                    && !owner.is_namespace()
                    && !(owner.is_qml_type() && owner.is_abstract())
            });

        if member.is_private() || member.is_internal() {
            return;
        }
        if let Some(function) = member.function() {
            if inherited && (function.is_some_ctor() || function.is_dtor()) {
                return;
            }
        } else if inherited && self.style != SectionStyle::AllMembers {
            return;
        }

        let key = sort_name(tree, member);
        if member.is_deprecated() {
            self.obsolete_entries.push((key, node));
            return;
        }
        if !inherited || self.style == SectionStyle::AllMembers {
            self.entries.push((key, node));
        }
        if inherited {
            if let Some(owner) = member.parent {
                self.add_inherited(owner);
            }
        }
    }

    /// Records a function declared on this section's aggregate that
    /// overrides a base-class function, so renderers can mark it instead of
    /// listing it again as inherited.
    pub fn insert_reimplemented_member(&mut self, tree: &Tree, node: NodeId) {
        let member = tree.node(node);
        if member.is_private() || member.related {
            return;
        }
        let Some(function) = member.function() else {
            return;
        };
        if function.overrides.is_none() || member.parent != Some(self.aggregate) {
            return;
        }
        let key = sort_name(tree, member);
        if !self
            .reimplemented_entries
            .iter()
            .any(|(existing, _)| *existing == key)
        {
            self.reimplemented_entries.push((key, node));
        }
    }

    fn add_inherited(&mut self, owner: NodeId) {
        for (existing, count) in &mut self.inherited {
            if *existing == owner {
                *count += 1;
                return;
            }
        }
        self.inherited.push((owner, 1));
    }

    /// Flattens the keyed entries into the final ordered member lists.
    pub fn reduce(&mut self) {
        fn flatten(entries: &mut Vec<(String, NodeId)>, out: &mut Vec<NodeId>) {
            entries.sort_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));
            out.clear();
            out.extend(entries.iter().map(|(_, node)| *node));
        }
        flatten(&mut self.entries, &mut self.members);
        flatten(&mut self.obsolete_entries, &mut self.obsolete);
        flatten(&mut self.reimplemented_entries, &mut self.reimplemented);
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn obsolete_members(&self) -> &[NodeId] {
        &self.obsolete
    }

    pub fn reimplemented_members(&self) -> &[NodeId] {
        &self.reimplemented
    }

    /// `(owner, count)` pairs for inherited members, in first-seen order.
    pub fn inherited(&self) -> &[(NodeId, usize)] {
        &self.inherited
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.obsolete.is_empty() && self.inherited.is_empty()
    }
}
