//! Bucket tables and the per-aggregate sections builder

use crate::section::{Section, SectionStyle};
use ql_model::{Access, Metaness, NodeData, NodeId};
use ql_tree::Tree;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Summary buckets for a class, struct or union page, in output order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClassSummary {
    PublicTypes,
    Properties,
    PublicFunctions,
    PublicSlots,
    Signals,
    PublicVariables,
    StaticPublicMembers,
    ProtectedTypes,
    ProtectedFunctions,
    ProtectedSlots,
    ProtectedVariables,
    StaticProtectedMembers,
    PrivateTypes,
    PrivateFunctions,
    PrivateSlots,
    StaticPrivateMembers,
    RelatedNonMembers,
    Macros,
}

impl ClassSummary {
    pub const TITLES: [&'static str; 18] = [
        "Public Types",
        "Properties",
        "Public Functions",
        "Public Slots",
        "Signals",
        "Public Variables",
        "Static Public Members",
        "Protected Types",
        "Protected Functions",
        "Protected Slots",
        "Protected Variables",
        "Static Protected Members",
        "Private Types",
        "Private Functions",
        "Private Slots",
        "Static Private Members",
        "Related Non-Members",
        "Macros",
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Details buckets for a class page.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClassDetails {
    MemberTypes,
    Properties,
    MemberFunctions,
    MemberVariables,
    RelatedNonMembers,
    Macros,
}

impl ClassDetails {
    pub const TITLES: [&'static str; 6] = [
        "Member Type Documentation",
        "Property Documentation",
        "Member Function Documentation",
        "Member Variable Documentation",
        "Related Non-Members",
        "Macro Documentation",
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Buckets for a namespace, header or proxy page.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NamespaceSummary {
    Namespaces,
    Classes,
    Types,
    Variables,
    StaticVariables,
    Functions,
    Macros,
}

impl NamespaceSummary {
    pub const TITLES: [&'static str; 7] = [
        "Namespaces",
        "Classes",
        "Types",
        "Variables",
        "Static Variables",
        "Functions",
        "Macros",
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Buckets for a UI type page.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum QmlSummary {
    Properties,
    AttachedProperties,
    Signals,
    SignalHandlers,
    AttachedSignals,
    Methods,
    AttachedMethods,
}

impl QmlSummary {
    pub const TITLES: [&'static str; 7] = [
        "Properties",
        "Attached Properties",
        "Signals",
        "Signal Handlers",
        "Attached Signals",
        "Methods",
        "Attached Methods",
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// The complete sections of one aggregate's reference page
///
/// Built once per aggregate after the resolution passes; read-only from
/// then on. Which bucket table `summary`/`details` follow depends on the
/// aggregate's kind.
pub struct Sections {
    summary: Vec<Section>,
    details: Vec<Section>,
    all_members: Section,
}

impl Sections {
    /// Builds the sections for `aggregate`, choosing the bucket tables by
    /// its kind. Non-aggregates get empty sections.
    pub fn for_aggregate(tree: &Tree, aggregate: NodeId) -> Self {
        let node = tree.node(aggregate);
        if node.is_class_node() {
            Self::for_class(tree, aggregate)
        } else if node.is_qml_type() {
            Self::for_qml_type(tree, aggregate)
        } else {
            Self::for_namespace(tree, aggregate)
        }
    }

    pub fn summary(&self) -> &[Section] {
        &self.summary
    }

    pub fn details(&self) -> &[Section] {
        &self.details
    }

    pub fn all_members(&self) -> &Section {
        &self.all_members
    }

    pub fn class_summary(&self, bucket: ClassSummary) -> &Section {
        &self.summary[bucket.index()]
    }

    pub fn class_details(&self, bucket: ClassDetails) -> &Section {
        &self.details[bucket.index()]
    }

    pub fn namespace_summary(&self, bucket: NamespaceSummary) -> &Section {
        &self.summary[bucket.index()]
    }

    pub fn qml_summary(&self, bucket: QmlSummary) -> &Section {
        &self.summary[bucket.index()]
    }

    fn for_class(tree: &Tree, class: NodeId) -> Self {
        let mut sections = Self {
            summary: make_sections(&ClassSummary::TITLES, SectionStyle::Summary, class),
            details: make_sections(&ClassDetails::TITLES, SectionStyle::Details, class),
            all_members: Section::new("All Members", SectionStyle::AllMembers, class),
        };

        for &child in tree.pool().children(class) {
            sections.collect_for_all_members(tree, child);
            distribute_class_summary(tree, &mut sections.summary, child);
            distribute_class_details(tree, &mut sections.details, child);
        }
        for base in base_chain(tree, class) {
            for &child in tree.pool().children(base) {
                sections.collect_for_all_members(tree, child);
                distribute_class_summary(tree, &mut sections.summary, child);
            }
        }
        sections.reduce();
        sections
    }

    fn for_namespace(tree: &Tree, namespace: NodeId) -> Self {
        let mut sections = Self {
            summary: make_sections(&NamespaceSummary::TITLES, SectionStyle::Summary, namespace),
            details: make_sections(&NamespaceSummary::TITLES, SectionStyle::Details, namespace),
            all_members: Section::new("All Members", SectionStyle::AllMembers, namespace),
        };
        for &child in tree.pool().children(namespace) {
            sections.collect_for_all_members(tree, child);
            distribute_namespace(tree, &mut sections.summary, child);
            distribute_namespace(tree, &mut sections.details, child);
        }
        sections.reduce();
        sections
    }

    fn for_qml_type(tree: &Tree, qml: NodeId) -> Self {
        let mut sections = Self {
            summary: make_sections(&QmlSummary::TITLES, SectionStyle::Summary, qml),
            details: make_sections(&QmlSummary::TITLES, SectionStyle::Details, qml),
            all_members: Section::new("All Members", SectionStyle::AllMembers, qml),
        };

        let mut seen_names = FxHashSet::default();
        for current in qml_chain(tree, qml) {
            let is_abstract_ancestor = current != qml && tree.node(current).is_abstract();
            for &child in tree.pool().children(current) {
                let member = tree.node(child);
                if member.is_internal() {
                    continue;
                }
                // An undocumented member of an abstract ancestor that a
                // nearer type re-declares is documented there instead.
                if is_abstract_ancestor
                    && !member.has_doc()
                    && seen_names.contains(&member.name)
                {
                    continue;
                }
                sections.all_members.insert(tree, child);
                if current == qml || is_abstract_ancestor {
                    distribute_qml(tree, &mut sections.summary, child);
                    distribute_qml(tree, &mut sections.details, child);
                }
                seen_names.insert(member.name);
            }
        }
        sections.reduce();
        sections
    }

    fn collect_for_all_members(&mut self, tree: &Tree, child: NodeId) {
        let node = tree.node(child);
        if !node.is_private() && !node.is_property() && !node.related && !node.is_shared_comment()
        {
            self.all_members.insert(tree, child);
        }
    }

    fn reduce(&mut self) {
        for section in &mut self.summary {
            section.reduce();
        }
        for section in &mut self.details {
            section.reduce();
        }
        self.all_members.reduce();
    }
}

fn make_sections(titles: &[&'static str], style: SectionStyle, aggregate: NodeId) -> Vec<Section> {
    titles
        .iter()
        .map(|title| Section::new(title, style, aggregate))
        .collect()
}

/// The resolved base classes of `class`, nearest first, cycle safe.
fn base_chain(tree: &Tree, class: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut seen = FxHashSet::default();
    seen.insert(class);
    let mut queue = VecDeque::from([class]);
    while let Some(current) = queue.pop_front() {
        let Some(data) = tree.node(current).class() else {
            continue;
        };
        for base in data.resolved_bases() {
            if seen.insert(base) {
                order.push(base);
                queue.push_back(base);
            }
        }
    }
    order
}

/// The UI type itself followed by its resolved base chain, cycle safe.
fn qml_chain(tree: &Tree, qml: NodeId) -> Vec<NodeId> {
    let mut order = vec![qml];
    let mut seen = FxHashSet::default();
    seen.insert(qml);
    let mut cursor = tree.node(qml).qml_type().and_then(|data| data.base_type);
    while let Some(base) = cursor {
        if !seen.insert(base) {
            break;
        }
        order.push(base);
        cursor = tree.node(base).qml_type().and_then(|data| data.base_type);
    }
    order
}

fn distribute_class_summary(tree: &Tree, sections: &mut [Section], child: NodeId) {
    use ClassSummary::*;
    let member = tree.node(child);

    if member.is_shared_comment() {
        if tree.pool().is_property_group(child) && member.has_doc() {
            sections[Properties.index()].insert(tree, child);
        }
        return;
    }
    if let Some(function) = member.function() {
        if member.related {
            let bucket = if function.is_macro() { Macros } else { RelatedNonMembers };
            sections[bucket.index()].insert(tree, child);
            return;
        }
        let bucket = if function.is_macro() {
            Macros
        } else if function.is_slot() {
            match member.access {
                Access::Public => PublicSlots,
                Access::Protected => ProtectedSlots,
                Access::Private => PrivateSlots,
            }
        } else if function.is_signal() {
            Signals
        } else {
            match (member.access, function.is_static) {
                (Access::Public, true) => StaticPublicMembers,
                (Access::Public, false) => PublicFunctions,
                (Access::Protected, true) => StaticProtectedMembers,
                (Access::Protected, false) => ProtectedFunctions,
                (Access::Private, true) => StaticPrivateMembers,
                (Access::Private, false) => PrivateFunctions,
            }
        };
        sections[bucket.index()].insert(tree, child);
        if function.overrides.is_some() {
            sections[bucket.index()].insert_reimplemented_member(tree, child);
        }
        return;
    }
    if member.related {
        sections[RelatedNonMembers.index()].insert(tree, child);
        return;
    }
    match &member.data {
        NodeData::Property(_) => sections[Properties.index()].insert(tree, child),
        NodeData::Variable(variable) => {
            let bucket = match (member.access, variable.is_static) {
                (Access::Public, true) => StaticPublicMembers,
                (Access::Public, false) => PublicVariables,
                (Access::Protected, _) => ProtectedVariables,
                (Access::Private, _) => return,
            };
            sections[bucket.index()].insert(tree, child);
        }
        NodeData::Class(_) | NodeData::Enum(_) | NodeData::Typedef(_) => {
            let bucket = match member.access {
                Access::Public => PublicTypes,
                Access::Protected => ProtectedTypes,
                Access::Private => PrivateTypes,
            };
            sections[bucket.index()].insert(tree, child);
        }
        _ => {}
    }
}

fn distribute_class_details(tree: &Tree, sections: &mut [Section], child: NodeId) {
    use ClassDetails::*;
    let member = tree.node(child);

    if member.is_shared_comment() {
        if tree.pool().is_property_group(child) && member.has_doc() {
            sections[Properties.index()].insert(tree, child);
        }
        return;
    }
    if let Some(function) = member.function() {
        // An undocumented property accessor is documented under the
        // property itself.
        if function.has_associated_properties() && !member.has_doc() {
            return;
        }
        let bucket = if member.related {
            if function.is_macro() { Macros } else { RelatedNonMembers }
        } else if function.is_macro() {
            Macros
        } else {
            MemberFunctions
        };
        sections[bucket.index()].insert(tree, child);
        return;
    }
    if member.related {
        sections[RelatedNonMembers.index()].insert(tree, child);
        return;
    }
    match &member.data {
        NodeData::Property(_) => sections[Properties.index()].insert(tree, child),
        NodeData::Variable(_) => sections[MemberVariables.index()].insert(tree, child),
        NodeData::Enum(_) => sections[MemberTypes.index()].insert(tree, child),
        NodeData::Typedef(typedef) => {
            // A flag typedef is documented with its enum.
            if typedef.associated_enum.is_none() {
                sections[MemberTypes.index()].insert(tree, child);
            }
        }
        _ => {}
    }
}

fn distribute_namespace(tree: &Tree, sections: &mut [Section], child: NodeId) {
    use NamespaceSummary::*;
    let member = tree.node(child);
    let bucket = match &member.data {
        NodeData::Namespace(_) => Namespaces,
        NodeData::Class(_) => Classes,
        NodeData::Enum(_) | NodeData::Typedef(_) => Types,
        NodeData::Variable(variable) => {
            if variable.is_static {
                StaticVariables
            } else {
                Variables
            }
        }
        NodeData::Function(function) => {
            if function.is_macro() {
                Macros
            } else {
                Functions
            }
        }
        _ => return,
    };
    sections[bucket.index()].insert(tree, child);
}

fn distribute_qml(tree: &Tree, sections: &mut [Section], child: NodeId) {
    use QmlSummary::*;
    let member = tree.node(child);

    if member.is_shared_comment() {
        if tree.pool().is_property_group(child) && member.has_doc() {
            sections[Properties.index()].insert(tree, child);
        }
        return;
    }
    let bucket = match &member.data {
        NodeData::QmlProperty(property) => {
            if property.is_attached {
                AttachedProperties
            } else {
                Properties
            }
        }
        NodeData::Function(function) => match function.metaness {
            Metaness::QmlSignal => {
                if function.is_attached {
                    AttachedSignals
                } else {
                    Signals
                }
            }
            Metaness::QmlSignalHandler => SignalHandlers,
            Metaness::QmlMethod => {
                if function.is_attached {
                    AttachedMethods
                } else {
                    Methods
                }
            }
            _ => return,
        },
        _ => return,
    };
    sections[bucket.index()].insert(tree, child);
}
