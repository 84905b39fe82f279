//! Free-text link resolution and anchor derivation

use crate::error::LinkError;
use crate::registry::RefRegistry;
use crate::target::LinkTarget;
use ql_model::{Genus, Metaness, NodeData, NodeId};
use ql_tree::{Forest, ForestNode, Tree};

/// Resolves free-text link targets against a forest
///
/// Search order: the referring entity's lexical scope outward to its
/// tree's root, then each tree of the forest from its root, in forest
/// order. The resolver owns the per-run anchor registry, so anchors are
/// unique and stable across calls.
pub struct LinkResolver<'a> {
    forest: &'a Forest,
    registry: RefRegistry,
    diagnostics: Vec<LinkError>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(forest: &'a Forest) -> Self {
        Self {
            forest,
            registry: RefRegistry::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Non-fatal problems recorded while resolving (ambiguities).
    pub fn diagnostics(&self) -> &[LinkError] {
        &self.diagnostics
    }

    /// Resolves `target` to one entity and its page anchor.
    ///
    /// `relative` is the referring entity in the forest's primary tree;
    /// `None` starts at the root. An ambiguous function reference resolves
    /// to the chain head and records a diagnostic. An explicit `#fragment`
    /// overrides the kind-derived anchor and goes through the registry like
    /// any other ref.
    pub fn resolve(
        &mut self,
        target: &str,
        relative: Option<NodeId>,
    ) -> Result<(ForestNode, String), LinkError> {
        let parsed = LinkTarget::parse(target)?;
        let found = self
            .search_outward(&parsed, relative, target)
            .or_else(|| self.search_forest(&parsed, target))
            .ok_or_else(|| LinkError::NotFound {
                target: target.to_string(),
            })?;
        let anchor = match &parsed.fragment {
            Some(fragment) => self.registry.register(fragment),
            None => self.ref_for_node(self.forest.tree(found.tree), found.node),
        };
        Ok((found, anchor))
    }

    fn search_outward(
        &mut self,
        parsed: &LinkTarget,
        relative: Option<NodeId>,
        target: &str,
    ) -> Option<ForestNode> {
        let tree = self.forest.primary()?;
        let mut scope = relative;
        while let Some(current) = scope {
            if tree.node(current).is_aggregate() {
                if let Some(found) = self.resolve_in_scope(tree, current, parsed, target) {
                    return Some(ForestNode {
                        tree: 0,
                        node: found,
                    });
                }
            }
            scope = tree.node(current).parent;
        }
        None
    }

    fn search_forest(&mut self, parsed: &LinkTarget, target: &str) -> Option<ForestNode> {
        for (index, tree) in self.forest.iter().enumerate() {
            if let Some(found) = self.resolve_in_scope(tree, tree.root(), parsed, target) {
                return Some(ForestNode {
                    tree: index,
                    node: found,
                });
            }
        }
        None
    }

    /// Resolves the parsed path starting at `scope`, applying function
    /// disambiguation to the last segment.
    fn resolve_in_scope(
        &mut self,
        tree: &Tree,
        scope: NodeId,
        parsed: &LinkTarget,
        target: &str,
    ) -> Option<NodeId> {
        let mut current = scope;
        let (last, intermediate) = parsed.path.split_last()?;
        for segment in intermediate {
            let symbol = tree.interner().intern(segment);
            let next = tree
                .pool()
                .find_child_by_name(current, symbol, Genus::DontCare)?;
            if !tree.node(next).is_aggregate() {
                return None;
            }
            current = next;
        }

        let symbol = tree.interner().intern(last);
        match &parsed.parameters {
            Some(parameters) => tree.pool().find_function_child(current, symbol, parameters),
            None => {
                if let Some(head) = tree.pool().chain_head(current, symbol) {
                    let count = chain_len(tree, head);
                    if count > 1 {
                        self.diagnostics.push(LinkError::AmbiguousReference {
                            target: target.to_string(),
                            candidates: count,
                        });
                    }
                    return Some(head);
                }
                tree.pool().find_child_by_name(current, symbol, Genus::DontCare)
            }
        }
    }

    /// Derives the page anchor for `node` and registers it for uniqueness.
    ///
    /// The suffix depends on the entity kind; same-named entities of
    /// different kinds therefore never collide. A host-language function
    /// uses its bare name, with `-N` appended for non-primary overloads;
    /// an undocumented accessor of exactly one property borrows that
    /// property's anchor, and a flag typedef borrows its enum's.
    pub fn ref_for_node(&mut self, tree: &Tree, node: NodeId) -> String {
        let reference = self.raw_ref(tree, node);
        self.registry.register(&reference)
    }

    fn raw_ref(&mut self, tree: &Tree, node: NodeId) -> String {
        let member = tree.node(node);
        let name = tree.interner().resolve(&member.name);
        match &member.data {
            NodeData::Enum(_) => format!("{name}-enum"),
            NodeData::Typedef(typedef) => {
                if let Some(associated) = typedef.associated_enum {
                    return self.raw_ref(tree, associated);
                }
                if typedef.is_alias {
                    format!("{name}-alias")
                } else {
                    format!("{name}-typedef")
                }
            }
            NodeData::Property(_) => format!("{name}-prop"),
            NodeData::Variable(_) => format!("{name}-var"),
            NodeData::QmlProperty(property) => {
                if property.is_attached {
                    format!("{name}-attached-prop")
                } else {
                    format!("{name}-prop")
                }
            }
            NodeData::SharedComment(_) => {
                if tree.pool().is_property_group(node) {
                    format!("{name}-prop")
                } else {
                    name
                }
            }
            NodeData::Function(function) => {
                let base = match function.metaness {
                    Metaness::QmlSignal => format!("{name}-signal"),
                    Metaness::QmlSignalHandler => format!("{name}-signal-handler"),
                    Metaness::QmlMethod => format!("{name}-method"),
                    Metaness::Signal => format!("{name}-signal"),
                    _ => {
                        if function.has_one_associated_property() && !member.has_doc() {
                            return self.raw_ref(tree, function.associated_properties[0]);
                        }
                        name
                    }
                };
                if function.overload_number != 0 {
                    format!("{base}-{}", function.overload_number)
                } else {
                    base
                }
            }
            _ => name,
        }
    }
}

fn chain_len(tree: &Tree, head: NodeId) -> usize {
    let mut count = 0;
    let mut cursor = Some(head);
    while let Some(id) = cursor {
        count += 1;
        cursor = tree.node(id).function().and_then(|f| f.next_overload);
    }
    count
}
