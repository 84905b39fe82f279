//! UI-type inheritance and host-language association links

use crate::error::{DiagnosticSink, ResolveError};
use ql_model::NodeId;
use ql_tree::Tree;
use rustc_hash::{FxHashMap, FxHashSet};

/// Resolves every UI type's textual base-type name.
///
/// Lookups go through a per-pass memo map so each distinct name is searched
/// once. A type's import list is tried first (module-qualified), then the
/// name as written, then an unqualified scan over all registered UI types.
/// An edge that would close an inheritance loop (a type naming itself, or
/// re-entering itself through already-resolved edges) gets a cycle
/// diagnostic and stays unresolved; a successful edge is recorded on the
/// type and on the base's `inherited_by` list.
pub fn resolve_qml_inheritance(tree: &mut Tree, sink: &mut DiagnosticSink) {
    let mut previous_searches: FxHashMap<String, Option<NodeId>> = FxHashMap::default();
    let types: Vec<NodeId> = tree
        .pool()
        .iter()
        .filter(|(_, node)| node.is_qml_type())
        .map(|(id, _)| id)
        .collect();

    for qml in types {
        let Some(data) = tree.node(qml).qml_type() else {
            continue;
        };
        if data.base_type.is_some() {
            continue;
        }
        let Some(base_name) = data.base_name.clone() else {
            continue;
        };
        let imports = data.imports.clone();

        let found = match previous_searches.get(&base_name) {
            Some(&cached) => cached,
            None => {
                let result = search_base(tree, &base_name, &imports);
                previous_searches.insert(base_name.clone(), result);
                result
            }
        };

        match found {
            Some(base) if closes_cycle(tree, qml, base) => {
                sink.push(ResolveError::InheritanceCycle {
                    qml_type: tree.qualified_name(qml),
                    location: tree.node(qml).declared_at,
                });
            }
            Some(base) => {
                if let Some(data) = tree.node_mut(qml).qml_type_mut() {
                    data.base_type = Some(base);
                }
                if let Some(base_data) = tree.node_mut(base).qml_type_mut() {
                    if !base_data.inherited_by.contains(&qml) {
                        base_data.inherited_by.push(qml);
                    }
                }
            }
            None => sink.push(ResolveError::UnresolvedQmlBase {
                qml_type: tree.qualified_name(qml),
                base: base_name,
                location: tree.node(qml).declared_at,
            }),
        }
    }
}

/// True when making `base` the base of `qml` would close an inheritance
/// loop through the edges resolved so far.
fn closes_cycle(tree: &Tree, qml: NodeId, base: NodeId) -> bool {
    let mut seen = FxHashSet::default();
    let mut cursor = Some(base);
    while let Some(id) = cursor {
        if id == qml {
            return true;
        }
        if !seen.insert(id) {
            break;
        }
        cursor = tree.node(id).qml_type().and_then(|data| data.base_type);
    }
    false
}

fn search_base(tree: &Tree, base_name: &str, imports: &[String]) -> Option<NodeId> {
    for import in imports {
        if let Some(found) = tree.find_qml_type(&format!("{import}::{base_name}")) {
            return Some(found);
        }
    }
    tree.find_qml_type(base_name)
        .or_else(|| tree.find_qml_type_by_name(base_name))
}

/// Resolves each UI type's named host-language class, setting the
/// back-pointer on the class as well.
pub fn resolve_cpp_class_links(tree: &mut Tree, sink: &mut DiagnosticSink) {
    let types: Vec<NodeId> = tree
        .pool()
        .iter()
        .filter(|(_, node)| node.is_qml_type())
        .map(|(id, _)| id)
        .collect();

    for qml in types {
        let Some(data) = tree.node(qml).qml_type() else {
            continue;
        };
        if data.cpp_class.is_some() {
            continue;
        }
        let Some(class_name) = data.cpp_class_name.clone() else {
            continue;
        };
        let path = tree.interner().intern_path(&class_name);
        match tree.find_class_node(&path) {
            Some(class) => {
                if let Some(data) = tree.node_mut(qml).qml_type_mut() {
                    data.cpp_class = Some(class);
                }
                if let Some(class_data) = tree.node_mut(class).class_mut() {
                    class_data.qml_element = Some(qml);
                }
            }
            None => sink.push(ResolveError::UnresolvedCppClass {
                qml_type: tree.qualified_name(qml),
                class: class_name,
                location: tree.node(qml).declared_at,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{class, qml_type, tree};

    #[test]
    fn test_import_list_disambiguates() {
        let mut tree = tree();
        let wanted = qml_type(&mut tree, "Button", "Controls");
        let decoy = qml_type(&mut tree, "Button", "Legacy");
        let fancy = qml_type(&mut tree, "FancyButton", "Controls");
        {
            let data = tree.node_mut(fancy).qml_type_mut().unwrap();
            data.base_name = Some("Button".to_string());
            data.imports = vec!["Controls".to_string()];
        }

        let mut sink = DiagnosticSink::new();
        resolve_qml_inheritance(&mut tree, &mut sink);

        assert!(sink.is_empty());
        assert_eq!(tree.node(fancy).qml_type().unwrap().base_type, Some(wanted));
        assert_eq!(tree.node(wanted).qml_type().unwrap().inherited_by, vec![fancy]);
        assert!(tree.node(decoy).qml_type().unwrap().inherited_by.is_empty());
    }

    #[test]
    fn test_self_reference_reports_cycle() {
        let mut tree = tree();
        let item = qml_type(&mut tree, "Item", "Core");
        tree.node_mut(item).qml_type_mut().unwrap().base_name = Some("Item".to_string());

        let mut sink = DiagnosticSink::new();
        resolve_qml_inheritance(&mut tree, &mut sink);

        assert_eq!(sink.len(), 1);
        assert_eq!(tree.node(item).qml_type().unwrap().base_type, None);
    }

    #[test]
    fn test_mutual_inheritance_reports_cycle() {
        let mut tree = tree();
        let first = qml_type(&mut tree, "Panel", "Core");
        let second = qml_type(&mut tree, "Frame", "Core");
        tree.node_mut(first).qml_type_mut().unwrap().base_name = Some("Frame".to_string());
        tree.node_mut(second).qml_type_mut().unwrap().base_name = Some("Panel".to_string());

        let mut sink = DiagnosticSink::new();
        resolve_qml_inheritance(&mut tree, &mut sink);

        // One edge resolves; the edge that would close the loop is refused.
        assert_eq!(sink.len(), 1);
        assert!(matches!(
            sink.iter().next(),
            Some(ResolveError::InheritanceCycle { .. })
        ));
        assert_eq!(tree.node(first).qml_type().unwrap().base_type, Some(second));
        assert_eq!(tree.node(second).qml_type().unwrap().base_type, None);
    }

    #[test]
    fn test_unknown_base_reports() {
        let mut tree = tree();
        let item = qml_type(&mut tree, "Item", "Core");
        tree.node_mut(item).qml_type_mut().unwrap().base_name = Some("Missing".to_string());

        let mut sink = DiagnosticSink::new();
        resolve_qml_inheritance(&mut tree, &mut sink);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_cpp_class_link_is_bidirectional() {
        let mut tree = tree();
        let root = tree.root();
        let widget = class(&mut tree, root, "QButton");
        let button = qml_type(&mut tree, "Button", "Controls");
        tree.node_mut(button).qml_type_mut().unwrap().cpp_class_name =
            Some("QButton".to_string());

        let mut sink = DiagnosticSink::new();
        resolve_cpp_class_links(&mut tree, &mut sink);

        assert!(sink.is_empty());
        assert_eq!(tree.node(button).qml_type().unwrap().cpp_class, Some(widget));
        assert_eq!(tree.node(widget).class().unwrap().qml_element, Some(button));
    }
}
