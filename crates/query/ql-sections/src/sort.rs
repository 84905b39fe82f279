//! Sort keys for section members
//!
//! Members within a bucket are ordered by a synthetic key: a discriminator
//! letter by kind, the name with any trailing digit run zero-padded so
//! digits compare numerically, and for host-language functions a base-36
//! overload number.

use ql_model::{Genus, Node};
use ql_tree::Tree;

/// The sort key for `node` within a section.
pub fn sort_name(tree: &Tree, node: &Node) -> String {
    let name = pad_trailing_digits(&tree.interner().resolve(&node.name));

    if node.is_class_node() {
        return format!("A{name}");
    }
    if let Some(function) = node.function() {
        if node.genus == Genus::Cpp || node.genus == Genus::DontCare {
            let discriminator = if function.is_some_ctor() {
                'C'
            } else if function.is_dtor() {
                'D'
            } else if is_operator_name(&name) {
                'F'
            } else {
                'E'
            };
            return format!(
                "{discriminator}{name} {}",
                base36(function.overload_number)
            );
        }
        return format!("E{name}");
    }
    if node.is_property() || node.is_variable() {
        return format!("E{name}");
    }
    format!("B{name}")
}

/// Zero-pads a trailing digit run to four digits, so `qint8` orders before
/// `qint16`. A name that is all digits is left alone.
fn pad_trailing_digits(name: &str) -> String {
    let digits = name
        .bytes()
        .rev()
        .take_while(u8::is_ascii_digit)
        .count()
        .min(name.len().saturating_sub(1));
    if digits == 0 || digits >= 4 {
        return name.to_string();
    }
    let split = name.len() - digits;
    format!("{}{}{}", &name[..split], "0".repeat(4 - digits), &name[split..])
}

fn is_operator_name(name: &str) -> bool {
    name.len() > 8
        && name.starts_with("operator")
        && !name.as_bytes()[8].is_ascii_alphanumeric()
}

fn base36(mut value: u16) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_intern::Interner;
    use ql_model::{FunctionData, Metaness, NodeData, TypedefData};

    fn typedef_key(tree: &Tree, name: &str) -> String {
        let node = Node::new(
            tree.interner().intern(name),
            Genus::Cpp,
            NodeData::Typedef(TypedefData::default()),
        );
        sort_name(tree, &node)
    }

    #[test]
    fn test_trailing_digits_sort_numerically() {
        let tree = Tree::new(Interner::new());
        let small = typedef_key(&tree, "qint8");
        let large = typedef_key(&tree, "qint16");
        assert!(small < large);
        assert_eq!(small, "Bqint0008");
    }

    #[test]
    fn test_function_discriminators_order_ctor_dtor_operator() {
        let tree = Tree::new(Interner::new());
        let key = |name: &str, metaness: Metaness| {
            let node = Node::new(
                tree.interner().intern(name),
                Genus::Cpp,
                NodeData::Function(FunctionData::new(metaness)),
            );
            sort_name(&tree, &node)
        };
        let ctor = key("Widget", Metaness::Ctor);
        let copy_ctor = key("Widget", Metaness::CCtor);
        let move_ctor = key("Widget", Metaness::MCtor);
        let dtor = key("~Widget", Metaness::Dtor);
        let plain = key("show", Metaness::Plain);
        let operator = key("operator==", Metaness::Plain);
        // Every constructor flavor shares one equivalence class.
        assert_eq!(ctor, copy_ctor);
        assert_eq!(ctor, move_ctor);
        assert!(ctor < dtor);
        assert!(dtor < plain);
        assert!(plain < operator);
    }

    #[test]
    fn test_overload_number_in_base36() {
        let tree = Tree::new(Interner::new());
        let mut data = FunctionData::new(Metaness::Plain);
        data.overload_number = 36;
        let node = Node::new(
            tree.interner().intern("show"),
            Genus::Cpp,
            NodeData::Function(data),
        );
        assert_eq!(sort_name(&tree, &node), "Eshow 10");
    }

    #[test]
    fn test_all_digit_names_are_left_alone() {
        assert_eq!(pad_trailing_digits("1234567"), "1234567");
        assert_eq!(pad_trailing_digits("v2"), "v0002");
    }
}
