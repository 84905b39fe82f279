//! Property entities and their function-role bindings

use crate::node::NodeId;

/// Role a member function plays for a property
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum PropertyRole {
    Getter,
    Setter,
    Resetter,
    Notifier,
}

impl PropertyRole {
    pub const ALL: [PropertyRole; 4] = [
        PropertyRole::Getter,
        PropertyRole::Setter,
        PropertyRole::Resetter,
        PropertyRole::Notifier,
    ];

    pub fn index(self) -> usize {
        match self {
            PropertyRole::Getter => 0,
            PropertyRole::Setter => 1,
            PropertyRole::Resetter => 2,
            PropertyRole::Notifier => 3,
        }
    }
}

/// Tri-state attribute value
///
/// `Default` means the attribute was never set explicitly and may be
/// inherited from an overridden base-type property; an explicit `True` or
/// `False` is never overwritten.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum FlagValue {
    #[default]
    Default,
    True,
    False,
}

impl FlagValue {
    pub fn from_bool(value: bool) -> Self {
        if value { FlagValue::True } else { FlagValue::False }
    }

    /// The effective boolean, with `Default` mapping to `default_value`.
    pub fn to_bool(self, default_value: bool) -> bool {
        match self {
            FlagValue::Default => default_value,
            FlagValue::True => true,
            FlagValue::False => false,
        }
    }

    pub fn is_default(self) -> bool {
        self == FlagValue::Default
    }
}

/// Property entity payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyData {
    pub data_type: String,
    /// Resolved functions per role, indexed by [`PropertyRole::index`]
    pub functions: [Vec<NodeId>; 4],
    /// Unresolved textual role hints, consumed by the association pass
    pub pending: [Vec<String>; 4],
    pub stored: FlagValue,
    pub writable: FlagValue,
    pub required: FlagValue,
    /// Same-named property in a base type this one overrides
    pub overridden_from: Option<NodeId>,
}

impl PropertyData {
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            ..Self::default()
        }
    }

    /// Records a textual role hint for later resolution.
    pub fn add_role_hint(&mut self, role: PropertyRole, function_name: impl Into<String>) {
        self.pending[role.index()].push(function_name.into());
    }

    /// Records a resolved role function.
    pub fn add_function(&mut self, role: PropertyRole, function: NodeId) {
        self.functions[role.index()].push(function);
    }

    pub fn functions_for(&self, role: PropertyRole) -> &[NodeId] {
        &self.functions[role.index()]
    }

    pub fn getters(&self) -> &[NodeId] {
        self.functions_for(PropertyRole::Getter)
    }

    pub fn setters(&self) -> &[NodeId] {
        self.functions_for(PropertyRole::Setter)
    }

    pub fn resetters(&self) -> &[NodeId] {
        self.functions_for(PropertyRole::Resetter)
    }

    pub fn notifiers(&self) -> &[NodeId] {
        self.functions_for(PropertyRole::Notifier)
    }

    /// The role `function` plays for this property, if any.
    pub fn role_of(&self, function: NodeId) -> Option<PropertyRole> {
        PropertyRole::ALL
            .into_iter()
            .find(|role| self.functions[role.index()].contains(&function))
    }

    pub fn has_access_function(&self, function: NodeId) -> bool {
        self.role_of(function).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{FunctionData, Metaness};
    use crate::node::{Genus, Node, NodeData};
    use ql_arena::Arena;
    use ql_intern::Interner;

    #[test]
    fn test_flag_value_defaults() {
        assert!(FlagValue::Default.is_default());
        assert!(FlagValue::Default.to_bool(true));
        assert!(!FlagValue::False.to_bool(true));
        assert_eq!(FlagValue::from_bool(true), FlagValue::True);
    }

    #[test]
    fn test_role_bookkeeping() {
        // The arena only manufactures valid ids for the test.
        let interner = Interner::new();
        let mut arena: Arena<Node> = Arena::new();
        let mut function = |name: &str| {
            arena.alloc(Node::new(
                interner.intern(name),
                Genus::Cpp,
                NodeData::Function(FunctionData::new(Metaness::Plain)),
            ))
        };
        let getter = function("value");
        let notifier = function("valueChanged");

        let mut property = PropertyData::new("int");
        property.add_function(PropertyRole::Getter, getter);
        property.add_function(PropertyRole::Notifier, notifier);

        assert_eq!(property.role_of(getter), Some(PropertyRole::Getter));
        assert_eq!(property.role_of(notifier), Some(PropertyRole::Notifier));
        assert_eq!(property.getters(), &[getter]);
        assert!(property.setters().is_empty());
    }
}
