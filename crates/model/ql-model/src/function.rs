//! Function entities, parameters and overload-chain state

use crate::node::NodeId;

/// What flavor of callable a function entity is
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Metaness {
    Plain,
    Signal,
    Slot,
    Ctor,
    CCtor,
    MCtor,
    Dtor,
    MacroWithParams,
    MacroWithoutParams,
    Native,
    QmlSignal,
    QmlSignalHandler,
    QmlMethod,
}

impl Metaness {
    pub fn is_macro(self) -> bool {
        matches!(self, Metaness::MacroWithParams | Metaness::MacroWithoutParams)
    }

    /// True for any kind of constructor.
    pub fn is_some_ctor(self) -> bool {
        matches!(self, Metaness::Ctor | Metaness::CCtor | Metaness::MCtor)
    }

    pub fn is_qml(self) -> bool {
        matches!(
            self,
            Metaness::QmlSignal | Metaness::QmlSignalHandler | Metaness::QmlMethod
        )
    }
}

/// Virtual dispatch classification
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Virtualness {
    NonVirtual,
    Virtual,
    PureVirtual,
}

/// One formal parameter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    /// Textual type, as written in the declaration
    pub data_type: String,
    pub name: String,
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(data_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            name: name.into(),
            default_value: None,
        }
    }

    pub fn has_type(&self) -> bool {
        !self.data_type.is_empty()
    }
}

/// Ordered formal parameter list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self(parameters)
    }

    /// Parses a comma-separated list of parameter types, as they appear in a
    /// link target signature such as `f(int, const char *)`.
    pub fn from_signature(signature: &str) -> Self {
        let types = signature
            .split(',')
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| Parameter::new(text, ""))
            .collect();
        Self(types)
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn at(&self, index: usize) -> &Parameter {
        &self.0[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }

    pub fn push(&mut self, parameter: Parameter) {
        self.0.push(parameter);
    }

    /// The comma-joined parameter types, without names.
    pub fn type_signature(&self) -> String {
        self.0
            .iter()
            .map(|parameter| parameter.data_type.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether both lists have the same length and pairwise-equal types.
    pub fn match_types(&self, other: &Parameters) -> bool {
        self.count() == other.count()
            && self
                .iter()
                .zip(other.iter())
                .all(|(lhs, rhs)| lhs.data_type == rhs.data_type)
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Function entity payload
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionData {
    pub metaness: Metaness,
    pub virtualness: Virtualness,
    pub is_const: bool,
    pub is_static: bool,
    pub is_final: bool,
    /// True for attached UI signals/methods
    pub is_attached: bool,
    /// Set when the comment explicitly marked the function as an overload.
    /// The marker is a hint: normalization decides the primary function.
    pub overload_flag: bool,
    /// 0 for the primary function; assigned by normalization
    pub overload_number: u16,
    /// Next entry in this name's overload chain
    pub next_overload: Option<NodeId>,
    pub parameters: Parameters,
    pub return_type: String,
    /// Textual reimplements marker from the comment, if any
    pub reimplements: Option<String>,
    /// The base-class function this one overrides, resolved by the
    /// reimplementation pass
    pub overrides: Option<NodeId>,
    /// Properties this function serves as getter/setter/resetter/notifier
    pub associated_properties: Vec<NodeId>,
    /// Set when this function duplicates the documented signature of an
    /// earlier overload
    pub duplicate: bool,
}

impl FunctionData {
    pub fn new(metaness: Metaness) -> Self {
        Self {
            metaness,
            virtualness: Virtualness::NonVirtual,
            is_const: false,
            is_static: false,
            is_final: false,
            is_attached: false,
            overload_flag: false,
            overload_number: 0,
            next_overload: None,
            parameters: Parameters::default(),
            return_type: String::new(),
            reimplements: None,
            overrides: None,
            associated_properties: Vec::new(),
            duplicate: false,
        }
    }

    pub fn is_signal(&self) -> bool {
        self.metaness == Metaness::Signal
    }

    pub fn is_slot(&self) -> bool {
        self.metaness == Metaness::Slot
    }

    pub fn is_ctor(&self) -> bool {
        self.metaness == Metaness::Ctor
    }

    pub fn is_dtor(&self) -> bool {
        self.metaness == Metaness::Dtor
    }

    pub fn is_some_ctor(&self) -> bool {
        self.metaness.is_some_ctor()
    }

    pub fn is_macro(&self) -> bool {
        self.metaness.is_macro()
    }

    pub fn is_qml_signal(&self) -> bool {
        self.metaness == Metaness::QmlSignal
    }

    pub fn is_qml_signal_handler(&self) -> bool {
        self.metaness == Metaness::QmlSignalHandler
    }

    pub fn is_qml_method(&self) -> bool {
        self.metaness == Metaness::QmlMethod
    }

    pub fn is_overload(&self) -> bool {
        self.overload_flag
    }

    pub fn has_associated_properties(&self) -> bool {
        !self.associated_properties.is_empty()
    }

    pub fn has_one_associated_property(&self) -> bool {
        self.associated_properties.len() == 1
    }

    /// Whether two functions document the same signature: identical
    /// metaness, return type, constness, attachment and parameter types.
    /// A pair like this is duplicate documentation, not a fresh overload.
    pub fn same_documented_signature(&self, other: &FunctionData) -> bool {
        self.metaness == other.metaness
            && self.return_type == other.return_type
            && self.is_const == other.is_const
            && self.is_attached == other.is_attached
            && self.parameters.match_types(&other.parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_parsing_trims_types() {
        let parameters = Parameters::from_signature("int, const char *");
        assert_eq!(parameters.count(), 2);
        assert_eq!(parameters.at(0).data_type, "int");
        assert_eq!(parameters.at(1).data_type, "const char *");
        assert!(Parameters::from_signature("").is_empty());
    }

    #[test]
    fn test_same_documented_signature() {
        let mut first = FunctionData::new(Metaness::Plain);
        first.parameters.push(Parameter::new("int", "value"));
        let mut second = first.clone();
        assert!(first.same_documented_signature(&second));

        second.is_const = true;
        assert!(!first.same_documented_signature(&second));

        second.is_const = false;
        second.parameters = Parameters::from_signature("float");
        assert!(!first.same_documented_signature(&second));
    }

    #[test]
    fn test_type_signature_joins_types() {
        let parameters = Parameters::new(vec![
            Parameter::new("int", "a"),
            Parameter::new("bool", "b"),
        ]);
        assert_eq!(parameters.type_signature(), "int, bool");
    }
}
