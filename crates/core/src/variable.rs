use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Value type of a host variable.
///
/// Parsing is lenient: any spelling the host sends that is not one of the
/// known types falls back to [`VarType::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VarType {
    Number,
    #[default]
    String,
    Integer,
    MultiDimensional,
}

impl VarType {
    pub fn parse(s: &str) -> Self {
        match s {
            "Number" => VarType::Number,
            "String" => VarType::String,
            "Integer" => VarType::Integer,
            "Multi-dimensional" => VarType::MultiDimensional,
            _ => VarType::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VarType::Number => "Number",
            VarType::String => "String",
            VarType::Integer => "Integer",
            VarType::MultiDimensional => "Multi-dimensional",
        }
    }
}

impl From<String> for VarType {
    fn from(s: String) -> Self {
        VarType::parse(&s)
    }
}

impl From<VarType> for String {
    fn from(t: VarType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A variable supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub var_type: VarType,
}

impl Variable {
    pub fn new(id: impl Into<String>, name: impl Into<String>, var_type: VarType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            var_type,
        }
    }
}

/// Read-only, ordered variable catalog indexed by id.
///
/// Host order is preserved for autocomplete listing. When the host sends
/// duplicate ids, lookups resolve to the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct VariableCatalog {
    variables: Vec<Variable>,
    by_id: HashMap<String, usize>,
}

impl VariableCatalog {
    pub fn new(variables: Vec<Variable>) -> Self {
        let mut by_id = HashMap::with_capacity(variables.len());
        for (idx, var) in variables.iter().enumerate() {
            by_id.entry(var.id.clone()).or_insert(idx);
        }
        Self { variables, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Variable> {
        self.by_id.get(id).map(|&idx| &self.variables[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl FromIterator<Variable> for VariableCatalog {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
