//! Module providing representation of optimization problem variables
use std::fmt::{Display, Formatter};

use derive_builder::Builder;

/// A decision variable of an optimization problem
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(setter(into))]
pub struct Variable {
    /// Used to identify the variable within a [`Problem`](crate::optimize::problem::Problem)
    pub id: String,
    /// Optional human-readable name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Kind of the variable, see [`VariableType`]
    #[builder(default = "VariableType::Continuous")]
    pub variable_type: VariableType,
    /// Lowest value the variable can take
    #[builder(default = "0.0")]
    pub lower_bound: f64,
    /// Highest value the variable can take, `f64::INFINITY` for unbounded
    #[builder(default = "f64::INFINITY")]
    pub upper_bound: f64,
    /// Position of the variable in the problem, assigned when added
    #[builder(default = "0")]
    pub(crate) index: usize,
}

impl Variable {
    /// Position of the variable in the problem it was added to
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the variable must take integral values
    pub fn is_integral(&self) -> bool {
        matches!(
            self.variable_type,
            VariableType::Integer | VariableType::Binary
        )
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}:{}", name, self.variable_type),
            None => write!(f, "{}:{}", self.id, self.variable_type),
        }
    }
}

/// Represents the type of variable in an optimization problem
///
/// # Notes:
/// Not all variable types are supported by all solvers, Clarabel only handles
/// Continuous variables, while microlp and HiGHS support all types
#[derive(Debug, PartialEq, Clone, Copy, Hash, Eq)]
pub enum VariableType {
    /// Continuous variable
    Continuous,
    /// Integer variable
    Integer,
    /// Binary Variable
    Binary,
}

impl Display for VariableType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableType::Continuous => write!(f, "CONTINUOUS"),
            VariableType::Integer => write!(f, "INTEGER"),
            VariableType::Binary => write!(f, "BINARY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let var = VariableBuilder::default().id("x").build().unwrap();
        assert_eq!(var.variable_type, VariableType::Continuous);
        assert_eq!(var.lower_bound, 0.0);
        assert!(var.upper_bound.is_infinite());
        assert!(!var.is_integral());
        assert_eq!(format!("{}", var), "x:CONTINUOUS");
    }

    #[test]
    fn named_integer_variable() {
        let var = VariableBuilder::default()
            .id("x_0")
            .name(Some("pattern 0".to_string()))
            .variable_type(VariableType::Integer)
            .build()
            .unwrap();
        assert!(var.is_integral());
        assert_eq!(format!("{}", var), "pattern 0:INTEGER");
    }
}
