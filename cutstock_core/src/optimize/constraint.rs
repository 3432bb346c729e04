//! Provides struct for representing a constraint in an optimization problem
use std::fmt::{Display, Formatter};

/// Represents a linear constraint in an optimization problem
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Represents an equality constraint, where `terms` = `equals`
    Equality {
        /// Used to identify the constraint, and to look up its dual value
        id: String,
        /// Linear terms which are added together, see [`ConstraintTerm`] for more
        terms: Vec<ConstraintTerm>,
        /// The right hand side of the equality constraint
        equals: f64,
    },
    /// Represents an inequality constraint, `lower_bound` <= `terms` <= `upper_bound`
    ///
    /// Either bound may be infinite to leave that side open.
    Inequality {
        /// Used to identify the constraint, and to look up its dual value
        id: String,
        /// Linear terms which are added together, see [`ConstraintTerm`] for more
        terms: Vec<ConstraintTerm>,
        /// The lowest value the sum of the terms can take
        lower_bound: f64,
        /// The highest value the sum of the terms can take
        upper_bound: f64,
    },
}

impl Constraint {
    /// Create a new equality constraint
    ///
    /// # Parameters
    /// - `id`: Identifier of the constraint
    /// - `variables`: A slice of variable ids
    /// - `coefficients`: A slice of coefficients for the variables
    /// - `equals`: The right hand side of the equality
    ///
    /// # Examples
    /// ```rust
    /// use cutstock_core::optimize::constraint::Constraint;
    /// // Create a constraint representing 3*x + 2*y = 6
    /// let new_constraint = Constraint::new_equality("c", &["x", "y"], &[3.0, 2.0], 6.);
    /// assert_eq!(format!("{}", new_constraint), "3*x + 2*y = 6");
    /// ```
    pub fn new_equality(id: &str, variables: &[&str], coefficients: &[f64], equals: f64) -> Self {
        Constraint::Equality {
            id: id.to_string(),
            terms: Constraint::zip_into_terms(variables, coefficients),
            equals,
        }
    }

    /// Create a new inequality constraint
    ///
    /// # Examples
    /// ```rust
    /// use cutstock_core::optimize::constraint::Constraint;
    /// // represents the inequality 2 <= 3*x + 2*y <= 6
    /// let new_constraint = Constraint::new_inequality("c", &["x", "y"], &[3.0, 2.0], 2., 6.);
    /// assert_eq!(format!("{}", new_constraint), "2 <= 3*x + 2*y <= 6");
    /// ```
    pub fn new_inequality(
        id: &str,
        variables: &[&str],
        coefficients: &[f64],
        lower_bound: f64,
        upper_bound: f64,
    ) -> Self {
        Constraint::Inequality {
            id: id.to_string(),
            terms: Constraint::zip_into_terms(variables, coefficients),
            lower_bound,
            upper_bound,
        }
    }

    /// Create a new `terms >= lower_bound` constraint
    pub fn new_at_least(id: &str, variables: &[&str], coefficients: &[f64], lower_bound: f64) -> Self {
        Constraint::new_inequality(id, variables, coefficients, lower_bound, f64::INFINITY)
    }

    /// Create a new `terms <= upper_bound` constraint
    pub fn new_at_most(id: &str, variables: &[&str], coefficients: &[f64], upper_bound: f64) -> Self {
        Constraint::new_inequality(id, variables, coefficients, f64::NEG_INFINITY, upper_bound)
    }

    /// Get the id of the constraint
    pub fn get_id(&self) -> &str {
        match self {
            Constraint::Equality { id, .. } | Constraint::Inequality { id, .. } => id,
        }
    }

    /// Get the terms of the constraint
    pub fn get_terms(&self) -> &[ConstraintTerm] {
        match self {
            Constraint::Equality { terms, .. } | Constraint::Inequality { terms, .. } => terms,
        }
    }

    /// Check whether a left hand side value satisfies the constraint within `tolerance`
    pub fn is_satisfied_by(&self, value: f64, tolerance: f64) -> bool {
        match self {
            Constraint::Equality { equals, .. } => (value - equals).abs() <= tolerance,
            Constraint::Inequality {
                lower_bound,
                upper_bound,
                ..
            } => value >= lower_bound - tolerance && value <= upper_bound + tolerance,
        }
    }

    /// Take a slice of variable ids, and a slice of coefficients and zip
    /// them together into a vec of ConstraintTerms
    fn zip_into_terms(variables: &[&str], coefficients: &[f64]) -> Vec<ConstraintTerm> {
        variables
            .iter()
            .zip(coefficients)
            .map(|(var, coef)| ConstraintTerm {
                variable: var.to_string(),
                coefficient: *coef,
            })
            .collect()
    }

    /// Convert a slice of terms into a String representation
    fn terms_to_string(terms: &[ConstraintTerm]) -> String {
        if terms.is_empty() {
            return "0".to_string();
        }
        terms
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Equality { terms, equals, .. } => {
                write!(f, "{} = {}", Self::terms_to_string(terms), equals)
            }
            Constraint::Inequality {
                terms,
                lower_bound,
                upper_bound,
                ..
            } => match (lower_bound.is_finite(), upper_bound.is_finite()) {
                (true, true) => write!(
                    f,
                    "{} <= {} <= {}",
                    lower_bound,
                    Self::terms_to_string(terms),
                    upper_bound
                ),
                (true, false) => write!(f, "{} >= {}", Self::terms_to_string(terms), lower_bound),
                (false, true) => write!(f, "{} <= {}", Self::terms_to_string(terms), upper_bound),
                (false, false) => write!(f, "{} free", Self::terms_to_string(terms)),
            },
        }
    }
}

/// Represents a single term in a constraint, specifically
/// represents the multiplication of the `variable` by the `coefficient`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintTerm {
    /// The id of a [`Variable`](crate::optimize::variable::Variable)
    pub variable: String,
    /// The coefficient for the variable
    pub coefficient: f64,
}

impl Display for ConstraintTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}*{}", self.coefficient, self.variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_one_sided() {
        let cons = Constraint::new_at_least("cover_0", &["x_0", "x_1"], &[3., 1.], 4.);
        assert_eq!(format!("{}", cons), "3*x_0 + 1*x_1 >= 4");
        let cons = Constraint::new_at_most("length", &["z_0"], &[5.], 10.);
        assert_eq!(format!("{}", cons), "5*z_0 <= 10");
    }

    #[test]
    fn satisfaction() {
        let cons = Constraint::new_at_least("c", &["x"], &[1.], 4.);
        assert!(cons.is_satisfied_by(4.0, 1e-9));
        assert!(!cons.is_satisfied_by(3.5, 1e-9));
        let cons = Constraint::new_equality("c", &["x"], &[1.], 4.);
        assert!(!cons.is_satisfied_by(5.0, 1e-9));
        assert!(cons.is_satisfied_by(4.0, 1e-9));
    }

    #[test]
    fn empty_terms() {
        let cons = Constraint::new_equality("c", &[], &[], 1.);
        assert_eq!(cons.get_id(), "c");
        assert!(cons.get_terms().is_empty());
        assert_eq!(format!("{}", cons), "0 = 1");
    }
}
