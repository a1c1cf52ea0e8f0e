//! Constraint identification.
//!
//! Every posted rule and every objective term is named by a
//! [`ConstraintRef`], which is how diagnostics and score analyses refer
//! to it.

/// Package used for the built-in tournament rules.
pub const TOURNAMENT_PACKAGE: &str = "tournament";

/// Reference to a constraint for identification.
///
/// # Example
///
/// ```
/// use matchforge_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("tournament", "Tier-1 round robin");
/// assert_eq!(cr.full_name(), "tournament/Tier-1 round robin");
///
/// let simple = ConstraintRef::new("", "Simple");
/// assert_eq!(simple.full_name(), "Simple");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintRef {
    /// Package/module containing the constraint.
    pub package: String,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Creates a reference in the built-in tournament package.
    pub fn tournament(name: impl Into<String>) -> Self {
        Self::new(TOURNAMENT_PACKAGE, name)
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

impl std::fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}
