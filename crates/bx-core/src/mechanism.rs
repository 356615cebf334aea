//! Mechanism schema: the species and reactions a simulation is defined over.
//!
//! Loading mechanism definitions from disk is a collaborator concern; these
//! types exist so the conditions layer can validate species names and derive
//! template columns, and so the driver can reject ambiguous reaction naming
//! before a run starts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A chemical species participating in the mechanism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
}

impl Species {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The kind of a reaction, which determines the rate-parameter columns it
/// contributes to a condition template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Emission,
    Photolysis,
    FirstOrderLoss,
    Surface,
    UserDefined,
}

/// A named reaction of a given kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub name: String,
    pub kind: ReactionKind,
}

impl Reaction {
    pub fn new(name: impl Into<String>, kind: ReactionKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A chemical mechanism: the full species and reaction sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mechanism {
    pub species: Vec<Species>,
    pub reactions: Vec<Reaction>,
}

impl Mechanism {
    pub fn new(species: Vec<Species>, reactions: Vec<Reaction>) -> Self {
        Self { species, reactions }
    }

    /// Names of all species, in mechanism order.
    pub fn species_names(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn has_species(&self, name: &str) -> bool {
        self.species.iter().any(|s| s.name == name)
    }

    /// First reaction name that appears more than once, if any.
    ///
    /// Duplicate names make rate-parameter-to-index mapping ambiguous, so
    /// the driver refuses to run against a mechanism that has one.
    pub fn duplicate_reaction_name(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.reactions
            .iter()
            .find(|r| !seen.insert(r.name.as_str()))
            .map(|r| r.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_lookup() {
        let mech = Mechanism::new(
            vec![Species::new("O3"), Species::new("NO2")],
            Vec::new(),
        );
        assert!(mech.has_species("O3"));
        assert!(!mech.has_species("CH4"));
        assert_eq!(mech.species_names(), vec!["O3", "NO2"]);
    }

    #[test]
    fn duplicate_reaction_detection() {
        let mech = Mechanism::new(
            Vec::new(),
            vec![
                Reaction::new("jNO2", ReactionKind::Photolysis),
                Reaction::new("wall", ReactionKind::FirstOrderLoss),
                Reaction::new("jNO2", ReactionKind::Photolysis),
            ],
        );
        assert_eq!(mech.duplicate_reaction_name(), Some("jNO2"));
    }

    #[test]
    fn no_duplicates_in_distinct_names() {
        let mech = Mechanism::new(
            Vec::new(),
            vec![
                Reaction::new("jNO2", ReactionKind::Photolysis),
                Reaction::new("jO3", ReactionKind::Photolysis),
            ],
        );
        assert_eq!(mech.duplicate_reaction_name(), None);
    }
}
