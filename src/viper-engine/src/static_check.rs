// Copyright 2026 The Viper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Structural well-formedness checks over a parsed kinetic model.
//!
//! Each check is independent and returns the ids that failed it; an
//! empty list means the check passed.  The reachability check is the
//! only one with real machinery: it builds a directed graph over
//! reactant/product groups and walks it from the initialized entry
//! points.

use std::collections::{BTreeSet, HashMap, HashSet};

use smallvec::SmallVec;

use crate::datamodel::Model;

/// The outcome of every static check, bundled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticReport {
    pub uninitialized_parameters: Vec<String>,
    pub zero_parameters: Vec<String>,
    pub uninitialized_species: Vec<String>,
    pub kinetics_mismatches: Vec<String>,
    pub unreachable_species: Vec<String>,
}

impl StaticReport {
    pub fn is_clean(&self) -> bool {
        self.uninitialized_parameters.is_empty()
            && self.zero_parameters.is_empty()
            && self.uninitialized_species.is_empty()
            && self.kinetics_mismatches.is_empty()
            && self.unreachable_species.is_empty()
    }
}

pub struct StaticChecker<'a> {
    model: &'a Model,
}

impl<'a> StaticChecker<'a> {
    pub fn new(model: &'a Model) -> StaticChecker<'a> {
        StaticChecker { model }
    }

    pub fn run_all(&self) -> StaticReport {
        StaticReport {
            uninitialized_parameters: self.check_parameter_init(),
            zero_parameters: self.check_parameter_nonzero(),
            uninitialized_species: self.check_species_init(),
            kinetics_mismatches: self.check_reactants_in_kinetics(),
            unreachable_species: self.check_species_reachable(),
        }
    }

    /// Parameters with no value set in the model.
    pub fn check_parameter_init(&self) -> Vec<String> {
        self.model
            .parameters
            .iter()
            .filter(|p| !p.is_set())
            .map(|p| p.id.clone())
            .collect()
    }

    /// Parameters set to exactly zero.  Usually a placeholder the
    /// modeler forgot to fill in.
    pub fn check_parameter_nonzero(&self) -> Vec<String> {
        self.model
            .parameters
            .iter()
            .filter(|p| p.value == Some(0.0))
            .map(|p| p.id.clone())
            .collect()
    }

    /// Species referenced in some kinetic law but never initialized.
    /// Symbols that are not species (parameters, compartments) are the
    /// business of other checks and skipped here.
    pub fn check_species_init(&self) -> Vec<String> {
        let mut missing = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for reaction in &self.model.reactions {
            for symbol in &reaction.kinetic_law.symbols {
                let species = match self.model.get_species(symbol) {
                    Some(species) => species,
                    None => continue,
                };
                if !species.is_initialized() && seen.insert(&species.id) {
                    missing.push(species.id.clone());
                }
            }
        }
        missing
    }

    /// Reactions whose reactant set and kinetic-law species set differ:
    /// a reactant the rate law never mentions, or a species in the rate
    /// law that is not a reactant.
    pub fn check_reactants_in_kinetics(&self) -> Vec<String> {
        let mut mismatched = Vec::new();
        for reaction in &self.model.reactions {
            let law_species: BTreeSet<&str> = reaction
                .kinetic_law
                .symbols
                .iter()
                .filter(|s| self.model.get_species(s).is_some())
                .map(String::as_str)
                .collect();
            let reactants: BTreeSet<&str> =
                reaction.reactants.iter().map(String::as_str).collect();
            if law_species != reactants {
                mismatched.push(reaction.id.clone());
            }
        }
        mismatched
    }

    /// Species that cannot be produced by any chain of reactions
    /// starting from initialized material.
    ///
    /// Nodes are whole reactant or product groups (joined with `-`), one
    /// edge per reaction from its reactant group to its product group.
    /// A node is an entry point when every species in its group is
    /// initialized.  Anything a forward walk from the entry points never
    /// reaches is reported, by constituent species, sorted.
    pub fn check_species_reachable(&self) -> Vec<String> {
        let mut members: HashMap<String, SmallVec<[&str; 4]>> = HashMap::new();
        let mut edges: HashMap<String, Vec<String>> = HashMap::new();

        for reaction in &self.model.reactions {
            if !reaction.reactants.is_empty() {
                members
                    .entry(group_key(&reaction.reactants))
                    .or_insert_with(|| reaction.reactants.iter().map(String::as_str).collect());
            }
            if !reaction.products.is_empty() {
                members
                    .entry(group_key(&reaction.products))
                    .or_insert_with(|| reaction.products.iter().map(String::as_str).collect());
            }
            if !reaction.reactants.is_empty() && !reaction.products.is_empty() {
                edges
                    .entry(group_key(&reaction.reactants))
                    .or_default()
                    .push(group_key(&reaction.products));
            }
        }

        // entry points: every species in the group is initialized
        let mut stack: Vec<&str> = members
            .iter()
            .filter(|(_, group)| {
                group.iter().all(|id| {
                    self.model
                        .get_species(id)
                        .map(|s| s.is_initialized())
                        .unwrap_or(false)
                })
            })
            .map(|(key, _)| key.as_str())
            .collect();
        let mut reachable: HashSet<&str> = stack.iter().copied().collect();

        while let Some(node) = stack.pop() {
            if let Some(successors) = edges.get(node) {
                for next in successors {
                    if reachable.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }

        let mut unreachable: BTreeSet<&str> = BTreeSet::new();
        for (key, group) in &members {
            if !reachable.contains(key.as_str()) {
                unreachable.extend(group.iter().copied());
            }
        }
        unreachable.into_iter().map(str::to_string).collect()
    }
}

fn group_key(species: &[String]) -> String {
    species.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::{KineticLaw, Parameter, Reaction, Species};

    fn species(id: &str, amount: Option<f64>) -> Species {
        Species {
            id: id.to_string(),
            initial_amount: amount,
            initial_concentration: None,
        }
    }

    fn parameter(id: &str, value: Option<f64>) -> Parameter {
        Parameter {
            id: id.to_string(),
            value,
        }
    }

    fn reaction(id: &str, reactants: &[&str], products: &[&str], symbols: &[&str]) -> Reaction {
        Reaction {
            id: id.to_string(),
            reactants: reactants.iter().map(|s| s.to_string()).collect(),
            products: products.iter().map(|s| s.to_string()).collect(),
            kinetic_law: KineticLaw {
                formula: String::new(),
                symbols: symbols.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn parameter_checks() {
        let model = Model {
            name: "m".to_string(),
            species: vec![],
            parameters: vec![
                parameter("k1", Some(1.0)),
                parameter("k2", None),
                parameter("k3", Some(0.0)),
            ],
            reactions: vec![],
        };
        let checker = StaticChecker::new(&model);
        assert_eq!(checker.check_parameter_init(), vec!["k2"]);
        assert_eq!(checker.check_parameter_nonzero(), vec!["k3"]);
    }

    #[test]
    fn species_init_skips_parameters_and_dedups() {
        let model = Model {
            name: "m".to_string(),
            species: vec![species("S1", None), species("S2", Some(1.0))],
            parameters: vec![parameter("k1", Some(1.0))],
            reactions: vec![
                reaction("J1", &["S1"], &["S2"], &["k1", "S1"]),
                reaction("J2", &["S1"], &[], &["k1", "S1"]),
            ],
        };
        let checker = StaticChecker::new(&model);
        // S1 appears in two laws but is reported once; k1 is not a species
        assert_eq!(checker.check_species_init(), vec!["S1"]);
    }

    #[test]
    fn reactants_in_kinetics_both_directions() {
        let model = Model {
            name: "m".to_string(),
            species: vec![
                species("S1", Some(1.0)),
                species("S2", Some(1.0)),
                species("S3", Some(1.0)),
            ],
            parameters: vec![parameter("k1", Some(1.0))],
            reactions: vec![
                // fine: law references exactly the reactant set
                reaction("J1", &["S1"], &["S2"], &["k1", "S1"]),
                // law references a non-reactant species
                reaction("J2", &["S1"], &["S2"], &["k1", "S1", "S3"]),
                // reactant missing from the law
                reaction("J3", &["S1", "S2"], &["S3"], &["k1", "S1"]),
            ],
        };
        let checker = StaticChecker::new(&model);
        assert_eq!(checker.check_reactants_in_kinetics(), vec!["J2", "J3"]);
    }

    #[test]
    fn reachability_follows_the_chain() {
        // A -> B -> C, with A initialized: everything reachable
        let model = Model {
            name: "m".to_string(),
            species: vec![
                species("A", Some(1.0)),
                species("B", None),
                species("C", None),
            ],
            parameters: vec![],
            reactions: vec![
                reaction("J1", &["A"], &["B"], &[]),
                reaction("J2", &["B"], &["C"], &[]),
            ],
        };
        let checker = StaticChecker::new(&model);
        assert!(checker.check_species_reachable().is_empty());
    }

    #[test]
    fn reachability_reports_stranded_chain() {
        // D -> E with D uninitialized and nothing feeding D
        let model = Model {
            name: "m".to_string(),
            species: vec![
                species("A", Some(1.0)),
                species("B", None),
                species("D", None),
                species("E", None),
            ],
            parameters: vec![],
            reactions: vec![
                reaction("J1", &["A"], &["B"], &[]),
                reaction("J2", &["D"], &["E"], &[]),
            ],
        };
        let checker = StaticChecker::new(&model);
        assert_eq!(checker.check_species_reachable(), vec!["D", "E"]);
    }

    #[test]
    fn reachability_edges_are_directed() {
        // B -> A with only A initialized: the B group has no inbound
        // path, even though an undirected walk would reach it
        let model = Model {
            name: "m".to_string(),
            species: vec![species("A", Some(1.0)), species("B", None)],
            parameters: vec![],
            reactions: vec![reaction("J1", &["B"], &["A"], &[])],
        };
        let checker = StaticChecker::new(&model);
        assert_eq!(checker.check_species_reachable(), vec!["B"]);
    }

    #[test]
    fn reachability_groups_multiple_reactants() {
        // A + B -> C: the "A-B" group is the entry only if both are set
        let make = |b_amount: Option<f64>| Model {
            name: "m".to_string(),
            species: vec![
                species("A", Some(1.0)),
                species("B", b_amount),
                species("C", None),
            ],
            parameters: vec![],
            reactions: vec![reaction("J1", &["A", "B"], &["C"], &[])],
        };

        let model = make(Some(2.0));
        assert!(StaticChecker::new(&model).check_species_reachable().is_empty());

        let model = make(None);
        assert_eq!(
            StaticChecker::new(&model).check_species_reachable(),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn isolated_initialized_species_is_not_reported() {
        // Z appears in no reaction at all; it produces no graph node
        let model = Model {
            name: "m".to_string(),
            species: vec![species("Z", Some(5.0))],
            parameters: vec![],
            reactions: vec![],
        };
        let checker = StaticChecker::new(&model);
        assert!(checker.check_species_reachable().is_empty());
    }

    #[test]
    fn reaction_with_no_products_still_adds_reactant_node() {
        // degradation: A -> (nothing); uninitialized A is unreachable
        let model = Model {
            name: "m".to_string(),
            species: vec![species("A", None)],
            parameters: vec![],
            reactions: vec![reaction("J1", &["A"], &[], &[])],
        };
        let checker = StaticChecker::new(&model);
        assert_eq!(checker.check_species_reachable(), vec!["A"]);
    }

    #[test]
    fn run_all_bundles_everything() {
        let model = Model {
            name: "m".to_string(),
            species: vec![species("A", Some(1.0)), species("B", None)],
            parameters: vec![parameter("k1", None)],
            reactions: vec![reaction("J1", &["A"], &["B"], &["A"])],
        };
        let report = StaticChecker::new(&model).run_all();
        assert!(!report.is_clean());
        assert_eq!(report.uninitialized_parameters, vec!["k1"]);
        assert!(report.zero_parameters.is_empty());
        assert!(report.unreachable_species.is_empty());

        let clean = Model::default();
        assert!(StaticChecker::new(&clean).run_all().is_clean());
    }
}
