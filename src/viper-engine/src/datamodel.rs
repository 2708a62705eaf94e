// Copyright 2026 The Viper Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Plain-data representation of a parsed kinetic model.
//!
//! Parsing SBML or Antimony is someone else's job; whatever does it
//! hands us these structures.  They carry exactly what the static
//! checks need: ids, initial values, reaction wiring, and the symbols
//! each rate expression references.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    #[serde(default)]
    pub initial_amount: Option<f64>,
    #[serde(default)]
    pub initial_concentration: Option<f64>,
}

impl Species {
    /// A species counts as initialized if either its amount or its
    /// concentration was set in the model.
    pub fn is_initialized(&self) -> bool {
        self.initial_amount.is_some() || self.initial_concentration.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    #[serde(default)]
    pub value: Option<f64>,
}

impl Parameter {
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

/// The rate expression of a reaction, flattened to the symbols it
/// references (species and parameters alike).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KineticLaw {
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub symbols: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: String,
    #[serde(default)]
    pub reactants: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub kinetic_law: KineticLaw,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: Vec<Species>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Model {
    pub fn get_species(&self, id: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.id == id)
    }

    pub fn get_parameter(&self, id: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.id == id)
    }
}
