/*
ENSnano, a 3d graphical application for DNA nanostructures.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
//! This module defines the lattice designs read by oxnano.
//! A design is a list of virtual helices placed on a square or honeycomb lattice, each carrying
//! a scaffold lane and a staple lane.

#[macro_use]
extern crate serde_derive;
extern crate serde;

/// Re-export ultraviolet for linear algebra
pub use ultraviolet;

pub mod cadnano;
use cadnano::CadnanoDesign;
pub mod grid;
pub use grid::Lattice;
mod helix;
pub use helix::*;
mod junction;
pub use junction::*;
mod parameters;
pub use parameters::*;

#[cfg(test)]
mod tests;

/// A lattice design. Helices are kept in the order in which they appear in the design file.
#[derive(Debug, Clone)]
pub struct Design {
    pub helices: Vec<VirtualHelix>,
}

#[derive(Debug)]
pub enum DesignError {
    Json(serde_json::Error),
    NegativeLoop {
        helix: isize,
        position: usize,
    },
    /// The `skip` or `loop` array of a helix does not have the length of its scaffold lane.
    LengthMismatch {
        helix: isize,
        scaffold: usize,
        skip: usize,
        loops: usize,
    },
    UnknownLattice(String),
}

impl From<serde_json::Error> for DesignError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for DesignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "Could not parse design: {}", e),
            Self::NegativeLoop { helix, position } => write!(
                f,
                "Negative loop on helix {} at position {}",
                helix, position
            ),
            Self::LengthMismatch {
                helix,
                scaffold,
                skip,
                loops,
            } => write!(
                f,
                "Helix {} has {} scaffold squares but {} skip and {} loop values",
                helix, scaffold, skip, loops
            ),
            Self::UnknownLattice(name) => write!(f, "Unknown lattice type {}", name),
        }
    }
}

impl std::error::Error for DesignError {}

impl Design {
    pub fn from_cadnano_str(json: &str) -> Result<Self, DesignError> {
        let cadnano = CadnanoDesign::from_json_str(json)?;
        Self::from_cadnano(&cadnano)
    }

    pub fn from_cadnano(cadnano: &CadnanoDesign) -> Result<Self, DesignError> {
        let helices = cadnano
            .vstrands
            .iter()
            .map(VirtualHelix::from_cadnano)
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Read {} virtual helices", helices.len());
        Ok(Self { helices })
    }

    /// The side of a cubic box that contains the design with some margin.
    pub fn box_side(&self, parameters: &Parameters) -> f64 {
        let span = |values: Vec<isize>| -> f64 {
            let min = values.iter().min().cloned().unwrap_or(0);
            let max = values.iter().max().cloned().unwrap_or(0);
            (max - min) as f64
        };
        let rows = self.helices.iter().map(|h| h.row).collect();
        let cols = self.helices.iter().map(|h| h.col).collect();
        let max_len = self
            .helices
            .iter()
            .map(|h| h.staple.len())
            .max()
            .unwrap_or(0);

        let dr = parameters.square_spacing * (span(rows) + 2.);
        let dc = parameters.square_spacing * (span(cols) + 2.);
        let dl = parameters.box_stack * (max_len as f64 + 2.);
        2. * dr.max(dc).max(dl) * parameters.box_factor
    }
}
