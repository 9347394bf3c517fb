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
//! The two lattices on which virtual helices can be placed.

use super::{DesignError, Parameters, VirtualHelix};
use std::fmt;
use std::str::FromStr;
use ultraviolet::DVec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lattice {
    Square,
    Honeycomb,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::Square
    }
}

impl FromStr for Lattice {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sq" | "square" => Ok(Self::Square),
            "he" | "honeycomb" | "hexagonal" => Ok(Self::Honeycomb),
            other => Err(DesignError::UnknownLattice(other.to_string())),
        }
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square => write!(f, "square"),
            Self::Honeycomb => write!(f, "honeycomb"),
        }
    }
}

impl Lattice {
    /// Distance between the axis of two neighbouring helices.
    pub fn helix_spacing(&self, parameters: &Parameters) -> f64 {
        match self {
            Self::Square => parameters.square_spacing,
            Self::Honeycomb => parameters.honeycomb_spacing,
        }
    }

    /// The position of the axis of `helix` in the plane `z = 0`.
    pub fn helix_origin(&self, helix: &VirtualHelix, parameters: &Parameters) -> DVec3 {
        let row = helix.row as f64;
        let col = helix.col as f64;
        let d = self.helix_spacing(parameters);
        match self {
            Self::Square => DVec3::new(col * d, row * d, 0.),
            Self::Honeycomb => {
                let shift = if helix.is_even() { 0. } else { d / 2. };
                DVec3::new(col * 3f64.sqrt() * d / 2., row * 3. * d / 2. + shift, 0.)
            }
        }
    }

    /// Angle, in radians, of the rotation applied to the initial backbone direction of every
    /// helix.
    pub fn initial_perp_angle(&self) -> f64 {
        match self {
            Self::Square => 15f64.to_radians(),
            Self::Honeycomb => 160f64.to_radians(),
        }
    }
}
