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
//! Geometric parmeters of the coarse grained model, in oxDNA length units.

/// Geometric parameters of the molecular model.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Parameters {
    /// Distance between two consecutive bases along the axis of a helix.
    pub rise: f64,
    /// Distance from the center of mass of a nucleotide to the helix axis.
    pub cm_center_ds: f64,
    /// Position of the backbone site along `a1`, relative to the center of mass.
    pub pos_back: f64,
    /// Distance between two neighbouring helices of a square lattice.
    pub square_spacing: f64,
    /// Distance between two neighbouring helices of a honeycomb lattice.
    pub honeycomb_spacing: f64,
    /// Length of a staple base pair used to estimate the extent of a design.
    pub box_stack: f64,
    /// Factor by which the bounding box of the design is enlarged.
    pub box_factor: f64,
    /// Backbone-backbone distances across a joint outside of
    /// `[min_backbone_distance, max_backbone_distance]` are reported.
    pub min_backbone_distance: f64,
    pub max_backbone_distance: f64,
}

impl Parameters {
    pub const DEFAULT: Parameters = Parameters {
        rise: 0.3897628551303122,
        cm_center_ds: 0.6,
        pos_back: -0.4,
        square_spacing: 2.60,
        honeycomb_spacing: 2.55,
        box_stack: 0.34,
        box_factor: 2.,
        min_backbone_distance: 0.5525,
        max_backbone_distance: 1.0018,
    };
}

impl Default for Parameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}
