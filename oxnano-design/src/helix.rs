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
use super::cadnano::CadnanoVStrand;
use super::{DesignError, JunctionType, Square};

/// A virtual helix of a lattice design.
///
/// Positions of the helix are indexed in design order. Even helices are traversed in increasing
/// position order, odd helices in decreasing order.
#[derive(Debug, Clone)]
pub struct VirtualHelix {
    /// The identifier of the helix in the design. Its parity gives the direction of the helix.
    pub num: isize,
    pub row: isize,
    pub col: isize,
    pub scaffold: Vec<Square>,
    pub staple: Vec<Square>,
    /// `skips[i]` is true if position `i` is deleted.
    pub skips: Vec<bool>,
    /// Number of nucleotides inserted after position `i`.
    pub loops: Vec<usize>,
    pub staple_colors: Vec<(usize, u32)>,
}

impl VirtualHelix {
    pub fn from_cadnano(vstrand: &CadnanoVStrand) -> Result<Self, DesignError> {
        let scaffold_len = vstrand.scaf.len();
        if vstrand.skip.len() != scaffold_len || vstrand.loop_.len() != scaffold_len {
            return Err(DesignError::LengthMismatch {
                helix: vstrand.num,
                scaffold: scaffold_len,
                skip: vstrand.skip.len(),
                loops: vstrand.loop_.len(),
            });
        }
        let skips = vstrand.skip.iter().map(|s| s.abs() > 0).collect();
        let loops = vstrand
            .loop_
            .iter()
            .enumerate()
            .map(|(position, l)| {
                if *l < 0 {
                    Err(DesignError::NegativeLoop {
                        helix: vstrand.num,
                        position,
                    })
                } else {
                    Ok(*l as usize)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let staple_colors = vstrand
            .stap_colors
            .iter()
            .filter_map(|[position, color]| {
                if *position < 0 {
                    log::warn!(
                        "Ignoring staple color at negative position {} on helix {}",
                        position,
                        vstrand.num
                    );
                    None
                } else {
                    Some((*position as usize, (*color & 0xFF_FF_FF) as u32))
                }
            })
            .collect();
        Ok(Self {
            num: vstrand.num,
            row: vstrand.row,
            col: vstrand.col,
            scaffold: vstrand.scaf.clone(),
            staple: vstrand.stap.clone(),
            skips,
            loops,
            staple_colors,
        })
    }

    /// The number of lattice positions of the helix.
    pub fn len(&self) -> usize {
        self.scaffold.len().max(self.staple.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_even(&self) -> bool {
        self.num % 2 == 0
    }

    /// `1` if the scaffold runs towards increasing positions on this helix, `-1` otherwise.
    pub fn design_direction(&self) -> isize {
        if self.is_even() {
            1
        } else {
            -1
        }
    }

    pub fn scaffold_square(&self, position: isize) -> Square {
        Self::square(&self.scaffold, position)
    }

    pub fn staple_square(&self, position: isize) -> Square {
        Self::square(&self.staple, position)
    }

    fn square(lane: &[Square], position: isize) -> Square {
        if position < 0 {
            Square::EMPTY
        } else {
            lane.get(position as usize).cloned().unwrap_or_default()
        }
    }

    /// The junction types of the scaffold and the staple square at `position`.
    pub fn junction_types(&self, position: isize) -> (Option<JunctionType>, Option<JunctionType>) {
        (
            self.scaffold_square(position)
                .junction_type(self.num, position),
            self.staple_square(position).junction_type(self.num, position),
        )
    }

    pub fn is_skip(&self, position: usize) -> bool {
        self.skips.get(position).cloned().unwrap_or(false)
    }

    pub fn loop_at(&self, position: usize) -> usize {
        self.loops.get(position).cloned().unwrap_or(0)
    }

    /// The design color of the staple going through `position`, if one is specified.
    pub fn staple_color(&self, position: usize) -> Option<u32> {
        self.staple_colors
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, color)| *color)
    }
}
