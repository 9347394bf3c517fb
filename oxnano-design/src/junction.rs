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
//! Lattice squares and the junction type they encode.

/// The content of one lattice position of a lane.
///
/// A square stores the location of the nucleotide behind it and of the nucleotide ahead of it
/// on the same strand, as `(helix, base)` pairs. A value of `-1` means that there is no such
/// neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[isize; 4]", into = "[isize; 4]")]
pub struct Square {
    pub prev_helix: isize,
    pub prev_base: isize,
    pub next_helix: isize,
    pub next_base: isize,
}

/// The role of a lattice position in the strand that goes through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JunctionType {
    /// No strand goes through the position.
    Empty,
    /// A strand enters the helix at this position, either as a 5' end or from a crossover.
    Begin,
    /// A strand leaves the helix at this position, either as a 3' end or through a crossover.
    End,
    /// The strand comes from the previous position and goes on to the next one.
    Continue,
}

impl From<[isize; 4]> for Square {
    fn from(values: [isize; 4]) -> Self {
        Self {
            prev_helix: values[0],
            prev_base: values[1],
            next_helix: values[2],
            next_base: values[3],
        }
    }
}

impl From<Square> for [isize; 4] {
    fn from(square: Square) -> Self {
        [
            square.prev_helix,
            square.prev_base,
            square.next_helix,
            square.next_base,
        ]
    }
}

impl Default for Square {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Square {
    pub const EMPTY: Self = Self {
        prev_helix: -1,
        prev_base: -1,
        next_helix: -1,
        next_base: -1,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// The `(helix, base)` location of the previous nucleotide if there is one.
    pub fn prev(&self) -> Option<(isize, isize)> {
        (self.prev_helix >= 0 && self.prev_base >= 0).then(|| (self.prev_helix, self.prev_base))
    }

    /// The `(helix, base)` location of the next nucleotide if there is one.
    pub fn next(&self) -> Option<(isize, isize)> {
        (self.next_helix >= 0 && self.next_base >= 0).then(|| (self.next_helix, self.next_base))
    }

    fn no_prev(&self) -> bool {
        self.prev_helix == -1 && self.prev_base == -1
    }

    fn no_next(&self) -> bool {
        self.next_helix == -1 && self.next_base == -1
    }

    fn is_local(helix: isize, base: isize, num: isize, position: isize) -> bool {
        helix == num && (base - position).abs() == 1
    }

    fn prev_is_local(&self, num: isize, position: isize) -> bool {
        Self::is_local(self.prev_helix, self.prev_base, num, position)
    }

    fn next_is_local(&self, num: isize, position: isize) -> bool {
        Self::is_local(self.next_helix, self.next_base, num, position)
    }

    /// Classify the square found at `position` on helix `num`.
    ///
    /// Returns `None` when the pointers of the square describe no valid junction, for example a
    /// strand that arrives through a crossover and immediately leaves through another one.
    pub fn junction_type(&self, num: isize, position: isize) -> Option<JunctionType> {
        if self.no_prev() {
            if self.no_next() {
                Some(JunctionType::Empty)
            } else if self.next_is_local(num, position) {
                Some(JunctionType::Begin)
            } else {
                None
            }
        } else if self.prev_is_local(num, position) {
            if self.next_helix == -1 || !self.next_is_local(num, position) {
                Some(JunctionType::End)
            } else {
                Some(JunctionType::Continue)
            }
        } else if self.next_is_local(num, position) {
            Some(JunctionType::Begin)
        } else {
            None
        }
    }

    /// The location this square is entered from when it is reached through a crossover.
    pub fn incoming_crossover(&self, num: isize, position: isize) -> Option<(isize, isize)> {
        self.prev()
            .filter(|(helix, base)| !Self::is_local(*helix, *base, num, position))
    }

    /// The location this square leaves to when it exits through a crossover.
    pub fn outgoing_crossover(&self, num: isize, position: isize) -> Option<(isize, isize)> {
        self.next()
            .filter(|(helix, base)| !Self::is_local(*helix, *base, num, position))
    }
}
