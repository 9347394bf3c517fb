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

use std::fmt;

/// How bad a reported problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The conversion goes on and the result may need some relaxation.
    Warning,
    /// The conversion is aborted.
    Fatal,
}

/// A recoverable problem met during a conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The square of a lane has pointers that describe no known junction.
    UnexpectedSquare {
        helix: isize,
        position: isize,
        scaffold: bool,
    },
    /// An effective strand boundary fell outside of its helix.
    BoundaryOutOfRange { helix: isize, position: isize },
    /// A position is both skipped and looped. The skip is kept.
    SkipAndLoop { helix: isize, position: usize },
    /// A skip or a loop lies on a helix that has no non empty effective strand.
    IgnoredSkipLoop { helix: isize, position: usize },
    /// An effective strand has no end, it is closed at the last nucleotide of the helix.
    MissingEffectiveStrandEnd { helix: isize },
    /// A lane met a begin (or an end) twice without the matching square in between.
    UnpairedStrandEnd {
        helix: isize,
        position: usize,
        scaffold: bool,
    },
    /// The helix has no scaffold, its staples are ignored.
    NoScaffold { helix: isize },
    /// The backbone sites on both sides of a joint are too close or too far apart.
    BackboneDistance { distance: f64 },
    /// The two ends of a circular strand are too close or too far apart.
    CircularEndsApart { distance: f64 },
    ScaffoldSequenceTooShort {
        scaffold_length: usize,
        sequence_length: usize,
    },
    InvalidScaffoldSequence { character: char },
}

impl Warning {
    pub fn severity(&self) -> Severity {
        Severity::Warning
    }

    pub fn message(&self) -> String {
        match self {
            Self::UnexpectedSquare {
                helix,
                position,
                scaffold,
            } => format!(
                "Unexpected {} square on helix {} at position {}",
                lane_name(*scaffold),
                helix,
                position
            ),
            Self::BoundaryOutOfRange { helix, position } => format!(
                "Effective strand boundary {} is outside of helix {}",
                position, helix
            ),
            Self::SkipAndLoop { helix, position } => format!(
                "Position {} of helix {} has both a skip and a loop, the loop is ignored",
                position, helix
            ),
            Self::IgnoredSkipLoop { helix, position } => format!(
                "The skip or loop at position {} of helix {} is ignored, the helix has no effective strand",
                position, helix
            ),
            Self::MissingEffectiveStrandEnd { helix } => format!(
                "An effective strand of helix {} has no end, using the end of the helix",
                helix
            ),
            Self::UnpairedStrandEnd {
                helix,
                position,
                scaffold,
            } => format!(
                "The {} strand end at position {} of helix {} has no matching end",
                lane_name(*scaffold),
                position,
                helix
            ),
            Self::NoScaffold { helix } => format!(
                "No scaffold strand found in virtual helix {}: staple-only helices are not supported",
                helix
            ),
            Self::BackboneDistance { distance } => format!(
                "The backbone-backbone distance across a joint is {}: it will have to be relaxed with preliminary simulations",
                distance
            ),
            Self::CircularEndsApart { distance } => format!(
                "The backbone-backbone distance between the ends of a circular strand is {}: it will have to be relaxed with preliminary simulations",
                distance
            ),
            Self::ScaffoldSequenceTooShort {
                scaffold_length,
                sequence_length,
            } => format!(
                "Provided scaffold sequence is {}nt but needs to be at least {} to cover the scaffold, using a random sequence",
                sequence_length, scaffold_length
            ),
            Self::InvalidScaffoldSequence { character } => format!(
                "Invalid character {:?} in scaffold sequence, using a random sequence",
                character
            ),
        }
    }
}

fn lane_name(scaffold: bool) -> &'static str {
    if scaffold {
        "scaffold"
    } else {
        "staple"
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
