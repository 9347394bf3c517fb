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
//! Partition of the virtual helices into effective strands.
//!
//! An effective strand is a stretch of a helix whose bases can be moved together when
//! skips and loops are applied. Its boundaries are found by looking at the junctions of both
//! lanes of the helix.

use super::{ConversionContext, Warning};
use oxnano_design::{JunctionType, VirtualHelix};
use std::collections::BTreeSet;

/// The boundaries of the effective strands of a helix, as design positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveStrandNodes {
    pub begin: BTreeSet<usize>,
    pub end: BTreeSet<usize>,
}

/// The `(begin, end)` boundaries produced by a position whose lanes have the given junction
/// types. `d` is the design direction of the helix.
fn boundaries(
    scaffold: JunctionType,
    staple: JunctionType,
    i: isize,
    d: isize,
) -> (Option<isize>, Option<isize>) {
    use JunctionType::*;
    match (scaffold, staple) {
        (Empty, Begin) => (None, Some(i)),
        (Empty, End) => (Some(i), None),
        (Begin, Empty) => (Some(i), None),
        (Begin, Continue) => (Some(i), Some(i - d)),
        (Begin, Begin) => (Some(i + d), Some(i - d)),
        (Begin, End) => (Some(i), None),
        (End, Empty) => (None, Some(i)),
        (End, Continue) => (Some(i + d), Some(i)),
        (End, Begin) => (None, Some(i)),
        (End, End) => (Some(i + d), Some(i - d)),
        (Continue, Begin) => (Some(i + d), Some(i)),
        (Continue, End) => (Some(i), Some(i - d)),
        (Empty, Empty) | (Empty, Continue) | (Continue, Empty) | (Continue, Continue) => {
            (None, None)
        }
    }
}

pub fn build_nodes(helix: &VirtualHelix, context: &mut ConversionContext) -> EffectiveStrandNodes {
    let d = helix.design_direction();
    let len = helix.scaffold.len() as isize;
    let types: Vec<_> = (0..len).map(|i| helix.junction_types(i)).collect();

    // A position next to one where both lanes begin, or both lanes end, produces no boundary.
    let frozen = |p: isize| -> bool {
        if p < 0 || p >= len {
            return false;
        }
        let (scaffold, staple) = types[p as usize];
        scaffold == staple
            && matches!(scaffold, Some(JunctionType::Begin) | Some(JunctionType::End))
    };

    let mut begin = Vec::new();
    let mut end = Vec::new();
    for i in 0..len {
        let (scaffold, staple) = types[i as usize];
        if scaffold.is_none() {
            context.warn(Warning::UnexpectedSquare {
                helix: helix.num,
                position: i,
                scaffold: true,
            });
        }
        if staple.is_none() {
            context.warn(Warning::UnexpectedSquare {
                helix: helix.num,
                position: i,
                scaffold: false,
            });
        }
        if frozen(i - d) || frozen(i + d) {
            continue;
        }
        if let (Some(scaffold), Some(staple)) = (scaffold, staple) {
            let (b, e) = boundaries(scaffold, staple, i, d);
            begin.extend(b);
            end.extend(e);
        }
    }

    let helix_len = helix.len() as isize;
    let mut in_range = |positions: Vec<isize>| -> BTreeSet<usize> {
        positions
            .into_iter()
            .filter_map(|p| {
                if p < 0 || p >= helix_len {
                    context.warn(Warning::BoundaryOutOfRange {
                        helix: helix.num,
                        position: p,
                    });
                    None
                } else {
                    Some(p as usize)
                }
            })
            .collect()
    };
    let begin = in_range(begin);
    let end = in_range(end);
    log::debug!(
        "helix {}: effective strands begin at {:?} and end at {:?}",
        helix.num,
        begin,
        end
    );
    EffectiveStrandNodes { begin, end }
}
