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
//! Pieces of strands cut from a single helix, and the crossovers that connect them.

use super::skip_loop::AdjustedHelix;
use super::{ConversionContext, ConversionError, Warning};
use ahash::AHashMap;
use oxnano_design::{JunctionType, VirtualHelix};
use oxnano_exports::Nucleotide;

pub type FragmentId = usize;

/// A `(helix, position)` location of the design.
pub type Location = (isize, isize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Scaffold,
    Staple,
}

/// The lattice square a nucleotide was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Origin {
    pub helix: isize,
    pub position: usize,
    /// 0 for the nucleotide of the position itself, `i` for the `i`-th nucleotide of a loop.
    pub sub: usize,
    pub lane: Lane,
}

/// A stretch of strand lying on one helix, from its 5' end to its 3' end.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub id: FragmentId,
    pub lane: Lane,
    pub five_prime: Location,
    pub three_prime: Location,
    /// The location of the nucleotide preceding the 5' end, if it is reached by a crossover.
    pub incoming: Option<Location>,
    /// The location of the nucleotide following the 3' end, if it is reached by a crossover.
    pub outgoing: Option<Location>,
    pub nucleotides: Vec<Nucleotide>,
    pub origins: Vec<Origin>,
}

impl Fragment {
    pub fn is_isolated(&self) -> bool {
        self.incoming.is_none() && self.outgoing.is_none()
    }
}

/// Owner of all the fragments created during a conversion. Fragment identifiers are
/// sequential, in creation order.
#[derive(Debug, Default)]
pub struct FragmentArena {
    fragments: Vec<Fragment>,
}

impl FragmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> FragmentId {
        self.fragments.len()
    }

    pub fn add(&mut self, fragment: Fragment) -> FragmentId {
        let id = self.next_id();
        self.fragments.push(Fragment { id, ..fragment });
        id
    }

    pub fn get(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.get(id)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Cut the fragments of `lane` from `adjusted` and store them in the arena of `context`.
///
/// The lane is read in increasing position order. A fragment is emitted as soon as both its
/// 5' square (a begin) and its 3' square (an end) have been met, whatever the direction of the
/// helix.
pub fn scan_lane(
    helix: &VirtualHelix,
    lane: Lane,
    adjusted: &AdjustedHelix,
    context: &mut ConversionContext,
) -> Result<Vec<FragmentId>, ConversionError> {
    let squares = match lane {
        Lane::Scaffold => &helix.scaffold,
        Lane::Staple => &helix.staple,
    };
    let is_scaffold = lane == Lane::Scaffold;
    let num = helix.num;
    let mut ids = Vec::new();
    let mut five_prime: Option<usize> = None;
    let mut three_prime: Option<usize> = None;

    for (i, square) in squares.iter().enumerate() {
        let position = i as isize;
        match square.junction_type(num, position) {
            Some(JunctionType::Begin) => {
                if let Some(previous) = five_prime.replace(i) {
                    context.warn(Warning::UnpairedStrandEnd {
                        helix: num,
                        position: previous,
                        scaffold: is_scaffold,
                    });
                }
            }
            Some(JunctionType::End) => {
                if let Some(previous) = three_prime.replace(i) {
                    context.warn(Warning::UnpairedStrandEnd {
                        helix: num,
                        position: previous,
                        scaffold: is_scaffold,
                    });
                }
            }
            _ => (),
        }
        if let (Some(begin), Some(end)) = (five_prime, three_prime) {
            let (nucleotides, origins) = adjusted.slice(lane, begin, end)?;
            let fragment = Fragment {
                id: context.arena.next_id(),
                lane,
                five_prime: (num, begin as isize),
                three_prime: (num, end as isize),
                incoming: squares[begin].incoming_crossover(num, begin as isize),
                outgoing: squares[end].outgoing_crossover(num, end as isize),
                nucleotides,
                origins,
            };
            ids.push(context.arena.add(fragment));
            five_prime = None;
            three_prime = None;
        }
    }
    for position in five_prime.into_iter().chain(three_prime) {
        context.warn(Warning::UnpairedStrandEnd {
            helix: num,
            position,
            scaffold: is_scaffold,
        });
    }
    Ok(ids)
}

/// The crossovers between the fragments `ids` of one lane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinLists {
    /// Fragments with no crossover at either end, in identifier order.
    pub isolated: Vec<FragmentId>,
    /// One chain per crossover. A chain `[a, b]` means that the 3' end of `a` is connected to
    /// the 5' end of `b`. Crossovers whose other end was not found give a single fragment
    /// chain.
    pub chains: Vec<Vec<FragmentId>>,
}

pub fn join_lists(arena: &FragmentArena, ids: &[FragmentId]) -> JoinLists {
    let fragments: Vec<&Fragment> = ids.iter().filter_map(|id| arena.get(*id)).collect();
    let by_five_prime: AHashMap<Location, &Fragment> =
        fragments.iter().map(|f| (f.five_prime, *f)).collect();
    let by_three_prime: AHashMap<Location, &Fragment> =
        fragments.iter().map(|f| (f.three_prime, *f)).collect();

    let mut ret = JoinLists::default();
    for f in fragments.iter() {
        if f.is_isolated() {
            ret.isolated.push(f.id);
        }
        if let Some(target) = f.outgoing {
            match by_five_prime.get(&target) {
                Some(g) if g.incoming == Some(f.three_prime) => ret.chains.push(vec![f.id, g.id]),
                _ => ret.chains.push(vec![f.id]),
            }
        }
        if let Some(source) = f.incoming {
            let matched = by_three_prime
                .get(&source)
                .map(|g| g.outgoing == Some(f.five_prime))
                .unwrap_or(false);
            if !matched {
                ret.chains.push(vec![f.id]);
            }
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxnano_design::ultraviolet::DVec3;

    fn fragment(
        lane: Lane,
        five_prime: Location,
        three_prime: Location,
        incoming: Option<Location>,
        outgoing: Option<Location>,
    ) -> Fragment {
        Fragment {
            id: 0,
            lane,
            five_prime,
            three_prime,
            incoming,
            outgoing,
            nucleotides: vec![Nucleotide::new(
                DVec3::zero(),
                DVec3::unit_x(),
                DVec3::unit_z(),
            )],
            origins: Vec::new(),
        }
    }

    #[test]
    fn arena_ids_are_sequential() {
        let mut arena = FragmentArena::new();
        let a = arena.add(fragment(Lane::Scaffold, (0, 0), (0, 3), None, None));
        let b = arena.add(fragment(Lane::Scaffold, (1, 3), (1, 0), None, None));
        assert_eq!((a, b), (0, 1));
        assert_eq!(arena.get(1).map(|f| f.id), Some(1));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn crossovers_give_chains() {
        let mut arena = FragmentArena::new();
        // 0 -> 1 through a crossover between (0, 3) and (1, 3)
        let a = arena.add(fragment(
            Lane::Scaffold,
            (0, 0),
            (0, 3),
            None,
            Some((1, 3)),
        ));
        let b = arena.add(fragment(
            Lane::Scaffold,
            (1, 3),
            (1, 0),
            Some((0, 3)),
            None,
        ));
        // lonely fragment
        let c = arena.add(fragment(Lane::Scaffold, (2, 0), (2, 3), None, None));
        // dangling crossover towards a helix without fragments
        let d = arena.add(fragment(
            Lane::Scaffold,
            (3, 0),
            (3, 3),
            Some((7, 0)),
            None,
        ));
        let lists = join_lists(&arena, &[a, b, c, d]);
        assert_eq!(lists.isolated, vec![c]);
        assert_eq!(lists.chains, vec![vec![a, b], vec![d]]);
    }
}
