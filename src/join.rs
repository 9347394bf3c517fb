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
//! Resolution of fragment chains into whole strands.

use super::fragments::{FragmentArena, FragmentId, Origin};
use super::{ConversionContext, Warning};
use itertools::Itertools;
use oxnano_design::Parameters;
use oxnano_exports::Nucleotide;

/// A strand given as the list of its fragments, from 5' to 3'.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedStrand {
    pub fragments: Vec<FragmentId>,
    /// If true, the 3' end of the last fragment is connected to the 5' end of the first one.
    pub circular: bool,
}

fn is_circular(chain: &[FragmentId]) -> bool {
    chain.len() > 1 && chain.first() == chain.last()
}

/// Find two chains such that the first fragment of one is the last fragment of the other.
fn find_merge(chains: &[Vec<FragmentId>]) -> Option<(usize, usize)> {
    for (i, head) in chains.iter().enumerate() {
        for (j, tail) in chains.iter().enumerate() {
            if i != j && head.first().is_some() && head.first() == tail.last() {
                return Some((i, j));
            }
        }
    }
    None
}

/// Merge `chains` until no chain starts with the last fragment of another one.
///
/// The result does not depend on the order of `chains`: circular strands start with their
/// smallest fragment and strands are sorted by their first fragment.
pub fn resolve(chains: Vec<Vec<FragmentId>>) -> Vec<JoinedStrand> {
    let mut chains: Vec<Vec<FragmentId>> = chains.into_iter().filter(|c| !c.is_empty()).collect();
    while let Some((i, j)) = find_merge(&chains) {
        let head = chains[i].clone();
        chains = chains
            .into_iter()
            .enumerate()
            .filter(|(k, _)| *k != i)
            .map(|(k, mut chain)| {
                if k == j {
                    chain.extend_from_slice(&head[1..]);
                }
                chain
            })
            .collect();
    }

    let mut strands: Vec<JoinedStrand> = chains
        .into_iter()
        .map(|mut chain| {
            let circular = is_circular(&chain);
            if circular {
                chain.pop();
                let start = chain.iter().position_min().unwrap_or(0);
                chain.rotate_left(start);
            }
            JoinedStrand {
                fragments: chain,
                circular,
            }
        })
        .collect();
    strands.sort_by_key(|s| s.fragments.first().cloned());
    strands
}

/// A strand made of the nucleotides of its fragments, from 5' to 3'.
#[derive(Debug, Clone, Default)]
pub struct AssembledStrand {
    pub nucleotides: Vec<Nucleotide>,
    pub origins: Vec<Origin>,
    pub circular: bool,
}

impl AssembledStrand {
    pub fn len(&self) -> usize {
        self.nucleotides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nucleotides.is_empty()
    }
}

fn backbone_distance(a: &Nucleotide, b: &Nucleotide, parameters: &Parameters) -> f64 {
    (a.backbone(parameters.pos_back) - b.backbone(parameters.pos_back)).mag()
}

fn distance_is_valid(distance: f64, parameters: &Parameters) -> bool {
    distance >= parameters.min_backbone_distance && distance <= parameters.max_backbone_distance
}

/// Concatenate the fragments of `strand`.
///
/// Joints whose backbone sites are too far apart or too close are reported.
pub fn assemble(
    strand: &JoinedStrand,
    parameters: &Parameters,
    context: &mut ConversionContext,
) -> AssembledStrand {
    let (ret, warnings) = concatenate(strand, &context.arena, parameters);
    for warning in warnings {
        context.warn(warning);
    }
    ret
}

fn concatenate(
    strand: &JoinedStrand,
    arena: &FragmentArena,
    parameters: &Parameters,
) -> (AssembledStrand, Vec<Warning>) {
    let fragments: Vec<_> = strand
        .fragments
        .iter()
        .filter_map(|id| arena.get(*id))
        .filter(|f| !f.nucleotides.is_empty())
        .collect();

    let mut warnings = Vec::new();
    let joints = fragments
        .iter()
        .tuple_windows()
        .filter_map(|(a, b)| a.nucleotides.last().zip(b.nucleotides.first()));
    for (a, b) in joints {
        let distance = backbone_distance(a, b, parameters);
        if !distance_is_valid(distance, parameters) {
            warnings.push(Warning::BackboneDistance { distance });
        }
    }

    let mut ret = AssembledStrand {
        circular: strand.circular,
        ..Default::default()
    };
    for f in fragments.iter() {
        ret.nucleotides.extend_from_slice(&f.nucleotides);
        ret.origins.extend_from_slice(&f.origins);
    }
    if strand.circular {
        if let (Some(last), Some(first)) = (ret.nucleotides.last(), ret.nucleotides.first()) {
            let distance = backbone_distance(last, first, parameters);
            if !distance_is_valid(distance, parameters) {
                warnings.push(Warning::CircularEndsApart { distance });
            }
        }
    }
    (ret, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(strands: &[JoinedStrand]) -> Vec<(Vec<FragmentId>, bool)> {
        strands
            .iter()
            .map(|s| (s.fragments.clone(), s.circular))
            .collect()
    }

    #[test]
    fn linear_chain() {
        let strands = resolve(vec![vec![1, 2], vec![0, 1], vec![2, 3]]);
        assert_eq!(ids(&strands), vec![(vec![0, 1, 2, 3], false)]);
    }

    #[test]
    fn circular_chain() {
        let strands = resolve(vec![vec![4, 2], vec![2, 7], vec![7, 4]]);
        assert_eq!(ids(&strands), vec![(vec![2, 7, 4], true)]);
    }

    #[test]
    fn single_fragment_is_not_circular() {
        let strands = resolve(vec![vec![5]]);
        assert_eq!(ids(&strands), vec![(vec![5], false)]);
    }

    #[test]
    fn single_fragment_closing_on_itself() {
        let strands = resolve(vec![vec![5, 5]]);
        assert_eq!(ids(&strands), vec![(vec![5], true)]);
    }

    #[test]
    fn resolution_does_not_depend_on_order() {
        let chains = vec![
            vec![0, 1],
            vec![1, 2],
            vec![3, 4],
            vec![4, 5],
            vec![5, 3],
            vec![6],
            vec![2, 8],
        ];
        let expected = ids(&resolve(chains.clone()));
        assert_eq!(
            expected,
            vec![
                (vec![0, 1, 2, 8], false),
                (vec![3, 4, 5], true),
                (vec![6], false)
            ]
        );
        let mut reversed = chains.clone();
        reversed.reverse();
        assert_eq!(ids(&resolve(reversed)), expected);
        let mut rotated = chains;
        rotated.rotate_left(3);
        assert_eq!(ids(&resolve(rotated)), expected);
    }
}
