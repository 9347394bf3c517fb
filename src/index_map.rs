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
//! Correspondence between the lattice squares of the design and the nucleotides of the
//! final system.

use super::fragments::{Lane, Origin};
use super::join::AssembledStrand;
use super::{ConversionContext, Warning};
use ahash::AHashMap;
use oxnano_design::{Design, VirtualHelix};
use oxnano_exports::{Base, System};

/// Color given to the scaffold nucleotides that are paired with a staple.
pub const SCAFFOLD_COLOR: u32 = 3633362;

type SquareKey = (isize, usize, usize);

fn key(origin: &Origin) -> SquareKey {
    (origin.helix, origin.position, origin.sub)
}

/// Maps the identifiers of the final system to the square they were generated for.
pub struct IndexMap {
    origins: Vec<Option<Origin>>,
    by_square: AHashMap<SquareKey, Vec<usize>>,
}

impl IndexMap {
    /// Build the map of the system obtained by reversing every strand of `strands`.
    ///
    /// Nucleotide `k` of a strand of length `n` starting at identifier `offset` ends up with
    /// identifier `offset + n - 1 - k`.
    pub fn new(strands: &[AssembledStrand]) -> Self {
        let nb_nucl = strands.iter().map(AssembledStrand::len).sum();
        let mut origins = vec![None; nb_nucl];
        let mut by_square: AHashMap<SquareKey, Vec<usize>> = AHashMap::new();
        let mut offset = 0;
        for s in strands.iter() {
            let n = s.len();
            for (k, origin) in s.origins.iter().enumerate().take(n) {
                let id = offset + n - 1 - k;
                origins[id] = Some(*origin);
                by_square.entry(key(origin)).or_default().push(id);
            }
            offset += n;
        }
        Self { origins, by_square }
    }

    pub fn origin(&self, id: usize) -> Option<Origin> {
        self.origins.get(id).cloned().flatten()
    }

    /// The identifiers of the nucleotides generated for a square.
    pub fn ids_at(&self, helix: isize, position: usize, sub: usize) -> &[usize] {
        self.by_square
            .get(&(helix, position, sub))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    fn id_on_lane(&self, square: SquareKey, lane: Lane) -> Option<usize> {
        self.by_square.get(&square).and_then(|ids| {
            ids.iter()
                .cloned()
                .find(|id| self.origin(*id).map(|o| o.lane) == Some(lane))
        })
    }

    /// Pairs of `(scaffold nucleotide, staple nucleotide)` generated for the same square.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.origins
            .iter()
            .enumerate()
            .filter_map(|(id, origin)| {
                let origin = origin.as_ref().filter(|o| o.lane == Lane::Scaffold)?;
                let partner = self.id_on_lane(key(origin), Lane::Staple)?;
                Some((id, partner))
            })
            .collect()
    }

    pub fn apply_pairs(&self, system: &mut System) {
        for (a, b) in self.pairs() {
            if let Some(n) = system.nucl_mut(a) {
                n.pair = Some(b);
            }
            if let Some(n) = system.nucl_mut(b) {
                n.pair = Some(a);
            }
        }
    }

    /// The strand owning the largest number of nucleotides generated for a square. Ties are
    /// broken in favour of the first strand.
    pub fn scaffold_strand(&self, system: &System) -> Option<usize> {
        let mut counts = vec![0usize; system.nb_strands()];
        for (id, origin) in self.origins.iter().enumerate() {
            if origin.is_some() {
                if let Some(s) = system.strand_of(id) {
                    counts[s] += 1;
                }
            }
        }
        counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .max_by(|(a_id, a), (b_id, b)| a.cmp(b).then(b_id.cmp(a_id)))
            .map(|(s, _)| s)
    }

    /// Color staples with the design colors and the scaffold where it is paired, then paint
    /// every strand with its first color.
    pub fn apply_colors(&self, system: &mut System, design: &Design) {
        let helices: AHashMap<isize, &VirtualHelix> =
            design.helices.iter().map(|h| (h.num, h)).collect();
        for (id, origin) in self.origins.iter().enumerate() {
            let origin = match origin {
                Some(o) => o,
                None => continue,
            };
            let color = match origin.lane {
                Lane::Staple => helices
                    .get(&origin.helix)
                    .and_then(|h| h.staple_color(origin.position)),
                Lane::Scaffold => self
                    .id_on_lane((origin.helix, origin.position, 0), Lane::Staple)
                    .map(|_| SCAFFOLD_COLOR),
            };
            if let (Some(color), Some(n)) = (color, system.nucl_mut(id)) {
                n.color = Some(color);
            }
        }
        for s_id in 0..system.nb_strands() {
            if let Some(nucleotides) = system.strand_nucleotides_mut(s_id) {
                if let Some(color) = nucleotides.iter().find_map(|n| n.color) {
                    for n in nucleotides.iter_mut() {
                        n.color = Some(color);
                    }
                }
            }
        }
    }

    /// Give to each nucleotide the cluster of its helix. Clusters are numbered from 1 in the
    /// order of the helices in the design.
    pub fn apply_clusters(&self, system: &mut System, design: &Design) {
        let clusters: AHashMap<isize, usize> = design
            .helices
            .iter()
            .enumerate()
            .map(|(i, h)| (h.num, i + 1))
            .collect();
        for (id, origin) in self.origins.iter().enumerate() {
            let cluster = origin.and_then(|o| clusters.get(&o.helix).cloned());
            if let (Some(cluster), Some(n)) = (cluster, system.nucl_mut(id)) {
                n.cluster = Some(cluster);
            }
        }
    }
}

fn parse_sequence(
    sequence: &str,
    scaffold_length: usize,
    context: &mut ConversionContext,
) -> Option<Vec<Base>> {
    let mut bases = Vec::with_capacity(sequence.len());
    for c in sequence.chars().filter(|c| !c.is_whitespace()) {
        match Base::from_char(c) {
            Some(b) => bases.push(b),
            None => {
                context.warn(Warning::InvalidScaffoldSequence { character: c });
                return None;
            }
        }
    }
    if bases.len() < scaffold_length {
        context.warn(Warning::ScaffoldSequenceTooShort {
            scaffold_length,
            sequence_length: bases.len(),
        });
        return None;
    }
    Some(bases)
}

/// Give a base to every nucleotide of `system`.
///
/// The scaffold receives `sequence` read from its 5' end, or a random sequence, and the
/// nucleotides paired with it receive the complementary bases. Other nucleotides get random
/// bases.
pub fn apply_sequence(
    system: &mut System,
    scaffold: Option<usize>,
    sequence: Option<&str>,
    context: &mut ConversionContext,
) {
    for n in system.nucleotides_mut() {
        n.base = Base::random();
    }
    let (offset, n) = match scaffold.and_then(|s| system.strand_offset(s).zip(system.strand(s))) {
        Some((offset, strand)) => (offset, strand.len()),
        None => return,
    };
    let bases = match sequence.and_then(|seq| parse_sequence(seq, n, context)) {
        Some(bases) => {
            log::info!("Applying custom sequence");
            bases
        }
        None => {
            log::info!("Applying random sequence");
            (0..n).map(|_| Base::random()).collect()
        }
    };
    for i in 0..n {
        let base = bases[n - 1 - i];
        let pair = match system.nucl_mut(offset + i) {
            Some(nucl) => {
                nucl.base = base;
                nucl.pair
            }
            None => continue,
        };
        if let Some(pair) = pair {
            if let Some(partner) = system.nucl_mut(pair) {
                partner.base = base.complement();
            }
        }
    }
}
