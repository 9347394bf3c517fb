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
//! Application of the skips and loops of a helix to its ideal geometry.
//!
//! The twist of every effective strand is redistributed over the bases that remain after
//! its skips and loops are applied, and the helix is generated again with the new number of
//! bases. Fragments of strands are then cut from the regenerated helix.

use super::fragments::{Lane, Origin};
use super::geometry::{helix_frame, DoubleStrand, LengthChange, StrandGenerator};
use super::segmentation::EffectiveStrandNodes;
use super::{ConversionContext, ConversionError, Warning};
use oxnano_design::{Lattice, Parameters, VirtualHelix};
use oxnano_exports::Nucleotide;
use std::iter::repeat;
use std::ops::Range;

/// An effective strand in generation indices, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

/// Maps design positions of a helix to generation indices and back.
#[derive(Debug, Clone, Copy)]
struct GenerationOrder {
    len: usize,
    even: bool,
}

impl GenerationOrder {
    fn new(helix: &VirtualHelix) -> Self {
        Self {
            len: helix.len(),
            even: helix.is_even(),
        }
    }

    /// The design position of generation index `g`. The map is its own inverse.
    fn position(&self, g: usize) -> usize {
        if self.even {
            g
        } else {
            self.len - 1 - g
        }
    }
}

/// Pair the boundaries of the effective strands of `helix`, in generation order.
pub fn effective_spans(
    helix: &VirtualHelix,
    nodes: &EffectiveStrandNodes,
    context: &mut ConversionContext,
) -> Result<Vec<Span>, ConversionError> {
    let order = GenerationOrder::new(helix);
    let mut begins: Vec<usize> = nodes.begin.iter().map(|x| order.position(*x)).collect();
    let mut ends: Vec<usize> = nodes.end.iter().map(|x| order.position(*x)).collect();
    begins.sort_unstable();
    ends.sort_unstable();

    if begins.len() == ends.len() + 1 {
        context.warn(Warning::MissingEffectiveStrandEnd { helix: helix.num });
        ends.push(order.len.saturating_sub(1));
    } else if begins.len() != ends.len() {
        return Err(ConversionError::UnbalancedEffectiveStrands {
            helix: helix.num,
            begins: begins.len(),
            ends: ends.len(),
        });
    }

    let mut spans: Vec<Span> = Vec::with_capacity(begins.len());
    for (begin, end) in begins.into_iter().zip(ends.into_iter()) {
        let begin = spans.last().map(|s| s.end.max(begin)).unwrap_or(begin);
        spans.push(Span {
            begin,
            end: end.max(begin),
        });
    }
    Ok(spans)
}

fn distance_to_span(span: &Span, g: usize) -> usize {
    if g < span.begin {
        span.begin - g
    } else if g > span.end {
        g - span.end
    } else {
        0
    }
}

/// Stretch the non empty spans until each of the generation indices `modified` lies in one
/// of them.
///
/// An index outside of every non empty span is given to the closest one, the first one on
/// ties. Zero-length spans that end up inside a stretched span are removed. If the helix has
/// no non empty span, the indices stay uncovered.
pub fn cover_modified_positions(mut spans: Vec<Span>, modified: &[usize]) -> Vec<Span> {
    for &g in modified {
        let closest = spans
            .iter_mut()
            .filter(|s| s.end > s.begin)
            .min_by_key(|s| distance_to_span(s, g));
        if let Some(span) = closest {
            span.begin = span.begin.min(g);
            span.end = span.end.max(g);
        }
    }
    let stretched: Vec<Span> = spans.iter().filter(|s| s.end > s.begin).cloned().collect();
    spans.retain(|s| {
        s.end > s.begin
            || !stretched
                .iter()
                .any(|o| o.begin <= s.begin && s.end <= o.end)
    });
    spans
}

/// The effect of the skips and loops of one span.
#[derive(Debug, Clone, Copy)]
struct SpanChange {
    span: Span,
    change: isize,
    mean_twist: f64,
}

impl SpanChange {
    fn nb_steps(&self) -> usize {
        ((self.span.end - self.span.begin) as isize + self.change).max(0) as usize
    }
}

/// A helix regenerated with its skips and loops.
#[derive(Debug, Clone)]
pub struct AdjustedHelix {
    pub num: isize,
    /// Number of lattice positions of the helix.
    pub len: usize,
    pub strands: DoubleStrand,
    /// `(design position, loop index)` of each generated base pair, in generation order.
    pub slots: Vec<(usize, usize)>,
    /// The twists used for the generation.
    pub twists: Vec<f64>,
}

pub struct SkipLoopAdjuster<'a> {
    helix: &'a VirtualHelix,
    lattice: Lattice,
    parameters: &'a Parameters,
}

impl<'a> SkipLoopAdjuster<'a> {
    pub fn new(helix: &'a VirtualHelix, lattice: Lattice, parameters: &'a Parameters) -> Self {
        Self {
            helix,
            lattice,
            parameters,
        }
    }

    /// Skips and loops of the helix, a position that has both keeps only its skip.
    fn skips_and_loops(&self, context: &mut ConversionContext) -> (Vec<bool>, Vec<usize>) {
        let len = self.helix.len();
        let skips: Vec<bool> = (0..len).map(|x| self.helix.is_skip(x)).collect();
        let mut loops: Vec<usize> = (0..len).map(|x| self.helix.loop_at(x)).collect();
        for x in 0..len {
            if skips[x] && loops[x] > 0 {
                context.warn(Warning::SkipAndLoop {
                    helix: self.helix.num,
                    position: x,
                });
                loops[x] = 0;
            }
        }
        (skips, loops)
    }

    pub fn adjust(
        &self,
        nodes: &EffectiveStrandNodes,
        context: &mut ConversionContext,
    ) -> Result<AdjustedHelix, ConversionError> {
        let helix = self.helix;
        let order = GenerationOrder::new(helix);
        let len = order.len;
        let (frame, twists) = helix_frame(helix, self.lattice, self.parameters);
        let (skips, loops) = self.skips_and_loops(context);
        let modified: Vec<usize> = (0..len)
            .filter(|g| {
                let x = order.position(*g);
                skips[x] || loops[x] > 0
            })
            .collect();
        let spans = cover_modified_positions(effective_spans(helix, nodes, context)?, &modified);

        let helix_mean = if twists.is_empty() {
            0.
        } else {
            twists.iter().sum::<f64>() / twists.len() as f64
        };

        let mut applied = vec![false; len];
        let mut changes = Vec::with_capacity(spans.len());
        for span in spans {
            if span.begin == span.end {
                changes.push(SpanChange {
                    span,
                    change: 0,
                    mean_twist: helix_mean,
                });
                continue;
            }
            let mut change = 0isize;
            for g in span.begin..=span.end {
                let x = order.position(g);
                if !applied[x] {
                    applied[x] = true;
                    if skips[x] {
                        change -= 1;
                    }
                    change += loops[x] as isize;
                }
            }
            let nb_steps = (span.end - span.begin) as isize + change;
            let mean_twist = if nb_steps > 0 {
                twists[span.begin..span.end].iter().sum::<f64>() / nb_steps as f64
            } else {
                helix_mean
            };
            changes.push(SpanChange {
                span,
                change,
                mean_twist,
            });
        }

        for x in 0..len {
            if !applied[x] && (skips[x] || loops[x] > 0) {
                context.warn(Warning::IgnoredSkipLoop {
                    helix: helix.num,
                    position: x,
                });
            }
        }

        let new_twists = rebuild_twists(&twists, &changes);
        let length_changes = resized_regions(&changes);

        let multiplicity = |x: usize| -> usize {
            if !applied[x] {
                1
            } else if skips[x] {
                0
            } else {
                1 + loops[x]
            }
        };
        let slots: Vec<(usize, usize)> = (0..len)
            .map(|g| order.position(g))
            .flat_map(|x| (0..multiplicity(x)).map(move |sub| (x, sub)))
            .collect();

        let generator = StrandGenerator::new(self.parameters);
        let strands = generator.generate(slots.len(), &frame, &new_twists, &length_changes)?;
        log::debug!(
            "helix {}: {} positions, {} base pairs generated",
            helix.num,
            len,
            slots.len()
        );
        Ok(AdjustedHelix {
            num: helix.num,
            len,
            strands,
            slots,
            twists: new_twists,
        })
    }
}

/// Build the twists of the regenerated helix.
///
/// Inside each span the twists are replaced by the mean twist of the span, repeated once per
/// step of the resized span.
fn rebuild_twists(twists: &[f64], changes: &[SpanChange]) -> Vec<f64> {
    let mut ret = Vec::with_capacity(twists.len());
    let mut cursor = 0;
    for c in changes.iter().filter(|c| c.span.end > c.span.begin) {
        ret.extend_from_slice(&twists[cursor..c.span.begin]);
        ret.extend(repeat(c.mean_twist).take(c.nb_steps()));
        cursor = c.span.end;
    }
    ret.extend_from_slice(&twists[cursor..]);
    ret
}

/// The spans translated in the generation indices of the regenerated helix.
fn resized_regions(changes: &[SpanChange]) -> Vec<LengthChange> {
    let mut total = 0isize;
    changes
        .iter()
        .map(|c| {
            let begin = c.span.begin as isize + total;
            let end = c.span.end as isize + total + c.change;
            total += c.change;
            LengthChange {
                begin: begin.max(0) as usize,
                end: end.max(0) as usize,
                change: c.change,
            }
        })
        .collect()
}

impl AdjustedHelix {
    /// The range of slots whose design positions are between `a` and `b`.
    fn slot_range(&self, a: usize, b: usize) -> Range<usize> {
        let (lo, hi) = (a.min(b), a.max(b));
        let inside = |slot: &(usize, usize)| slot.0 >= lo && slot.0 <= hi;
        let start = self.slots.iter().position(inside);
        let end = self.slots.iter().rposition(inside);
        match (start, end) {
            (Some(start), Some(end)) => start..end + 1,
            _ => 0..0,
        }
    }

    /// The nucleotides of `lane` between design positions `five_prime` and `three_prime`,
    /// from 5' to 3', with their origins.
    ///
    /// The scaffold lane is read on the generated strand, the staple lane on its complement.
    pub fn slice(
        &self,
        lane: Lane,
        five_prime: usize,
        three_prime: usize,
    ) -> Result<(Vec<Nucleotide>, Vec<Origin>), ConversionError> {
        if five_prime >= self.len || three_prime >= self.len {
            return Err(ConversionError::SliceOutOfBounds {
                helix: self.num,
                first: five_prime,
                last: three_prime,
                len: self.len,
            });
        }
        let n = self.slots.len();
        let range = self.slot_range(five_prime, three_prime);
        let origin = |slot: usize| {
            let (position, sub) = self.slots[slot];
            Origin {
                helix: self.num,
                position,
                sub,
                lane,
            }
        };
        let (nucleotides, origins) = match lane {
            Lane::Scaffold => (
                self.strands.forward[range.clone()].to_vec(),
                range.map(origin).collect(),
            ),
            Lane::Staple => {
                let indices = (n - range.end)..(n - range.start);
                (
                    self.strands.backward[indices.clone()].to_vec(),
                    indices.map(|k| origin(n - 1 - k)).collect(),
                )
            }
        };
        Ok((nucleotides, origins))
    }
}
