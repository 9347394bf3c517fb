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
//! Conversion of lattice designs into oxDNA models.
//!
//! Each virtual helix of the design is generated as an ideal double helix, deformed to account
//! for its skips and loops, and cut into fragments following the scaffold and staple lanes.
//! Fragments are then joined along the crossovers of the design into whole strands.

#[macro_use]
extern crate serde_derive;

pub use oxnano_design::{Design, DesignError, Lattice, Parameters};
pub use oxnano_exports::{export, ExportError, ExportSuccess, ExportType, System};

pub mod fragments;
pub mod geometry;
pub mod index_map;
pub mod join;
pub mod segmentation;
pub mod skip_loop;
mod warnings;
pub use warnings::{Severity, Warning};

use fragments::{join_lists, scan_lane, FragmentArena, Lane};
use index_map::{apply_sequence, IndexMap};
use join::{assemble, resolve, AssembledStrand};
use oxnano_exports::Strand;
use segmentation::build_nodes;
use skip_loop::SkipLoopAdjuster;

#[cfg(test)]
mod tests;

/// The state of one conversion.
#[derive(Debug, Default)]
pub struct ConversionContext {
    pub arena: FragmentArena,
    pub warnings: Vec<Warning>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

#[derive(Debug)]
pub enum ConversionError {
    Design(DesignError),
    /// The number of twists given to generate a helix is not one less than its number of bases.
    TwistLengthMismatch {
        expected: usize,
        got: usize,
    },
    UnbalancedEffectiveStrands {
        helix: isize,
        begins: usize,
        ends: usize,
    },
    SliceOutOfBounds {
        helix: isize,
        first: usize,
        last: usize,
        len: usize,
    },
    /// The conversion produced no nucleotide.
    EmptySystem,
}

impl ConversionError {
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl From<DesignError> for ConversionError {
    fn from(e: DesignError) -> Self {
        Self::Design(e)
    }
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Design(e) => write!(f, "{}", e),
            Self::TwistLengthMismatch { expected, got } => write!(
                f,
                "Incorrect twist array length: expected {}, got {}",
                expected, got
            ),
            Self::UnbalancedEffectiveStrands {
                helix,
                begins,
                ends,
            } => write!(
                f,
                "Helix {} has {} effective strand beginnings but {} ends",
                helix, begins, ends
            ),
            Self::SliceOutOfBounds {
                helix,
                first,
                last,
                len,
            } => write!(
                f,
                "Slice {}..{} is out of the {} positions of helix {}",
                first, last, len, helix
            ),
            Self::EmptySystem => write!(
                f,
                "The generated configuration is empty: helices containing no scaffold strand are not supported"
            ),
        }
    }
}

impl std::error::Error for ConversionError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOptions {
    pub grid: Lattice,
    /// The scaffold sequence, written from 5' to 3'. It is placed starting from the 3' end of
    /// the scaffold, which is the first scaffold nucleotide of the system: base `k` of the
    /// strand receives `sequence[N - 1 - k]`. A random sequence is used if `None`.
    #[serde(default)]
    pub scaffold_sequence: Option<String>,
    /// The side of the simulation box. Computed from the extent of the design if `None`.
    #[serde(default)]
    pub box_side: Option<f64>,
    #[serde(default)]
    pub parameters: Parameters,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            grid: Lattice::Square,
            scaffold_sequence: None,
            box_side: None,
            parameters: Parameters::DEFAULT,
        }
    }
}

/// The result of a successful conversion.
#[derive(Debug)]
pub struct Conversion {
    pub system: System,
    pub warnings: Vec<Warning>,
}

/// Convert a cadnano json design.
pub fn convert(design: &str, options: &ConversionOptions) -> Result<Conversion, ConversionError> {
    let design = Design::from_cadnano_str(design)?;
    convert_design(&design, options)
}

pub fn convert_design(
    design: &Design,
    options: &ConversionOptions,
) -> Result<Conversion, ConversionError> {
    let parameters = &options.parameters;
    log::info!(
        "Converting {} helices on a {} lattice",
        design.helices.len(),
        options.grid
    );
    let mut context = ConversionContext::new();
    let mut scaffold_ids = Vec::new();
    let mut staple_ids = Vec::new();

    for helix in design.helices.iter() {
        let nodes = build_nodes(helix, &mut context);
        let adjusted =
            SkipLoopAdjuster::new(helix, options.grid, parameters).adjust(&nodes, &mut context)?;
        let scaffold = scan_lane(helix, Lane::Scaffold, &adjusted, &mut context)?;
        if scaffold.is_empty() {
            context.warn(Warning::NoScaffold { helix: helix.num });
            continue;
        }
        scaffold_ids.extend(scaffold);
        staple_ids.extend(scan_lane(helix, Lane::Staple, &adjusted, &mut context)?);
    }

    log::debug!("{} fragments cut from the helices", context.arena.len());
    let scaffold_joins = join_lists(&context.arena, &scaffold_ids);
    let staple_joins = join_lists(&context.arena, &staple_ids);

    let mut isolated: Vec<_> = scaffold_joins
        .isolated
        .iter()
        .chain(staple_joins.isolated.iter())
        .cloned()
        .collect();
    isolated.sort_unstable();

    let mut assembled: Vec<AssembledStrand> = Vec::new();
    for id in isolated {
        if let Some(f) = context.arena.get(id) {
            assembled.push(AssembledStrand {
                nucleotides: f.nucleotides.clone(),
                origins: f.origins.clone(),
                circular: false,
            });
        }
    }
    for chains in [scaffold_joins.chains, staple_joins.chains] {
        for strand in resolve(chains) {
            let joined = assemble(&strand, parameters, &mut context);
            assembled.push(joined);
        }
    }
    assembled.retain(|s| !s.is_empty());
    if assembled.is_empty() {
        return Err(ConversionError::EmptySystem);
    }

    let index_map = IndexMap::new(&assembled);
    let box_side = match options.box_side {
        Some(side) => side,
        None => {
            log::info!(
                "Using default box size, a factor {} larger than the size of the design",
                parameters.box_factor
            );
            design.box_side(parameters)
        }
    };
    let mut system = System::new(box_side);
    for s in assembled {
        let mut strand = Strand::new(s.nucleotides, s.circular);
        strand.reverse();
        system.add_strand(strand);
    }

    index_map.apply_pairs(&mut system);
    index_map.apply_colors(&mut system, design);
    index_map.apply_clusters(&mut system, design);
    let scaffold = index_map.scaffold_strand(&system);
    apply_sequence(
        &mut system,
        scaffold,
        options.scaffold_sequence.as_deref(),
        &mut context,
    );

    log::info!(
        "Converted {} helices into {} nucleotides in {} strands",
        design.helices.len(),
        system.nb_nucl(),
        system.nb_strands()
    );
    Ok(Conversion {
        system,
        warnings: context.warnings,
    })
}
