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
//! The molecular model produced by oxnano and its exports to the file formats of the oxDNA
//! ecosystem.

#[macro_use]
extern crate serde_derive;

use oxnano_design::ultraviolet::DVec3;
use std::path::PathBuf;
use strum::Display;

pub mod oxdna;
pub mod oxview;

/// A nucleobase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A,
    G,
    C,
    T,
}

impl Base {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'G' => Some(Self::G),
            'C' => Some(Self::C),
            'T' | 'U' => Some(Self::T),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::G => 'G',
            Self::C => 'C',
            Self::T => 'T',
        }
    }

    /// The numeric code of the base, such that `complement(b) = 3 - b`.
    pub fn index(self) -> u8 {
        match self {
            Self::A => 0,
            Self::G => 1,
            Self::C => 2,
            Self::T => 3,
        }
    }

    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::A,
            1 => Self::G,
            2 => Self::C,
            _ => Self::T,
        }
    }

    pub fn complement(self) -> Self {
        Self::from_index(3 - self.index())
    }

    pub fn random() -> Self {
        Self::from_index(rand::random::<u8>())
    }
}

/// A nucleotide of the coarse grained model.
#[derive(Debug, Clone)]
pub struct Nucleotide {
    /// Center of mass.
    pub position: DVec3,
    /// Unit vector going from the backbone to the base.
    pub a1: DVec3,
    /// Unit vector normal to the base plane.
    pub a3: DVec3,
    pub base: Base,
    /// Identifier, in the system, of the nucleotide paired with this one.
    pub pair: Option<usize>,
    pub cluster: Option<usize>,
    /// 24 bits RGB color.
    pub color: Option<u32>,
}

impl Nucleotide {
    pub fn new(position: DVec3, a1: DVec3, a3: DVec3) -> Self {
        Self {
            position,
            a1,
            a3,
            base: Base::A,
            pair: None,
            cluster: None,
            color: None,
        }
    }

    /// Position of the backbone site of the nucleotide.
    pub fn backbone(&self, pos_back: f64) -> DVec3 {
        self.position + self.a1 * pos_back
    }
}

/// A strand of the system.
///
/// Nucleotides are stored in the direction of the oxDNA topology files: the nucleotide at
/// index `i + 1` is the 5' neighbour of the one at index `i`.
#[derive(Debug, Clone, Default)]
pub struct Strand {
    pub nucleotides: Vec<Nucleotide>,
    pub circular: bool,
}

impl Strand {
    pub fn new(nucleotides: Vec<Nucleotide>, circular: bool) -> Self {
        Self {
            nucleotides,
            circular,
        }
    }

    pub fn len(&self) -> usize {
        self.nucleotides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nucleotides.is_empty()
    }

    /// Swap the 5' and 3' ends of the strand. Base normals are flipped to follow the new
    /// direction of the strand.
    pub fn reverse(&mut self) {
        self.nucleotides.reverse();
        for n in self.nucleotides.iter_mut() {
            n.a3 = -n.a3;
        }
    }
}

/// A collection of strands inside a cubic box.
///
/// Nucleotides are identified by their rank in the concatenation of all strands.
#[derive(Debug, Clone, Default)]
pub struct System {
    pub box_side: f64,
    strands: Vec<Strand>,
    /// `strand_ends[s]` is the identifier following the last nucleotide of strand `s`.
    strand_ends: Vec<usize>,
}

impl System {
    pub fn new(box_side: f64) -> Self {
        Self {
            box_side,
            strands: Vec::new(),
            strand_ends: Vec::new(),
        }
    }

    pub fn add_strand(&mut self, strand: Strand) {
        let end = self.nb_nucl() + strand.len();
        self.strands.push(strand);
        self.strand_ends.push(end);
    }

    pub fn nb_nucl(&self) -> usize {
        self.strand_ends.last().cloned().unwrap_or(0)
    }

    pub fn nb_strands(&self) -> usize {
        self.strands.len()
    }

    pub fn strands(&self) -> &[Strand] {
        &self.strands
    }

    pub fn strand(&self, s_id: usize) -> Option<&Strand> {
        self.strands.get(s_id)
    }

    /// The nucleotides of strand `s_id`. They can be modified but not added or removed.
    pub fn strand_nucleotides_mut(&mut self, s_id: usize) -> Option<&mut [Nucleotide]> {
        self.strands
            .get_mut(s_id)
            .map(|s| s.nucleotides.as_mut_slice())
    }

    /// The identifier of the first nucleotide of strand `s_id`.
    pub fn strand_offset(&self, s_id: usize) -> Option<usize> {
        if s_id >= self.strands.len() {
            None
        } else if s_id == 0 {
            Some(0)
        } else {
            self.strand_ends.get(s_id - 1).cloned()
        }
    }

    /// The identifier of the first nucleotide of each strand.
    pub fn strand_offsets(&self) -> Vec<usize> {
        (0..self.nb_strands())
            .filter_map(|s| self.strand_offset(s))
            .collect()
    }

    /// Return the strand index and the index in the strand of the nucleotide `id`.
    pub fn locate(&self, id: usize) -> Option<(usize, usize)> {
        if id >= self.nb_nucl() {
            return None;
        }
        let s_id = self.strand_ends.partition_point(|end| *end <= id);
        let offset = self.strand_offset(s_id)?;
        Some((s_id, id - offset))
    }

    pub fn strand_of(&self, id: usize) -> Option<usize> {
        self.locate(id).map(|(s, _)| s)
    }

    pub fn nucl(&self, id: usize) -> Option<&Nucleotide> {
        let (s, i) = self.locate(id)?;
        self.strands.get(s).and_then(|s| s.nucleotides.get(i))
    }

    pub fn nucl_mut(&mut self, id: usize) -> Option<&mut Nucleotide> {
        let (s, i) = self.locate(id)?;
        self.strands.get_mut(s).and_then(|s| s.nucleotides.get_mut(i))
    }

    /// Iterate over all nucleotides in identifier order.
    pub fn nucleotides(&self) -> impl Iterator<Item = &Nucleotide> {
        self.strands.iter().flat_map(|s| s.nucleotides.iter())
    }

    pub fn nucleotides_mut(&mut self) -> impl Iterator<Item = &mut Nucleotide> {
        self.strands.iter_mut().flat_map(|s| s.nucleotides.iter_mut())
    }

    /// The identifiers of the 3' and 5' neighbours of each nucleotide, in identifier order.
    pub fn neighbours(&self) -> Vec<(Option<usize>, Option<usize>)> {
        let mut ret = Vec::with_capacity(self.nb_nucl());
        for (s, offset) in self.strands.iter().zip(self.strand_offsets()) {
            let len = s.len();
            for i in 0..len {
                let n3 = if i > 0 {
                    Some(offset + i - 1)
                } else if s.circular && len > 1 {
                    Some(offset + len - 1)
                } else {
                    None
                };
                let n5 = if i + 1 < len {
                    Some(offset + i + 1)
                } else if s.circular && len > 1 {
                    Some(offset)
                } else {
                    None
                };
                ret.push((n3, n5));
            }
        }
        ret
    }
}

/// The file formats to which an export is implemented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ExportType {
    Oxdna,
    Oxview,
}

/// A value returned by the export functions when exports was successfull.
///
/// This means that both the format conversion and the write to the output file were successful.
pub enum ExportSuccess {
    Oxdna {
        topology: PathBuf,
        configuration: PathBuf,
    },
    Oxview(PathBuf),
}

const SUCCESSFUL_EXPORT_MSG_PREFIX: &str = "Successfully exported to";

impl ExportSuccess {
    /// A message telling that the export operation was successfull and giving the path to which
    /// the export was made
    pub fn message(&self) -> String {
        match self {
            Self::Oxview(p) => format!("{SUCCESSFUL_EXPORT_MSG_PREFIX}\n{}", p.to_string_lossy()),
            Self::Oxdna {
                topology,
                configuration,
            } => format!(
                "{SUCCESSFUL_EXPORT_MSG_PREFIX}\n{}\n{}",
                configuration.to_string_lossy(),
                topology.to_string_lossy()
            ),
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    Json(serde_json::Error),
    IOError(std::io::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::IOError(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "Could not serialize system: {}", e),
            Self::IOError(e) => write!(f, "Could not write file: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// Write `system` to `export_path`.
///
/// For oxDNA exports, `export_path` is the path of the configuration file and the topology is
/// written next to it with the `top` extension.
pub fn export(
    system: &System,
    export_type: ExportType,
    export_path: &PathBuf,
) -> Result<ExportSuccess, ExportError> {
    match export_type {
        ExportType::Oxdna => {
            let configuration = export_path.clone();
            let mut topology = export_path.clone();
            topology.set_extension("top");
            let (config, topo) = oxdna::to_oxdna(system);
            config.write(&configuration)?;
            topo.write(&topology)?;
            Ok(ExportSuccess::Oxdna {
                topology,
                configuration,
            })
        }
        ExportType::Oxview => {
            let path = export_path.clone();
            oxview::to_oxview(system).write(&path)?;
            Ok(ExportSuccess::Oxview(path))
        }
    }
}
