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
//! The oxView json format.

use super::*;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug)]
pub struct OxViewFile {
    #[serde(rename = "box")]
    pub box_: [f64; 3],
    pub systems: Vec<OxViewSystem>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OxViewSystem {
    pub id: usize,
    pub strands: Vec<OxViewStrand>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OxViewStrand {
    pub id: usize,
    pub end3: usize,
    pub end5: usize,
    pub class: String,
    pub monomers: Vec<OxViewMonomer>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OxViewMonomer {
    pub id: usize,
    #[serde(rename = "type")]
    pub base: char,
    pub class: String,
    pub p: [f64; 3],
    pub a1: [f64; 3],
    pub a3: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub n3: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub n5: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bp: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cluster: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<u32>,
}

fn array(v: DVec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

impl OxViewFile {
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer(file, self)?;
        Ok(())
    }
}

pub fn to_oxview(system: &System) -> OxViewFile {
    let neighbours = system.neighbours();
    let strands = system
        .strands()
        .iter()
        .zip(system.strand_offsets())
        .enumerate()
        .map(|(strand_id, (s, offset))| {
            let monomers = s
                .nucleotides
                .iter()
                .enumerate()
                .map(|(i, n)| {
                    let id = offset + i;
                    let (n3, n5) = neighbours[id];
                    OxViewMonomer {
                        id,
                        base: n.base.to_char(),
                        class: String::from("DNA"),
                        p: array(n.position),
                        a1: array(n.a1),
                        a3: array(n.a3),
                        n3,
                        n5,
                        bp: n.pair,
                        cluster: n.cluster,
                        color: n.color,
                    }
                })
                .collect();
            OxViewStrand {
                id: strand_id,
                end3: offset,
                end5: offset + s.len().max(1) - 1,
                class: String::from("NucleicAcidStrand"),
                monomers,
            }
        })
        .collect();
    OxViewFile {
        box_: [system.box_side; 3],
        systems: vec![OxViewSystem { id: 0, strands }],
    }
}
