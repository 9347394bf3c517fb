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
use super::*;
use itertools::Itertools;
use std::io::Write;
use std::path::Path;

pub struct OxDnaNucl {
    pub position: DVec3,
    backbone_base: DVec3,
    pub normal: DVec3,
    velocity: DVec3,
    angular_velocity: DVec3,
}

impl OxDnaNucl {
    fn write_line<W: Write>(&self, out: &mut W) -> Result<(), std::io::Error> {
        let values = [
            self.position,
            self.backbone_base,
            self.normal,
            self.velocity,
            self.angular_velocity,
        ];
        writeln!(
            out,
            "{}",
            values
                .iter()
                .flat_map(|v| [v.x, v.y, v.z])
                .map(|x| x.to_string())
                .join(" ")
        )
    }
}

pub struct OxDnaConfig {
    time: f64,
    box_side: f64,
    /// Etot, U and K
    kinetic_energies: [f64; 3],
    nucls: Vec<OxDnaNucl>,
}

impl OxDnaConfig {
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_to(&mut file)
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), std::io::Error> {
        writeln!(out, "t = {}", self.time)?;
        writeln!(
            out,
            "b = {} {} {}",
            self.box_side, self.box_side, self.box_side
        )?;
        writeln!(
            out,
            "E = {} {} {}",
            self.kinetic_energies[0], self.kinetic_energies[1], self.kinetic_energies[2]
        )?;
        for n in self.nucls.iter() {
            n.write_line(out)?;
        }
        Ok(())
    }
}

pub struct OxDnaTopology {
    nb_nucl: usize,
    nb_strand: usize,
    bounds: Vec<OxDnaBound>,
}

impl OxDnaTopology {
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_to(&mut file)
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), std::io::Error> {
        writeln!(out, "{} {}", self.nb_nucl, self.nb_strand)?;
        for bound in self.bounds.iter() {
            writeln!(
                out,
                "{} {} {} {}",
                bound.strand_id, bound.base, bound.prime3, bound.prime5
            )?;
        }
        Ok(())
    }
}

struct OxDnaBound {
    /// 1-based
    strand_id: usize,
    base: char,
    prime3: isize,
    prime5: isize,
}

fn neighbour_id(n: Option<usize>) -> isize {
    n.map(|id| id as isize).unwrap_or(-1)
}

pub fn to_oxdna(system: &System) -> (OxDnaConfig, OxDnaTopology) {
    let neighbours = system.neighbours();
    let mut bounds = Vec::with_capacity(system.nb_nucl());
    let mut nucls = Vec::with_capacity(system.nb_nucl());
    let mut id = 0;
    for (strand_id, s) in system.strands().iter().enumerate() {
        for n in s.nucleotides.iter() {
            let (prime3, prime5) = neighbours[id];
            bounds.push(OxDnaBound {
                strand_id: strand_id + 1,
                base: n.base.to_char(),
                prime3: neighbour_id(prime3),
                prime5: neighbour_id(prime5),
            });
            nucls.push(OxDnaNucl {
                position: n.position,
                backbone_base: n.a1,
                normal: n.a3,
                velocity: DVec3::zero(),
                angular_velocity: DVec3::zero(),
            });
            id += 1;
        }
    }
    let topo = OxDnaTopology {
        nb_nucl: system.nb_nucl(),
        nb_strand: system.nb_strands(),
        bounds,
    };
    let config = OxDnaConfig {
        time: 0.,
        box_side: system.box_side,
        kinetic_energies: [0., 0., 0.],
        nucls,
    };
    (config, topo)
}
