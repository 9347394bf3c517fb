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
//! The cadnano 2 json format.
//!
//! Only the fields needed to rebuild the strands are kept, `scafLoop` and `stapLoop` are read
//! and ignored.

use super::Square;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CadnanoDesign {
    #[serde(default)]
    pub name: String,
    pub vstrands: Vec<CadnanoVStrand>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CadnanoVStrand {
    pub num: isize,
    pub row: isize,
    pub col: isize,
    pub scaf: Vec<Square>,
    pub stap: Vec<Square>,
    #[serde(default)]
    pub skip: Vec<isize>,
    #[serde(rename = "loop", default)]
    pub loop_: Vec<isize>,
    /// `[position, color]` pairs, colors are 24 bits RGB integers.
    #[serde(default)]
    pub stap_colors: Vec<[i64; 2]>,
    #[serde(rename = "scafLoop", default, skip_serializing_if = "Vec::is_empty")]
    pub scaf_loop: Vec<serde_json::Value>,
    #[serde(rename = "stapLoop", default, skip_serializing_if = "Vec::is_empty")]
    pub stap_loop: Vec<serde_json::Value>,
}

impl CadnanoDesign {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
