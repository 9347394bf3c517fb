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

const ONE_HELIX: &str = r##"{
  "name": "one_helix.json",
  "vstrands": [
    {
      "num": 0, "row": 0, "col": 0,
      "scaf": [[-1, -1, 0, 1], [0, 0, 0, 2], [0, 1, 0, 3], [0, 2, -1, -1]],
      "stap": [[0, 1, -1, -1], [0, 2, 0, 0], [0, 3, 0, 1], [-1, -1, 0, 2]],
      "skip": [0, -1, 0, 0],
      "loop": [0, 0, 2, 0],
      "stap_colors": [[3, 243362]],
      "scafLoop": [],
      "stapLoop": []
    }
  ]
}"##;

#[test]
fn read_one_helix() {
    let design = Design::from_cadnano_str(ONE_HELIX).expect("parse design");
    assert_eq!(design.helices.len(), 1);
    let helix = &design.helices[0];
    assert_eq!(helix.len(), 4);
    assert!(helix.is_even());
    assert_eq!(helix.design_direction(), 1);
    assert_eq!(helix.skips, vec![false, true, false, false]);
    assert_eq!(helix.loops, vec![0, 0, 2, 0]);
    assert_eq!(helix.staple_color(3), Some(243362));
    assert_eq!(helix.staple_color(2), None);
}

#[test]
fn junction_types_along_helix() {
    let design = Design::from_cadnano_str(ONE_HELIX).expect("parse design");
    let helix = &design.helices[0];
    assert_eq!(
        helix.junction_types(0),
        (Some(JunctionType::Begin), Some(JunctionType::End))
    );
    assert_eq!(
        helix.junction_types(1),
        (Some(JunctionType::Continue), Some(JunctionType::Continue))
    );
    assert_eq!(
        helix.junction_types(3),
        (Some(JunctionType::End), Some(JunctionType::Begin))
    );
    assert_eq!(
        helix.junction_types(4),
        (Some(JunctionType::Empty), Some(JunctionType::Empty))
    );
}

#[test]
fn skip_length_mismatch() {
    let json = ONE_HELIX.replace("\"skip\": [0, -1, 0, 0]", "\"skip\": [0, 0]");
    match Design::from_cadnano_str(&json) {
        Err(DesignError::LengthMismatch { helix, skip, .. }) => {
            assert_eq!(helix, 0);
            assert_eq!(skip, 2);
        }
        _ => panic!("expected a length mismatch"),
    }
}

#[test]
fn negative_loop() {
    let json = ONE_HELIX.replace("\"loop\": [0, 0, 2, 0]", "\"loop\": [0, -1, 0, 0]");
    assert!(matches!(
        Design::from_cadnano_str(&json),
        Err(DesignError::NegativeLoop {
            helix: 0,
            position: 1
        })
    ));
}

#[test]
fn invalid_json() {
    assert!(matches!(
        Design::from_cadnano_str("{\"vstrands\": 3}"),
        Err(DesignError::Json(_))
    ));
}

#[test]
fn box_side_of_one_helix() {
    let design = Design::from_cadnano_str(ONE_HELIX).expect("parse design");
    let side = design.box_side(&Parameters::DEFAULT);
    assert!((side - 20.8).abs() < 1e-9);
}

#[test]
fn honeycomb_odd_helices_are_shifted() {
    let design = Design::from_cadnano_str(ONE_HELIX).expect("parse design");
    let mut helix = design.helices[0].clone();
    let even = Lattice::Honeycomb.helix_origin(&helix, &Parameters::DEFAULT);
    helix.num = 1;
    let odd = Lattice::Honeycomb.helix_origin(&helix, &Parameters::DEFAULT);
    assert!((odd.y - even.y - 2.55 / 2.).abs() < 1e-9);
    assert_eq!(odd.x, even.x);
}
