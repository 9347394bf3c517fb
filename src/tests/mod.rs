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
use oxnano_exports::Base;

/// A helix with one scaffold and one staple covering all of its positions.
fn duplex_json(len: usize, skips: &[usize], stap_colors: &[[i64; 2]]) -> String {
    let square = |prev: isize, next: isize| -> [isize; 4] {
        let location = |p: isize| -> [isize; 2] {
            if p < 0 || p >= len as isize {
                [-1, -1]
            } else {
                [0, p]
            }
        };
        let (p, n) = (location(prev), location(next));
        [p[0], p[1], n[0], n[1]]
    };
    let scaf: Vec<_> = (0..len as isize).map(|i| square(i - 1, i + 1)).collect();
    let stap: Vec<_> = (0..len as isize).map(|i| square(i + 1, i - 1)).collect();
    let skip: Vec<i32> = (0..len)
        .map(|i| if skips.contains(&i) { -1 } else { 0 })
        .collect();
    serde_json::json!({
        "name": "duplex.json",
        "vstrands": [{
            "num": 0, "row": 1, "col": 2,
            "scaf": scaf, "stap": stap,
            "skip": skip, "loop": vec![0; len],
            "stap_colors": stap_colors,
            "scafLoop": [], "stapLoop": []
        }]
    })
    .to_string()
}

/// A helix whose scaffold and staple both have their 3' end at position `nick`, with a skip or
/// a loop of `loop_` bases at the nick.
fn nicked_duplex_json(len: usize, nick: usize, skip: bool, loop_: usize) -> String {
    let location = |p: usize, none: bool| -> [isize; 2] {
        if none {
            [-1, -1]
        } else {
            [0, p as isize]
        }
    };
    let scaf: Vec<_> = (0..len)
        .map(|i| {
            let prev = location(i.wrapping_sub(1), i == 0 || i == nick + 1);
            let next = location(i + 1, i == nick || i + 1 == len);
            [prev[0], prev[1], next[0], next[1]]
        })
        .collect();
    let stap: Vec<_> = (0..len)
        .map(|i| {
            let prev = location(i + 1, i + 1 == len || i + 1 == nick);
            let next = location(i.wrapping_sub(1), i == 0 || i == nick);
            [prev[0], prev[1], next[0], next[1]]
        })
        .collect();
    let skips: Vec<i32> = (0..len).map(|i| if skip && i == nick { -1 } else { 0 }).collect();
    let loops: Vec<usize> = (0..len).map(|i| if i == nick { loop_ } else { 0 }).collect();
    serde_json::json!({
        "vstrands": [{
            "num": 0, "row": 0, "col": 0,
            "scaf": scaf, "stap": stap,
            "skip": skips, "loop": loops,
            "stap_colors": []
        }]
    })
    .to_string()
}

/// Two helices of eight positions. The scaffold is circular, going up helix 0 and down helix 1.
/// Two staples cross between the helices in the middle, and helix 1 has a loop at position 5,
/// next to the staple crossover at position 4.
const CROSSED_STAPLES: &str = r##"{
  "name": "crossed_staples.json",
  "vstrands": [
    {
      "num": 0, "row": 0, "col": 0,
      "scaf": [[1, 0, 0, 1], [0, 0, 0, 2], [0, 1, 0, 3], [0, 2, 0, 4],
               [0, 3, 0, 5], [0, 4, 0, 6], [0, 5, 0, 7], [0, 6, 1, 7]],
      "stap": [[0, 1, -1, -1], [0, 2, 0, 0], [0, 3, 0, 1], [1, 3, 0, 2],
               [0, 5, 1, 4], [0, 6, 0, 4], [0, 7, 0, 5], [-1, -1, 0, 6]],
      "skip": [0, 0, 0, 0, 0, 0, 0, 0],
      "loop": [0, 0, 0, 0, 0, 0, 0, 0],
      "stap_colors": []
    },
    {
      "num": 1, "row": 0, "col": 1,
      "scaf": [[1, 1, 0, 0], [1, 2, 1, 0], [1, 3, 1, 1], [1, 4, 1, 2],
               [1, 5, 1, 3], [1, 6, 1, 4], [1, 7, 1, 5], [0, 7, 1, 6]],
      "stap": [[-1, -1, 1, 1], [1, 0, 1, 2], [1, 1, 1, 3], [1, 2, 0, 3],
               [0, 4, 1, 5], [1, 4, 1, 6], [1, 5, 1, 7], [1, 6, -1, -1]],
      "skip": [0, 0, 0, 0, 0, 0, 0, 0],
      "loop": [0, 0, 0, 0, 0, 1, 0, 0],
      "stap_colors": []
    }
  ]
}"##;

/// Every nucleotide is paired with a nucleotide of another strand that is paired back to it.
fn assert_symmetric_pairing(system: &System) {
    for id in 0..system.nb_nucl() {
        let n = system.nucl(id).unwrap();
        let pair = n.pair.unwrap_or_else(|| panic!("nucleotide {} is unpaired", id));
        let partner = system.nucl(pair).unwrap();
        assert_eq!(partner.pair, Some(id));
        assert_ne!(system.strand_of(id), system.strand_of(pair));
    }
}

/// Every nucleotide of the scaffold strand `scaffold` faces its complementary base.
fn assert_complementary(system: &System, scaffold: usize) {
    for n in system.strands()[scaffold].nucleotides.iter() {
        let partner = n.pair.and_then(|p| system.nucl(p)).unwrap();
        assert_eq!(partner.base, n.base.complement());
    }
}

/// A circular scaffold going up helix 0 and down helix 1, each helix having its own staple.
const RING: &str = r##"{
  "name": "ring.json",
  "vstrands": [
    {
      "num": 0, "row": 0, "col": 0,
      "scaf": [[1, 0, 0, 1], [0, 0, 0, 2], [0, 1, 0, 3], [0, 2, 1, 3]],
      "stap": [[0, 1, -1, -1], [0, 2, 0, 0], [0, 3, 0, 1], [-1, -1, 0, 2]],
      "skip": [0, 0, 0, 0],
      "loop": [0, 0, 0, 0],
      "stap_colors": [[3, 16711680]]
    },
    {
      "num": 1, "row": 0, "col": 1,
      "scaf": [[1, 1, 0, 0], [1, 2, 1, 0], [1, 3, 1, 1], [0, 3, 1, 2]],
      "stap": [[-1, -1, 1, 1], [1, 0, 1, 2], [1, 1, 1, 3], [1, 2, -1, -1]],
      "skip": [0, 0, 0, 0],
      "loop": [0, 0, 0, 0],
      "stap_colors": []
    }
  ]
}"##;

fn options_with_sequence(sequence: &str) -> ConversionOptions {
    ConversionOptions {
        scaffold_sequence: Some(sequence.to_string()),
        ..Default::default()
    }
}

#[test]
fn single_duplex() {
    let conversion =
        convert(&duplex_json(8, &[], &[]), &options_with_sequence("ACGTACGT")).unwrap();
    let system = &conversion.system;
    assert_eq!(system.nb_strands(), 2);
    assert_eq!(system.nb_nucl(), 16);
    assert!(system.strands().iter().all(|s| !s.circular));
    for i in 0..16 {
        assert_eq!(system.nucl(i).unwrap().pair, Some(15 - i));
    }
    let scaffold: String = system.strands()[0]
        .nucleotides
        .iter()
        .rev()
        .map(|n| n.base.to_char())
        .collect();
    assert_eq!(scaffold, "ACGTACGT");
    // the first base of the sequence is on the 5' end of the scaffold
    let five_prime = system
        .neighbours()
        .iter()
        .take(8)
        .position(|(_, n5)| n5.is_none())
        .unwrap();
    assert_eq!(system.nucl(five_prime).unwrap().base, Base::A);
    for i in 0..8 {
        let n = system.nucl(i).unwrap();
        let pair = system.nucl(15 - i).unwrap();
        assert_eq!(pair.base, n.base.complement());
    }
    assert!(conversion.warnings.is_empty());
}

#[test]
fn duplex_geometry() {
    let conversion = convert(&duplex_json(8, &[], &[]), &Default::default()).unwrap();
    let system = &conversion.system;
    let parameters = Parameters::DEFAULT;
    for i in 0..8 {
        let n = system.nucl(i).unwrap();
        let pair = system.nucl(15 - i).unwrap();
        // paired nucleotides face each other across the axis
        let distance = (n.position - pair.position).mag();
        assert!((distance - 2. * parameters.cm_center_ds).abs() < 1e-9);
        assert!((n.a1 + pair.a1).mag() < 1e-9);
        assert!((n.a3 + pair.a3).mag() < 1e-9);
    }
    // strands are reversed: scaffold nucleotides point down the helix axis
    assert!((system.nucl(0).unwrap().a3.z + 1.).abs() < 1e-9);
    // the helix sits on its lattice square
    let axis = (system.nucl(0).unwrap().position + system.nucl(15).unwrap().position) / 2.;
    assert!((axis.x - 2. * 2.6).abs() < 1e-9);
    assert!((axis.y - 2.6).abs() < 1e-9);
}

#[test]
fn skip_removes_a_base_pair() {
    let conversion = convert(&duplex_json(8, &[3], &[]), &Default::default()).unwrap();
    let system = &conversion.system;
    assert_eq!(system.nb_nucl(), 14);
    for i in 0..14 {
        assert_eq!(system.nucl(i).unwrap().pair, Some(13 - i));
    }
}

#[test]
fn circular_scaffold() {
    let conversion = convert(RING, &Default::default()).unwrap();
    let system = &conversion.system;
    assert_eq!(system.nb_nucl(), 16);
    assert_eq!(system.nb_strands(), 3);
    // staples come first, they bypass the joining
    assert!(!system.strands()[0].circular);
    assert!(!system.strands()[1].circular);
    assert!(system.strands()[2].circular);
    assert_eq!(system.strands()[2].len(), 8);
    assert!(system.nucleotides().all(|n| n.pair.is_some()));
    assert!(conversion.warnings.iter().all(|w| matches!(
        w,
        Warning::BackboneDistance { .. } | Warning::CircularEndsApart { .. }
    )));
    let neighbours = system.neighbours();
    assert_eq!(neighbours[8], (Some(15), Some(9)));
    assert_eq!(neighbours[15], (Some(14), Some(8)));
}

#[test]
fn colors_and_clusters() {
    let conversion = convert(RING, &Default::default()).unwrap();
    let system = &conversion.system;
    for n in system.strands()[0].nucleotides.iter() {
        assert_eq!(n.color, Some(16711680));
        assert_eq!(n.cluster, Some(1));
    }
    for n in system.strands()[1].nucleotides.iter() {
        assert_eq!(n.color, None);
        assert_eq!(n.cluster, Some(2));
    }
    for n in system.strands()[2].nucleotides.iter() {
        assert_eq!(n.color, Some(index_map::SCAFFOLD_COLOR));
    }
}

#[test]
fn short_sequence_is_not_fatal() {
    let sequence = "A".repeat(29);
    let conversion =
        convert(&duplex_json(30, &[], &[]), &options_with_sequence(&sequence)).unwrap();
    assert_eq!(
        conversion.warnings,
        vec![Warning::ScaffoldSequenceTooShort {
            scaffold_length: 30,
            sequence_length: 29
        }]
    );
    assert_eq!(conversion.warnings[0].severity(), Severity::Warning);
    // a random sequence is used instead of the given one
    let system = &conversion.system;
    assert!(system.strands()[0].nucleotides.iter().any(|n| n.base != Base::A));
    assert_symmetric_pairing(system);
    assert_complementary(system, 0);
}

#[test]
fn skip_at_a_nick() {
    let conversion = convert(&nicked_duplex_json(16, 8, false, 0), &Default::default()).unwrap();
    assert_eq!(conversion.system.nb_strands(), 4);
    assert_eq!(conversion.system.nb_nucl(), 32);

    let conversion = convert(&nicked_duplex_json(16, 8, true, 0), &Default::default()).unwrap();
    assert!(conversion.warnings.is_empty());
    let system = &conversion.system;
    assert_eq!(system.nb_nucl(), 30);
    // the scaffold strand ending at the nick lost its last base
    assert_eq!(system.strands()[0].len(), 8);
    assert_symmetric_pairing(system);
}

#[test]
fn loop_at_a_nick() {
    let conversion = convert(&nicked_duplex_json(16, 8, false, 2), &Default::default()).unwrap();
    assert!(conversion.warnings.is_empty());
    let system = &conversion.system;
    assert_eq!(system.nb_nucl(), 36);
    assert_eq!(system.strands()[0].len(), 11);
    assert_symmetric_pairing(system);
}

#[test]
fn crossed_staples_with_a_loop() {
    let options = options_with_sequence("ACGTTGCAAGCTTCGAT");
    let conversion = convert(CROSSED_STAPLES, &options).unwrap();
    let system = &conversion.system;
    assert_eq!(system.nb_strands(), 3);
    assert_eq!(system.nb_nucl(), 34);
    // the circular scaffold comes first, then the two staples sorted by first fragment
    assert!(system.strands()[0].circular);
    assert_eq!(system.strands()[0].len(), 17);
    assert_eq!(system.strands()[1].len(), 9);
    assert_eq!(system.strands()[2].len(), 8);
    assert!(!system.strands()[1].circular && !system.strands()[2].circular);
    assert_symmetric_pairing(system);
    assert_complementary(system, 0);
    let scaffold: String = system.strands()[0]
        .nucleotides
        .iter()
        .rev()
        .map(|n| n.base.to_char())
        .collect();
    assert_eq!(scaffold, "ACGTTGCAAGCTTCGAT");
    assert!(conversion.warnings.iter().all(|w| matches!(
        w,
        Warning::BackboneDistance { .. } | Warning::CircularEndsApart { .. }
    )));
}

#[test]
fn empty_design_is_fatal() {
    let result = convert(r#"{"vstrands": []}"#, &Default::default());
    match result {
        Err(e) => {
            assert!(matches!(e, ConversionError::EmptySystem));
            assert_eq!(e.severity(), Severity::Fatal);
        }
        Ok(_) => panic!("expected an empty system"),
    }
}

#[test]
fn staple_only_helix_is_skipped() {
    let json = r#"{"vstrands": [{"num": 0, "row": 0, "col": 0,
        "scaf": [[-1,-1,-1,-1],[-1,-1,-1,-1]],
        "stap": [[0,1,-1,-1],[-1,-1,0,0]],
        "skip": [0,0], "loop": [0,0], "stap_colors": []}]}"#;
    assert!(matches!(
        convert(json, &Default::default()),
        Err(ConversionError::EmptySystem)
    ));
}

#[test]
fn invalid_json_is_fatal() {
    assert!(matches!(
        convert("not a design", &Default::default()),
        Err(ConversionError::Design(DesignError::Json(_)))
    ));
}

#[test]
fn conversion_is_deterministic() {
    let options = options_with_sequence("ACGTACGTAC");
    let a = convert(RING, &options).unwrap();
    let b = convert(RING, &options).unwrap();
    let positions = |c: &Conversion| -> Vec<[f64; 3]> {
        c.system
            .nucleotides()
            .map(|n| [n.position.x, n.position.y, n.position.z])
            .collect()
    };
    assert_eq!(positions(&a), positions(&b));
    let scaffold_bases = |c: &Conversion| -> Vec<Base> {
        c.system.strands()[2].nucleotides.iter().map(|n| n.base).collect()
    };
    assert_eq!(scaffold_bases(&a), scaffold_bases(&b));
}

#[test]
fn honeycomb_duplex() {
    let options = ConversionOptions {
        grid: Lattice::Honeycomb,
        ..Default::default()
    };
    let conversion = convert(&duplex_json(30, &[], &[]), &options).unwrap();
    assert_eq!(conversion.system.nb_nucl(), 60);
}

#[test]
fn box_side_option() {
    let options = ConversionOptions {
        box_side: Some(42.),
        ..Default::default()
    };
    let conversion = convert(&duplex_json(4, &[], &[]), &options).unwrap();
    assert_eq!(conversion.system.box_side, 42.);
    let conversion = convert(&duplex_json(4, &[], &[]), &Default::default()).unwrap();
    assert!((conversion.system.box_side - 20.8).abs() < 1e-9);
}

#[test]
fn options_from_json() {
    let options: ConversionOptions = serde_json::from_str(r#"{"grid": "Honeycomb"}"#).unwrap();
    assert_eq!(options.grid, Lattice::Honeycomb);
    assert_eq!(options.scaffold_sequence, None);
    assert_eq!(options.parameters, Parameters::DEFAULT);
}
