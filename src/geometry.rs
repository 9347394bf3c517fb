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
//! Ideal helical geometry of the virtual helices.

use super::ConversionError;
use oxnano_design::{Lattice, Parameters, VirtualHelix};
use oxnano_exports::Nucleotide;
use std::f64::consts::TAU;
use ultraviolet::{DBivec3, DRotor3, DVec3};

pub const SQUARE_TWIST_PERIOD: usize = 32;
pub const HONEYCOMB_TWIST_PERIOD: usize = 21;

/// Number of full turns made by the helix in one period of the twist table.
fn turns_per_period(lattice: Lattice) -> f64 {
    match lattice {
        Lattice::Square => 3.,
        Lattice::Honeycomb => 2.,
    }
}

fn twist_period(lattice: Lattice) -> usize {
    match lattice {
        Lattice::Square => SQUARE_TWIST_PERIOD,
        Lattice::Honeycomb => HONEYCOMB_TWIST_PERIOD,
    }
}

/// Twist, in degrees, between the base at `i` and the next one on a square lattice. Only
/// meaningful for `i` in `0..31`.
fn square_twist(i: usize) -> f64 {
    // the pitch angle must stay below ~54.5 degrees
    match i {
        0 | 1 => 28.,
        2 => 36.,
        3 => 54.375,
        4 => 37.,
        5 | 6 => 27.6666666666666,
        7 => 30.6666666666666,
        8 | 9 => 29.3333333333,
        10 => 34.3333333333,
        11 => 54.5,
        12 | 13 => 28.91666666666,
        14..=17 => 31.16666666666,
        18 => 35.5,
        19 => 52.,
        20 => 35.5,
        21 | 22 => 27.5,
        23 => 35.5,
        24..=26 => 30.,
        27 => 52.,
        28 => 35.5,
        _ => 30.91666666666,
    }
}

/// Twist, in degrees, between the base at `i` and the next one on a honeycomb lattice. Only
/// meaningful for `i` in `0..20`.
fn honeycomb_twist(i: usize) -> f64 {
    match i {
        0 => 32.571,
        1 => 36.,
        2 | 3 => 42.,
        5..=7 => 29.143,
        8 => 32.,
        9 | 10 => 44.,
        12..=14 => 28.571,
        16 | 17 => 41.5,
        19 => 28.476,
        _ => 720. / 21.,
    }
}

/// One period of the twist table of `lattice`, in radians.
///
/// The last entry closes the period so that the helix makes an exact number of turns over one
/// period.
pub fn twist_table(lattice: Lattice) -> Vec<f64> {
    let period = twist_period(lattice);
    let twist = match lattice {
        Lattice::Square => square_twist,
        Lattice::Honeycomb => honeycomb_twist,
    };
    let mut table: Vec<f64> = (0..period - 1).map(|i| twist(i).to_radians()).collect();
    let total: f64 = table.iter().sum();
    table.push(turns_per_period(lattice) * TAU - total);
    table
}

/// The twists between the `len` consecutive bases of a helix, in design order.
pub fn helix_twists(lattice: Lattice, len: usize) -> Vec<f64> {
    let table = twist_table(lattice);
    (0..len.saturating_sub(1))
        .map(|i| table[i % table.len()])
        .collect()
}

/// The starting point and orientation of the generation of a helix.
#[derive(Debug, Clone, Copy)]
pub struct HelixFrame {
    /// Axis point of the first generated base pair.
    pub start: DVec3,
    /// Unit vector along the axis, in generation order.
    pub direction: DVec3,
    /// Unit vector orthogonal to `direction`, the initial backbone to base axis before `rot`
    /// is applied.
    pub perp: DVec3,
    pub rot: f64,
}

fn rotate_about(v: DVec3, axis: DVec3, angle: f64) -> DVec3 {
    v.rotated_by(DRotor3::from_angle_plane(
        angle,
        DBivec3::from_normalized_axis(axis),
    ))
}

/// The generation frame of `helix` together with its twists in generation order.
///
/// Even helices are generated from their first position upward. Odd helices are generated
/// from their last position downward with the reversed twist table.
pub fn helix_frame(
    helix: &VirtualHelix,
    lattice: Lattice,
    parameters: &Parameters,
) -> (HelixFrame, Vec<f64>) {
    let direction = DVec3::unit_z();
    let perp = rotate_about(DVec3::unit_x(), direction, lattice.initial_perp_angle());
    let origin = lattice.helix_origin(helix, parameters);
    let mut twists = helix_twists(lattice, helix.len());
    if helix.is_even() {
        let frame = HelixFrame {
            start: origin,
            direction,
            perp,
            rot: 0.,
        };
        (frame, twists)
    } else {
        let total: f64 = twists.iter().sum();
        twists.reverse();
        let frame = HelixFrame {
            start: origin
                + direction * (helix.len().saturating_sub(1) as f64 * parameters.rise),
            direction: -direction,
            perp: -perp,
            rot: -(total % TAU),
        };
        (frame, twists)
    }
}

/// A region of a regenerated helix, in generation indices, whose number of bases changed by
/// `change`. Steps inside the region are stretched or compressed so that the region keeps the
/// length it had before the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthChange {
    pub begin: usize,
    pub end: usize,
    pub change: isize,
}

/// A double strand generated along a helix.
///
/// `forward[i]` is paired with `backward[n - 1 - i]`.
#[derive(Debug, Clone)]
pub struct DoubleStrand {
    pub forward: Vec<Nucleotide>,
    pub backward: Vec<Nucleotide>,
}

impl DoubleStrand {
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

pub struct StrandGenerator {
    rise: f64,
    cm_center_ds: f64,
}

impl StrandGenerator {
    pub fn new(parameters: &Parameters) -> Self {
        Self {
            rise: parameters.rise,
            cm_center_ds: parameters.cm_center_ds,
        }
    }

    /// The axial step between base `i` and base `i + 1`, for `i` in `0..nb_steps`.
    fn rises(&self, nb_steps: usize, length_changes: &[LengthChange]) -> Vec<f64> {
        let mut rises = vec![self.rise; nb_steps];
        for region in length_changes.iter().filter(|r| r.change != 0) {
            let size = region.end.saturating_sub(region.begin);
            if size == 0 {
                continue;
            }
            let delta = -self.rise * region.change as f64 / size as f64;
            for r in rises
                .iter_mut()
                .take(region.end.min(nb_steps))
                .skip(region.begin)
            {
                *r += delta;
            }
        }
        rises
    }

    /// Generate `n` base pairs along `frame`.
    ///
    /// `twists[i]` is the rotation between base `i` and base `i + 1`, so `twists` must contain
    /// exactly `n - 1` values.
    pub fn generate(
        &self,
        n: usize,
        frame: &HelixFrame,
        twists: &[f64],
        length_changes: &[LengthChange],
    ) -> Result<DoubleStrand, ConversionError> {
        if n == 0 {
            return Ok(DoubleStrand {
                forward: Vec::new(),
                backward: Vec::new(),
            });
        }
        if twists.len() != n - 1 {
            return Err(ConversionError::TwistLengthMismatch {
                expected: n - 1,
                got: twists.len(),
            });
        }
        let direction = frame.direction.normalized();
        let rises = self.rises(n - 1, length_changes);

        let mut a1 = rotate_about(frame.perp, direction, frame.rot);
        let mut axis_point = frame.start;
        let mut axis_points = Vec::with_capacity(n);
        let mut a1s = Vec::with_capacity(n);
        for i in 0..n {
            axis_points.push(axis_point);
            a1s.push(a1);
            if i + 1 < n {
                a1 = rotate_about(a1, direction, twists[i]).normalized();
                axis_point += direction * rises[i];
            }
        }

        let forward = axis_points
            .iter()
            .zip(a1s.iter())
            .map(|(p, a1)| Nucleotide::new(*p - *a1 * self.cm_center_ds, *a1, direction))
            .collect();
        let backward = axis_points
            .iter()
            .zip(a1s.iter())
            .rev()
            .map(|(p, a1)| Nucleotide::new(*p + *a1 * self.cm_center_ds, -*a1, -direction))
            .collect();
        Ok(DoubleStrand { forward, backward })
    }
}
