#![allow(dead_code)]
use std::f64::consts::PI;

use geo::{rotate::RotatePoint, Coordinate, Line, Rect};

use rand::{seq::SliceRandom, Rng};
use rand_distr::Standard;

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

#[inline]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Line<f64> {
    Line::new(uniform_point(rng, bounds), uniform_point(rng, bounds))
}

#[inline]
pub fn uniform_line_with_length<R: Rng>(rng: &mut R, bounds: Rect<f64>, length: f64) -> Line<f64> {
    let start = uniform_point(rng, bounds);
    let line = Line::new(start, start + (length, 0.).into());
    let angle = rng.sample::<f64, _>(Standard) * 2. * PI;
    line.rotate_around_point(angle, start.into())
}

/// `n` lines whose x-ranges are pairwise disjoint, in random input order.
///
/// Line `i` spans roughly `[2i, 2i + 1]` in x, with both end points at a
/// random height in `[0, height]`.
pub fn disjoint_lines<R: Rng>(rng: &mut R, n: usize, height: f64) -> Vec<Line<f64>> {
    let mut lines: Vec<_> = (0..n)
        .map(|i| {
            let x = 2. * i as f64;
            let [dx1, dx2, y1, y2]: [f64; 4] = rng.sample(Standard);
            Line::new(
                Coordinate {
                    x: x + dx1 / 2.,
                    y: y1 * height,
                },
                Coordinate {
                    x: x + 1. + dx2 / 2.,
                    y: y2 * height,
                },
            )
        })
        .collect();
    lines.shuffle(rng);
    lines
}

/// Generator of uniform lines in `[0, bbox]`, each of length about
/// `bbox / 2^scale`.
pub fn scaled_generator(bbox: Coordinate<f64>, scale: usize) -> impl Fn() -> Line<f64> {
    let bounds = Rect::new(Coordinate { x: 0., y: 0. }, bbox);
    let length = bbox.x.min(bbox.y) / (1 << scale) as f64;
    move || uniform_line_with_length(&mut rand::thread_rng(), bounds, length)
}
