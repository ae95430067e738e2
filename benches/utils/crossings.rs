#![allow(dead_code)]

use geo::Line;
use rstar::{RTree, RTreeObject};
use segment_crossings::{
    brute_force_intersections, find_intersections_with, ActiveOrder, Predicates, SweepConfig,
};

struct GeomWithData<R: RTreeObject, T>(R, T);

impl<R: RTreeObject, T> RTreeObject for GeomWithData<R, T> {
    type Envelope = R::Envelope;

    fn envelope(&self) -> Self::Envelope {
        self.0.envelope()
    }
}

pub fn count_sweep(lines: &[Line<f64>]) -> usize {
    find_intersections_with(lines, &SweepConfig::default())
        .expect("sweep failed")
        .len()
}

pub fn count_insertion_sweep(lines: &[Line<f64>]) -> usize {
    let config = SweepConfig::new().with_order(ActiveOrder::InsertionKey);
    find_intersections_with(lines, &config)
        .expect("insertion sweep failed")
        .len()
}

pub fn count_brute(lines: &[Line<f64>]) -> usize {
    brute_force_intersections(lines, &SweepConfig::default())
        .expect("brute force failed")
        .len()
}

/// Count crossings among pairs with overlapping bounding boxes.
pub fn count_rtree(lines: &[Line<f64>]) -> usize {
    let predicates = Predicates::default();
    let lines: Vec<_> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| GeomWithData(*l, i))
        .collect();

    let tree = RTree::bulk_load(lines);
    tree.intersection_candidates_with_other_tree(&tree)
        .filter(|(l1, l2)| l1.1 < l2.1 && predicates.segments_intersect(&l1.0, &l2.0))
        .count()
}
