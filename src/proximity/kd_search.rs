use crate::cache::BucketedPoint;
use crate::orbit::CartesianPoint;
use kiddo::{KdTree, SquaredEuclidean};
use std::collections::HashMap;

/// Exact radius search over Earth-centered Cartesian points.
///
/// Items sharing a bucketed position are stored once in the tree and fanned out
/// on lookup, so duplicate debris coordinates never crowd a single leaf.
pub struct CartesianIndex {
    tree: KdTree<f64, 3>,
    groups: Vec<Vec<usize>>,
}

impl CartesianIndex {
    /// Relative slack added to the query radius; callers re-check the exact distance.
    const RADIUS_SLACK: f64 = 1e-9;

    pub fn build<I>(items: I) -> Self
    where I: IntoIterator<Item = (usize, BucketedPoint, CartesianPoint)> {
        let mut tree: KdTree<f64, 3> = KdTree::new();
        let mut group_of: HashMap<BucketedPoint, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (item, bucket, point) in items {
            if let Some(&group) = group_of.get(&bucket) {
                groups[group].push(item);
                continue;
            }
            let group = groups.len();
            group_of.insert(bucket, group);
            groups.push(vec![item]);
            tree.add(&point.as_array(), group as u64);
        }
        Self { tree, groups }
    }

    pub fn len(&self) -> usize { self.groups.iter().map(Vec::len).sum() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    /// Items whose point lies within `radius_km` of `center`, in insertion order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn within(&self, center: &CartesianPoint, radius_km: f64) -> Vec<usize> {
        let radius_sq = radius_km.powi(2) * (1.0 + Self::RADIUS_SLACK);
        let mut hits: Vec<usize> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(&center.as_array(), radius_sq)
            .into_iter()
            .flat_map(|neighbour| self.groups[neighbour.item as usize].iter().copied())
            .collect();
        hits.sort_unstable();
        hits
    }
}
