//! Static nearest-neighbor index over 3D points.
//!
//! [`KdTree`] is a balanced k-d tree built once over a fixed point set
//! and queried many times; there is no insertion or deletion. Nodes live
//! in a flat `Vec` and each node remembers the original index of its
//! point, so queries recover the matched element, not just its
//! coordinates. The tree is immutable after construction and can be
//! shared across query threads without synchronization.

use nalgebra::Point3;

use crate::error::{MatchError, Result};

#[derive(Debug, Clone)]
struct Node {
    point: Point3<f64>,
    /// Index of the point in the build-time input slice.
    item: usize,
    /// Split axis (0 = x, 1 = y, 2 = z).
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// A balanced k-d tree over 3D points supporting exact nearest-neighbor
/// queries.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use surfmatch::spatial::KdTree;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
/// ];
/// let tree = KdTree::build(&points).unwrap();
///
/// let (index, distance) = tree.nearest(&Point3::new(0.1, 0.0, 0.0));
/// assert_eq!(index, 0);
/// assert!((distance - 0.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct KdTree {
    nodes: Vec<Node>,
    root: usize,
}

impl KdTree {
    /// Build a tree over `points` by recursive median split.
    ///
    /// O(N log N). Returns [`MatchError::EmptyReference`] for an empty
    /// input; an empty tree has no valid nearest-neighbor answer.
    pub fn build(points: &[Point3<f64>]) -> Result<KdTree> {
        if points.is_empty() {
            return Err(MatchError::EmptyReference);
        }

        let mut items: Vec<(Point3<f64>, usize)> =
            points.iter().copied().zip(0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());
        let root = build_subtree(&mut items, 0, &mut nodes);
        Ok(KdTree { nodes, root })
    }

    /// Number of indexed points. Never zero.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Find the indexed point nearest to `query`.
    ///
    /// Returns `(original index, Euclidean distance)`. Among exactly
    /// equidistant points the lowest original index wins, so results are
    /// reproducible run to run.
    pub fn nearest(&self, query: &Point3<f64>) -> (usize, f64) {
        let mut best_d2 = f64::INFINITY;
        let mut best_item = usize::MAX;
        self.search(self.root, query, &mut best_d2, &mut best_item);
        (best_item, best_d2.sqrt())
    }

    fn search(&self, node: usize, query: &Point3<f64>, best_d2: &mut f64, best_item: &mut usize) {
        let n = &self.nodes[node];

        let d2 = (n.point - query).norm_squared();
        if d2 < *best_d2 || (d2 == *best_d2 && n.item < *best_item) {
            *best_d2 = d2;
            *best_item = n.item;
        }

        let diff = query[n.axis] - n.point[n.axis];
        let (near, far) = if diff < 0.0 {
            (n.left, n.right)
        } else {
            (n.right, n.left)
        };

        if let Some(near) = near {
            self.search(near, query, best_d2, best_item);
        }
        // <= keeps equidistant candidates on the far side reachable, so
        // the lowest-index tie-break holds across the splitting plane
        if let Some(far) = far {
            if diff * diff <= *best_d2 {
                self.search(far, query, best_d2, best_item);
            }
        }
    }
}

/// Recursively build the subtree for `items`, appending nodes and
/// returning the subtree root's position in `nodes`.
fn build_subtree(
    items: &mut [(Point3<f64>, usize)],
    depth: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let axis = depth % 3;
    let median = items.len() / 2;

    // total_cmp plus the original index gives a total order, so the
    // partition (and therefore the tree shape) is deterministic even
    // with duplicate coordinates
    items.select_nth_unstable_by(median, |a, b| {
        a.0[axis].total_cmp(&b.0[axis]).then(a.1.cmp(&b.1))
    });

    let (point, item) = items[median];
    let node = nodes.len();
    nodes.push(Node {
        point,
        item,
        axis,
        left: None,
        right: None,
    });

    if median > 0 {
        let left = build_subtree(&mut items[..median], depth + 1, nodes);
        nodes[node].left = Some(left);
    }
    if median + 1 < items.len() {
        let right = build_subtree(&mut items[median + 1..], depth + 1, nodes);
        nodes[node].right = Some(right);
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Reference answer: linear scan with the same tie-break.
    fn brute_force(points: &[Point3<f64>], query: &Point3<f64>) -> (usize, f64) {
        let mut best_d2 = f64::INFINITY;
        let mut best = usize::MAX;
        for (i, p) in points.iter().enumerate() {
            let d2 = (p - query).norm_squared();
            if d2 < best_d2 {
                best_d2 = d2;
                best = i;
            }
        }
        (best, best_d2.sqrt())
    }

    fn random_points(rng: &mut StdRng, n: usize) -> Vec<Point3<f64>> {
        (0..n)
            .map(|_| {
                Point3::new(
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            KdTree::build(&[]),
            Err(MatchError::EmptyReference)
        ));
    }

    #[test]
    fn test_single_point_always_matches() {
        let points = vec![Point3::new(1.0, 2.0, 3.0)];
        let tree = KdTree::build(&points).unwrap();

        for query in [
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(100.0, -50.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ] {
            let (index, _) = tree.nearest(&query);
            assert_eq!(index, 0);
        }
    }

    #[test]
    fn test_self_match_distance_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = random_points(&mut rng, 64);
        let tree = KdTree::build(&points).unwrap();

        for (i, p) in points.iter().enumerate() {
            let (index, distance) = tree.nearest(p);
            assert_eq!(index, i);
            assert_eq!(distance, 0.0);
        }
    }

    #[test]
    fn test_agrees_with_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 2, 3, 10, 100, 500] {
            let points = random_points(&mut rng, n);
            let tree = KdTree::build(&points).unwrap();

            for _ in 0..200 {
                let query = Point3::new(
                    rng.random_range(-12.0..12.0),
                    rng.random_range(-12.0..12.0),
                    rng.random_range(-12.0..12.0),
                );
                let (bi, bd) = brute_force(&points, &query);
                let (ti, td) = tree.nearest(&query);
                assert_eq!(ti, bi, "n={}, query={:?}", n, query);
                assert_eq!(td, bd, "n={}, query={:?}", n, query);
            }
        }
    }

    #[test]
    fn test_tie_break_prefers_lowest_index() {
        // Three coincident points plus a decoy; the duplicate with the
        // lowest index must win
        let points = vec![
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ];
        let tree = KdTree::build(&points).unwrap();

        let (index, distance) = tree.nearest(&Point3::new(1.0, 1.0, 1.0));
        assert_eq!(index, 1);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_symmetric_tie_break_is_deterministic() {
        // Query exactly between two points: equidistant, lowest index wins
        let points = vec![Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let tree = KdTree::build(&points).unwrap();

        let (index, distance) = tree.nearest(&Point3::new(0.0, 0.0, 0.0));
        assert_eq!(index, 0);
        assert!((distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = random_points(&mut rng, 200);
        let queries = random_points(&mut rng, 50);

        let a = KdTree::build(&points).unwrap();
        let b = KdTree::build(&points).unwrap();
        for q in &queries {
            assert_eq!(a.nearest(q), b.nearest(q));
        }
    }
}
