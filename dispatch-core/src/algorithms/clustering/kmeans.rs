//! This module contains a K-Means algorithm implementation with K-Means++ seeding.

#[cfg(test)]
#[path = "../../../tests/unit/algorithms/clustering/kmeans_test.rs"]
mod kmeans_test;

use crate::algorithms::geometry::Point;
use crate::utils::{Float, Random};

/// A group of points produced by clustering.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    /// A mean of member points.
    pub centroid: Point,
    /// Indices of member points in the original input, ascending.
    pub members: Vec<usize>,
}

/// Creates up to `k` clusters of points using the K-Means algorithm.
///
/// Initial centers are chosen by K-Means++ seeding using `random`, so the result is reproducible
/// for the same input and random sequence. Fewer clusters than requested are returned when the
/// input has fewer distinct points than `k` or when an emptied cluster cannot be re-seeded.
pub fn create_kmeans(points: &[Point], k: usize, max_iterations: usize, random: &dyn Random) -> Vec<Cluster> {
    if points.is_empty() || k == 0 {
        return Vec::default();
    }

    KMeans::new(k.min(points.len()), max_iterations.max(1)).calculate(points, random)
}

struct KMeans {
    k: usize,
    max_iterations: usize,
}

impl KMeans {
    fn new(k: usize, max_iterations: usize) -> Self {
        Self { k, max_iterations }
    }

    fn calculate(&self, data: &[Point], random: &dyn Random) -> Vec<Cluster> {
        let mut centers = self.initialize_centers(data, random);
        let mut assignments = vec![usize::MAX; data.len()];

        for _ in 0..self.max_iterations {
            let changed = assign_points_to_centers(data, &centers, &mut assignments);
            let reseeded = update_centers(data, &mut centers, &mut assignments);

            if !changed && !reseeded {
                break;
            }
        }

        collect_clusters(data, centers.len(), &assignments)
    }

    fn initialize_centers(&self, data: &[Point], random: &dyn Random) -> Vec<Point> {
        let mut centers = Vec::with_capacity(self.k);
        centers.push(data[random.uniform_index(data.len())]);

        // squared distance from each point to its nearest selected center
        let mut weights = data.iter().map(|point| point.squared_distance_to_point(&centers[0])).collect::<Vec<_>>();

        while centers.len() < self.k {
            let Some(next) = random.weighted_index(weights.as_slice()) else {
                // all remaining points coincide with selected centers
                break;
            };

            let center = data[next];
            centers.push(center);

            data.iter().zip(weights.iter_mut()).for_each(|(point, weight)| {
                *weight = weight.min(point.squared_distance_to_point(&center));
            });
        }

        centers
    }
}

/// Assigns each point to its nearest center, ties go to the center with the lowest index.
/// Returns true if any assignment has changed.
fn assign_points_to_centers(data: &[Point], centers: &[Point], assignments: &mut [usize]) -> bool {
    data.iter().zip(assignments.iter_mut()).fold(false, |changed, (point, assignment)| {
        let nearest = nearest_center(point, centers);
        let is_changed = *assignment != nearest;
        *assignment = nearest;

        changed || is_changed
    })
}

fn nearest_center(point: &Point, centers: &[Point]) -> usize {
    let mut nearest = (0, Float::INFINITY);

    for (index, center) in centers.iter().enumerate() {
        let distance = point.squared_distance_to_point(center);
        if distance < nearest.1 {
            nearest = (index, distance);
        }
    }

    nearest.0
}

/// Moves every center to the mean of its members. An empty cluster takes over the point which is
/// the farthest from its own center among clusters with more than one member. Returns true if
/// any cluster was re-seeded.
fn update_centers(data: &[Point], centers: &mut [Point], assignments: &mut [usize]) -> bool {
    let mut sizes = vec![0_usize; centers.len()];
    assignments.iter().for_each(|&cluster| sizes[cluster] += 1);

    let mut reseeded = false;

    for empty in 0..centers.len() {
        if sizes[empty] > 0 {
            continue;
        }

        let farthest = data
            .iter()
            .enumerate()
            .filter(|(index, _)| sizes[assignments[*index]] > 1)
            .map(|(index, point)| (index, point.squared_distance_to_point(&centers[assignments[index]])))
            .fold(None, |farthest: Option<(usize, Float)>, (index, distance)| match farthest {
                Some((_, max_distance)) if max_distance >= distance => farthest,
                _ => Some((index, distance)),
            });

        if let Some((index, _)) = farthest {
            sizes[assignments[index]] -= 1;
            sizes[empty] += 1;
            assignments[index] = empty;
            centers[empty] = data[index];
            reseeded = true;
        }
    }

    for (cluster, center) in centers.iter_mut().enumerate() {
        let members = data.iter().zip(assignments.iter()).filter(|(_, assigned)| **assigned == cluster);
        if let Some(centroid) = Point::centroid(members.map(|(point, _)| point)) {
            *center = centroid;
        }
    }

    reseeded
}

fn collect_clusters(data: &[Point], size: usize, assignments: &[usize]) -> Vec<Cluster> {
    let mut members = vec![Vec::new(); size];
    assignments.iter().enumerate().for_each(|(index, &cluster)| members[cluster].push(index));

    members
        .into_iter()
        .filter_map(|members| {
            Point::centroid(members.iter().map(|&index| &data[index])).map(|centroid| Cluster { centroid, members })
        })
        .collect()
}
