//! K-means over RGB points.
//!
//! Termination follows the usual "epsilon or max iterations" rule: a run stops
//! once no center moves more than `epsilon`, or after `max_iter` updates. The
//! best of `attempts` runs (lowest within-cluster squared error) wins.

use rand::Rng;

/// How initial centers are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KMeansInit {
    /// k-means++ seeding, weighted by squared distance to the chosen centers.
    PlusPlus,
    /// Random distinct points from the input.
    Random,
}

#[derive(Debug, Clone)]
pub struct KMeansOptions {
    pub k: usize,
    pub init: KMeansInit,
    pub max_iter: usize,
    pub epsilon: f32,
    pub attempts: usize,
}

/// One cluster: its center and how many points it holds. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub center: [f32; 3],
    pub size: usize,
}

/// Cluster `points` into at most `opts.k` groups.
///
/// Fewer clusters come back when the input has fewer distinct values than
/// `k`, or when a center ends up with no points.
pub fn kmeans<R: Rng + ?Sized>(points: &[[f32; 3]], opts: &KMeansOptions, rng: &mut R) -> Vec<Cluster> {
    if points.is_empty() || opts.k == 0 {
        return Vec::new();
    }

    let mut best: Option<(f64, Vec<Cluster>)> = None;
    for _ in 0..opts.attempts.max(1) {
        let centers = match opts.init {
            KMeansInit::PlusPlus => seed_plus_plus(points, opts.k, rng),
            KMeansInit::Random => seed_random(points, opts.k, rng),
        };
        let (compactness, clusters) = lloyd(points, centers, opts.max_iter, opts.epsilon);
        if best.as_ref().map_or(true, |(c, _)| compactness < *c) {
            best = Some((compactness, clusters));
        }
    }

    best.map(|(_, clusters)| clusters).unwrap_or_default()
}

fn dist2(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

fn nearest(point: &[f32; 3], centers: &[[f32; 3]]) -> (usize, f32) {
    let mut best = (0, f32::MAX);
    for (i, c) in centers.iter().enumerate() {
        let d = dist2(point, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

fn seed_plus_plus<R: Rng + ?Sized>(points: &[[f32; 3]], k: usize, rng: &mut R) -> Vec<[f32; 3]> {
    let mut centers = vec![points[rng.random_range(0..points.len())]];
    let mut weights: Vec<f64> = points.iter().map(|p| dist2(p, &centers[0]) as f64).collect();

    while centers.len() < k {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            // every remaining point already sits on a center
            break;
        }
        let mut target = rng.random::<f64>() * total;
        let mut chosen = points.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            if target < *w {
                chosen = i;
                break;
            }
            target -= w;
        }
        let center = points[chosen];
        centers.push(center);
        for (w, p) in weights.iter_mut().zip(points) {
            *w = w.min(dist2(p, &center) as f64);
        }
    }
    centers
}

fn seed_random<R: Rng + ?Sized>(points: &[[f32; 3]], k: usize, rng: &mut R) -> Vec<[f32; 3]> {
    let mut centers: Vec<[f32; 3]> = Vec::with_capacity(k);
    // Bounded so a low-variety image cannot spin forever
    let mut tries = 0;
    while centers.len() < k && tries < k * 20 {
        let p = points[rng.random_range(0..points.len())];
        if !centers.contains(&p) {
            centers.push(p);
        }
        tries += 1;
    }
    if centers.len() < k {
        for p in points {
            if centers.len() == k {
                break;
            }
            if !centers.contains(p) {
                centers.push(*p);
            }
        }
    }
    centers
}

/// Lloyd iterations. Returns (sum of squared distances, non-empty clusters).
fn lloyd(
    points: &[[f32; 3]],
    mut centers: Vec<[f32; 3]>,
    max_iter: usize,
    epsilon: f32,
) -> (f64, Vec<Cluster>) {
    let k = centers.len();
    let mut labels = vec![0usize; points.len()];

    for _ in 0..max_iter.max(1) {
        for (label, p) in labels.iter_mut().zip(points) {
            *label = nearest(p, &centers).0;
        }

        let mut sums = vec![[0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (label, p) in labels.iter().zip(points) {
            counts[*label] += 1;
            for c in 0..3 {
                sums[*label][c] += p[c] as f64;
            }
        }

        let mut max_shift = 0f32;
        for i in 0..k {
            if counts[i] == 0 {
                continue;
            }
            let n = counts[i] as f64;
            let updated = [
                (sums[i][0] / n) as f32,
                (sums[i][1] / n) as f32,
                (sums[i][2] / n) as f32,
            ];
            max_shift = max_shift.max(dist2(&centers[i], &updated).sqrt());
            centers[i] = updated;
        }

        if max_shift <= epsilon {
            break;
        }
    }

    let mut counts = vec![0usize; k];
    let mut compactness = 0f64;
    for p in points {
        let (i, d) = nearest(p, &centers);
        counts[i] += 1;
        compactness += d as f64;
    }

    let clusters = centers
        .into_iter()
        .zip(counts)
        .filter(|(_, size)| *size > 0)
        .map(|(center, size)| Cluster { center, size })
        .collect();
    (compactness, clusters)
}
