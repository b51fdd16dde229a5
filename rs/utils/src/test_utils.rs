use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Generate a random vector with a given dimension
pub fn generate_random_vector(dimension: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    let mut vector = vec![];
    for _ in 0..dimension {
        vector.push(rng.gen::<f32>());
    }
    vector
}

/// Generate `points_per_center` points scattered uniformly within `spread` of each center.
/// Points are emitted center by center, so point `i` belongs to center `i / points_per_center`.
pub fn generate_blobs(
    centers: &[Vec<f32>],
    points_per_center: usize,
    spread: f32,
    seed: u64,
) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(centers.len() * points_per_center);
    for center in centers {
        for _ in 0..points_per_center {
            let point = center
                .iter()
                .map(|&c| c + rng.gen_range(-spread..=spread))
                .collect();
            points.push(point);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_blobs() {
        let centers = vec![vec![0.0, 0.0], vec![100.0, 100.0]];
        let points = generate_blobs(&centers, 10, 1.0, 7);
        assert_eq!(points.len(), 20);
        for (i, point) in points.iter().enumerate() {
            let center = &centers[i / 10];
            for (x, c) in point.iter().zip(center) {
                assert!((x - c).abs() <= 1.0);
            }
        }
        assert_eq!(points, generate_blobs(&centers, 10, 1.0, 7));
    }
}
