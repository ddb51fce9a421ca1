//! Procedural city layout.
//!
//! Scatters box buildings over a square around the origin and reports each
//! one the way the agents consume it: a centre point and a roof height.

use glam::DVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skypatrol_core::types::ObstacleSnapshot;

/// Parameters of the generated city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityLayout {
    pub building_count: usize,
    /// Side length of the square the buildings are scattered over.
    pub city_size: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl Default for CityLayout {
    fn default() -> Self {
        Self {
            building_count: 100,
            city_size: 80.0,
            min_height: 5.0,
            max_height: 30.0,
        }
    }
}

/// Generate the obstacle list for a city. Building centres sit at half their
/// height, like the meshes a renderer would place.
pub fn generate_city(rng: &mut ChaCha8Rng, layout: &CityLayout) -> Vec<ObstacleSnapshot> {
    let height_span = (layout.max_height - layout.min_height).max(0.0);
    (0..layout.building_count)
        .map(|_| {
            let x = (rng.gen::<f64>() - 0.5) * layout.city_size;
            let z = (rng.gen::<f64>() - 0.5) * layout.city_size;
            let height = layout.min_height + rng.gen::<f64>() * height_span;
            ObstacleSnapshot::new(DVec3::new(x, height / 2.0, z), height)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_city_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let layout = CityLayout::default();
        let city = generate_city(&mut rng, &layout);
        assert_eq!(city.len(), 100);
        for b in &city {
            assert!(b.position.x.abs() <= 40.0 && b.position.z.abs() <= 40.0);
            assert!(b.approximate_height >= 5.0 && b.approximate_height < 30.0);
            assert!((b.position.y - b.approximate_height / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_city_is_seeded() {
        let layout = CityLayout::default();
        let a = generate_city(&mut ChaCha8Rng::seed_from_u64(1), &layout);
        let b = generate_city(&mut ChaCha8Rng::seed_from_u64(1), &layout);
        let c = generate_city(&mut ChaCha8Rng::seed_from_u64(2), &layout);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
