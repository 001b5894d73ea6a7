use glam::Vec2;

/// Seed of the generator behind [`load_points`].
const POINTS_SEED: u64 = 0x5eed_0f_b0b5;

/// An enum to allow for safe selection of the number of generated test points.
#[derive(Copy, Clone, Debug)]
pub enum NumPoints {
    OneHundred,
    OneThousand,
    TenThousand,
    OneHundredThousand,
}

impl TryFrom<u32> for NumPoints {
    type Error = &'static str;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(Self::OneHundred),
            1000 => Ok(Self::OneThousand),
            10_000 => Ok(Self::TenThousand),
            100_000 => Ok(Self::OneHundredThousand),
            _ => Err("Invalid number of points"),
        }
    }
}

impl From<&NumPoints> for usize {
    fn from(value: &NumPoints) -> Self {
        match value {
            NumPoints::OneHundred => 100,
            NumPoints::OneThousand => 1000,
            NumPoints::TenThousand => 10_000,
            NumPoints::OneHundredThousand => 100_000,
        }
    }
}

impl From<NumPoints> for usize {
    fn from(value: NumPoints) -> Self {
        Self::from(&value)
    }
}

/// Generate deterministic points for testing.
///
/// # Arguments
/// * `number` - the selected number of points from the [NumPoints] enum.
/// * `max_value` - the max and min value for the returned point, the numbers returned will be
/// between -max_value and +max_value.
///
/// # Returns
/// A list of Vec2 points with x and y between -max_value and +max_value. This is guaranteed to be
/// deterministic across calls with the same input.
pub fn load_points(number: &NumPoints, max_value: f32) -> Vec<Vec2> {
    let number: usize = number.into();
    let rng = fastrand::Rng::with_seed(POINTS_SEED);

    (0..number)
        .map(|_| {
            let x = rng.f32();
            let y = rng.f32();
            max_value * 2. * (Vec2::new(x, y) - 0.5)
        })
        .collect()
}

/// Returns `samples + 1` evenly spaced points of the line segment `a` - `b`
/// including both end points.
pub fn sample_segment(a: Vec2, b: Vec2, samples: u32) -> impl Iterator<Item = Vec2> {
    let samples = samples.max(1);
    (0..=samples).map(move |i| a.lerp(b, i as f32 / samples as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_points() {
        let points = load_points(&NumPoints::OneThousand, 20.);
        assert_eq!(points.len(), 1000);
        assert!(points
            .iter()
            .all(|p| p.cmpge(Vec2::splat(-20.)).all() && p.cmple(Vec2::splat(20.)).all()));
        assert_eq!(points, load_points(&NumPoints::OneThousand, 20.));
    }

    #[test]
    fn test_sample_segment() {
        let points: Vec<Vec2> = sample_segment(Vec2::ZERO, Vec2::new(4., 2.), 4).collect();
        assert_eq!(
            points,
            vec![
                Vec2::ZERO,
                Vec2::new(1., 0.5),
                Vec2::new(2., 1.),
                Vec2::new(3., 1.5),
                Vec2::new(4., 2.),
            ]
        );
    }
}
