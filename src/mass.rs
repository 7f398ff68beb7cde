//! Mass sampling schemes.
//!
//! Two schemes exist side by side: [`UniformMasses`] is what ends up in the
//! generated system file, [`ZipfMasses`] is the heavy-tailed, rank based
//! scheme the distribution charts and the console summary are built from.
//! Both shuffle their output so that the mass carries no information about
//! the order in which bodies were generated.

use rand::{seq::SliceRandom, Rng};
use rand_distr::{Distribution, Uniform};

use crate::error::{ensure_positive, AutogenError, Result};

/// A way of producing the masses of a whole collection of bodies at once.
pub trait MassDistribution {
    fn sample_masses<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64>;
}

/// Masses drawn uniformly from `[low, high]`.
#[derive(Clone, Debug)]
pub struct UniformMasses {
    low: f64,
    high: f64,
    distr: Uniform<f64>,
}

impl UniformMasses {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        ensure_positive("mass lower bound", low)?;
        ensure_positive("mass upper bound", high)?;
        if low > high {
            return Err(AutogenError::InvalidParameter {
                name: "mass lower bound",
                reason: format!("{low} exceeds upper bound {high}"),
            });
        }

        Ok(Self {
            low,
            high,
            distr: Uniform::new_inclusive(low, high),
        })
    }

    /// The generator's scheme: uniform over `[mass_scale / 10, mass_scale * 2]`.
    pub fn from_scale(mass_scale: f64) -> Result<Self> {
        ensure_positive("mass_scale", mass_scale)?;
        Self::new(mass_scale / 10., mass_scale * 2.)
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl MassDistribution for UniformMasses {
    fn sample_masses<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        let mut masses: Vec<f64> = (0..n).map(|_| self.distr.sample(rng)).collect();
        masses.shuffle(rng);
        masses
    }
}

/// Masses following the Zipf probability mass function over the ranks `1..=n`,
/// scaled by `mass_scale * n`.
///
/// The values themselves are deterministic, only their order is random.
#[derive(Clone, Debug)]
pub struct ZipfMasses {
    exponent: f64,
    mass_scale: f64,
    zeta: f64,
}

impl ZipfMasses {
    /// `exponent` has to be larger than one for the distribution to be normalizable.
    pub fn new(exponent: f64, mass_scale: f64) -> Result<Self> {
        if !(exponent.is_finite() && exponent > 1.) {
            return Err(AutogenError::InvalidParameter {
                name: "zipf_exponent",
                reason: format!("expected a finite number larger than 1, got {exponent}"),
            });
        }
        ensure_positive("mass_scale", mass_scale)?;

        Ok(Self {
            exponent,
            mass_scale,
            zeta: riemann_zeta(exponent),
        })
    }

    /// Masses in rank order, i.e. monotonically decreasing.
    pub fn ranked(&self, n: usize) -> Vec<f64> {
        let scale = self.mass_scale * n as f64;
        (1..=n)
            .map(|k| zipf_weight(k as f64, self.exponent, self.zeta) * scale)
            .collect()
    }
}

impl MassDistribution for ZipfMasses {
    fn sample_masses<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        let mut masses = self.ranked(n);
        masses.shuffle(rng);
        masses
    }
}

/// Probability of rank `k` (starting at one) under a Zipf distribution with exponent `a > 1`.
pub fn zipf_pmf(k: u64, a: f64) -> f64 {
    if k == 0 {
        return 0.;
    }
    zipf_weight(k as f64, a, riemann_zeta(a))
}

fn zipf_weight(k: f64, a: f64, zeta: f64) -> f64 {
    k.powf(-a) / zeta
}

const ZETA_DIRECT_TERMS: u32 = 10;

/// B_2j / (2j)! for j = 1..=5.
const EULER_MACLAURIN: [f64; 5] = [
    1. / 12.,
    -1. / 720.,
    1. / 30_240.,
    -1. / 1_209_600.,
    1. / 47_900_160.,
];

/// Riemann zeta function for real `s > 1`.
///
/// Sums the first terms directly and approximates the tail with the
/// Euler-Maclaurin formula.
pub fn riemann_zeta(s: f64) -> f64 {
    let n = f64::from(ZETA_DIRECT_TERMS);

    let mut sum: f64 = (1..ZETA_DIRECT_TERMS).map(|k| f64::from(k).powf(-s)).sum();
    sum += n.powf(1. - s) / (s - 1.) + 0.5 * n.powf(-s);

    // rising = s (s + 1) ... (s + 2j - 2), power = n^(-s - 2j + 1)
    let mut rising = s;
    let mut power = n.powf(-s - 1.);
    for (j, coeff) in EULER_MACLAURIN.iter().enumerate() {
        sum += coeff * rising * power;

        let j = j as f64;
        rising *= (s + 2. * j + 1.) * (s + 2. * j + 2.);
        power /= n * n;
    }

    sum
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_riemann_zeta() {
        assert_relative_eq!(riemann_zeta(2.), PI * PI / 6., max_relative = 1e-12);
        assert_relative_eq!(riemann_zeta(4.), PI.powi(4) / 90., max_relative = 1e-12);
        assert_relative_eq!(riemann_zeta(1.5), 2.612_375_348_685_488, max_relative = 1e-10);
        assert_relative_eq!(riemann_zeta(1.01), 100.577_943_338_497, max_relative = 1e-8);
    }

    #[test]
    fn test_zipf_pmf() {
        assert_abs_diff_eq!(zipf_pmf(1, 2.), 6. / (PI * PI), epsilon = 1e-12);
        assert_eq!(zipf_pmf(0, 2.), 0.);

        let total: f64 = (1..100_000).map(|k| zipf_pmf(k, 3.)).sum();
        assert_abs_diff_eq!(total, 1., epsilon = 1e-8);
    }

    #[test]
    fn test_uniform_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let masses = UniformMasses::from_scale(10_000.).unwrap();
        assert_eq!(masses.low(), 1_000.);
        assert_eq!(masses.high(), 20_000.);

        let sample = masses.sample_masses(1_000, &mut rng);
        assert_eq!(sample.len(), 1_000);
        assert!(sample.iter().all(|&m| (1_000. ..=20_000.).contains(&m)));
    }

    #[test]
    fn test_uniform_rejects_bad_scale() {
        assert!(UniformMasses::from_scale(0.).is_err());
        assert!(UniformMasses::from_scale(-1.).is_err());
        assert!(UniformMasses::new(3., 2.).is_err());
    }

    #[test]
    fn test_zipf_ranked() {
        let zipf = ZipfMasses::new(1.5, 10_000.).unwrap();
        let ranked = zipf.ranked(100);

        assert_eq!(ranked.len(), 100);
        assert!(ranked.windows(2).all(|w| w[0] > w[1]));
        assert_relative_eq!(
            ranked[0],
            10_000. * 100. / riemann_zeta(1.5),
            max_relative = 1e-12
        );
        // heavy tail: rank 1 versus rank 100 differ by 100^1.5
        assert_relative_eq!(ranked[0] / ranked[99], 1_000., max_relative = 1e-9);
    }

    #[test]
    fn test_zipf_shuffle_keeps_values() {
        let mut rng = StdRng::seed_from_u64(3);
        let zipf = ZipfMasses::new(1.5, 10.).unwrap();

        let mut sample = zipf.sample_masses(50, &mut rng);
        sample.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(sample, zipf.ranked(50));
    }

    #[test]
    fn test_zipf_sample_is_shuffled() {
        let mut rng = StdRng::seed_from_u64(3);
        let zipf = ZipfMasses::new(1.5, 10.).unwrap();

        let sample = zipf.sample_masses(50, &mut rng);
        assert_ne!(sample, zipf.ranked(50));
        assert!(sample.windows(2).any(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zipf_ranked_matches_pmf() {
        let zipf = ZipfMasses::new(2., 3.).unwrap();
        for (k, mass) in (1..).zip(zipf.ranked(20)) {
            assert_relative_eq!(mass, zipf_pmf(k, 2.) * 3. * 20., max_relative = 1e-12);
        }
    }

    #[test]
    fn test_zipf_rejects_bad_exponent() {
        assert!(ZipfMasses::new(1., 10.).is_err());
        assert!(ZipfMasses::new(0.5, 10.).is_err());
        assert!(ZipfMasses::new(f64::NAN, 10.).is_err());
        assert!(ZipfMasses::new(2., 0.).is_err());
    }

    #[test]
    fn test_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(UniformMasses::from_scale(1.)
            .unwrap()
            .sample_masses(0, &mut rng)
            .is_empty());
        assert!(ZipfMasses::new(2., 1.).unwrap().ranked(0).is_empty());
    }
}
