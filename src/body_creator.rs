use nalgebra::Vector3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{
    body::{Body, BodySamples},
    error::{ensure_positive, Result},
    mass::MassDistribution,
};

pub trait BodyCreator {
    /// Sample the attributes of `n` bodies.
    fn create_samples(&mut self, n: usize) -> BodySamples;

    /// Density shared by every body this creator produces.
    fn density(&self) -> f64;

    fn create_bodies(&mut self, n: usize) -> Vec<Body> {
        let density = self.density();
        self.create_samples(n).into_bodies(density)
    }
}

/// Creates bodies with positions and velocities drawn component-wise
/// from the given distributions, and masses from a [`MassDistribution`].
///
/// All positions are drawn first, then all velocities, then the masses.
#[derive(Clone)]
pub struct DistrBodyCreator<R, PD, VD, MD>
where
    R: Rng,
    PD: Distribution<f64>,
    VD: Distribution<f64>,
    MD: MassDistribution,
{
    rng: R,
    position_distr: PD,
    velocity_distr: VD,
    mass_distr: MD,
    density: f64,
}

impl<PD, VD, MD> DistrBodyCreator<StdRng, PD, VD, MD>
where
    PD: Distribution<f64>,
    VD: Distribution<f64>,
    MD: MassDistribution,
{
    /// Creator seeded from operating system entropy.
    pub fn new(position_distr: PD, velocity_distr: VD, mass_distr: MD, density: f64) -> Self {
        Self::rng(
            position_distr,
            velocity_distr,
            mass_distr,
            density,
            StdRng::from_entropy(),
        )
    }
}

impl<R, PD, VD, MD> DistrBodyCreator<R, PD, VD, MD>
where
    R: Rng,
    PD: Distribution<f64>,
    VD: Distribution<f64>,
    MD: MassDistribution,
{
    pub fn rng(position_distr: PD, velocity_distr: VD, mass_distr: MD, density: f64, rng: R) -> Self {
        Self {
            rng,
            position_distr,
            velocity_distr,
            mass_distr,
            density,
        }
    }
}

impl<R, MD> DistrBodyCreator<R, Normal<f64>, Normal<f64>, MD>
where
    R: Rng,
    MD: MassDistribution,
{
    /// Zero-centered normal positions and velocities with the given standard deviations.
    pub fn normal(
        position_scale: f64,
        velocity_scale: f64,
        mass_distr: MD,
        density: f64,
        rng: R,
    ) -> Result<Self> {
        ensure_positive("position_scale", position_scale)?;
        ensure_positive("velocity_scale", velocity_scale)?;
        ensure_positive("density", density)?;

        Ok(Self::rng(
            Normal::new(0., position_scale)?,
            Normal::new(0., velocity_scale)?,
            mass_distr,
            density,
            rng,
        ))
    }
}

fn sample_vectors<R, D>(distr: &D, n: usize, rng: &mut R) -> Vec<Vector3<f64>>
where
    R: Rng,
    D: Distribution<f64>,
{
    (0..n)
        .map(|_| Vector3::new(distr.sample(rng), distr.sample(rng), distr.sample(rng)))
        .collect()
}

impl<R, PD, VD, MD> BodyCreator for DistrBodyCreator<R, PD, VD, MD>
where
    R: Rng,
    PD: Distribution<f64>,
    VD: Distribution<f64>,
    MD: MassDistribution,
{
    fn create_samples(&mut self, n: usize) -> BodySamples {
        let rng = &mut self.rng;

        let positions = sample_vectors(&self.position_distr, n, rng);
        let velocities = sample_vectors(&self.velocity_distr, n, rng);
        let masses = self.mass_distr.sample_masses(n, rng);

        BodySamples::new(positions, velocities, masses)
    }

    fn density(&self) -> f64 {
        self.density
    }
}
