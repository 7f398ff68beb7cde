use std::fmt::{self, Display};

use rand::Rng;

use crate::{
    body::BodySamples,
    body_creator::{BodyCreator, DistrBodyCreator},
    config::GeneratorConfig,
    error::Result,
    mass::ZipfMasses,
};

/// Closed interval spanned by a set of values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// `None` for an empty iterator.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, x| {
            Some(match acc {
                None => Range { min: x, max: x },
                Some(Range { min, max }) => Range {
                    min: min.min(x),
                    max: max.max(x),
                },
            })
        })
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1}]", self.min, self.max)
    }
}

/// Summary of one sample of bodies, printed after a generation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleStatistics {
    pub bodies: usize,
    pub position: Range,
    pub velocity: Range,
    pub mass: Range,
}

impl SampleStatistics {
    /// `None` if there are no bodies.
    pub fn from_samples(samples: &BodySamples) -> Option<Self> {
        Some(Self {
            bodies: samples.len(),
            position: Range::of(samples.position_components())?,
            velocity: Range::of(samples.velocity_components())?,
            mass: Range::of(samples.masses.iter().copied())?,
        })
    }

    /// Largest mass divided by smallest mass.
    pub fn mass_ratio(&self) -> f64 {
        self.mass.max / self.mass.min
    }
}

impl Display for SampleStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "Position range: {}", self.position)?;
        writeln!(f, "Velocity range: {}", self.velocity)?;
        writeln!(f, "Mass range: {}", self.mass)?;
        writeln!(f, "Largest mass / smallest mass: {:.1}", self.mass_ratio())
    }
}

/// Draw a fresh sample with Zipf distributed masses and summarize it.
///
/// This is an independent draw: it describes neither the written system
/// nor the charts, only the same distributions.
pub fn sample_statistics<R: Rng>(
    config: &GeneratorConfig,
    zipf_exponent: f64,
    rng: &mut R,
) -> Result<Option<SampleStatistics>> {
    let mut creator = DistrBodyCreator::normal(
        config.position_scale,
        config.velocity_scale,
        ZipfMasses::new(zipf_exponent, config.mass_scale)?,
        config.density,
        rng,
    )?;

    Ok(SampleStatistics::from_samples(
        &creator.create_samples(config.bodies),
    ))
}
