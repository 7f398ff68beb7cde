//! Diagnostic charts of the sampled distributions.
//!
//! The charts are built from their own sample: positions and velocities
//! are drawn exactly like the generator draws them, but the masses follow
//! [`ZipfMasses`] rather than the uniform masses written to the system file.

#[cfg(feature = "visualization")]
mod render;

#[cfg(feature = "visualization")]
pub use render::ChartWindow;

use log::{debug, info};
use nalgebra::Vector3;
use rand::Rng;

use crate::{
    body::BodySamples,
    body_creator::{BodyCreator, DistrBodyCreator},
    config::{GeneratorConfig, VisualizerConfig},
    error::Result,
    mass::ZipfMasses,
};

/// Equal-width histogram over the range of its values.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub title: String,
    pub x_label: String,
    /// `bins + 1` bin edges in ascending order.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Whether the count axis is logarithmic.
    pub log_counts: bool,
}

impl Histogram {
    /// Bin `values` into `bins` equally wide bins spanning `[min, max]`.
    ///
    /// The last bin includes its right edge. Degenerate ranges are widened
    /// to `[x - 0.5, x + 0.5]`, an empty input to `[0, 1]`.
    ///
    /// # Panics
    /// If `bins` is zero.
    pub fn new(values: &[f64], bins: usize) -> Self {
        assert!(bins > 0, "histogram needs at least one bin");

        let (lo, hi) = match values.iter().copied().fold(None, |acc: Option<(f64, f64)>, x| {
            Some(acc.map_or((x, x), |(lo, hi)| (lo.min(x), hi.max(x))))
        }) {
            None => (0., 1.),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(range) => range,
        };

        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0; bins];
        for &x in values {
            let idx = (((x - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self {
            title: String::new(),
            x_label: String::new(),
            edges,
            counts,
            log_counts: false,
        }
    }

    pub fn with_labels(mut self, title: impl Into<String>, x_label: impl Into<String>) -> Self {
        self.title = title.into();
        self.x_label = x_label.into();
        self
    }

    pub fn log_counts(mut self) -> Self {
        self.log_counts = true;
        self
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bar heights on the count axis, `log10(1 + count)` for a logarithmic axis.
    pub fn bar_heights(&self) -> Vec<f64> {
        self.counts
            .iter()
            .map(|&c| {
                if self.log_counts {
                    (1. + c as f64).log10()
                } else {
                    c as f64
                }
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
    pub position: Vector3<f64>,
    pub size: f64,
}

/// 3D scatter of positions, point size proportional to mass.
#[derive(Clone, Debug, PartialEq)]
pub struct Scatter3D {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

impl Scatter3D {
    /// The heaviest point gets `max_size`.
    pub fn new(positions: &[Vector3<f64>], masses: &[f64], max_size: f64) -> Self {
        let max_mass = masses.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let points = positions
            .iter()
            .zip(masses)
            .map(|(&position, &m)| ScatterPoint {
                position,
                size: m / max_mass * max_size,
            })
            .collect();

        Self {
            title: "3D Position Distribution".to_string(),
            points,
        }
    }

    /// Largest absolute coordinate of any point.
    pub fn extent(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.position.amax())
            .fold(0., f64::max)
    }
}

/// The four panels of the diagnostic figure, in reading order.
#[derive(Clone, Debug, PartialEq)]
pub struct DistributionCharts {
    pub position: Histogram,
    pub velocity: Histogram,
    pub mass: Histogram,
    pub scatter: Scatter3D,
}

impl DistributionCharts {
    /// Build the four panels from an existing sample.
    ///
    /// Fails if `config` does not validate.
    pub fn from_samples(samples: &BodySamples, config: &VisualizerConfig) -> Result<Self> {
        config.validate()?;

        let positions: Vec<f64> = samples.position_components().collect();
        let velocities: Vec<f64> = samples.velocity_components().collect();

        Ok(Self {
            position: Histogram::new(&positions, config.bins)
                .with_labels("Position Distribution (all axes)", "Position"),
            velocity: Histogram::new(&velocities, config.bins)
                .with_labels("Velocity Distribution (all axes)", "Velocity"),
            mass: Histogram::new(&samples.masses, config.bins)
                .with_labels("Mass Distribution (Zipf)", "Mass")
                .log_counts(),
            scatter: Scatter3D::new(&samples.positions, &samples.masses, config.max_point_size),
        })
    }

    /// Draw a fresh sample and build the charts from it.
    pub fn sample<R: Rng>(
        generator: &GeneratorConfig,
        config: &VisualizerConfig,
        rng: &mut R,
    ) -> Result<Self> {
        generator.validate()?;

        let mut creator = DistrBodyCreator::normal(
            generator.position_scale,
            generator.velocity_scale,
            ZipfMasses::new(config.zipf_exponent, generator.mass_scale)?,
            generator.density,
            rng,
        )?;
        let samples = creator.create_samples(generator.bodies);
        debug!("sampled {} bodies for the charts", samples.len());

        Self::from_samples(&samples, config)
    }

    pub fn histograms(&self) -> [&Histogram; 3] {
        [&self.position, &self.velocity, &self.mass]
    }

    /// Title and axis labels of every panel, in reading order.
    pub fn panel_legends(&self) -> [String; 4] {
        let [position, velocity, mass] = self.histograms().map(|hist| {
            let counts = if hist.log_counts { "Count (log)" } else { "Count" };
            format!("{} (x: {}, y: {counts})", hist.title, hist.x_label)
        });
        let scatter = format!("{} (x: X, y: Y, z: Z)", self.scatter.title);

        [position, velocity, mass, scatter]
    }
}

/// Sample the distributions and show them in a window.
///
/// Blocks until the window is closed. Without the `visualization` feature
/// the charts are only summarized in the log.
pub fn visualize_distributions<R: Rng>(
    generator: &GeneratorConfig,
    config: &VisualizerConfig,
    rng: &mut R,
) -> color_eyre::Result<()> {
    let charts = DistributionCharts::sample(generator, config, rng)?;
    for hist in charts.histograms() {
        info!(
            "{}: {} values in {} bins",
            hist.title,
            hist.total(),
            hist.bins()
        );
    }

    #[cfg(feature = "visualization")]
    ChartWindow::new(&charts, config.width, config.height)?.show()?;

    #[cfg(not(feature = "visualization"))]
    log::warn!("built without the `visualization` feature, not displaying the charts");

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_histogram_bins() {
        let hist = Histogram::new(&[0., 1., 2., 3., 4., 10.], 5);

        assert_eq!(hist.edges, vec![0., 2., 4., 6., 8., 10.]);
        assert_eq!(hist.counts, vec![2, 2, 1, 0, 1]);
        assert_eq!(hist.total(), 6);
    }

    #[test]
    fn test_histogram_degenerate() {
        let hist = Histogram::new(&[3., 3., 3.], 2);
        assert_eq!(hist.edges, vec![2.5, 3., 3.5]);
        assert_eq!(hist.counts, vec![0, 3]);

        let empty = Histogram::new(&[], 4);
        assert_eq!(empty.edges.first(), Some(&0.));
        assert_eq!(empty.edges.last(), Some(&1.));
        assert_eq!(empty.total(), 0);
    }

    #[test]
    fn test_log_heights() {
        let hist = Histogram::new(&[0., 0., 0., 0., 0., 0., 0., 0., 0., 1.], 2).log_counts();
        let heights = hist.bar_heights();
        assert_abs_diff_eq!(heights[0], 1., epsilon = 1e-12);
        assert_abs_diff_eq!(heights[1], 2f64.log10(), epsilon = 1e-12);
    }

    #[test]
    fn test_scatter_sizes() {
        let scatter = Scatter3D::new(
            &[Vector3::new(1., 2., -7.), Vector3::new(3., 0., 0.)],
            &[10., 40.],
            50.,
        );
        assert_eq!(scatter.points[0].size, 12.5);
        assert_eq!(scatter.points[1].size, 50.);
        assert_eq!(scatter.extent(), 7.);
    }

    #[test]
    fn test_sample_charts() {
        let generator = GeneratorConfig::default();
        let config = VisualizerConfig::default();
        let charts =
            DistributionCharts::sample(&generator, &config, &mut StdRng::seed_from_u64(2)).unwrap();

        assert_eq!(charts.position.total(), 300);
        assert_eq!(charts.velocity.total(), 300);
        assert_eq!(charts.mass.total(), 100);
        assert!(charts.mass.log_counts);
        assert!(charts.histograms().iter().all(|h| h.bins() == 30));
        assert_eq!(charts.scatter.points.len(), 100);
        assert_abs_diff_eq!(
            charts
                .scatter
                .points
                .iter()
                .map(|p| p.size)
                .fold(0., f64::max),
            50.,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_from_samples_rejects_zero_bins() {
        let samples = BodySamples::new(vec![Vector3::zeros()], vec![Vector3::zeros()], vec![1.]);
        let config = VisualizerConfig {
            bins: 0,
            ..Default::default()
        };

        assert!(DistributionCharts::from_samples(&samples, &config).is_err());
        assert!(DistributionCharts::from_samples(&samples, &VisualizerConfig::default()).is_ok());
    }

    #[test]
    fn test_panel_legends() {
        let charts = DistributionCharts::sample(
            &GeneratorConfig::default(),
            &VisualizerConfig::default(),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();

        assert_eq!(
            charts.panel_legends(),
            [
                "Position Distribution (all axes) (x: Position, y: Count)".to_string(),
                "Velocity Distribution (all axes) (x: Velocity, y: Count)".to_string(),
                "Mass Distribution (Zipf) (x: Mass, y: Count (log))".to_string(),
                "3D Position Distribution (x: X, y: Y, z: Z)".to_string(),
            ]
        );
    }

    #[test]
    fn test_zipf_masses_in_charts() {
        let generator = GeneratorConfig::default();
        let config = VisualizerConfig::default();
        let charts =
            DistributionCharts::sample(&generator, &config, &mut StdRng::seed_from_u64(4)).unwrap();

        // heavy tail: the lightest mass is far below the generator's lower bound
        let mass_lo = charts.mass.edges[0];
        assert!(mass_lo < generator.mass_scale / 10.);
    }
}
