//! Generator for randomized n-body system descriptions.
//!
//! A run samples positions, velocities and masses for a number of bodies,
//! renders them as a `.properties` document (see [`SystemDescription`])
//! and optionally charts the sampled distributions.

pub mod body;
pub mod body_creator;
pub mod config;
pub mod error;
pub mod generator;
pub mod mass;
pub mod properties;
pub mod statistics;
pub mod system;
pub mod visualization;

pub use body::{body_key, Body, BodySamples, BODY_COLOR};
pub use body_creator::{BodyCreator, DistrBodyCreator};
pub use config::{AutogenConfig, GeneratorConfig, VisualizerConfig};
pub use error::{AutogenError, Result};
pub use generator::{generate_bodies, generate_system};
pub use mass::{MassDistribution, UniformMasses, ZipfMasses};
pub use properties::Properties;
pub use statistics::{sample_statistics, SampleStatistics};
pub use system::{SystemDescription, GRAVITY, TIME_STEP};
pub use visualization::{visualize_distributions, DistributionCharts};
