use log::debug;
use rand::Rng;

use crate::{
    body_creator::{BodyCreator, DistrBodyCreator},
    config::GeneratorConfig,
    error::Result,
    mass::UniformMasses,
    system::SystemDescription,
};

/// Sample a random system.
///
/// Positions and velocities are zero-centered normal, masses are uniform
/// over `[mass_scale / 10, mass_scale * 2]` and shuffled.
pub fn generate_system<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<SystemDescription> {
    config.validate()?;

    let mut creator = DistrBodyCreator::normal(
        config.position_scale,
        config.velocity_scale,
        UniformMasses::from_scale(config.mass_scale)?,
        config.density,
        rng,
    )?;
    let bodies = creator.create_bodies(config.bodies);
    debug!("sampled {} bodies", bodies.len());

    Ok(SystemDescription::new(
        format!("Random System ({} bodies)", config.bodies),
        bodies,
    ))
}

/// Sample a random system and render it as a `.properties` document.
pub fn generate_bodies<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<String> {
    Ok(generate_system(config, rng)?.to_string())
}
