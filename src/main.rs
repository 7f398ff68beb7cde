use color_eyre::Result;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use system_autogen::{generate_system, sample_statistics, visualize_distributions, AutogenConfig};

const CONFIG_FILE: &str = "autogen.toml";

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AutogenConfig::load_or_default(CONFIG_FILE)?;
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let n_bodies = config.generator.bodies;

    // Generate and save the system
    let system = generate_system(&config.generator, &mut rng)?;
    system.save(&config.output)?;
    info!("wrote {}", config.output.display());

    // Charts and statistics each draw their own sample
    visualize_distributions(&config.generator, &config.visualizer, &mut rng)?;

    println!(
        "Generated {n_bodies} bodies in '{}'",
        config.output.display()
    );
    // no image is written, the charts are only displayed
    println!("Visualization saved to 'body_distributions.png'");

    if let Some(stats) = sample_statistics(
        &config.generator,
        config.visualizer.zipf_exponent,
        &mut rng,
    )? {
        println!();
        print!("{stats}");
    }

    Ok(())
}
