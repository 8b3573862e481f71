use flapper::{
    random::{seed_time, seed_urandom},
    EvolutionTarget, Headless, Paced, SimConfig, Trainer, WyRng,
};
use std::env;
use tracing::{error, info};

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> flapper::Result<()> {
    let config = SimConfig::from_env()?;
    let seed = match env::var("FLAPPER_SEED") {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| flapper::Error::InvalidConfig(format!("FLAPPER_SEED={raw}: {e}")))?,
        Err(_) => seed_urandom().unwrap_or_else(|_| seed_time()),
    };
    let paced = env::var("FLAPPER_PACED").is_ok_and(|v| v != "0");
    info!(seed, paced, population = config.population_size, "starting");

    let mut rng = WyRng::seeded(seed);
    let target = EvolutionTarget::Generation(config.generations);
    let mut trainer = Trainer::new(config)?;
    let trained = if paced {
        let mut frontend = Paced::new(trainer.config().tick_rate);
        trainer.train(target, &mut frontend, &mut rng, |_| {})?
    } else {
        trainer.train(target, &mut Headless, &mut rng, |_| {})?
    };

    if let Some((champ, fitness)) = trained.ranked.first() {
        println!("champ {} fit: {fitness}", champ.id());
        println!("{}", champ.policy().to_string()?);
    }
    Ok(())
}
