//! petri - CLI entry point
//!
//! Grid-world neuroevolution sandbox.

use clap::{Parser, Subcommand};
use petri::{benchmark, Config, World};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "petri")]
#[command(version)]
#[command(about = "Grid-world neuroevolution sandbox with evolving-topology brains")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an evolution session
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of generations to evolve
        #[arg(short, long, default_value = "100")]
        generations: u32,

        /// Output path for the stats history (JSON)
        #[arg(short, long, default_value = "stats_history.json")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Bench {
        /// Number of generations
        #[arg(short, long, default_value = "10")]
        generations: u32,

        /// Population size
        #[arg(short, long, default_value = "150")]
        population: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            generations,
            output,
            seed,
            quiet,
        } => run_evolution(config, generations, output, seed, quiet),

        Commands::Bench {
            generations,
            population,
        } => run_benchmark(generations, population),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_evolution(
    config_path: PathBuf,
    generations: u32,
    output: PathBuf,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    // Create world
    let mut world = if let Some(s) = seed {
        println!("Using seed: {}", s);
        World::new_with_seed(config.clone(), s)?
    } else {
        World::new(config.clone())?
    };

    println!("Starting evolution");
    println!("  Population: {}", config.evolution.population);
    println!(
        "  Map: {}x{} ({} obstacles)",
        config.world.map_size, config.world.map_size, config.world.obstacle_count
    );
    println!("  Generations: {}", generations);
    println!();

    let start = Instant::now();

    for _ in 0..generations {
        world.run_generation();

        if !quiet && (world.generation - 1) % config.logging.stats_interval == 0 {
            println!("{}", world.stats.summary());
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("=== Evolution Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Generations: {}", world.generation);
    println!(
        "Speed: {:.2} generations/s",
        world.generation as f64 / elapsed.as_secs_f64()
    );
    println!("Final accuracy: {:.1}%", world.accuracy * 100.0);
    println!(
        "Best accuracy: {:.1}%",
        world.stats_history.best_accuracy() * 100.0
    );
    println!("Seed: {}", world.seed());

    // Save stats history
    world.stats_history.save(output.to_string_lossy().as_ref())?;
    println!("Stats history: {:?}", output);

    Ok(())
}

fn run_benchmark(generations: u32, population: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== petri Benchmark ===");
    println!("Generations: {}", generations);
    println!("Population: {}", population);
    println!();

    let result = benchmark(generations, population)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
