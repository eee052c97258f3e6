//! Integration tests for petri

use petri::brain::Brain;
use petri::genome::{Genome, GenomeConfig};
use petri::{Config, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn small_config() -> Config {
    let mut config = Config::default();
    config.evolution.population = 25;
    config.evolution.steps_per_generation = 60;
    config.world.map_size = 30;
    config.world.obstacle_count = 8;
    config.genome.max_length = 150;
    config
}

#[test]
fn test_full_evolution_cycle() {
    let mut world = World::new_with_seed(small_config(), 12345).unwrap();

    world.run(5);

    assert_eq!(world.generation, 5);
    assert_eq!(world.stats_history.records.len(), 5);
    assert!((0.0..=1.0).contains(&world.accuracy));

    // Every pool genome must still compile and drive a brain.
    for genome in &world.gene_pool {
        let shape = genome.shape();
        assert_eq!(shape[0], genome.config.input_layer_length);
        assert_eq!(*shape.last().unwrap(), genome.config.output_layer_length);

        let mut brain = Brain::from_genome(genome);
        let outputs = brain.evaluate(&vec![0.5; shape[0]]);
        assert_eq!(outputs.len(), genome.config.output_layer_length);
        assert!(outputs.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_reproducibility() {
    let config = small_config();

    let mut world1 = World::new_with_seed(config.clone(), 99999).unwrap();
    let mut world2 = World::new_with_seed(config, 99999).unwrap();

    world1.run(4);
    world2.run(4);

    assert_eq!(world1.accuracy, world2.accuracy);
    assert_eq!(world1.gene_pool, world2.gene_pool);
    assert_eq!(
        world1.stats_history.records.len(),
        world2.stats_history.records.len()
    );
    for (a, b) in world1
        .stats_history
        .records
        .iter()
        .zip(&world2.stats_history.records)
    {
        assert_eq!(a.survivors, b.survivors);
        assert_eq!(a.energy_mean, b.energy_mean);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let config = small_config();

    let mut world1 = World::new_with_seed(config.clone(), 1).unwrap();
    let mut world2 = World::new_with_seed(config, 2).unwrap();

    world1.run(1);
    world2.run(1);

    assert_ne!(world1.gene_pool, world2.gene_pool);
}

#[test]
fn test_pool_genomes_survive_compilation_across_generations() {
    // Crossover across differently-shaped parents must keep producing
    // genomes the compiler accepts (no out-of-shape endpoints).
    let cfg_small = GenomeConfig {
        input_layer_length: 6,
        hidden_layer_count: 1,
        output_layer_length: 2,
        max_length: 40,
        allow_reverse_synapses: false,
    };
    let cfg_large = GenomeConfig {
        input_layer_length: 12,
        hidden_layer_count: 4,
        output_layer_length: 3,
        max_length: 90,
        allow_reverse_synapses: false,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(555);
    let mut pool = vec![
        Genome::create(cfg_small, &mut rng).unwrap(),
        Genome::create(cfg_large, &mut rng).unwrap(),
    ];

    for _ in 0..50 {
        let offspring = Genome::crossover(&pool[0], &pool[1], 0.2, &mut rng);
        let mut brain = Brain::from_genome(&offspring);
        let input_len = offspring.shape()[0];
        let outputs = brain.evaluate(&vec![0.1; input_len]);
        assert!(outputs.iter().all(|v| v.is_finite()));

        pool.remove(0);
        pool.push(offspring);
    }
}

#[test]
fn test_invalid_configs_are_rejected() {
    let mut config = small_config();
    config.evolution.population = 0;
    assert!(World::new_with_seed(config, 1).is_err());

    let mut config = small_config();
    config.genome.output_layer_length = 0;
    assert!(World::new_with_seed(config, 1).is_err());

    let mut config = small_config();
    config.world.map_size = 0;
    assert!(World::new_with_seed(config, 1).is_err());
}
