use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use bevy::log::{error, info, warn};
use bevy::prelude::*;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algo::mst::{total_weight, KruskalVariant, Weight};
use crate::error::{Error, Result};
use crate::graph::{EdgeList, Graph};

pub mod report;

pub struct SweepPlugin;

impl Plugin for SweepPlugin {
    fn build(&self, app: &mut App) {
        // Keeps a config inserted before the plugin.
        app.init_resource::<SweepConfig>();
        app.add_systems(Startup, run_sweep);
    }
}

/// Times the four Kruskal variants on random complete graphs of growing size.
#[derive(Parser, Resource, Debug, Clone)]
#[command(version)]
pub struct SweepConfig {
    /// Smallest size is 2^min_exp nodes.
    #[arg(long, default_value_t = 5)]
    pub min_exp: u32,
    /// Largest size is 2^max_exp nodes.
    #[arg(long, default_value_t = 13)]
    pub max_exp: u32,
    /// Runs per size.
    #[arg(long, default_value_t = 5)]
    pub repetitions: usize,
    /// CSV file rows are appended to.
    #[arg(long, default_value = "csv/results.csv")]
    pub csv: PathBuf,
    /// Seed for point generation. Drawn from entropy when absent.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print each graph and the four edge lists.
    #[arg(long)]
    pub print: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_exp: 5,
            max_exp: 13,
            repetitions: 5,
            csv: PathBuf::from("csv/results.csv"),
            seed: None,
            print: false,
        }
    }
}

impl SweepConfig {
    pub fn sizes(&self) -> impl Iterator<Item = usize> {
        (self.min_exp..=self.max_exp).map(|exp| 1usize << exp)
    }
}

/// Timings for one graph.
#[derive(Debug, Clone)]
pub struct Experiment {
    pub n: usize,
    pub construction: Duration,
    /// Indexed like [`KruskalVariant::ALL`].
    pub timings: [Duration; 4],
    pub total_weight: f64,
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "experiment results")?;
        writeln!(f, "|   input size: {} points", self.n)?;
        writeln!(
            f,
            "|   graph construction: {:.6} s",
            self.construction.as_secs_f64()
        )?;
        for (variant, timing) in KruskalVariant::ALL.iter().zip(&self.timings) {
            writeln!(f, "|   {}: {:.6} s", variant.describe(), timing.as_secs_f64())?;
        }
        write!(f, "|   tree weight: {}", self.total_weight)
    }
}

fn run_sweep(config: Res<SweepConfig>, mut exit: EventWriter<AppExit>) {
    match sweep(&config) {
        Ok(experiments) => info!("sweep finished after {} experiments", experiments.len()),
        Err(err) => {
            error!("sweep failed: {err}");
            exit.write(AppExit::error());
        }
    }
}

/// Runs every size `repetitions` times, appending one CSV row per run.
pub fn sweep(config: &SweepConfig) -> Result<Vec<Experiment>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if config.min_exp > config.max_exp || config.repetitions == 0 {
        warn!("nothing to run for {:?}", config);
    }

    let mut experiments = Vec::new();
    for n in config.sizes() {
        for _ in 0..config.repetitions {
            let experiment = run_experiment(n, &mut rng, config.print)?;
            info!("{experiment}");
            report::append_row(&config.csv, &experiment)?;
            experiments.push(experiment);
        }
    }
    Ok(experiments)
}

/// Builds one random complete graph of `n` nodes and times every variant on it.
///
/// # Errors
/// [`Error::WeightMismatch`] if the variants disagree on the tree weight.
pub fn run_experiment<R: Rng>(n: usize, rng: &mut R, print: bool) -> Result<Experiment> {
    info!("building complete graph over {n} nodes");
    let start = Instant::now();
    let graph = Graph::random(n, rng);
    let construction = start.elapsed();
    info!(
        "graph with {} edges built in {:.6} s",
        graph.edges().len(),
        construction.as_secs_f64()
    );

    let mut timings = [Duration::ZERO; 4];
    let mut trees = Vec::with_capacity(KruskalVariant::ALL.len());
    for (slot, variant) in KruskalVariant::ALL.into_iter().enumerate() {
        let start = Instant::now();
        let tree = graph.mst(variant)?;
        timings[slot] = start.elapsed();
        info!(
            "{}: {} edges in {:.6} s",
            variant.describe(),
            tree.len(),
            timings[slot].as_secs_f64()
        );
        trees.push(tree);
    }

    if print {
        println!("{graph}");
        for tree in &trees {
            println!("{}", EdgeList(tree));
        }
    }

    let totals: Vec<f64> = trees.iter().map(|tree| total_weight(tree)).collect();
    check_totals(n, &totals)?;

    Ok(Experiment {
        n,
        construction,
        timings,
        total_weight: totals.first().copied().unwrap_or_default(),
    })
}

/// Every variant must land on the same tree weight.
pub fn check_totals<W: Weight>(n: usize, totals: &[W]) -> Result<()> {
    let Some(&first) = totals.first() else {
        return Ok(());
    };
    if totals.iter().all(|&total| first.same_total(total)) {
        return Ok(());
    }

    let weights = KruskalVariant::ALL
        .iter()
        .zip(totals)
        .map(|(variant, total)| format!("{variant}={total}"))
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::WeightMismatch { n, weights })
}
