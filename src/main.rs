use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use clt_demo::commentary::{for_family, heading};
use clt_demo::config::CltConfig;
use clt_demo::constants::{
    BINOMIAL_P, BINOMIAL_TRIALS, BINS, EXPONENTIAL_LAMBDA, SAMPLE_COUNT, SAMPLE_SIZE, SWEEP_FROM,
    SWEEP_STEP, SWEEP_TO, UNIFORM_A, UNIFORM_B,
};
use clt_demo::sweep::{format_table, run_sweep, sample_sizes};
use clt_demo::utils::create_rng;
use clt_demo::visualization::render_clt_figure;
use clt_demo::{run_scenario, CltError, Family, SamplingParams};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const TEXT_WIDTH: usize = 88;

/// Central Limit Theorem demo
#[derive(Parser, Debug)]
#[command(name = "clt-demo")]
#[command(
    author,
    version,
    about = "Simulate the Central Limit Theorem for Binomial, Exponential and Uniform samples"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Number of samples (m), 100-2000
    #[arg(short = 'm', long = "samples", global = true)]
    samples: Option<usize>,

    /// Draws per sample (n), 5-200
    #[arg(short = 'n', long = "size", global = true)]
    size: Option<usize>,

    /// Histogram bins for the standardized panel, 5-55
    #[arg(long, global = true)]
    bins: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Configuration file (otherwise clt.toml is discovered upwards)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sum Binomial(trials, p) draws
    Binomial {
        #[command(flatten)]
        params: BinomialArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Sum Exponential(lambda) draws
    Exponential {
        #[command(flatten)]
        params: ExponentialArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Sum Uniform(a, b) draws
    Uniform {
        #[command(flatten)]
        params: UniformArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Tabulate mean and sd of the standardized sums over a range of n
    ///
    /// The sample sizes come from --from/--to/--step and the output is a table,
    /// so -n and --bins are rejected here.
    Sweep {
        #[command(subcommand)]
        family: FamilyCommand,

        /// First sample size
        #[arg(long, default_value_t = SWEEP_FROM)]
        from: usize,

        /// Last sample size (inclusive)
        #[arg(long, default_value_t = SWEEP_TO)]
        to: usize,

        /// Increment between sample sizes
        #[arg(long, default_value_t = SWEEP_STEP)]
        step: usize,
    },
    /// Print a default clt.toml
    InitConfig,
}

#[derive(Subcommand, Debug)]
enum FamilyCommand {
    Binomial(BinomialArgs),
    Exponential(ExponentialArgs),
    Uniform(UniformArgs),
}

#[derive(Args, Debug)]
struct BinomialArgs {
    /// Success probability, 0.05-0.95
    #[arg(long)]
    p: Option<f64>,

    /// Trials per draw, 1-10000 (defaults to the sample size n)
    #[arg(long)]
    trials: Option<u64>,
}

#[derive(Args, Debug)]
struct ExponentialArgs {
    /// Rate parameter, 1-22
    #[arg(long)]
    lambda: Option<f64>,
}

#[derive(Args, Debug)]
struct UniformArgs {
    /// Lower bound, 5-20
    #[arg(long)]
    a: Option<f64>,

    /// Upper bound, 25-50
    #[arg(long)]
    b: Option<f64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// PNG path (defaults to clt_<distribution>.png in the configured directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip rendering; print statistics and commentary only
    #[arg(long)]
    no_plot: bool,
}

/// Family parameters before the sample size is known.
#[derive(Debug, Clone, Copy)]
enum FamilyChoice {
    Binomial { p: f64, trials: Option<u64> },
    Exponential { lambda: f64 },
    Uniform { a: f64, b: f64 },
}

impl FamilyChoice {
    fn at_sample_size(self, n: usize) -> Family {
        match self {
            FamilyChoice::Binomial { p, trials: Some(trials) } => Family::Binomial { p, trials },
            FamilyChoice::Binomial { p, trials: None } => Family::binomial_coupled(p, n),
            FamilyChoice::Exponential { lambda } => Family::Exponential { lambda },
            FamilyChoice::Uniform { a, b } => Family::Uniform { a, b },
        }
    }
}

fn binomial_choice(args: &BinomialArgs, config: &CltConfig) -> Result<FamilyChoice, CltError> {
    let p = BINOMIAL_P.check(args.p.unwrap_or(config.binomial.p))?;
    let trials = args
        .trials
        .or(config.binomial.trials)
        .map(|t| BINOMIAL_TRIALS.check(t as f64).map(|_| t))
        .transpose()?;
    Ok(FamilyChoice::Binomial { p, trials })
}

fn exponential_choice(
    args: &ExponentialArgs,
    config: &CltConfig,
) -> Result<FamilyChoice, CltError> {
    let lambda = EXPONENTIAL_LAMBDA.check(args.lambda.unwrap_or(config.exponential.lambda))?;
    Ok(FamilyChoice::Exponential { lambda })
}

fn uniform_choice(args: &UniformArgs, config: &CltConfig) -> Result<FamilyChoice, CltError> {
    let a = UNIFORM_A.check(args.a.unwrap_or(config.uniform.a))?;
    let b = UNIFORM_B.check(args.b.unwrap_or(config.uniform.b))?;
    Ok(FamilyChoice::Uniform { a, b })
}

fn family_choice(command: &FamilyCommand, config: &CltConfig) -> Result<FamilyChoice, CltError> {
    match command {
        FamilyCommand::Binomial(args) => binomial_choice(args, config),
        FamilyCommand::Exponential(args) => exponential_choice(args, config),
        FamilyCommand::Uniform(args) => uniform_choice(args, config),
    }
}

fn reject_unused_sweep_flags(cli: &Cli) -> Result<(), CltError> {
    if cli.size.is_some() {
        return Err(CltError::invalid("n", "not used by sweep, set --from/--to/--step instead"));
    }
    if cli.bins.is_some() {
        return Err(CltError::invalid("bins", "not used by sweep, which prints a table"));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "clt_demo=debug" } else { "clt_demo=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::InitConfig = cli.command {
        print!("{}", CltConfig::default_toml());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => CltConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => CltConfig::discover()
            .context("failed to load discovered clt.toml")?
            .unwrap_or_default(),
    };

    let m = SAMPLE_COUNT.check_count(cli.samples.unwrap_or(config.sampling.samples))?;
    let seed = cli.seed.or(config.sampling.seed);

    match &cli.command {
        Commands::Binomial { params, render } => {
            let choice = binomial_choice(params, &config)?;
            run_single(&cli, &config, choice, m, seed, render)
        }
        Commands::Exponential { params, render } => {
            let choice = exponential_choice(params, &config)?;
            run_single(&cli, &config, choice, m, seed, render)
        }
        Commands::Uniform { params, render } => {
            let choice = uniform_choice(params, &config)?;
            run_single(&cli, &config, choice, m, seed, render)
        }
        Commands::Sweep { family, from, to, step } => {
            reject_unused_sweep_flags(&cli)?;
            let choice = family_choice(family, &config)?;
            SAMPLE_SIZE.check_count(*from)?;
            SAMPLE_SIZE.check_count(*to)?;
            let sizes = sample_sizes(*from, *to, *step)?;
            let base_seed = seed.unwrap_or_else(rand::random);
            info!(base_seed, m, points = sizes.len(), "starting sweep");

            let points = run_sweep(|n| choice.at_sample_size(n), m, &sizes, base_seed, true)?;
            let title = heading(&choice.at_sample_size(*from));
            println!("{title} (m = {m}, seed = {base_seed})");
            print!("{}", format_table(&points));
            Ok(())
        }
        Commands::InitConfig => Ok(()),
    }
}

fn run_single(
    cli: &Cli,
    config: &CltConfig,
    choice: FamilyChoice,
    m: usize,
    seed: Option<u64>,
    render: &RenderArgs,
) -> anyhow::Result<()> {
    let n = SAMPLE_SIZE.check_count(cli.size.unwrap_or(config.sampling.size))?;
    let bins = BINS.check_count(cli.bins.unwrap_or(config.sampling.bins))?;
    let family = choice.at_sample_size(n);
    info!(family = %family, m, n, bins, seed = ?seed, "parameters accepted");

    let mut rng = create_rng(seed);
    let outcome = run_scenario(family, SamplingParams { m, n }, &mut rng)?;

    println!("## {}", heading(&family));
    println!(
        "{family}: theoretical mean = {:.4}, std-dev = {:.4}",
        outcome.mean, outcome.std_dev
    );
    if let Some((mean, sd)) = outcome.score_moments() {
        info!(mean, sd, "standardized score summary");
        println!(
            "standardized sums over {m} samples of size {n}: mean = {mean:.4}, sd = {sd:.4}"
        );
    }

    if !render.no_plot {
        let path = match &render.output {
            Some(path) => path.clone(),
            None => {
                let dir = &config.output.directory;
                std::fs::create_dir_all(dir).with_context(|| {
                    format!("failed to create output directory {}", dir.display())
                })?;
                dir.join(format!("clt_{}.png", family.name()))
            }
        };
        render_clt_figure(&outcome, bins, &path, (config.output.width, config.output.height))
            .map_err(|e| anyhow::anyhow!("failed to render {}: {e}", path.display()))?;
        println!("figure written to {}", path.display());
    }

    println!();
    for paragraph in for_family(&family) {
        println!("{}", paragraph.render(TEXT_WIDTH));
    }
    Ok(())
}
