use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::BufReader;
use timetable_coloring::core::{colors_used, is_proper, load_instances, Colorer, Config, ConflictGraph};
use timetable_coloring::{algo, data, run_reader};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug)]
struct Algorithm(usize, &'static str);

impl From<Algorithm> for Box<dyn Colorer> {
    fn from(value: Algorithm) -> Box<dyn Colorer> {
        algo::COLORERS[value.0]()
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.1)
    }
}

impl ValueEnum for Algorithm {
    fn value_variants<'a>() -> &'a [Self] {
        static ALGORITHMS: std::sync::LazyLock<Vec<Algorithm>> = std::sync::LazyLock::new(|| {
            let iter = algo::COLORERS.iter().enumerate();
            iter.map(|(i, init)| Algorithm(i, init().name())).collect()
        });

        ALGORITHMS.as_slice()
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.1))
    }
}

/// Application building weekly course timetables by graph coloring.
#[derive(Debug, Parser)]
enum Application {
    /// Schedule an offering and print the cohort and instructor views.
    Run {
        /// The offering CSV. Read from stdin when omitted.
        input: Option<String>,
        /// The coloring strategy.
        #[clap(short, long, default_value = "DSatur")]
        colorer: Algorithm,
        #[command(flatten)]
        config: Config,
        /// Log every rejected attempt.
        #[clap(short, long, default_value = "false")]
        verbose: bool,
    },
    /// Color one offering with every strategy and compare colors and time.
    Compare {
        /// The offering CSV.
        input: String,
        #[command(flatten)]
        config: Config,
    },
    /// Run every strategy over a directory of offerings.
    Bench {
        /// The input directory.
        input: String,
        /// Exclude coloring strategies.
        #[clap(short, long, value_delimiter = ',')]
        exclude: Vec<Algorithm>,
        #[command(flatten)]
        config: Config,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn compare(input: &str, config: &Config) -> anyhow::Result<()> {
    let rows = data::read_rows(BufReader::new(File::open(input)?))?;
    let instances = load_instances(&rows, &config.night_courses)?;
    let graph = ConflictGraph::build(&instances);
    println!("{} instances, {} conflicts", graph.len(), graph.edge_count());

    for init in algo::COLORERS.iter() {
        let mut colorer = init();
        let time = std::time::Instant::now();
        let coloring = colorer.color(&graph);
        let time = time.elapsed().as_secs_f64();

        anyhow::ensure!(is_proper(&graph, &coloring), "{} produced an improper coloring", colorer.name());
        println!("{}: {} colors in {time:.6} sec", colorer.name(), colors_used(&coloring));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    match Application::parse() {
        Application::Run {
            input,
            colorer,
            config,
            verbose,
        } => {
            init_logging(verbose);
            let colorer = Box::<dyn Colorer>::from(colorer);
            match input {
                Some(path) => run_reader(colorer, BufReader::new(File::open(path)?), &config),
                None => run_reader(colorer, std::io::stdin().lock(), &config),
            }
        }
        Application::Compare { input, config } => {
            init_logging(false);
            compare(&input, &config)
        }
        Application::Bench { input, exclude, config } => {
            init_logging(false);
            let inits = algo::COLORERS.iter().enumerate();
            for (_, &init) in inits.filter(|(i, _)| !exclude.iter().any(|a| a.0 == *i)) {
                println!("{}", data::run(&input, init, &config)?);
            }
            Ok(())
        }
    }
}
