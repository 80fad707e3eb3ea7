use clap::Parser;
use timetable_coloring::core::{Colorer, Config};
use timetable_coloring::data::run;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Args {
    /// The input directory
    input_dir: String,
    /// Exclude coloring strategies
    exclude: Vec<String>,
    #[command(flatten)]
    config: Config,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    for init in colorers(&args.exclude) {
        let report = run(&args.input_dir, init, &args.config)?;
        print!("{report}");
    }
    Ok(())
}

fn colorers(exclude: &[String]) -> impl Iterator<Item = fn() -> Box<dyn Colorer>> + '_ {
    timetable_coloring::algo::COLORERS
        .iter()
        .copied()
        .filter(|init| !exclude.iter().any(|name| name.eq_ignore_ascii_case(init().name())))
}
