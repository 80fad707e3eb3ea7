use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use std::num::NonZero;

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = "Generates random course offerings for the timetabling problem."
)]
pub struct Config {
    /// The number of instructors.
    pub instructors: NonZero<usize>,
    /// Disciplines offered to each cohort.
    #[clap(short, long, default_value = "4")]
    pub disciplines: NonZero<usize>,
    /// Cohorts of the day program.
    #[clap(long, default_value = "3")]
    pub day_cohorts: usize,
    /// Cohorts of the night program.
    #[clap(long, default_value = "2")]
    pub night_cohorts: usize,
    /// Probability that a discipline is shared by two instructors.
    #[clap(short, long, default_value = "0.1")]
    pub shared_ratio: f64,
    /// Seed of the generator. Random when omitted.
    #[clap(long)]
    pub seed: Option<u64>,
    /// Number of offerings to generate.
    #[clap(short, long, default_value = "1")]
    pub amount: NonZero<u64>,
    /// Path to output the generated offerings. If the directory does not exist, it will be created.
    #[clap(short, long, default_value = "output")]
    pub output: String,
}

const HOURS: [u32; 4] = [2, 3, 4, 5];

fn gen(config: &Config) -> anyhow::Result<()> {
    let output = std::path::Path::new(&config.output);
    if !output.exists() {
        std::fs::create_dir_all(output)?;
    }

    let mut rng = config.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    for i in 0..config.amount.get() {
        let path = output.join(format!("{}_{}_{i}.csv", config.instructors, config.disciplines));
        write_offering(&mut csv::Writer::from_path(path)?, config, &mut rng)?;
    }

    Ok(())
}

fn write_offering<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    config: &Config,
    rng: &mut impl Rng,
) -> anyhow::Result<()> {
    let instructors = config.instructors.get();
    let mut header: Vec<String> = ["course", "curriculum", "period", "code", "name", "hours"]
        .map(String::from)
        .into();
    header.extend((1..=instructors).map(|i| format!("Prof {i}")));
    writer.write_record(&header)?;

    let programs = [("CCO", config.day_cohorts), ("SIN", config.night_cohorts)];
    for (course, cohorts) in programs {
        for cohort in 0..cohorts {
            let period = 2 * cohort + 2;
            for k in 1..=config.disciplines.get() {
                let code = format!("{course}{period}{k}");
                let hours = HOURS.choose(rng).copied().unwrap_or(2);

                let shared = instructors > 1 && rng.gen_bool(config.shared_ratio.clamp(0.0, 1.0));
                let chosen = (1..=instructors).choose_multiple(rng, if shared { 2 } else { 1 });

                let mut record = vec![
                    course.to_owned(),
                    "2020".to_owned(),
                    period.to_string(),
                    code.clone(),
                    format!("Discipline {code}"),
                    hours.to_string(),
                ];
                record.extend((1..=instructors).map(|id| if chosen.contains(&id) { "1" } else { "" }.to_owned()));
                writer.write_record(&record)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    gen(&Config::parse())
}

#[cfg(test)]
mod test {
    use super::*;
    use timetable_coloring::core::load_instances;
    use timetable_coloring::data::read_rows;

    #[test]
    fn generated_offering_should_load() -> anyhow::Result<()> {
        let config = Config::parse_from(["gen", "6", "--disciplines", "3", "--seed", "5"]);
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_offering(&mut writer, &config, &mut StdRng::seed_from_u64(5))?;

        let rows = read_rows(writer.into_inner()?.as_slice())?;
        assert_eq!(rows.len(), 15);
        assert!(rows.iter().all(|row| (1..=2).contains(&row.instructors.len())));
        assert!(rows.iter().all(|row| row.instructors.iter().all(|&id| (1..=6).contains(&id))));
        load_instances(&rows, &["SIN"])?;
        Ok(())
    }
}
