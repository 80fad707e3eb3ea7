use crate::core::{InstructorId, Row};
use anyhow::{anyhow, Context};
use std::io::Read;

pub mod render;
mod run;

pub use run::{run, samples, Report, ReportEntry};

/// Number of leading columns before the instructor flags.
const FIXED_COLUMNS: usize = 6;

/// Reads an offering from CSV.
///
/// The first row is a header. Each following row holds `course, curriculum, period,
/// code, name, hours` and then one column per instructor, where `1` marks the
/// instructor as teaching the discipline.
///
/// # Errors
/// - If the CSV is malformed.
/// - If a row has fewer than six columns or a non-numeric `hours`.
pub fn read_rows(reader: impl Read) -> anyhow::Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(parse_record(&record).with_context(|| format!("Invalid offering row {}", line + 2))?);
    }
    Ok(rows)
}

fn parse_record(record: &csv::StringRecord) -> anyhow::Result<Row> {
    let field = |i: usize| {
        record
            .get(i)
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("Missing column {}", i + 1))
    };

    let instructors = record
        .iter()
        .enumerate()
        .skip(FIXED_COLUMNS)
        .filter(|(_, flag)| *flag == "1")
        .map(|(column, _)| InstructorId::try_from(column + 1 - FIXED_COLUMNS))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Row {
        course: field(0)?,
        curriculum: field(1)?,
        period: field(2)?,
        code: field(3)?,
        name: field(4)?,
        hours: field(5)?.parse().context("Hours must be a whole number")?,
        instructors,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const OFFERING: &str = "\
course,curriculum,period,code,name,hours,Prof 1,Prof 2,Prof 3
CCO,2020,2,CCO101,Algorithms,4,1,,
SIN,2019,4,SIN202,Databases,5,,1,1
";

    #[test]
    fn rows_should_carry_flagged_instructors() -> anyhow::Result<()> {
        let rows = read_rows(OFFERING.as_bytes())?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "CCO101");
        assert_eq!(rows[0].hours, 4);
        assert_eq!(rows[0].instructors, vec![1]);
        assert_eq!(rows[1].curriculum, "2019");
        assert_eq!(rows[1].instructors, vec![2, 3]);
        Ok(())
    }

    #[test]
    fn short_rows_should_be_rejected() {
        let input = "course,curriculum,period,code,name,hours\nCCO,2020,2,CCO101\n";
        assert!(read_rows(input.as_bytes()).is_err());
    }

    #[test]
    fn bad_hours_should_be_rejected() {
        let input = "course,curriculum,period,code,name,hours\nCCO,2020,2,CCO101,Algorithms,four\n";
        assert!(read_rows(input.as_bytes()).is_err());
    }

    #[test]
    fn empty_offering_should_give_no_rows() -> anyhow::Result<()> {
        let rows = read_rows("course,curriculum,period,code,name,hours\n".as_bytes())?;
        assert!(rows.is_empty());
        Ok(())
    }
}
