use super::Row;

/// Builds an offering row of curriculum 2020.
pub fn row(course: &str, period: &str, code: &str, hours: u32, instructors: &[u32]) -> Row {
    Row {
        course: course.into(),
        curriculum: "2020".into(),
        period: period.into(),
        code: code.into(),
        name: format!("Discipline {code}"),
        hours,
        instructors: instructors.to_vec(),
    }
}

/// A small two-program offering: three day cohorts and two night cohorts.
pub fn offering() -> Vec<Row> {
    vec![
        row("CCO", "2", "CCO21", 4, &[12]),
        row("CCO", "2", "CCO22", 4, &[7]),
        row("CCO", "2", "CCO23", 3, &[10]),
        row("CCO", "2", "CCO24", 2, &[5, 6]),
        row("CCO", "4", "CCO41", 4, &[14]),
        row("CCO", "4", "CCO42", 5, &[5]),
        row("CCO", "4", "CCO43", 4, &[8]),
        row("CCO", "6", "CCO61", 4, &[7]),
        row("CCO", "6", "CCO62", 3, &[3]),
        row("CCO", "6", "CCO63", 4, &[6]),
        row("CCO", "6", "CCO64", 2, &[2]),
        row("SIN", "2", "SIN21", 4, &[9]),
        row("SIN", "2", "SIN22", 3, &[8]),
        row("SIN", "2", "SIN23", 2, &[2]),
        row("SIN", "4", "SIN41", 4, &[15]),
        row("SIN", "4", "SIN42", 3, &[13]),
        row("SIN", "4", "SIN43", 2, &[12]),
    ]
}
