//! Output formatting for listing commands.
//!
//! Records are written to stdout as a tab-aligned table, pretty JSON, CSV or
//! TSV. Table headers are uppercased; CSV and TSV headers are the field
//! names.

use crate::error::CliError;
use roster::config::OutputFormat;
use roster::{Course, Enrollment, Student};
use serde::Serialize;
use std::io::{self, Write};

/// A record that can be printed as a row.
pub trait Tabular {
    /// Column names, in field order.
    const HEADERS: &'static [&'static str];

    /// Field values, in column order. Missing values are empty strings.
    fn fields(&self) -> Vec<String>;
}

impl Tabular for Student {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "student_id",
        "first_name",
        "last_name",
        "date_of_birth",
        "email",
        "phone",
        "department",
        "enrollment_date",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.student_id.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.date_of_birth.to_string(),
            self.email.clone(),
            self.phone.clone().unwrap_or_default(),
            self.department.clone(),
            self.enrollment_date.to_string(),
        ]
    }
}

impl Tabular for Course {
    const HEADERS: &'static [&'static str] =
        &["id", "course_code", "course_name", "credits", "department"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.course_code.clone(),
            self.course_name.clone(),
            self.credits.to_string(),
            self.department.clone(),
        ]
    }
}

impl Tabular for Enrollment {
    const HEADERS: &'static [&'static str] =
        &["student_id", "course_id", "enrollment_date", "grade"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.student_id.to_string(),
            self.course_id.to_string(),
            self.enrollment_date.to_string(),
            self.grade.clone().unwrap_or_default(),
        ]
    }
}

/// Print records to stdout in the given format.
pub fn print_records<T: Tabular + Serialize>(
    records: &[T],
    format: OutputFormat,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_records(&mut handle, records, format)
}

/// Write records to any writer in the given format.
pub fn write_records<W: Write, T: Tabular + Serialize>(
    out: &mut W,
    records: &[T],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => write_table(out, records),
        OutputFormat::Json => write_json(out, records),
        OutputFormat::Csv => write_delimited(out, records, b','),
        OutputFormat::Tsv => write_delimited(out, records, b'\t'),
    }
}

fn write_table<W: Write, T: Tabular>(out: &mut W, records: &[T]) -> Result<(), CliError> {
    let header_line = T::HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(out, "{header_line}")?;

    for record in records {
        let row = record
            .fields()
            .into_iter()
            .map(|f| if f.is_empty() { "-".to_string() } else { f })
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(out, "{row}")?;
    }

    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, records: &[T]) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)?;
    Ok(())
}

fn write_delimited<W: Write, T: Tabular>(
    out: &mut W,
    records: &[T],
    delimiter: u8,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);

    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.write_record(record.fields())?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Course {
        Course {
            id: 1,
            course_code: "CS101".into(),
            course_name: "Intro, with comma".into(),
            credits: 4,
            department: "Computer Science".into(),
        }
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[sample()], format).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_table_has_uppercase_header() {
        let table = render(OutputFormat::Table);
        let mut lines = table.lines();
        assert_eq!(
            lines.next(),
            Some("ID\tCOURSE_CODE\tCOURSE_NAME\tCREDITS\tDEPARTMENT")
        );
        assert_eq!(
            lines.next(),
            Some("1\tCS101\tIntro, with comma\t4\tComputer Science")
        );
    }

    #[test]
    fn test_csv_quotes_commas() {
        let csv = render(OutputFormat::Csv);
        assert!(csv.starts_with("id,course_code,course_name,credits,department\n"));
        assert!(csv.contains("\"Intro, with comma\""));
    }

    #[test]
    fn test_json_is_an_array() {
        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(json[0]["course_code"], "CS101");
    }

    #[test]
    fn test_missing_grade_in_table_is_dash() {
        let enrollment = Enrollment {
            student_id: 1,
            course_id: 2,
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            grade: None,
        };
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[enrollment], OutputFormat::Table).unwrap();
        let table = String::from_utf8(buffer).unwrap();
        assert!(table.lines().nth(1).unwrap().ends_with("\t-"));
    }
}
