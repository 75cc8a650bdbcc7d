//! Write the three report tables under a date-stamped directory.
//!
//! The layout is `<output-root>/<YYYY-MM-DD>/{nums,months,total}.txt`. The
//! caller hands over fully-formatted lines; nothing is written until all
//! aggregation has already succeeded.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::AppError;
use crate::report::ReportTables;

/// Create the dated directory and write all three tables into it.
///
/// Returns the directory the files were written to.
pub fn write_report_files(
    output_root: &Path,
    run_date: NaiveDate,
    tables: &ReportTables,
) -> Result<PathBuf, AppError> {
    let dir = output_root.join(run_date.format("%Y-%m-%d").to_string());
    std::fs::create_dir_all(&dir).map_err(|e| {
        AppError::config(format!(
            "Failed to create report directory '{}': {e}",
            dir.display()
        ))
    })?;

    write_lines(&dir.join("nums.txt"), &tables.counts)?;
    write_lines(&dir.join("months.txt"), &tables.months)?;
    write_lines(&dir.join("total.txt"), &tables.total)?;

    Ok(dir)
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create '{}': {e}", path.display())))?;
    for line in lines {
        writeln!(file, "{line}")
            .map_err(|e| AppError::config(format!("Failed to write '{}': {e}", path.display())))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_three_files_under_dated_directory() {
        let root = tempfile::tempdir().unwrap();
        let tables = ReportTables {
            counts: vec!["2021-02,2".to_string(), "2021-03,1".to_string()],
            months: vec!["month, header".to_string(), "2021-02,row".to_string()],
            total: vec!["header".to_string(), "row".to_string()],
        };
        let date = NaiveDate::from_ymd_opt(2021, 3, 2).unwrap();

        let dir = write_report_files(root.path(), date, &tables).unwrap();
        assert_eq!(dir, root.path().join("2021-03-02"));

        let nums = std::fs::read_to_string(dir.join("nums.txt")).unwrap();
        assert_eq!(nums, "2021-02,2\n2021-03,1\n");
        let months = std::fs::read_to_string(dir.join("months.txt")).unwrap();
        assert_eq!(months, "month, header\n2021-02,row\n");
        let total = std::fs::read_to_string(dir.join("total.txt")).unwrap();
        assert_eq!(total, "header\nrow\n");
    }
}
