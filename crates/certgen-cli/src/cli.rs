//! CLI argument definitions for the certificate generator.

use std::path::PathBuf;

use certgen_ingest::GroupFilter;
use certgen_model::{DateRange, RunConfiguration};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "certgen",
    version,
    about = "Generate and deliver internship completion certificates",
    long_about = "Generate one certificate per spreadsheet row from a template presentation.\n\n\
                  Without --school every certificate is emailed to its participant and a\n\
                  merged certificates.pdf is written. With --school only that school's rows\n\
                  are processed and packaged into certificates.zip."
)]
pub struct Cli {
    /// Spreadsheet id holding the participant rows.
    #[arg(long = "sheet-id", value_name = "ID")]
    pub sheet_id: String,

    /// Sheet name (or A1 range) to read.
    #[arg(long = "sheet-name", value_name = "NAME")]
    pub sheet_name: String,

    /// Internship start date.
    #[arg(long = "date", value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: NaiveDate,

    /// Internship end date.
    #[arg(long = "todate", value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub todate: NaiveDate,

    /// Only process this school and write a zip archive instead of emailing.
    #[arg(long = "school", value_name = "NAME")]
    pub school: Option<String>,

    /// Directory receiving certificates.zip or certificates.pdf.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Write the run report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Pause after every email, in milliseconds.
    #[arg(long = "send-delay-ms", value_name = "MS", default_value_t = 2000)]
    pub send_delay_ms: u64,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Include recipient email addresses in logs.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

impl Cli {
    /// Run parameters. A blank or `undefined` school means no filter.
    pub fn run_configuration(&self) -> RunConfiguration {
        RunConfiguration {
            sheet_id: self.sheet_id.trim().to_string(),
            sheet_range: self.sheet_name.clone(),
            date_range: DateRange::new(self.date, self.todate),
            group_filter: self
                .school
                .as_deref()
                .and_then(GroupFilter::parse)
                .map(|filter| filter.school().to_string()),
        }
    }
}

/// Exit code for an argument parsing outcome: 0 for help and version
/// output, 1 for usage errors.
pub fn usage_exit_code(error: &clap::Error) -> i32 {
    if error.use_stderr() { 1 } else { 0 }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    use super::*;

    const REQUIRED: [&str; 9] = [
        "certgen",
        "--sheet-id",
        "abc",
        "--sheet-name",
        "Sheet1",
        "--date",
        "2025-06-21",
        "--todate",
        "2025-06-25",
    ];

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_required_flags_with_defaults() {
        let cli = Cli::try_parse_from(REQUIRED).expect("parse");
        assert_eq!(cli.sheet_id, "abc");
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2025, 6, 21).unwrap());
        assert_eq!(cli.todate, NaiveDate::from_ymd_opt(2025, 6, 25).unwrap());
        assert_eq!(cli.school, None);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert_eq!(cli.send_delay_ms, 2000);
        assert!(!cli.log_data);
    }

    #[test]
    fn school_is_optional() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--school", "ABC School"]);
        let cli = Cli::try_parse_from(args).expect("parse");
        assert_eq!(cli.school.as_deref(), Some("ABC School"));
    }

    #[test]
    fn missing_required_flag_is_an_error() {
        let err = Cli::try_parse_from(&REQUIRED[..5]).err().expect("error");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn usage_errors_exit_with_one() {
        let err = Cli::try_parse_from(&REQUIRED[..5]).err().expect("error");
        assert_eq!(usage_exit_code(&err), 1);
        let err = Cli::try_parse_from(["certgen", "--help"]).err().expect("help");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(usage_exit_code(&err), 0);
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut args = REQUIRED.to_vec();
        args[6] = "21/06/2025";
        let err = Cli::try_parse_from(args).err().expect("error");
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
