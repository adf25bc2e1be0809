//! CLI argument definitions for the report builder.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use report_cli::commands::parse_override;
use report_cli::types::FieldOverride;
use report_model::OutputFormat;

#[derive(Parser)]
#[command(
    name = "report-builder",
    version,
    about = "Map spreadsheet columns to report templates and validate form submissions",
    long_about = "Map spreadsheet columns to report template fields, build report \
                  generation requests, and validate dynamic form submissions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include cell and submission values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Auto-map template fields to spreadsheet columns.
    Map(MapArgs),

    /// Build a report generation request from a template and spreadsheet.
    Generate(GenerateArgs),

    /// Validate a submission against a form definition.
    Validate(ValidateArgs),

    /// Manage saved mappings.
    #[command(subcommand)]
    Mappings(MappingsCommand),
}

/// Inputs shared by `map` and `generate`.
#[derive(Args)]
pub struct SourceArgs {
    /// Template metadata JSON (`{id, name?, fields: [{name, label}]}`).
    #[arg(long = "template", value_name = "FILE")]
    pub template: PathBuf,

    /// Spreadsheet to map (.csv, or .json holding `{headers, rows}`).
    #[arg(long = "data", value_name = "FILE")]
    pub data: PathBuf,

    /// Manual correction; repeatable. `field=` leaves the field unmapped.
    #[arg(long = "set", value_name = "FIELD=HEADER", value_parser = parse_override)]
    pub overrides: Vec<FieldOverride>,
}

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Reject overrides naming a header that is not in the spreadsheet.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Save the resulting mapping into this repository directory.
    #[arg(long = "save", value_name = "DIR")]
    pub save: Option<PathBuf>,

    /// Print the mapping as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Repository directory holding saved mappings.
    #[arg(long = "mappings", value_name = "DIR")]
    pub mappings: Option<PathBuf>,

    /// Requested report format (pdf, docx or xlsx).
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "pdf",
        value_parser = OutputFormat::from_str
    )]
    pub format: OutputFormat,

    /// Write the request body here instead of stdout.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Show the first N mapped records.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Form definition JSON (`{id, title?, fields: [...]}`).
    #[arg(long = "form", value_name = "FILE")]
    pub form: PathBuf,

    /// Submission JSON (`{data, submitterEmail?}`).
    #[arg(long = "submission", value_name = "FILE")]
    pub submission: PathBuf,

    /// Require a valid `submitterEmail` on the submission.
    #[arg(long = "require-email")]
    pub require_email: bool,

    /// Print the validation result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum MappingsCommand {
    /// List saved mappings.
    List {
        #[arg(long = "dir", value_name = "DIR")]
        dir: PathBuf,
    },
    /// Print a saved mapping as JSON.
    Show {
        #[arg(long = "dir", value_name = "DIR")]
        dir: PathBuf,
        #[arg(value_name = "TEMPLATE_ID")]
        template_id: String,
    },
    /// Delete a saved mapping.
    Delete {
        #[arg(long = "dir", value_name = "DIR")]
        dir: PathBuf,
        #[arg(value_name = "TEMPLATE_ID")]
        template_id: String,
    },
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
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repeated_overrides() {
        let cli = Cli::try_parse_from([
            "report-builder",
            "map",
            "--template",
            "t.json",
            "--data",
            "d.csv",
            "--set",
            "region=Area",
            "--set",
            "notes=",
            "--strict",
        ])
        .unwrap();
        let Command::Map(args) = cli.command else {
            panic!("expected map command");
        };
        assert!(args.strict);
        assert_eq!(args.source.overrides.len(), 2);
        assert_eq!(args.source.overrides[1].header, "");
    }

    #[test]
    fn test_global_log_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "report-builder",
            "mappings",
            "list",
            "--dir",
            "store",
            "--log-format",
            "json",
            "--log-data",
        ])
        .unwrap();
        assert!(cli.log_data);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }

    #[test]
    fn test_generate_format_aliases() {
        let cli = Cli::try_parse_from([
            "report-builder",
            "generate",
            "--template",
            "t.json",
            "--data",
            "d.csv",
            "--format",
            "excel",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(args.format, OutputFormat::Xlsx);
        assert!(
            Cli::try_parse_from([
                "report-builder",
                "generate",
                "--template",
                "t.json",
                "--data",
                "d.csv",
                "--format",
                "odt",
            ])
            .is_err()
        );
    }
}
