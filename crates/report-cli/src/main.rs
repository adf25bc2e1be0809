//! Report builder CLI.

use clap::{ColorChoice, Parser};
use report_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use report_cli::commands::{
    delete_mapping, list_mappings, run_generate, run_map, run_validate, show_mapping,
};
use report_cli::types::{GenerateOptions, MapOptions, ValidateOptions};
use report_map::MappingStrictness;
use report_validate::SubmitterEmail;

use crate::cli::{
    Cli, Command, GenerateArgs, LogFormatArg, LogLevelArg, MapArgs, MappingsCommand, ValidateArgs,
};
use crate::summary::{print_generate, print_mapping, print_mapping_list, print_validation};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: Command) -> anyhow::Result<i32> {
    match command {
        Command::Map(args) => map(&args),
        Command::Generate(args) => generate(&args),
        Command::Validate(args) => validate(&args),
        Command::Mappings(MappingsCommand::List { dir }) => {
            print_mapping_list(&list_mappings(&dir)?);
            Ok(0)
        }
        Command::Mappings(MappingsCommand::Show { dir, template_id }) => {
            let stored = show_mapping(&dir, &template_id)?;
            println!("{}", serde_json::to_string_pretty(&stored)?);
            Ok(0)
        }
        Command::Mappings(MappingsCommand::Delete { dir, template_id }) => {
            if delete_mapping(&dir, &template_id)? {
                println!("Deleted mapping for {template_id}");
                Ok(0)
            } else {
                eprintln!("No saved mapping for {template_id}");
                Ok(1)
            }
        }
    }
}

fn map(args: &MapArgs) -> anyhow::Result<i32> {
    let options = MapOptions {
        template: args.source.template.clone(),
        data: args.source.data.clone(),
        overrides: args.source.overrides.clone(),
        strictness: if args.strict {
            MappingStrictness::Strict
        } else {
            MappingStrictness::Permissive
        },
        save_dir: args.save.clone(),
    };
    let result = run_map(&options)?;
    if args.json {
        let body = serde_json::json!({
            "templateId": result.template_id,
            "mapping": result.mapping,
            "summary": result.summary,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_mapping(&result);
    }
    Ok(0)
}

fn generate(args: &GenerateArgs) -> anyhow::Result<i32> {
    let options = GenerateOptions {
        template: args.source.template.clone(),
        data: args.source.data.clone(),
        mappings_dir: args.mappings.clone(),
        overrides: args.source.overrides.clone(),
        format: args.format,
        output: args.output.clone(),
        preview: args.preview,
    };
    let result = run_generate(&options)?;
    print_generate(&result);
    if result.output.is_none() {
        println!("{}", serde_json::to_string_pretty(&result.request)?);
    }
    Ok(0)
}

fn validate(args: &ValidateArgs) -> anyhow::Result<i32> {
    let options = ValidateOptions {
        form: args.form.clone(),
        submission: args.submission.clone(),
        submitter_email: if args.require_email {
            SubmitterEmail::Required
        } else {
            SubmitterEmail::Optional
        },
    };
    let result = run_validate(&options)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.result)?);
    } else {
        print_validation(&result);
    }
    Ok(if result.result.is_valid { 0 } else { 1 })
}

/// Build logging configuration from CLI flags.
///
/// `RUST_LOG` applies only when neither `-v/-q` nor `--log-level` is given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default();
    if let Some(level) = cli.log_level {
        config = config.with_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    } else if cli.verbosity.is_present() {
        config = config.with_level(cli.verbosity.tracing_level_filter());
    }
    config = config
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
