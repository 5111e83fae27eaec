//! Command-line interface implementation for starter.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::{DEFAULT_BRANCH, DEFAULT_PREFIX, DEFAULT_SUFFIX};
use crate::vars::parse_var;
use clap::{builder::NonEmptyStringValueParser, error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Arguments of the `starter` binary.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "starter: bootstrap a new project from a template repository",
    long_about = None,
    after_help = "Example:\n    starter --var \"app_name=awesome-project\" go-starter-template awesome-project"
)]
pub struct Args {
    /// Template repository: a URL, `owner/name`, or just `name`
    #[arg(value_name = "TEMPLATE", value_parser = NonEmptyStringValueParser::new())]
    pub template: String,

    /// Directory where the new project will be created
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// An additional variable, can be used multiple times. Example: --var "name=value"
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Skip the clone step, just enter the destination directory and run tasks
    #[arg(long)]
    pub skip_clone: bool,

    /// Branch to check out in the template repository
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments of the `starter-replace` binary.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "starter-replace: swap template placeholders and values in the current directory",
    long_about = None,
    after_help = "Example:\n    STARTER_PLACEHOLDER1=VALUE1 STARTER_PLACEHOLDER2=VALUE2 starter-replace"
)]
pub struct ReplaceArgs {
    /// Placeholder prefix
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Placeholder suffix
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Replace values with placeholders instead
    #[arg(short, long)]
    pub reverse: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments.
///
/// # Exits
/// * With status code 1 and the help text if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn parse_args<T: Parser + CommandFactory>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = T::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// Arguments of the `starter` binary.
pub fn get_args() -> Args {
    parse_args()
}

/// Arguments of the `starter-replace` binary.
pub fn get_replace_args() -> ReplaceArgs {
    parse_args()
}
