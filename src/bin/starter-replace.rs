//! Entry point of `starter-replace`.
//! Replaces placeholders with the values of `STARTER_*` environment variables
//! across the template in the current directory, or the other way around
//! with `--reverse`.

use starter::{
    cli::{get_replace_args, ReplaceArgs},
    constants::ENV_PREFIX,
    dictionary::Markers,
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::{print_report, replace_into, Report},
    prompt::{Console, Prompter},
    vars::vars_from_env,
};

fn main() {
    let args = get_replace_args();
    init_logger(args.verbose);

    let mut prompt = Console::stdio();

    if let Err(err) = run(args, &mut prompt) {
        default_error_handler(err);
    }
}

fn run(args: ReplaceArgs, prompt: &mut dyn Prompter) -> Result<()> {
    let vars = vars_from_env(ENV_PREFIX, std::env::vars());
    let markers = Markers { prefix: args.prefix, suffix: args.suffix, reverse: args.reverse };

    let mut report = Report::default();
    let result = replace_into(".", &vars, &markers, &mut report);

    // Printed even when the walk stopped early.
    print_report(prompt, &report);
    result?;

    if report.is_unchanged() {
        prompt.print("Nothing to replace.");
    }

    Ok(())
}
