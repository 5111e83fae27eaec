//! starter's main application entry point and orchestration logic.
//! Handles command-line argument parsing, the materialization flow,
//! and coordinates interactions between different modules.

use std::io::IsTerminal;

use starter::{
    answers::get_answers,
    cli::{get_args, Args},
    config::load_config,
    constants::{CONFIG_FILE, ENV_PREFIX},
    error::{default_error_handler, Result},
    loader::{load_template, resolve_template_url},
    logger::init_logger,
    prompt::{Console, DialoguerPrompter, Prompter},
    tasks::run_tasks,
    vars::vars_from_env,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    let mut prompt: Box<dyn Prompter> = if std::io::stdin().is_terminal() {
        Box::new(DialoguerPrompter::new())
    } else {
        Box::new(Console::stdio())
    };

    if let Err(err) = run(args, &mut *prompt) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the template URL
/// 2. Collects variables from the environment, `--var` flags and the run itself
/// 3. Clones the template into the destination, unless `--skip-clone` is set
/// 4. Loads .starter.yml from the destination
/// 5. Asks the questions that have no valid answer yet
/// 6. Runs the tasks inside the destination
fn run(args: Args, prompt: &mut dyn Prompter) -> Result<()> {
    let url = resolve_template_url(&args.template);

    let mut vars = vars_from_env(ENV_PREFIX, std::env::vars());
    vars.extend(args.vars);
    vars.insert("template_url".to_string(), url.clone());
    vars.insert("template_branch".to_string(), args.branch.clone());
    vars.insert("destination".to_string(), args.destination.display().to_string());

    if !args.skip_clone {
        prompt.title(&format!("Cloning template {}", args.template));
    }
    let root = load_template(&url, &args.branch, &args.destination, args.skip_clone)?;

    let config = load_config(root.join(CONFIG_FILE))?;
    let vars = get_answers(prompt, &config.questions, vars)?;

    run_tasks(prompt, &config.tasks, &vars, &root)?;

    prompt.print("You're all set, happy coding!");
    Ok(())
}
