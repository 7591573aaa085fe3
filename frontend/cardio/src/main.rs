use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use cardio::render::{blocked_text, form_text, model_text, report_text, ModelSummary};
use cardio::{FormSession, Settings, DEFAULT_MODEL};
use cardio_model::{load_and_install, HeartModel};
use cardio_risk::{
    assess_record, assess_submission, AssessOptions, AssessmentReport, SubmissionError,
    DEFAULT_TOP_N,
};
use cardio_schema::{form_spec, Submission};
use clap::{Args, Parser, Subcommand};
use log::debug;
use serde_json::Value as JsonValue;

const EXIT_OK: i32 = 0;
const EXIT_BLOCKED: i32 = 1;
const EXIT_FATAL: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "cardio",
    version,
    about = "Heart-disease risk assessment from a pre-trained classifier",
    long_about = "cardio collects the answers of the heart-disease risk form, runs a\n\
        pre-trained classifier against them and reports a binary risk label with\n\
        the classifier's confidence.\n\n\
        EXAMPLES:\n\
        \n  cardio form                                   Describe the input form\n\
        \n  cardio assess --input answers.json            Assess a saved submission\n\
        \n  cardio assess --input - --threshold 0.3       Read the submission from stdin\n\
        \n  cardio --model models/heart_forest.json assess --input a.json --importances\n\
        \n  cardio interactive                            Fill in the form field by field"
)]
struct Cli {
    /// Model artifact to load
    #[arg(long, global = true, env = "CARDIO_MODEL", default_value = DEFAULT_MODEL, value_name = "FILE")]
    model: PathBuf,

    /// Schema descriptor the model must agree with
    #[arg(long, global = true, env = "CARDIO_SCHEMA", value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Decision threshold in [0, 1]
    #[arg(long, global = true, env = "CARDIO_THRESHOLD", value_name = "T")]
    threshold: Option<f64>,

    /// Number of importances to show
    #[arg(long = "top", global = true, env = "CARDIO_TOP_N", default_value_t = DEFAULT_TOP_N, value_name = "N")]
    top_n: usize,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Describe the form controls and the threshold slider
    Form(OutputArgs),

    /// Assess one submission
    #[command(
        long_about = "Collects one submission and evaluates it.\n\n\
            The submission is a JSON object of field name to value, read from --input\n\
            (use '-' for stdin). --set FIELD=VALUE entries are applied on top of it."
    )]
    Assess(AssessArgs),

    /// Fill in the form field by field, then assess
    #[command(long_about = "Prompts for every form control in turn.\n\n\
            Commands:\n\
            \n  (empty)  Accept the default\n\
            \n  :back    Return to the previous control\n\
            \n  :quit    Abandon the form (also :q)")]
    Interactive(InteractiveArgs),

    /// Print the loaded model's metadata, columns and encoded features
    Inspect(OutputArgs),
}

#[derive(Debug, Args, Clone)]
struct OutputArgs {
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct AssessArgs {
    /// JSON submission file ('-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Set or override one field
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,

    /// Show the classifier's feature-importance ranking
    #[arg(long)]
    importances: bool,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct InteractiveArgs {
    /// Show the classifier's feature-importance ranking
    #[arg(long)]
    importances: bool,
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            EXIT_OK
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            EXIT_FATAL
        }
    }
}

fn print_report(report: &AssessmentReport, json: bool) -> i32 {
    if json {
        print_json(report)
    } else {
        print!("{}", report_text(report));
        EXIT_OK
    }
}

fn load_model(settings: &Settings) -> Result<&'static HeartModel, i32> {
    load_and_install(&settings.model, settings.schema.as_deref()).map_err(|e| {
        eprintln!("error: {e}");
        EXIT_FATAL
    })
}

fn read_input(input: &Path) -> io::Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(input)
    }
}

fn parse_submission(text: &str) -> Result<Submission, String> {
    let value: JsonValue =
        serde_json::from_str(text).map_err(|e| format!("submission is not valid JSON: {e}"))?;
    Submission::from_json(&value).map_err(|e| e.to_string())
}

fn run_form(args: &OutputArgs) -> i32 {
    let spec = form_spec();
    if args.json {
        print_json(&spec)
    } else {
        print!("{}", form_text(&spec));
        EXIT_OK
    }
}

fn run_assess(settings: &Settings, args: &AssessArgs) -> i32 {
    let mut submission = match &args.input {
        Some(path) => {
            let text = match read_input(path) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("error: failed to read '{}': {e}", path.display());
                    return EXIT_FATAL;
                }
            };
            match parse_submission(&text) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: {e}");
                    return EXIT_BLOCKED;
                }
            }
        }
        None => Submission::new(),
    };
    for assignment in &args.set {
        if let Err(e) = submission.insert_assignment(assignment) {
            eprintln!("error: {e}");
            return EXIT_BLOCKED;
        }
    }
    debug!("submission has {} field(s)", submission.len());

    let model = match load_model(settings) {
        Ok(m) => m,
        Err(code) => return code,
    };
    let options = AssessOptions {
        importances: args.importances,
        top_n: settings.top_n,
    };
    match assess_submission(&submission, settings.threshold, model, options) {
        Ok(report) => print_report(&report, args.json),
        Err(SubmissionError::Blocked(e)) => {
            eprint!("{}", blocked_text(&e));
            EXIT_BLOCKED
        }
        Err(SubmissionError::Model(e)) => {
            eprintln!("error: {e}");
            EXIT_FATAL
        }
    }
}

fn run_interactive(settings: &Settings, args: &InteractiveArgs) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    let model = match load_model(settings) {
        Ok(m) => m,
        Err(code) => return code,
    };
    let mut rl = match DefaultEditor::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize prompt: {e}");
            return EXIT_FATAL;
        }
    };

    let spec = form_spec();
    println!("{}", spec.title);
    let mut session = FormSession::new(&spec, settings.threshold);
    while !session.is_complete() {
        match rl.readline(&session.prompt()) {
            Ok(line) => {
                let reply = session.handle_line(&line);
                for l in reply.lines {
                    println!("{l}");
                }
                if reply.quit {
                    return EXIT_OK;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return EXIT_OK,
            Err(e) => {
                eprintln!("error: prompt failed: {e}");
                return EXIT_FATAL;
            }
        }
    }

    let (record, threshold) = match session.finish() {
        Ok(done) => done,
        Err(e) => {
            eprintln!("error: {e}");
            return EXIT_BLOCKED;
        }
    };
    let options = AssessOptions {
        importances: args.importances,
        top_n: settings.top_n,
    };
    match assess_record(&record, threshold, model, options) {
        Ok(report) => print_report(&report, false),
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_FATAL
        }
    }
}

fn run_inspect(settings: &Settings, args: &OutputArgs) -> i32 {
    let model = match load_model(settings) {
        Ok(m) => m,
        Err(code) => return code,
    };
    let summary = ModelSummary::of(model);
    if args.json {
        print_json(&summary)
    } else {
        print!("{}", model_text(&summary));
        EXIT_OK
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    let settings = match Settings::new(
        cli.model,
        cli.schema,
        cli.threshold,
        cli.top_n,
        cli.verbose,
    ) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return EXIT_BLOCKED;
        }
    };
    settings.init_logging();
    debug!("settings: {settings:?}");

    match &cli.command {
        Command::Form(args) => run_form(args),
        Command::Assess(args) => run_assess(&settings, args),
        Command::Interactive(args) => run_interactive(&settings, args),
        Command::Inspect(args) => run_inspect(&settings, args),
    }
}

fn main() {
    std::process::exit(run_cli());
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_risk::RiskThreshold;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "cardio",
            "assess",
            "--set",
            "BMI=22",
            "--threshold",
            "0.8",
            "--top",
            "5",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.threshold, Some(0.8));
        assert_eq!(cli.top_n, 5);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Assess(args) => assert_eq!(args.set, vec!["BMI=22".to_string()]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn default_threshold_when_unset() {
        let s = Settings::new(PathBuf::from(DEFAULT_MODEL), None, None, DEFAULT_TOP_N, 0).unwrap();
        assert_eq!(s.threshold, RiskThreshold::default());
    }
}
