mod run;

use clap::Parser;
use htmldiff::ReportError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "htmldiff")]
#[command(about = "Render the differences between two text files as a side-by-side HTML page")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Path to the old/base file")]
    pub old: PathBuf,
    #[arg(help = "Path to the new/changed file")]
    pub new: PathBuf,
    #[arg(long, short, value_name = "PATH", help = "Write the page here instead of stdout")]
    pub output: Option<PathBuf>,
    #[arg(long, short = 'n', help = "Prefix lines with their line number")]
    pub line_numbers: bool,
    #[arg(long, short = 'b', conflicts_with = "line_numbers", help = "Prefix lines with bracketed line numbers")]
    pub bracket_numbers: bool,
    #[arg(long, short = 'u', help = "Only show changed regions")]
    pub only_changes: bool,
    #[arg(long, short, value_name = "CHARS", help = "Cut lines longer than this")]
    pub truncate: Option<usize>,
    #[arg(long, help = "Do not escape '<' in file content")]
    pub raw_html: bool,
    #[arg(long, value_name = "COLOR", default_value = "#ccffcc", help = "Highlight for added lines")]
    pub add_color: String,
    #[arg(long, value_name = "COLOR", default_value = "#ffcccc", help = "Highlight for deleted lines")]
    pub delete_color: String,
    #[arg(long, value_name = "COLOR", default_value = "#ffffaa", help = "Highlight for changed lines")]
    pub change_color: String,
    #[arg(long, value_name = "N", default_value_t = 8, help = "Tab stop width, 0 keeps tabs")]
    pub tab_size: usize,
    #[arg(long, value_name = "PROGRAM", default_value = "diff", help = "Line-diff program producing normal-format output")]
    pub diff_program: String,
    #[arg(long = "diff-arg", value_name = "ARG", allow_hyphen_values = true, help = "Extra argument for the diff program (repeatable)")]
    pub diff_args: Vec<String>,
    #[arg(long, conflicts_with = "diff_program", help = "Compute the diff in process instead of running a program")]
    pub builtin: bool,
    #[arg(long, help = "Page title")]
    pub title: Option<String>,
    #[arg(long, short, action = clap::ArgAction::Count, help = "More logging on stderr (-v, -vv)")]
    pub verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if is_internal_error(err) {
        ExitCode::from(3)
    } else {
        ExitCode::from(2)
    }
}

/// Script/file disagreements and unparsable scripts, as opposed to bad
/// arguments or unreadable files.
fn is_internal_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ReportError>(),
            Some(
                ReportError::MalformedOperation { .. }
                    | ReportError::UnknownOperation { .. }
                    | ReportError::PrematureEof { .. }
                    | ReportError::TruncatedScript { .. }
            )
        )
    })
}
