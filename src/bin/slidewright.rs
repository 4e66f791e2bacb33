use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

/// Render a carousel (cover plus text slides) described by a JSON request.
///
/// Prints exactly one JSON line on stdout: `{"success":true,"coverPath":..,"slidePaths":[..]}`
/// or `{"success":false,"error":..}`. Logs go to stderr (`RUST_LOG`, default `warn`).
#[derive(Parser, Debug)]
#[command(name = "slidewright", version)]
struct Cli {
    /// Input request JSON.
    input: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let msg = match e.kind() {
                ErrorKind::MissingRequiredArgument => {
                    "missing input JSON path (usage: slidewright <input.json>)".to_string()
                }
                _ => e
                    .render()
                    .to_string()
                    .lines()
                    .next()
                    .unwrap_or("invalid arguments")
                    .trim()
                    .trim_start_matches("error: ")
                    .to_string(),
            };
            return emit(slidewright::Envelope::Failure(slidewright::Failure::new(msg)));
        }
    };

    emit(slidewright::Envelope::from_result(run(&cli)))
}

fn run(cli: &Cli) -> anyhow::Result<slidewright::Manifest> {
    let input = slidewright::RenderInput::from_path(&cli.input)?;
    let req = input.into_request(&slidewright::StaticBrandRegistry::builtin())?;
    let mut session = slidewright::RenderSession::new(slidewright::RenderSessionOpts::from_env());
    Ok(session.render(&req)?)
}

fn emit(envelope: slidewright::Envelope) -> ExitCode {
    let code = if envelope.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };
    let line = match envelope.to_json_line() {
        Ok(line) => line,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode result");
            return ExitCode::FAILURE;
        }
    };
    let mut stdout = std::io::stdout().lock();
    if writeln!(stdout, "{line}").and_then(|()| stdout.flush()).is_err() {
        return ExitCode::FAILURE;
    }
    code
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
