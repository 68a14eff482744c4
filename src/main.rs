//! MindWatch CLI
//!
//! Usage:
//!   mindwatch --text "your text here"       # Single evaluation
//!   mindwatch --interactive                 # Evaluate stdin line by line
//!   mindwatch --face                        # One JSON expression frame per stdin line
//!   mindwatch --serve                       # HTTP API server
//!   mindwatch --text "text" --json          # JSON output

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use mindwatch::config::Config;
use mindwatch::core::{run_server, CrisisClassifier, ExpressionProcessor, KeywordMatches};
use mindwatch::types::{Expression, ExpressionFrame, FaceReading, TextEvaluation};
use mindwatch::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "mindwatch",
    version = VERSION,
    about = "MindWatch - crisis language detection and facial stress scoring",
    long_about = "MindWatch screens messages for crisis and stress language and turns\n\
                  per-frame facial-expression probabilities into a smoothed 0-100\n\
                  stress score.\n\n\
                  Modes:\n  \
                  --text         Evaluate one message\n  \
                  --interactive  Evaluate messages line by line\n  \
                  --face         Score expression frames (JSON per line)\n  \
                  --serve        HTTP API server mode\n\n\
                  Severity:\n  \
                  NONE / LOW / MODERATE  - stress language only\n  \
                  HIGH / CRITICAL        - crisis language, resources attached"
)]
struct Args {
    /// Text to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - evaluate each stdin line
    #[arg(short, long)]
    interactive: bool,

    /// Face mode - read one JSON expression frame per stdin line
    #[arg(short, long)]
    face: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides MINDWATCH_ADDR)
    #[arg(long)]
    addr: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show keyword / expression breakdown
    #[arg(long)]
    verbose: bool,

    /// Tracing filter when RUST_LOG is unset (overrides MINDWATCH_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(addr) = &args.addr {
        config.addr = addr.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    } else if args.verbose {
        config.log_level = "debug".to_string();
    }
    init_tracing(&config.log_level);

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.serve {
        run_server(config).await.context("API server failed")?;
    } else if args.face {
        run_face(&args)?;
    } else if let Some(text) = &args.text {
        run_single(text, &args)?;
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args)?;
    }
    Ok(())
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();
}

/// Run single text evaluation
fn run_single(text: &str, args: &Args) -> anyhow::Result<()> {
    let evaluation = CrisisClassifier::new().evaluate(text);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print_evaluation(text, &evaluation, args);
    }
    Ok(())
}

/// Evaluate stdin line by line
fn run_interactive(args: &Args) -> anyhow::Result<()> {
    let classifier = CrisisClassifier::new();

    print_header("Interactive", args.no_color);
    println!("Type a message and press Enter. Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut evaluated = 0usize;

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Messages: {}", evaluated);
            break;
        }
        if line.is_empty() {
            continue;
        }

        let evaluation = classifier.evaluate(line);
        evaluated += 1;
        if args.json {
            println!("{}", serde_json::to_string(&evaluation)?);
        } else {
            print_evaluation(line, &evaluation, args);
        }
    }
    Ok(())
}

/// Score expression frames from stdin
fn run_face(args: &Args) -> anyhow::Result<()> {
    let mut processor = ExpressionProcessor::new();
    let interactive = !args.json;

    if interactive {
        print_header("Face", args.no_color);
        println!("One JSON frame per line, e.g. {{\"happy\":0.1,\"sad\":0.6}}");
        println!("Type 'reset' to start over, 'quit' to exit.");
        println!();
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.eq_ignore_ascii_case("reset") {
            processor.reset();
            if interactive {
                println!("Session reset.");
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }

        let frame: ExpressionFrame = match serde_json::from_str(line) {
            Ok(frame) => frame,
            Err(e) => {
                eprintln!("{} {}", "⚠ skipped frame:".yellow(), e);
                continue;
            }
        };

        let reading = processor.update(frame);
        if args.json {
            println!("{}", serde_json::to_string(&reading)?);
        } else if args.verbose {
            print_verbose_reading(&reading, args.no_color);
        } else if args.no_color {
            println!("{}", reading.to_parseable_string());
        } else {
            println!("{}", reading.to_terminal_string());
        }
    }

    if interactive {
        let timeline = processor.timeline();
        println!(
            "\nFrames: {} | timeline samples: {} | average stress: {:.1}",
            processor.frame_count(),
            timeline.len(),
            timeline.average_stress()
        );
    }
    Ok(())
}

fn print_evaluation(text: &str, evaluation: &TextEvaluation, args: &Args) {
    if args.no_color {
        println!("{}", evaluation.to_parseable_string());
    } else {
        println!("{}", evaluation.to_terminal_string());
    }

    if args.verbose {
        let matches = KeywordMatches::scan(text);
        println!("  crisis keywords: {:?}", matches.crisis);
        println!("  stress keywords: {:?}", matches.stress);
    }

    if let Some(resources) = &evaluation.assessment.resources {
        println!();
        if args.no_color {
            println!("  {}", resources.message);
        } else {
            println!("  {}", resources.message.bold());
        }
        for hotline in &resources.hotlines {
            println!("  - {}: {}", hotline.name, hotline.reach());
        }
        println!();
    }
}

fn print_verbose_reading(reading: &FaceReading, no_color: bool) {
    if no_color {
        println!("{}", reading.to_parseable_string());
    } else {
        println!("{}", reading.to_terminal_string());
    }
    for expr in Expression::ALL {
        let value = reading.smoothed.get(expr);
        let bar = "█".repeat((value * 20.0).round() as usize);
        println!("  {:<10} {:.3} {}", expr.label(), value, bar);
    }
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    let title = format!("  MindWatch v{} - {}", VERSION, mode);
    if no_color {
        println!("========================================");
        println!("{}", title);
        println!("========================================");
    } else {
        println!("{}", "════════════════════════════════════════".bold());
        println!("{}", title.bold());
        println!("{}", "════════════════════════════════════════".bold());
    }
    println!();
}
