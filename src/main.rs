// src/main.rs
//
// mailbody — convert email bodies from the command line
//
// - render  : body (text / markdown / html) → complete styled HTML document,
//             or just the fragment with --fragment.
// - extract : HTML document → inner content of its <body>.
// - text    : HTML → plain text for reading in a terminal.
// - forward : render a body and splice it above a quoted original message.
//
// Input is a file path, or stdin when omitted or "-". Output goes to stdout
// unless -o is given.
//
// Flags:
//   --format <f>          : text (default), md/markdown, html. Also MAILBODY_FORMAT.
//   --max-quote-depth <n> : blockquote nesting rendered from Markdown.
//   --strict              : fail instead of flattening over-deep blockquotes.
//   -v / -vv / -vvv       : log to stderr at info / debug / trace (RUST_LOG wins).

use clap::{ArgAction, Args, Parser, Subcommand};
use mailbody::{
    extract_body_content, reduce_to_plain_text, wrap_document, BodyFormat, BodyRenderer,
    MarkdownRenderer, DEFAULT_MAX_QUOTE_DEPTH,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// CLI flags
#[derive(Parser)]
#[command(name = "mailbody", author, version, about)]
struct Cli {
    /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a body into a complete HTML document
    Render {
        #[command(flatten)]
        render: RenderArgs,

        /// Emit only the HTML fragment, without the document wrapper
        #[arg(long)]
        fragment: bool,

        #[command(flatten)]
        io: IoArgs,
    },
    /// Print the inner content of an HTML document's <body>
    Extract {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Reduce HTML to plain text
    Text {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Render a body above the quoted content of an original message
    Forward {
        #[command(flatten)]
        render: RenderArgs,

        /// HTML of the message being forwarded
        #[arg(long)]
        original: PathBuf,

        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Body format: text, md/markdown, or html (unknown values mean text)
    #[arg(short, long, env = "MAILBODY_FORMAT", default_value = "text", value_parser = parse_format)]
    format: BodyFormat,

    /// Blockquote levels rendered from Markdown before markers are left as text
    #[arg(long, default_value_t = DEFAULT_MAX_QUOTE_DEPTH)]
    max_quote_depth: usize,

    /// Fail instead of flattening blockquotes nested past --max-quote-depth
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
}

impl RenderArgs {
    fn renderer(&self) -> BodyRenderer {
        BodyRenderer::new(MarkdownRenderer::new().with_max_quote_depth(self.max_quote_depth))
    }

    fn fragment(&self, body: &str) -> Result<String, CliError> {
        let renderer = self.renderer();
        if self.strict {
            Ok(renderer.try_render_inner(body, self.format)?)
        } else {
            Ok(renderer.render_inner(body, self.format))
        }
    }

    fn forward(&self, body: &str, original: &str) -> Result<String, CliError> {
        let renderer = self.renderer();
        if self.strict {
            Ok(renderer.try_compose_forward(body, self.format, original)?)
        } else {
            Ok(renderer.compose_forward(body, self.format, original))
        }
    }
}

#[derive(Args)]
struct IoArgs {
    /// Input file (default: stdin; "-" also means stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_format(s: &str) -> Result<BodyFormat, String> {
    Ok(BodyFormat::parse(s))
}

#[derive(Debug, Error)]
enum CliError {
    #[error("reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("writing {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Render(#[from] mailbody::Error),
}

/// Initialize tracing based on verbosity. Nothing is installed at 0 unless
/// RUST_LOG is set.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => return,
            1 => "mailbody=info".to_string(),
            2 => "mailbody=debug".to_string(),
            _ => "mailbody=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mailbody: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Render {
            render,
            fragment,
            io,
        } => {
            let body = read_input(io.input.as_deref())?;
            let inner = render.fragment(&body)?;
            let out = if fragment { inner } else { wrap_document(&inner) };
            write_output(io.output.as_deref(), &out)
        }
        Command::Extract { io } => {
            let doc = read_input(io.input.as_deref())?;
            write_output(io.output.as_deref(), extract_body_content(&doc))
        }
        Command::Text { io } => {
            let html = read_input(io.input.as_deref())?;
            write_output(io.output.as_deref(), &reduce_to_plain_text(&html))
        }
        Command::Forward {
            render,
            original,
            io,
        } => {
            let body = read_input(io.input.as_deref())?;
            let original = read_input(Some(original.as_path()))?;
            let out = render.forward(&body, &original)?;
            write_output(io.output.as_deref(), &out)
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read_to_string(p).map_err(|source| CliError::Read {
                path: p.display().to_string(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), CliError> {
    let mut out = String::with_capacity(text.len() + 1);
    out.push_str(text);
    if !out.ends_with('\n') {
        out.push('\n');
    }

    match path {
        Some(p) => fs::write(p, out).map_err(|source| CliError::Write {
            path: p.display().to_string(),
            source,
        }),
        None => io::stdout()
            .lock()
            .write_all(out.as_bytes())
            .map_err(|source| CliError::Write {
                path: "<stdout>".to_string(),
                source,
            }),
    }
}
