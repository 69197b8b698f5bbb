use clap::Parser;
use clap::error::ErrorKind;
use kaleidogif::{config, output, pipeline};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: kaleidogif <directory-with-frames> <output-file>";

#[derive(Parser)]
#[command(name = "kaleidogif")]
#[command(about = "Turn a directory of photos into a kaleidoscope negative GIF")]
#[command(long_about = "\
Turn a directory of photos into a kaleidoscope negative GIF

Every photo in the directory becomes one frame. Its colors are inverted and
the negative is placed four times around a black square: as-is on top,
mirrored at the bottom, and rotated on the left and right.

Input structure:

  frames/
  ├── config.toml      # Optional settings (see --gen-config)
  ├── 0001.jpg         # Frame 1
  ├── 0002.jpg         # Frame 2
  └── 0003.jpg         # Frame 3

Frames play in file-name order; zero-pad numbered files. All photos must
have the same dimensions. A W x H photo gives a (W + 2H) square frame.

Set RUST_LOG=debug for per-frame diagnostics on stderr.")]
#[command(version)]
struct Cli {
    /// Directory containing the frame photos
    input: Option<PathBuf>,

    /// GIF file to write (overwritten if it exists)
    output: Option<PathBuf>,

    /// Extra config file, applied on top of <input>/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print a stock config.toml with all options documented
    #[arg(long)]
    gen_config: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
    };

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    let (Some(input), Some(output)) = (cli.input, cli.output) else {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    };

    init_logging();

    match run(&input, &output, cli.config.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    input: &Path,
    output_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let render_config = config::load_config(input, config_path)?;
    init_thread_pool(&render_config.processing);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_process_event(&event);
        }
    });
    let result = pipeline::render_animation(input, output_path, &render_config, Some(tx));
    printer.join().ok();

    output::print_render_summary(&result?);
    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. User can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
