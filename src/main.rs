use clap::Parser;
use gifdrop::options::{self, ConversionOptions};
use gifdrop::{batch, ConversionEngine};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "gifdrop",
    version,
    about = "Convert video files into looping animated GIFs"
)]
struct Cli {
    /// Video files to convert. Dropping files onto the executable passes them
    /// here.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Frames per second sampled from the source (presets: 20, 10, 8).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    fps: Option<u32>,

    /// Target width in pixels; height follows the aspect ratio. "none" keeps
    /// the source size.
    #[arg(long)]
    scale: Option<String>,

    /// Encode at most this many seconds from the start. "none" encodes the
    /// full source.
    #[arg(long, value_name = "SECONDS")]
    time: Option<String>,

    /// Replace existing GIFs without asking.
    #[arg(long, conflicts_with = "ask_overwrite")]
    overwrite: bool,

    /// Ask before replacing an existing GIF.
    #[arg(long)]
    ask_overwrite: bool,

    /// Directory the GIFs are written into, created when first needed.
    #[arg(long, default_value = "GIFs")]
    output_dir: PathBuf,

    /// Persist the effective fps/scale/time/overwrite selection for future
    /// runs.
    #[arg(long)]
    save_defaults: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings_path = options::default_settings_path();
    let mut opts = settings_path
        .as_deref()
        .map(ConversionOptions::load)
        .unwrap_or_default();

    if let Some(fps) = cli.fps {
        opts.set_frame_rate(fps);
    }
    if let Some(scale) = cli.scale {
        opts.set_scale((!scale.eq_ignore_ascii_case("none")).then_some(scale));
    }
    if let Some(time) = cli.time {
        opts.set_duration_limit((!time.eq_ignore_ascii_case("none")).then_some(time));
    }
    if cli.overwrite {
        opts.set_overwrite_existing(true);
    } else if cli.ask_overwrite {
        opts.set_overwrite_existing(false);
    }

    if cli.save_defaults {
        match settings_path.as_deref() {
            Some(path) => {
                if let Err(e) = opts.save(path) {
                    eprintln!("{}", e);
                }
            }
            None => eprintln!("No settings directory available on this platform."),
        }
    }

    let engine = ConversionEngine::new(cli.output_dir);
    for status in batch::process_drop(&engine, &cli.files, &opts, &confirm_from_terminal) {
        println!("{}", status);
    }
}

/// Blocking y/N prompt on the controlling terminal. Plain Enter declines.
fn confirm_from_terminal(message: &str) -> bool {
    print!("{} [y/N] ", message);
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes")
}
