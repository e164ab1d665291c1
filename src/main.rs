use clap::{Parser, Subcommand};
use photo_organiser::worker::{JobKind, Worker};
use photo_organiser::{config, logging, output};
use std::path::PathBuf;
use std::process::ExitCode;

/// Optional override of the configured source file.
#[derive(clap::Args, Clone)]
struct SourceArgs {
    /// Source image (defaults to the path in photo-organiser.toml)
    source: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "photo-organiser")]
#[command(about = "EXIF thumbnails, coalesced GIF resizing and fixed-size stills")]
#[command(long_about = "\
EXIF thumbnails, coalesced GIF resizing and fixed-size stills

Three independent operations:

  thumbnail   extract the EXIF thumbnail of a JPEG    → <stem>.thumb.jpg
  resize-gif  coalesce an animation, 200px wide       → <stem>.resized.gif
  resize-png  resize a still to exactly 100x100       → <stem>.100x100.png

Source files and the output directory come from photo-organiser.toml in the
config directory; a SOURCE argument overrides the configured file.

Run 'photo-organiser gen-config' to generate a documented config file.")]
#[command(version)]
struct Cli {
    /// Directory holding photo-organiser.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Output directory (overrides output.dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the EXIF thumbnail of a JPEG
    Thumbnail(SourceArgs),
    /// Coalesce an animated GIF and resize every frame to 200px wide
    ResizeGif(SourceArgs),
    /// Resize an image to exactly 100x100, ignoring aspect ratio
    ResizePng(SourceArgs),
    /// Print the EXIF profile of an image
    Exif(SourceArgs),
    /// Run all three operations on the configured sources and write report.json
    Run,
    /// Print a stock photo-organiser.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let mut worker_config = config::load_config(&cli.config_dir)?;
    if let Some(dir) = &cli.output {
        worker_config.output.dir = dir.clone();
    }
    logging::init_from_config(&worker_config.logging, cli.verbose, cli.json_logs);

    // Failures are already printed with the job report
    let single_job = |job: JobKind, args: &SourceArgs| -> ExitCode {
        let worker = Worker::new(worker_config.clone());
        let source = args
            .source
            .clone()
            .unwrap_or_else(|| worker.source_for(job).to_path_buf());
        let report = worker.run_job(job, &source);
        for line in output::format_job_report(&report) {
            println!("{}", line);
        }
        if report.outcome.is_failed() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    };

    match &cli.command {
        Command::Thumbnail(args) => return Ok(single_job(JobKind::Thumbnail, args)),
        Command::ResizeGif(args) => return Ok(single_job(JobKind::ResizeGif, args)),
        Command::ResizePng(args) => return Ok(single_job(JobKind::ResizePng, args)),
        Command::Exif(args) => {
            let worker = Worker::new(worker_config.clone());
            let source = args
                .source
                .clone()
                .unwrap_or_else(|| worker.source_for(JobKind::Thumbnail).to_path_buf());
            let profile = worker.exif_profile(&source)?;
            output::print_exif_profile(&source, profile.as_ref());
        }
        Command::Run => {
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_worker_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let worker = Worker::new(worker_config.clone()).with_events(tx);
            let report = worker.run();
            let report_path = worker.write_report(&report)?;
            drop(worker);
            printer.join().map_err(|_| "output printer thread panicked")?;
            output::print_run_summary(&report);
            println!("Report: {}", report_path.display());
            if !report.succeeded() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::GenConfig => {}
    }

    Ok(ExitCode::SUCCESS)
}
