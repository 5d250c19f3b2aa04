mod logger;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use logger::CliLogger;
use pdf_compose::constants::{A4_HEIGHT_PT, A4_WIDTH_PT, DEFAULT_CONVERTER_PROGRAM, DEFAULT_TRIM_PT};
use pdf_compose::{
    BatchResult, CanvasSpec, ComposeError, ComposeOptions, DocumentConverter, ItemFailure,
    LibreOfficeConverter, PageFit, PageRange, Rotation, Session, Transform,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdft", about = "Merge, convert and batch-edit PDFs", version)]
struct Cli {
    /// More output (-v for progress, -vv for per-page detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge PDFs, images and office documents into one PDF with uniform pages
    Merge {
        /// Input files, merged in the order given
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// JSON settings file (see `save-config`); flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        canvas: CanvasArgs,

        /// How PDF pages are fitted onto the canvas
        #[arg(long, value_enum)]
        fit: Option<FitArg>,

        /// JPEG quality for image pages (1-100)
        #[arg(long)]
        quality: Option<u8>,

        /// Convert office documents with this program instead of skipping them
        #[arg(long, value_name = "PROGRAM", num_args = 0..=1, default_missing_value = DEFAULT_CONVERTER_PROGRAM)]
        office: Option<PathBuf>,
    },

    /// Place one image on a page of the given size
    ImageToPdf {
        /// Input image
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        canvas: CanvasArgs,

        /// JPEG quality (1-100)
        #[arg(long)]
        quality: Option<u8>,
    },

    /// Resize every page of each input
    Resize {
        #[command(flatten)]
        target: TargetArgs,

        /// Page width in points
        #[arg(long, default_value_t = A4_WIDTH_PT)]
        width: f32,

        /// Page height in points
        #[arg(long, default_value_t = A4_HEIGHT_PT)]
        height: f32,

        /// Resize mode
        #[arg(long, default_value = "scale-content", value_enum)]
        fit: FitArg,
    },

    /// Cut a strip off the top and bottom of every page
    Trim {
        #[command(flatten)]
        target: TargetArgs,

        /// Points removed from the top
        #[arg(long, default_value_t = DEFAULT_TRIM_PT)]
        top: f32,

        /// Points removed from the bottom
        #[arg(long, default_value_t = DEFAULT_TRIM_PT)]
        bottom: f32,
    },

    /// Delete a range of pages
    RemovePages {
        #[command(flatten)]
        target: TargetArgs,

        /// Pages to delete, 1-based and inclusive (e.g. 9-25)
        #[arg(long)]
        range: PageRange,

        /// Resize the remaining pages to A4 (or --width/--height)
        #[arg(long)]
        resize: bool,

        #[arg(long, default_value_t = A4_WIDTH_PT)]
        width: f32,

        #[arg(long, default_value_t = A4_HEIGHT_PT)]
        height: f32,
    },

    /// Rotate every page by 90 degrees
    Rotate {
        #[command(flatten)]
        target: TargetArgs,

        /// Rotation direction
        #[arg(long, default_value = "clockwise", value_enum)]
        direction: RotateArg,
    },

    /// Convert an office document to PDF
    Convert {
        /// Input document
        input: PathBuf,

        /// Directory for the PDF (defaults to the input's directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Converter program
        #[arg(long, default_value = DEFAULT_CONVERTER_PROGRAM)]
        program: PathBuf,
    },

    /// Write merge settings to a JSON file for use with `merge --config`
    SaveConfig {
        /// Output JSON file
        output: PathBuf,

        #[command(flatten)]
        canvas: CanvasArgs,

        #[arg(long, value_enum)]
        fit: Option<FitArg>,

        #[arg(long)]
        quality: Option<u8>,
    },
}

#[derive(clap::Args)]
struct CanvasArgs {
    /// Page width in points (default 595, A4)
    #[arg(long)]
    width: Option<f32>,

    /// Page height in points (default 842, A4)
    #[arg(long)]
    height: Option<f32>,

    /// Raster resolution for image pages (default: one pixel per point)
    #[arg(long)]
    dpi: Option<u32>,
}

impl CanvasArgs {
    fn apply(&self, canvas: &mut CanvasSpec) {
        if let Some(width) = self.width {
            canvas.width_pt = width;
        }
        if let Some(height) = self.height {
            canvas.height_pt = height;
        }
        if self.dpi.is_some() {
            canvas.dpi = self.dpi;
        }
    }
}

#[derive(clap::Args)]
struct TargetArgs {
    /// Input PDF file(s)
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output file (single input only)
    #[arg(short, long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Output directory; files are named <stem><suffix>.pdf
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FitArg {
    Boundary,
    ScaleContent,
    Keep,
}

#[derive(Clone, Copy, ValueEnum)]
enum RotateArg {
    Clockwise,
    CounterClockwise,
}

impl From<FitArg> for PageFit {
    fn from(arg: FitArg) -> Self {
        match arg {
            FitArg::Boundary => Self::Boundary,
            FitArg::ScaleContent => Self::ScaleContent,
            FitArg::Keep => Self::Keep,
        }
    }
}

impl From<RotateArg> for Rotation {
    fn from(arg: RotateArg) -> Self {
        match arg {
            RotateArg::Clockwise => Self::Clockwise90,
            RotateArg::CounterClockwise => Self::CounterClockwise90,
        }
    }
}

fn build_options(
    mut options: ComposeOptions,
    canvas: &CanvasArgs,
    fit: Option<FitArg>,
    quality: Option<u8>,
) -> ComposeOptions {
    canvas.apply(&mut options.canvas);
    if let Some(fit) = fit {
        options.page_fit = fit.into();
    }
    if let Some(quality) = quality {
        options.jpeg_quality = quality;
    }
    options
}

fn failure_lines(failures: &[ItemFailure]) -> Vec<String> {
    failures
        .iter()
        .map(|failure| format!("  FAILED {}: {}", failure.path.display(), failure.error))
        .collect()
}

fn print_report(result: &BatchResult) {
    for line in failure_lines(&result.failures) {
        println!("{}", line);
    }
    for output in &result.outputs {
        println!("  → {}", output.display());
    }
    println!(
        "{} of {} input(s) processed successfully",
        result.succeeded, result.attempted
    );
}


async fn run_transform(target: TargetArgs, transform: Transform) -> Result<()> {
    if let Some(output) = target.output {
        let [input] = target.inputs.as_slice() else {
            bail!("--output needs exactly one input; use --output-dir for several");
        };
        let input = input.clone();
        let written = output.clone();
        tokio::task::spawn_blocking(move || pdf_compose::apply_transform(&input, &output, &transform))
            .await??;
        println!("Wrote {}", written.display());
        return Ok(());
    }

    let output_dir = target.output_dir.unwrap_or_else(|| PathBuf::from("."));
    let result = pdf_compose::run_batch_async(target.inputs, output_dir, transform).await?;
    print_report(&result);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    CliLogger::new(CliLogger::level_for(cli.verbose, cli.quiet))
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Merge {
            inputs,
            output,
            config,
            canvas,
            fit,
            quality,
            office,
        } => {
            let base = match config {
                Some(path) => ComposeOptions::load(&path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => ComposeOptions::default(),
            };
            let mut options = build_options(base, &canvas, fit, quality);
            if let Some(program) = office {
                options = options.with_converter(LibreOfficeConverter::new(program));
            }

            let mut session = Session::new(options);
            session.extend(inputs);
            session.set_destination(&output);
            session.validate()?;

            let items = session.items().to_vec();
            let options = session.options.clone();
            match pdf_compose::merge_to_file_async(items, options, output).await {
                Ok(result) => print_report(&result),
                Err(ComposeError::EmptyResult(failures)) => {
                    for line in failure_lines(&failures) {
                        println!("{}", line);
                    }
                    bail!("No pages were produced; nothing was written");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::ImageToPdf {
            input,
            output,
            canvas,
            quality,
        } => {
            let options = build_options(ComposeOptions::default(), &canvas, None, quality);
            let result = tokio::task::spawn_blocking(move || {
                pdf_compose::image_to_pdf(&input, &options, &output)
            })
            .await??;
            print_report(&result);
        }

        Commands::Resize {
            target,
            width,
            height,
            fit,
        } => {
            let transform = Transform::Resize {
                width,
                height,
                fit: fit.into(),
            };
            run_transform(target, transform).await?;
        }

        Commands::Trim {
            target,
            top,
            bottom,
        } => {
            run_transform(target, Transform::trim(top, bottom)).await?;
        }

        Commands::RemovePages {
            target,
            range,
            resize,
            width,
            height,
        } => {
            let transform = Transform::RemovePages {
                range,
                resize_to: resize.then_some((width, height)),
                fit: PageFit::Boundary,
            };
            run_transform(target, transform).await?;
        }

        Commands::Rotate { target, direction } => {
            run_transform(target, Transform::Rotate(direction.into())).await?;
        }

        Commands::Convert {
            input,
            out_dir,
            program,
        } => {
            let converter = LibreOfficeConverter::new(program);
            let tool = converter.program().display().to_string();
            let pdf = tokio::task::spawn_blocking(move || match out_dir {
                Some(dir) => converter.convert(&input, &dir),
                None => pdf_compose::convert_in_place(&converter, &input),
            })
            .await??;
            println!("Converted with {} → {}", tool, pdf.display());
        }

        Commands::SaveConfig {
            output,
            canvas,
            fit,
            quality,
        } => {
            let options = build_options(ComposeOptions::default(), &canvas, fit, quality);
            options.validate()?;
            options.save(&output).await?;
            println!("Saved settings → {}", output.display());
        }
    }

    Ok(())
}
