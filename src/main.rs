use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};

use linekit::{copy_to_clipboard, init_logging, open_session, Config, EditorSession, ShapeKind};

/// Build and preview AutoCAD .lin line types
#[derive(Parser, Debug)]
#[command(name = "linekit", version, long_version = LONG_VERSION, about)]
struct Cli {
    /// Settings file (.toml or .json); defaults to the user config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the .lin definition, or the reason it cannot be generated
    Show {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Write <name>.lin and/or copy the definition to the clipboard
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Directory to write into (default: current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Copy the definition to the clipboard; without --out, skips the file
        #[arg(long)]
        copy: bool,
    },

    /// Render the pattern on a sample shape, zoomed to extents
    Preview {
        #[command(flatten)]
        input: InputArgs,

        /// Host shape (line, rectangle, circle, triangle)
        #[arg(short, long, default_value = "line")]
        shape: ShapeKind,

        /// Output file; SVG goes to stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Output format; inferred from the --out extension when omitted
        #[arg(short, long, value_enum)]
        format: Option<PreviewFormat>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Draw text boxes and edge baselines
        #[arg(long)]
        guides: bool,

        /// Leave out the background grid
        #[arg(long)]
        no_grid: bool,

        /// Stroke width in pixels
        #[arg(long)]
        weight: Option<f64>,
    },

    /// Auto-center the text element at INDEX and print the definition
    Center {
        #[command(flatten)]
        input: InputArgs,

        /// Zero-based position of a text element
        #[arg(short, long)]
        index: usize,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// File path, definition text, or `-` for stdin. Reads stdin when
    /// omitted, or uses the built-in pattern on a terminal.
    input: Option<String>,

    /// Override the line-type name
    #[arg(long)]
    name: Option<String>,

    /// Override the description
    #[arg(long)]
    description: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PreviewFormat {
    Svg,
    Png,
    /// Draw commands as JSON
    Json,
}

impl PreviewFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load settings")?;

    match cli.command {
        Commands::Show { input } => {
            let session = load(&config, &input)?;
            println!("{}", session.output());
        }
        Commands::Export { input, out, copy } => {
            let mut session = load(&config, &input)?;
            if copy {
                copy_to_clipboard(&session)?;
            }
            if out.is_some() || !copy {
                let dir = out.unwrap_or_else(|| PathBuf::from("."));
                let path = session.export_lin(&dir)?;
                println!("{}", path.display());
            }
        }
        Commands::Preview {
            input,
            shape,
            out,
            format,
            width,
            height,
            guides,
            no_grid,
            weight,
        } => {
            let mut session = load(&config, &input)?;
            if width.is_some() || height.is_some() {
                let w = width.unwrap_or(config.preview.canvas_width);
                let h = height.unwrap_or(config.preview.canvas_height);
                if w == 0 || h == 0 {
                    bail!("Canvas size must be positive (got {w}x{h})");
                }
                session.viewport.set_canvas_size(w as f64, h as f64);
            }
            if guides {
                session.set_show_text_guides(true);
            }
            if no_grid {
                session.style.show_grid = false;
            }
            if let Some(weight) = weight {
                if !(weight.is_finite() && weight > 0.0) {
                    bail!("Line weight must be positive (got {weight})");
                }
                session.style.line_weight = weight;
            }
            session.set_shape(shape);
            write_preview(&session, out.as_deref(), format)?;
        }
        Commands::Center { input, index } => {
            let mut session = load(&config, &input)?;
            let len = session.pattern().len();
            let id = session
                .pattern()
                .id_at(index)
                .with_context(|| format!("No element at index {index} (pattern has {len})"))?;
            let (x, y) = session.center_text(id)?;
            tracing::info!("Centered text at {}: X={} Y={}", index, x, y);
            println!("{}", session.output());
        }
    }

    Ok(())
}

fn load(config: &Config, args: &InputArgs) -> anyhow::Result<EditorSession> {
    let mut session = open_session(config, args.input.as_deref())?;
    if let Some(name) = &args.name {
        session.set_name(name.as_str());
    }
    if let Some(description) = &args.description {
        session.set_description(description.as_str());
    }
    Ok(session)
}

fn write_preview(
    session: &EditorSession,
    out: Option<&Path>,
    format: Option<PreviewFormat>,
) -> anyhow::Result<()> {
    let format = format
        .or_else(|| out.and_then(PreviewFormat::from_path))
        .unwrap_or(PreviewFormat::Svg);

    let text = match format {
        PreviewFormat::Svg => session.render_svg(),
        PreviewFormat::Json => serde_json::to_string_pretty(&session.render())?,
        PreviewFormat::Png => {
            let Some(path) = out else {
                bail!("PNG output needs --out");
            };
            linekit::designer::save_png(&session.render(), &session.viewport, &session.style, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
            return Ok(());
        }
    };

    match out {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
