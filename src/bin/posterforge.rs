use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

use posterforge::{
    FontRole, FsImageSource, MediaRecord, PosterConfig, PosterRenderer, PreparedArtwork,
    decode_thumbnail,
    providers::{anilist, tmdb},
};

#[derive(Parser, Debug)]
#[command(name = "posterforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one poster as a 1280x720 JPEG.
    Render(RenderArgs),
    /// Print which face each font role resolves to.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input JSON: a provider payload or a ready media record.
    #[arg(long)]
    record: PathBuf,

    /// How to interpret the input JSON.
    #[arg(long, value_enum, default_value_t = ProviderChoice::Record)]
    provider: ProviderChoice,

    /// TMDB payload kind (only used with `--provider tmdb`).
    #[arg(long, value_enum, default_value_t = TmdbKindChoice::Movie)]
    tmdb_kind: TmdbKindChoice,

    /// Directory that image references are resolved against (defaults to the record's directory).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Replace the record's cover reference.
    #[arg(long)]
    cover: Option<String>,

    /// Replace the record's backdrop reference.
    #[arg(long)]
    backdrop: Option<String>,

    /// Optional branding thumbnail image.
    #[arg(long)]
    thumbnail: Option<PathBuf>,

    /// Channel name drawn in the branding row.
    #[arg(long, default_value = "")]
    branding: String,

    /// Poster config JSON (fonts, caption).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    /// Poster config JSON (fonts, caption).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProviderChoice {
    Record,
    Anilist,
    Tmdb,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TmdbKindChoice {
    Movie,
    Tv,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("posterforge=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parse {what} JSON"))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PosterConfig> {
    Ok(match path {
        Some(p) => PosterConfig::from_json_file(p)?,
        None => PosterConfig::default(),
    })
}

fn load_record(args: &RenderArgs) -> anyhow::Result<MediaRecord> {
    let mut record = match args.provider {
        ProviderChoice::Record => read_json::<MediaRecord>(&args.record, "media record")?,
        ProviderChoice::Anilist => {
            let media: anilist::AniListMedia = read_json(&args.record, "AniList media")?;
            anilist::to_media_record(&media)?
        }
        ProviderChoice::Tmdb => {
            let details: tmdb::TmdbDetails = read_json(&args.record, "TMDB details")?;
            let kind = match args.tmdb_kind {
                TmdbKindChoice::Movie => tmdb::TmdbKind::Movie,
                TmdbKindChoice::Tv => tmdb::TmdbKind::Tv,
            };
            tmdb::to_media_record(&details, kind)?
        }
    };

    if let Some(cover) = &args.cover {
        record.cover_image_ref = cover.clone();
    }
    if let Some(backdrop) = &args.backdrop {
        record.backdrop_image_ref = Some(backdrop.clone());
    }
    Ok(record)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let record = load_record(&args)?;

    let assets_root = match &args.assets {
        Some(dir) => dir.clone(),
        None => args
            .record
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let art = PreparedArtwork::prepare(&record, &FsImageSource::new(assets_root))?;

    let thumbnail = match &args.thumbnail {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read thumbnail '{}'", path.display()))?;
            decode_thumbnail(&bytes)
        }
        None => None,
    };

    let renderer = PosterRenderer::new(&config)?;
    let jpeg = renderer.render(&record, &art, thumbnail.as_ref(), &args.branding)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &jpeg)
        .with_context(|| format!("write jpeg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let renderer = PosterRenderer::new(&config)?;
    for role in FontRole::ALL {
        let spec = config.fonts.spec(role);
        let origin = renderer
            .painter()
            .origin(role)
            .with_context(|| format!("font role '{}' was not loaded", role.as_str()))?;
        println!("{:<9} {:>5.1}px  {origin}", role.as_str(), spec.size_px);
    }
    Ok(())
}
