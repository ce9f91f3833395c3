use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use ark_infographic::{
    ArkColor, ArkColorTable, CreatureData, DefaultStrings, FontConfig, InfoGraphicConfig,
    Rasterizer, ServerSettings, SpeciesInfo, SpeciesStatData, SrgbColor, StatLevels, StringProvider,
    StringTable, colorize_png, compute_stat_values, render_infographic_svg,
    stats::COLOR_REGION_COUNT,
};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

#[derive(Parser, Debug)]
#[command(name = "ark-infographic", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a creature infographic card as SVG or PNG.
    Card(CardArgs),
    /// Recolor a creature sprite using its region mask.
    Colorize(ColorizeArgs),
}

#[derive(Parser, Debug)]
struct CardArgs {
    /// Card request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path. `.svg` writes the document, anything else a PNG.
    #[arg(long)]
    out: PathBuf,

    /// Creature sprite placed on the card.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Font files for rasterization. The first one is the fallback family. Defaults to system
    /// fonts.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct ColorizeArgs {
    /// Base sprite PNG.
    #[arg(long)]
    base: PathBuf,

    /// Region mask PNG.
    #[arg(long)]
    mask: PathBuf,

    /// Color table JSON (list of colors with id, name and linear_rgba).
    #[arg(long)]
    palette: PathBuf,

    /// Color ids per region, comma separated. 0 leaves a region uncolored.
    #[arg(long, value_delimiter = ',')]
    colors: Vec<u8>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Deserialize, Debug)]
struct CardRequest {
    creature: CreatureData,
    #[serde(default)]
    species: SpeciesInfo,
    #[serde(default)]
    server: ServerSettings,
    #[serde(default)]
    config: InfoGraphicConfig,
    #[serde(default)]
    colors: Vec<ArkColor>,
    strings: Option<StringTable>,
    /// When present, stat values are recomputed from the levels.
    species_stats: Option<SpeciesStatData>,
    #[serde(default = "default_tamed")]
    tamed: bool,
}

fn default_tamed() -> bool {
    true
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Card(args) => cmd_card(args),
        Command::Colorize(args) => cmd_colorize(args),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

fn cmd_card(args: CardArgs) -> anyhow::Result<()> {
    let mut req: CardRequest = read_json(&args.in_path, "card request")?;

    if let Some(stats) = &req.species_stats {
        let c = &req.creature;
        let values = compute_stat_values(
            stats,
            StatLevels {
                levels_wild: &c.levels_wild,
                levels_dom: &c.levels_dom,
                levels_mutated: c.levels_mutated.as_ref(),
                is_tamed: req.tamed,
                taming_effectiveness: c.taming_effectiveness,
                imprinting_bonus: c.imprinting_bonus,
            },
        );
        req.creature.values_breeding = values.values_breeding;
        req.creature.values_current = values.values_current;
    }

    let colors = ArkColorTable::new(req.colors);
    let strings: &dyn StringProvider = match &req.strings {
        Some(table) => table,
        None => &DefaultStrings,
    };
    let image_href = args
        .image
        .as_deref()
        .map(|p| {
            std::fs::canonicalize(p)
                .with_context(|| format!("resolve creature image '{}'", p.display()))
        })
        .transpose()?
        .map(|p| p.to_string_lossy().into_owned());

    let svg = render_infographic_svg(
        &req.creature,
        &req.species,
        &req.server,
        &req.config,
        &colors,
        strings,
        image_href.as_deref(),
    )?;

    if is_svg(&args.out) {
        return write_output(&args.out, svg.as_bytes());
    }

    let rasterizer = if args.fonts.is_empty() {
        Rasterizer::with_system_fonts()
    } else {
        let fonts = args
            .fonts
            .iter()
            .map(|path| {
                let data = std::fs::read(path)
                    .with_context(|| format!("read font '{}'", path.display()))?;
                Ok(FontConfig {
                    name: req.config.font_family().to_string(),
                    data,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Rasterizer::new(&fonts)
    };
    let resources = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let png = rasterizer.with_resources_dir(resources).render_png(&svg)?;
    write_output(&args.out, &png)
}

fn region_colors(
    table: &ArkColorTable,
    ids: &[u8],
) -> anyhow::Result<[Option<SrgbColor>; COLOR_REGION_COUNT]> {
    if ids.len() > COLOR_REGION_COUNT {
        anyhow::bail!(
            "got {} color ids, at most {COLOR_REGION_COUNT} regions exist",
            ids.len()
        );
    }
    let mut out = [None; COLOR_REGION_COUNT];
    for (slot, &id) in out.iter_mut().zip(ids) {
        if id == 0 {
            continue;
        }
        let srgb = table
            .srgb(id)
            .with_context(|| format!("color id {id} not in palette"))?;
        *slot = Some(srgb);
    }
    Ok(out)
}

fn cmd_colorize(args: ColorizeArgs) -> anyhow::Result<()> {
    let palette: Vec<ArkColor> = read_json(&args.palette, "palette")?;
    let table = ArkColorTable::new(palette);
    let colors = region_colors(&table, &args.colors)?;

    let base = std::fs::read(&args.base)
        .with_context(|| format!("read base sprite '{}'", args.base.display()))?;
    let mask = std::fs::read(&args.mask)
        .with_context(|| format!("read mask '{}'", args.mask.display()))?;

    let png = colorize_png(&base, &mask, &colors)?;
    write_output(&args.out, &png)
}
