use std::fs;
use std::path::{Path, PathBuf};

use parcoords_rs::api::{ColorScaleConfig, ParcoordsConfig, ParcoordsSession};
use parcoords_rs::core::{DataSet, Viewport};
use parcoords_rs::interaction::InteractionEvent;
use parcoords_rs::render::{Color, SvgRenderer};

const USAGE: &str = "usage: parcoords_export --input <rows.json> [--svg <out.svg>] [--grid <out.html>] [--snapshot <out.json>] [--events <events.json>] [--width <px>] [--height <px>] [--color-by <dimension>] [--start-color <#rrggbb>] [--end-color <#rrggbb>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    svg: Option<PathBuf>,
    grid: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    events: Option<PathBuf>,
    width: u32,
    height: u32,
    color_by: Option<String>,
    start_color: Option<Color>,
    end_color: Option<Color>,
}

fn main() {
    let _ = parcoords_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = read_file(&args.input)?;
    let dataset = DataSet::from_json_str(&raw).map_err(|err| err.to_string())?;

    let mut config = ParcoordsConfig::new(Viewport::new(args.width, args.height));
    if let Some(dimension) = &args.color_by {
        config = config.with_initial_color_dimension(dimension.clone());
    }
    let defaults = ColorScaleConfig::default();
    config = config.with_color_scale(ColorScaleConfig {
        start: args.start_color.unwrap_or(defaults.start),
        end: args.end_color.unwrap_or(defaults.end),
        ..defaults
    });
    let mut session = ParcoordsSession::new(SvgRenderer::new(), dataset, config)
        .map_err(|err| err.to_string())?;

    if let Some(path) = &args.events {
        let events: Vec<InteractionEvent> = serde_json::from_str(&read_file(path)?)
            .map_err(|err| format!("invalid events json: {err}"))?;
        for event in events {
            session.dispatch(event).map_err(|err| err.to_string())?;
        }
    }

    if let Some(path) = &args.grid {
        let html = session.grid_html().map_err(|err| err.to_string())?;
        write_file(path, &html)?;
    }
    if let Some(path) = &args.snapshot {
        let json = session
            .snapshot()
            .to_json_contract_v1_pretty()
            .map_err(|err| err.to_string())?;
        write_file(path, &json)?;
    }

    session.render().map_err(|err| err.to_string())?;
    let document = session.into_renderer().into_document();
    match &args.svg {
        Some(path) => write_file(path, &document),
        None => {
            println!("{document}");
            Ok(())
        }
    }
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    fs::write(path, contents).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut svg = None::<PathBuf>;
    let mut grid = None::<PathBuf>;
    let mut snapshot = None::<PathBuf>;
    let mut events = None::<PathBuf>;
    let mut width = 960_u32;
    let mut height = 500_u32;
    let mut color_by = None::<String>;
    let mut start_color = None::<Color>;
    let mut end_color = None::<Color>;

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value("--input")?)),
            "--svg" => svg = Some(PathBuf::from(value("--svg")?)),
            "--grid" => grid = Some(PathBuf::from(value("--grid")?)),
            "--snapshot" => snapshot = Some(PathBuf::from(value("--snapshot")?)),
            "--events" => events = Some(PathBuf::from(value("--events")?)),
            "--width" => width = parse_px("--width", &value("--width")?)?,
            "--height" => height = parse_px("--height", &value("--height")?)?,
            "--color-by" => color_by = Some(value("--color-by")?),
            "--start-color" => start_color = Some(parse_color(&value("--start-color")?)?),
            "--end-color" => end_color = Some(parse_color(&value("--end-color")?)?),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    Ok(CliArgs {
        input,
        svg,
        grid,
        snapshot,
        events,
        width,
        height,
        color_by,
        start_color,
        end_color,
    })
}

fn parse_px(flag: &str, raw: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|err| format!("invalid value `{raw}` for {flag}: {err}"))
}

fn parse_color(raw: &str) -> Result<Color, String> {
    Color::from_hex(raw).map_err(|err| err.to_string())
}
