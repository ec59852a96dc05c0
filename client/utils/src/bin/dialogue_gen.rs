mod dialogue_app;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context};

use dialogue_app::compose::{parse_color, render_dialogue, save_image, DialogueOptions};
use dialogue_app::glyphs::GlyphSet;
use dialogue_app::mapping::build_mapping;

/// Default dialogue box size, matching the in-game dialogue frame.
const DEFAULT_BOX_W: u32 = 143;
const DEFAULT_BOX_H: u32 = 73;

const DEFAULT_SPACE_WIDTH: u32 = 10;
const DEFAULT_LINE_SPACING: u32 = 8;

struct CliArgs {
    text_parts: Vec<String>,
    font_dir: Option<PathBuf>,
    name: Option<String>,
    output: Option<PathBuf>,
    list_fonts: bool,
    bg: Option<String>,
    box_width: Option<u32>,
    box_height: Option<u32>,
    space_width: u32,
}

fn print_usage() {
    eprintln!(
        "Usage: dialogue_gen [TEXT]... [--font-dir DIR] [--name FILE | --output PATH] \
[--list-fonts] [--bg COLOR] [--box-width PX] [--box-height PX] [--space-width PX]"
    );
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    args.next()
        .with_context(|| format!("{} requires a value", flag))
}

fn parse_px(value: &str, flag: &str) -> anyhow::Result<u32> {
    value
        .parse()
        .with_context(|| format!("{} expects a pixel count, got {:?}", flag, value))
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = env::args().skip(1);
    let mut parsed = CliArgs {
        text_parts: Vec::new(),
        font_dir: None,
        name: None,
        output: None,
        list_fonts: false,
        bg: None,
        box_width: None,
        box_height: None,
        space_width: DEFAULT_SPACE_WIDTH,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--font-dir" => {
                parsed.font_dir = Some(PathBuf::from(next_value(&mut args, "--font-dir")?))
            }
            "--name" => parsed.name = Some(next_value(&mut args, "--name")?),
            "--output" => {
                parsed.output = Some(PathBuf::from(next_value(&mut args, "--output")?))
            }
            "--list-fonts" => parsed.list_fonts = true,
            "--bg" => parsed.bg = Some(next_value(&mut args, "--bg")?),
            "--box-width" => {
                parsed.box_width =
                    Some(parse_px(&next_value(&mut args, "--box-width")?, "--box-width")?)
            }
            "--box-height" => {
                parsed.box_height = Some(parse_px(
                    &next_value(&mut args, "--box-height")?,
                    "--box-height",
                )?)
            }
            "--space-width" => {
                parsed.space_width =
                    parse_px(&next_value(&mut args, "--space-width")?, "--space-width")?
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ if arg.starts_with("--") => {
                print_usage();
                bail!("unknown option {}", arg);
            }
            _ => parsed.text_parts.push(arg),
        }
    }

    Ok(parsed)
}

/// Returns the workspace root directory.
///
/// When `CARGO_MANIFEST_DIR` is set (i.e. during a `cargo run`), the path is
/// resolved relative to this crate; otherwise it falls back to the current
/// working directory.
fn workspace_root() -> PathBuf {
    if env::var("CARGO_MANIFEST_DIR").is_ok() {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
    } else {
        PathBuf::from(".")
    }
}

/// Prefers `<root>/custom_font`, then `<root>/game_assets/custom_font`.
fn default_font_dir() -> PathBuf {
    let root = workspace_root();
    let candidate = root.join("custom_font");
    if candidate.is_dir() {
        return candidate;
    }
    let fallback = root.join("game_assets").join("custom_font");
    if fallback.is_dir() {
        return fallback;
    }
    candidate
}

/// Reads the dialogue text interactively when none was given on the command
/// line. EOF or an empty line is a fatal input error.
fn prompt_for_text() -> anyhow::Result<String> {
    print!("Enter text to render: ");
    io::stdout().flush().context("flushing prompt")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading text from stdin")?;
    if read == 0 {
        bail!("no text provided");
    }

    let line = line.trim_end_matches(['\r', '\n']).to_string();
    if line.is_empty() {
        bail!("no text provided");
    }
    Ok(line)
}

fn run() -> anyhow::Result<()> {
    let args = parse_args()?;
    let font_dir = args.font_dir.clone().unwrap_or_else(default_font_dir);

    if args.list_fonts {
        let mapping = build_mapping(&font_dir);
        if mapping.is_empty() {
            println!("No glyphs found in {}", font_dir.display());
        } else {
            println!("Glyph mapping (key -> filename):");
            for (key, filename) in mapping.iter() {
                println!("{} -> {}", key, filename);
            }
        }
        return Ok(());
    }

    let text = if args.text_parts.is_empty() {
        prompt_for_text()?
    } else {
        args.text_parts.join(" ")
    };

    let out_path = match (&args.output, &args.name) {
        (Some(output), _) => output.clone(),
        (None, Some(name)) => workspace_root().join("dialogue").join(name),
        (None, None) => {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            workspace_root()
                .join("dialogue")
                .join(format!("dialogue_{}.png", secs))
        }
    };

    let bg_color = args.bg.as_deref().and_then(parse_color);
    if args.bg.is_some() && bg_color.is_none() {
        log::warn!("Unrecognized background color; rendering without a fill");
    }

    // A zero box width disables wrapping entirely rather than wrapping
    // every character onto its own line.
    let box_width = match args.box_width {
        Some(0) => None,
        Some(w) => Some(w),
        None => Some(DEFAULT_BOX_W),
    };

    let opts = DialogueOptions {
        line_spacing: DEFAULT_LINE_SPACING,
        bg_color,
        box_width,
        box_height: Some(args.box_height.unwrap_or(DEFAULT_BOX_H)),
    };

    let mapping = build_mapping(&font_dir);
    let glyphs = GlyphSet::load(&font_dir, &mapping, args.space_width);
    let image = render_dialogue(&text, &glyphs, &opts);
    save_image(&image, &out_path)?;

    println!("Saved: {}", out_path.display());
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
