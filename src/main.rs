//! spritefont - inspect, measure and render DXTKfont sprite fonts
//!
//! Subcommands operate on a `.spritefont` file produced by MakeSpriteFont.
//! Settings come from ~/.config/spritefont/config.toml (see `--init-config`).

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use std::io::Read;
use std::path::{Path, PathBuf};

use spritefont::config::{self, Config};
use spritefont::font::{SpriteFont, Vec2};
use spritefont::render::{self, Canvas, RecordingRenderer};

fn print_help() {
    println!(
        r#"spritefont {} - sprite font inspection and text rendering

USAGE:
    spritefont [OPTIONS] <COMMAND> <FONT> [ARGS]

COMMANDS:
    info <FONT>                     Print font properties and glyph ranges
    measure <FONT> <TEXT>           Print text size and draw bounds
    layout <FONT> <TEXT>            Print every glyph placement
    render <FONT> <TEXT> <OUT.png>  Render text to a PNG image
    dump-atlas <FONT> <OUT.png>     Write the sprite sheet as PNG

OPTIONS:
    -h, --help                Print this help message
    -V, --version             Print version information
    --srgb                    Treat the sprite sheet as sRGB
    --default-char=C          Fallback character for missing glyphs
    --init-config             Generate config file
    -f, --force               Overwrite config file

TEXT:
    Escapes \n, \r, \t and \\ are expanded. Use "-" to read from stdin.

CONFIG FILE:
    ~/.config/spritefont/config.toml (override with SPRITEFONT_CONFIG)

ENVIRONMENT:
    RUST_LOG=debug            Enable debug logging"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Expand backslash escapes in command line text
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn read_text(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read text from stdin")?;
        Ok(text)
    } else {
        Ok(unescape(arg))
    }
}

fn load_font(path: &Path, cfg: &Config) -> Result<SpriteFont> {
    let mut font = SpriteFont::from_file(path, cfg.font.load_options())?;
    cfg.font.apply(&mut font)?;
    Ok(font)
}

/// Collapse sorted codes into inclusive ranges
fn code_ranges(codes: impl Iterator<Item = u32>) -> Vec<(u32, u32)> {
    let mut ranges: Vec<(u32, u32)> = Vec::new();
    for code in codes {
        match ranges.last_mut() {
            Some((_, end)) if end.checked_add(1) == Some(code) => *end = code,
            _ => ranges.push((code, code)),
        }
    }
    ranges
}

/// Arguments that are not flags (a bare "-" means stdin)
fn positional_args(args: &[String]) -> Vec<&str> {
    args.iter()
        .map(String::as_str)
        .filter(|a| !a.starts_with('-') || *a == "-")
        .collect()
}

fn cmd_info(font: &SpriteFont) {
    println!("glyphs:            {}", font.glyphs().len());
    println!("line spacing:      {:.2}", font.line_spacing());
    match font.default_character() {
        Some(c) => println!("default character: U+{:04X} {:?}", c as u32, c),
        None => println!("default character: (none)"),
    }
    if let Some(sheet) = font.sprite_sheet() {
        println!(
            "sprite sheet:      {}x{} {} (stride {}, rows {}, {} bytes)",
            sheet.width,
            sheet.height,
            sheet.format.name(),
            sheet.stride,
            sheet.rows,
            sheet.data.len()
        );
    }
    println!("ranges:");
    for (start, end) in code_ranges(font.glyphs().iter().map(|g| g.character)) {
        if start == end {
            println!("  U+{:04X}", start);
        } else {
            println!("  U+{:04X}-U+{:04X} ({} glyphs)", start, end, end - start + 1);
        }
    }
}

fn cmd_measure(font: &SpriteFont, text: &str) -> Result<()> {
    let size = font.measure_string(text)?;
    let bounds = font.measure_draw_bounds(text, Vec2::ZERO)?;
    println!("size:   {:.2} x {:.2}", size.x, size.y);
    println!(
        "bounds: left {} top {} right {} bottom {}",
        bounds.left, bounds.top, bounds.right, bounds.bottom
    );
    Ok(())
}

fn cmd_layout(font: &SpriteFont, text: &str, cfg: &Config) -> Result<()> {
    let mut renderer = RecordingRenderer::default();
    font.draw_string(&mut renderer, text, Vec2::ZERO, cfg.render.text_color())?;

    // Pair draw calls with the glyphs that produced them
    let placed = font.glyph_layout(text).collect::<spritefont::Result<Vec<_>>>()?;
    for (p, call) in placed.iter().zip(&renderer.calls) {
        let ch = p.glyph.as_char().unwrap_or(char::REPLACEMENT_CHARACTER);
        println!(
            "{:?}\tpos ({:.1}, {:.1})\tadvance {:.1}\tsubrect [{}, {}, {}, {}]",
            ch,
            call.position.x,
            call.position.y,
            p.advance,
            call.subrect.left,
            call.subrect.top,
            call.subrect.right,
            call.subrect.bottom
        );
    }
    println!("{} glyphs drawn", renderer.calls.len());
    Ok(())
}

fn cmd_render(font: &SpriteFont, text: &str, out: &Path, cfg: &Config) -> Result<()> {
    let canvas = render::render_text(
        font,
        text,
        cfg.render.text_color(),
        cfg.render.background_color(),
        cfg.render.padding,
    )?;
    canvas.save_png(out)?;
    println!("Rendered {}x{} -> {}", canvas.width, canvas.height, out.display());
    Ok(())
}

fn cmd_dump_atlas(font: &SpriteFont, out: &Path) -> Result<()> {
    let sheet = font
        .sprite_sheet()
        .ok_or_else(|| anyhow!("Font has no sprite sheet"))?;
    let canvas = Canvas::from_rgba8(sheet.width, sheet.height, sheet.to_rgba8()?)?;
    canvas.save_png(out)?;
    println!("Sprite sheet {}x{} -> {}", sheet.width, sheet.height, out.display());
    Ok(())
}

fn init_config(force: bool) -> Result<()> {
    let path: PathBuf = config::default_config_path().ok_or_else(|| anyhow!("Config directory not found"))?;
    if path.exists() && !force {
        println!("Config file already exists: {}", path.display());
        println!("Use --force to overwrite.");
        return Ok(());
    }
    Config::write_template(&path)?;
    println!("Config file generated: {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // --help
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("spritefont {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        let force = args.iter().any(|a| a == "--force" || a == "-f");
        return init_config(force);
    }

    let mut cfg = Config::load();
    if args.iter().any(|a| a == "--srgb") {
        cfg.font.force_srgb = true;
    }
    if let Some(c) = args.iter().find_map(|a| a.strip_prefix("--default-char=")) {
        cfg.font.default_character = unescape(c);
    }

    let positional = positional_args(&args);
    debug!("args: {:?}", positional);

    let (command, rest) = positional
        .split_first()
        .ok_or_else(|| anyhow!("Missing command (see --help)"))?;
    let font_path = rest
        .first()
        .map(Path::new)
        .ok_or_else(|| anyhow!("Missing font path (see --help)"))?;
    let font = load_font(font_path, &cfg)?;
    info!("Font: {}", font_path.display());

    let arg = |i: usize, name: &str| -> Result<&str> {
        rest.get(i)
            .copied()
            .ok_or_else(|| anyhow!("Missing {} argument for '{}'", name, command))
    };

    match *command {
        "info" => cmd_info(&font),
        "measure" => cmd_measure(&font, &read_text(arg(1, "TEXT")?)?)?,
        "layout" => cmd_layout(&font, &read_text(arg(1, "TEXT")?)?, &cfg)?,
        "render" => cmd_render(&font, &read_text(arg(1, "TEXT")?)?, Path::new(arg(2, "OUT")?), &cfg)?,
        "dump-atlas" => cmd_dump_atlas(&font, Path::new(arg(1, "OUT")?))?,
        other => bail!("Unknown command '{}' (see --help)", other),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"Score\n 10"), "Score\n 10");
        assert_eq!(unescape(r"a\r\nb\tc"), "a\r\nb\tc");
        assert_eq!(unescape(r"back\\slash"), "back\\slash");
        assert_eq!(unescape(r"keep\q"), "keep\\q");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_positional_args_skip_short_flags() {
        let args: Vec<String> = ["-f", "info", "--srgb", "font.spritefont", "-V", "-"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(positional_args(&args), vec!["info", "font.spritefont", "-"]);
    }

    #[test]
    fn test_code_ranges() {
        let ranges = code_ranges([32u32, 33, 34, 65, 67, 68].into_iter());
        assert_eq!(ranges, vec![(32, 34), (65, 65), (67, 68)]);
        assert!(code_ranges(std::iter::empty()).is_empty());
    }
}
