//! Headless page dump: loads a local file through the renderer pipeline and
//! prints the resulting display list.

use std::io::Read;

use ink_core::InkError;
use ink_core::InkResult;
use ink_css::StyleSheet;
use ink_layout::DisplayList;
use ink_layout::LayoutConfig;
use ink_layout::MonospaceMetrics;
use ink_renderer::RendererConfig;
use ink_renderer::RendererProcess;
use serde::Serialize;

const USAGE: &str =
    "usage: inkling-dump [--width <px>] [--height <px>] [--margin <px>] [--json] <path|->";

#[derive(Debug, Clone, PartialEq)]
struct DumpOptions {
    input: String,
    width: f32,
    height: f32,
    margin: f32,
    json: bool,
}

#[derive(Serialize)]
struct DumpOutput<'a> {
    style_rules: &'a StyleSheet,
    display_list: &'a DisplayList,
    scripts_captured: usize,
}

fn main() {
    env_logger::init();

    if let Err(error) = run() {
        eprintln!("inkling-dump error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = options_from_args(std::env::args().skip(1))?;
    log::debug!("dump options: {options:?}");

    let config = RendererConfig {
        layout: LayoutConfig {
            margin: options.margin,
            ..LayoutConfig::default()
        },
        viewport_width: options.width,
        viewport_height: options.height,
        ..RendererConfig::default()
    };
    let mut process = RendererProcess::new(MonospaceMetrics::default(), config);
    futures::executor::block_on(process.navigate(fetch(options.input.clone())));

    let page = process.page();
    if options.json {
        let output = DumpOutput {
            style_rules: &page.style_rules,
            display_list: &page.display_list,
            scripts_captured: process.scripts().len(),
        };
        let json = serde_json::to_string_pretty(&output).map_err(|error| error.to_string())?;
        println!("{json}");
        return Ok(());
    }

    for item in &page.display_list {
        println!(
            "{:>8.2} {:>8.2} {:>5} {:<6} {}",
            item.x, item.y, item.font_size, item.font_weight, item.text
        );
    }
    println!(
        "# {} items, content height {:.2}, {} style rules, {} scripts captured",
        page.display_list.len(),
        page.display_list.content_height,
        page.style_rules.rule_count(),
        process.scripts().len()
    );
    Ok(())
}

/// Stands in for a network fetch: reads a local file, or stdin for `-`.
async fn fetch(input: String) -> InkResult<String> {
    if input == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        return Ok(body);
    }

    std::fs::read_to_string(&input).map_err(|error| {
        let error = InkError::from(error);
        InkError::new(error.code, format!("{input}: {}", error.message))
    })
}

fn options_from_args(args: impl IntoIterator<Item = String>) -> Result<DumpOptions, String> {
    let mut args = args.into_iter();
    let mut input: Option<String> = None;
    let mut width = 800.0;
    let mut height = 600.0;
    let mut margin = LayoutConfig::default().margin;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--width" => width = parse_px(&arg, args.next())?,
            "--height" => height = parse_px(&arg, args.next())?,
            "--margin" => margin = parse_px(&arg, args.next())?,
            "--json" => json = true,
            "-h" | "--help" => return Err(USAGE.to_owned()),
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag `{flag}`\n{USAGE}"));
            }
            _ => {
                if input.replace(arg).is_some() {
                    return Err(format!("more than one input given\n{USAGE}"));
                }
            }
        }
    }

    let input = input.ok_or_else(|| format!("missing input path\n{USAGE}"))?;
    Ok(DumpOptions {
        input,
        width,
        height,
        margin,
        json,
    })
}

fn parse_px(flag: &str, value: Option<String>) -> Result<f32, String> {
    let value = value.ok_or_else(|| format!("missing value after {flag}"))?;
    let px = value
        .parse::<f32>()
        .map_err(|_| format!("invalid pixel value `{value}` for {flag}"))?;
    if !px.is_finite() || px < 0.0 {
        return Err(format!("pixel value for {flag} must be a non-negative number"));
    }
    Ok(px)
}
