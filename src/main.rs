use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use pixel_scout::compare::{CompareSource, compare};
use pixel_scout::fetch::{HttpFetcher, PageFetcher, player_url};
use pixel_scout::mode::GameMode;
use pixel_scout::normalize::normalize;
use pixel_scout::records::{RecordKind, extract_record};
use pixel_scout::render;
use pixel_scout::tables::extract_mode_table;

const USAGE: &str = "\
usage:
  pixel_scout user <player> [guild|status|socials|bedwars|skywars]
  pixel_scout table <player> <bedwars|skywars>
  pixel_scout compare <player> <other-player|guild> <bedwars|skywars>

  --json  print the structured result instead of a text table
";

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json = match args.iter().position(|a| a == "--json") {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    };

    let fetcher = HttpFetcher;
    match args.as_slice() {
        [cmd, player] if cmd == "user" => run_record(&fetcher, player, RecordKind::Profile, json),
        [cmd, player, section] if cmd == "user" => {
            let kind = match section.as_str() {
                "guild" => RecordKind::Guild,
                "status" => RecordKind::Status,
                "socials" => RecordKind::Socials,
                "bedwars" => RecordKind::BedwarsSummary,
                "skywars" => RecordKind::SkywarsSummary,
                _ => return invalid(),
            };
            run_record(&fetcher, player, kind, json)
        }
        [cmd, player, mode_arg] if cmd == "table" => {
            let Some(mode) = GameMode::parse(mode_arg) else {
                return invalid();
            };
            run_table(&fetcher, player, mode, json)
        }
        [cmd, player, source_arg, mode_arg] if cmd == "compare" => {
            let Some(mode) = GameMode::parse(mode_arg) else {
                return invalid();
            };
            let source = if source_arg == "guild" {
                CompareSource::Guild
            } else {
                CompareSource::Player(source_arg.clone())
            };
            let result = compare(&fetcher, player, &source, mode).context("comparison failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                emit(&render::render_comparison(&result));
            }
            Ok(())
        }
        _ => invalid(),
    }
}

fn run_record(
    fetcher: &dyn PageFetcher,
    player: &str,
    kind: RecordKind,
    json: bool,
) -> Result<()> {
    let html = fetcher.fetch_html(&player_url(player))?;
    let record = extract_record(&html, kind).context("record extraction failed")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        emit(&render::render_record(&record));
    }
    Ok(())
}

fn run_table(fetcher: &dyn PageFetcher, player: &str, mode: GameMode, json: bool) -> Result<()> {
    let html = fetcher.fetch_html(&player_url(player))?;
    let raw = extract_mode_table(&html, mode).context("table extraction failed")?;
    let table = normalize(&raw, mode).context("table normalization failed")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        emit(&render::render_numeric_table(&table));
    }
    Ok(())
}

fn emit(text: &str) {
    for chunk in render::chunk_output(text) {
        print!("{chunk}");
    }
    if !text.ends_with('\n') {
        println!();
    }
}

fn invalid() -> Result<()> {
    eprint!("{USAGE}");
    bail!("invalid command")
}
