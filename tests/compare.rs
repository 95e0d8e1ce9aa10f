use std::fs;
use std::path::PathBuf;

use pixel_scout::compare::{CompareSource, MAX_ROSTER_SUBJECTS, compare};
use pixel_scout::error::{Error, Result};
use pixel_scout::fetch::PageFetcher;
use pixel_scout::mode::GameMode;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Serves canned pages keyed by a URL path fragment; any other URL fails
/// like a network miss.
struct FixtureFetcher {
    pages: Vec<(String, String)>,
}

impl FixtureFetcher {
    fn new() -> Self {
        FixtureFetcher { pages: Vec::new() }
    }

    fn with_player(mut self, name: &str, html: &str) -> Self {
        self.pages
            .push((format!("/hypixel/player/stats/{name}"), html.to_string()));
        self
    }

    fn with_guild(mut self, name: &str, html: &str) -> Self {
        self.pages
            .push((format!("/hypixel/guild/player/{name}"), html.to_string()));
        self
    }
}

impl PageFetcher for FixtureFetcher {
    fn fetch_html(&self, url: &str) -> Result<String> {
        self.pages
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, html)| html.clone())
            .ok_or_else(|| Error::Fetch {
                url: url.to_string(),
                detail: "no fixture for url".to_string(),
            })
    }
}

/// Minimal player page with a one-row skywars table; ratios held at 1.00 so
/// strength is driven by the counting stats.
fn skywars_page(kills: u32, deaths: u32, wins: u32, losses: u32) -> String {
    format!(
        r#"<html><body>
<div id="stat_panel_SkyWars">
  <table class="table">
    <tr><th>Mode</th><th>Kills</th><th>Deaths</th><th>K/D</th><th>Wins</th><th>Losses</th><th>W/L</th></tr>
    <tr><td>Solo</td><td>{kills}</td><td>{deaths}</td><td>1.00</td><td>{wins}</td><td>{losses}</td><td>1.00</td></tr>
  </table>
</div>
</body></html>"#
    )
}

#[test]
fn pairwise_comparison_ranks_by_grade() {
    let fetcher = FixtureFetcher::new()
        .with_player("Strong", &skywars_page(500, 100, 50, 10))
        .with_player("Weak", &skywars_page(50, 100, 5, 40));

    let result = compare(
        &fetcher,
        "Weak",
        &CompareSource::Player("Strong".to_string()),
        GameMode::Skywars,
    )
    .expect("comparison should succeed");

    assert_eq!(result.entries.len(), 2);
    assert_eq!(result.entries[0].0, "Strong");
    assert_eq!(result.entries[1].0, "Weak");
    assert!(result.entries[0].1 > result.entries[1].1);
}

#[test]
fn ties_keep_enumeration_order() {
    let page = skywars_page(100, 100, 10, 10);
    let fetcher = FixtureFetcher::new()
        .with_player("Alpha", &page)
        .with_player("Beta", &page);

    let result = compare(
        &fetcher,
        "Alpha",
        &CompareSource::Player("Beta".to_string()),
        GameMode::Skywars,
    )
    .expect("comparison should succeed");

    assert_eq!(result.entries[0].0, "Alpha");
    assert_eq!(result.entries[1].0, "Beta");
    assert_eq!(result.entries[0].1, result.entries[1].1);
}

#[test]
fn guild_comparison_expands_the_roster() {
    let fetcher = FixtureFetcher::new()
        .with_guild("PixelPlayer", &read_fixture("guild_page.html"))
        .with_player("PixelPlayer", &skywars_page(300, 100, 30, 10))
        .with_player("BlockRival", &skywars_page(900, 100, 90, 10))
        .with_player("QuietMiner", &skywars_page(30, 100, 3, 10));

    let result = compare(
        &fetcher,
        "PixelPlayer",
        &CompareSource::Guild,
        GameMode::Skywars,
    )
    .expect("guild comparison should succeed");

    let names: Vec<&str> = result.entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["BlockRival", "PixelPlayer", "QuietMiner"]);
}

#[test]
fn one_broken_subject_aborts_and_is_named() {
    // BlockRival has no fixture page, so their fetch fails mid-run.
    let fetcher = FixtureFetcher::new()
        .with_guild("PixelPlayer", &read_fixture("guild_page.html"))
        .with_player("PixelPlayer", &skywars_page(300, 100, 30, 10))
        .with_player("QuietMiner", &skywars_page(30, 100, 3, 10));

    let err = compare(
        &fetcher,
        "PixelPlayer",
        &CompareSource::Guild,
        GameMode::Skywars,
    )
    .unwrap_err();

    match err {
        Error::Comparison { subject, source } => {
            assert_eq!(subject, "BlockRival");
            assert!(matches!(*source, Error::Fetch { .. }));
        }
        other => panic!("expected comparison error, got {other:?}"),
    }
}

#[test]
fn oversized_rosters_are_refused() {
    let mut rows = String::new();
    for i in 0..(MAX_ROSTER_SUBJECTS + 1) {
        rows.push_str(&format!("<tr><td>[VIP] Member{i}</td></tr>\n"));
    }
    let guild = format!("<html><body><table><tbody>{rows}</tbody></table></body></html>");
    let fetcher = FixtureFetcher::new().with_guild("PixelPlayer", &guild);

    let err = compare(
        &fetcher,
        "PixelPlayer",
        &CompareSource::Guild,
        GameMode::Skywars,
    )
    .unwrap_err();

    match err {
        Error::RosterTooLarge { found, cap } => {
            assert_eq!(found, MAX_ROSTER_SUBJECTS + 1);
            assert_eq!(cap, MAX_ROSTER_SUBJECTS);
        }
        other => panic!("expected roster cap error, got {other:?}"),
    }
}

#[test]
fn subject_grade_is_the_overall_row() {
    // One data row means Overall duplicates it; the ranked grade must match
    // the hand-computed weighted sum of that row.
    let fetcher = FixtureFetcher::new()
        .with_player("Solo", &skywars_page(100, 50, 10, 5))
        .with_player("Other", &skywars_page(0, 0, 0, 0));

    let result = compare(
        &fetcher,
        "Solo",
        &CompareSource::Player("Other".to_string()),
        GameMode::Skywars,
    )
    .expect("comparison should succeed");

    // 100*5 - 50*5 + 1*4 + 10*3 - 5*5 + 1*2 = 261
    let solo = result
        .entries
        .iter()
        .find(|(n, _)| n == "Solo")
        .map(|(_, g)| *g)
        .unwrap();
    assert_eq!(solo, 261.0);
}
