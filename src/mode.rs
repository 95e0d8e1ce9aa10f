use serde::{Deserialize, Serialize};

/// The two modeled game modes. Everything mode-specific lives in
/// [`ModeSpec`] so adding a mode is a data change, not new control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Bedwars,
    Skywars,
}

/// Per-mode scraping and scoring policy.
pub struct ModeSpec {
    /// `id` of the panel div holding the mode's summary stats and table.
    pub panel_id: &'static str,
    /// Header of the non-numeric label column ("Type" / "Mode").
    pub label_column: &'static str,
    /// Section qualifiers prepended to header cells when the source table
    /// reuses bare names ("Kills") across sub-sections. `None` when headers
    /// are already unambiguous.
    pub header_prefixes: Option<&'static [&'static str]>,
    /// Columns excluded from scoring before coercion.
    pub dropped_columns: &'static [&'static str],
    /// Hand-tuned linear weights; columns not listed get `default_weight`.
    pub weights: &'static [(&'static str, f64)],
    pub default_weight: f64,
}

// The bedwars detail table carries a leading qualifier row spanning the
// Normal/Final/Total sections; once that row is dropped, these prefixes
// restore column identity for the repeated base names underneath it.
const BEDWARS_HEADER_PREFIXES: &[&str] = &[
    "", "Normal ", "Normal ", "Normal ", "Final ", "Final ", "Final ", "Total ", "Total ",
    "Total ", "Total ",
];

static BEDWARS_SPEC: ModeSpec = ModeSpec {
    panel_id: "stat_panel_BedWars",
    label_column: "Type",
    header_prefixes: Some(BEDWARS_HEADER_PREFIXES),
    dropped_columns: &["Normal Kills", "Normal Deaths", "Normal K/D"],
    weights: &[
        ("Final Kills", 3.0),
        ("Final Deaths", -3.0),
        ("Final K/D", 2.0),
        ("Total Wins", 5.0),
        ("Total Losses", -5.0),
        ("Total W/L", 5.0),
        ("Total Beds Broken", 2.0),
    ],
    default_weight: 1.0,
};

static SKYWARS_SPEC: ModeSpec = ModeSpec {
    panel_id: "stat_panel_SkyWars",
    label_column: "Mode",
    header_prefixes: None,
    dropped_columns: &[],
    weights: &[
        ("Kills", 5.0),
        ("Deaths", -5.0),
        ("K/D", 4.0),
        ("Wins", 3.0),
        ("Losses", -5.0),
        ("W/L", 2.0),
    ],
    default_weight: 1.0,
};

impl GameMode {
    pub const ALL: [GameMode; 2] = [GameMode::Bedwars, GameMode::Skywars];

    pub fn spec(self) -> &'static ModeSpec {
        match self {
            GameMode::Bedwars => &BEDWARS_SPEC,
            GameMode::Skywars => &SKYWARS_SPEC,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Bedwars => "bedwars",
            GameMode::Skywars => "skywars",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bedwars" => Some(GameMode::Bedwars),
            "skywars" => Some(GameMode::Skywars),
            _ => None,
        }
    }
}
