//! Labeled record extraction from the profile page card boxes and mode
//! panels. Each record kind is a fixed ordered list of
//! (output field, source label) pairs; a missing field is only tolerated on
//! the socials fallback path, everything else is a layout mismatch.

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dom::{self, card_box, mode_panel, own_text, sibling_text};
use crate::error::{Error, Result};
use crate::mode::GameMode;

pub const MISSING_FIELD: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Profile,
    Guild,
    Status,
    Socials,
    BedwarsSummary,
    SkywarsSummary,
}

/// An ordered field → value mapping with keys fixed per record kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatRecord {
    pub kind: RecordKind,
    pub fields: Vec<(String, String)>,
}

impl StatRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }
}

const PROFILE_NAME_FIELD: &str = "Player Name";

const PROFILE_FIELDS: &[(&str, &str)] = &[
    ("Rank History", "Rank History"),
    ("Multiplier", "Multiplier:"),
    ("Level", "Level:"),
    ("Karma", "Karma:"),
    ("Achievement Points", "Achievement Points:"),
    ("Quests Completed", "Quests Completed:"),
    ("First login", "First login:"),
    ("Last login", "Last login:"),
];

const GUILD_FIELDS: &[(&str, &str)] = &[
    ("Name", "Name:"),
    ("Members", "Members:"),
    ("Rank", "Rank:"),
    ("Joined", "Joined:"),
];

const BEDWARS_SUMMARY_FIELDS: &[(&str, &str)] = &[
    ("Coins", "Coins:"),
    ("Winstreak", "Winstreak:"),
    ("Level", "Level:"),
    ("Diamonds Collected", "Diamonds Collected:"),
    ("Emeralds Collected", "Emeralds Collected:"),
    ("Gold Collected", "Gold Collected:"),
    ("Iron Collected", "Iron Collected:"),
];

const SKYWARS_SUMMARY_FIELDS: &[(&str, &str)] = &[
    ("Level", "Level:"),
    ("Prestige", "Prestige:"),
    ("Coins", "Coins:"),
    ("Kills", "Kills:"),
    ("Assists", "Assists:"),
    ("Deaths", "Deaths:"),
    ("Kill/Death Ratio", "Kill/Death Ratio:"),
    ("Wins", "Wins:"),
    ("Losses", "Losses:"),
    ("Win/Loss Ratio", "Win/Loss Ratio:"),
    ("Blocks Broken", "Blocks Broken:"),
    ("Blocks Placed", "Blocks Placed:"),
    ("Soul Well Uses", "Soul Well Uses:"),
    ("Soul Well Legendaries", "Soul Well Legendaries:"),
    ("Soul Well Rares", "Soul Well Rares:"),
    ("Paid Souls", "Paid Souls:"),
    ("Souls Gathered", "Souls Gathered:"),
    ("Eggs Thrown", "Eggs Thrown:"),
    // plancke labels this one "Enderpearls Thrown" but the short field name
    // is the established output key.
    ("Enderpearls", "Enderpearls Thrown:"),
    ("Arrows Shot", "Arrows Shot:"),
    ("Arrows Hit", "Arrows Hit:"),
    ("Arrow Hit/Miss Ratio", "Arrow Hit/Miss Ratio:"),
];

/// Socials are keyed by a stable anchor id, not by label text.
const SOCIAL_FIELDS: &[(&str, &str)] = &[
    ("Twitter", "social_TWITTER"),
    ("Youtube", "social_YOUTUBE"),
    ("Instagram", "social_INSTAGRAM"),
    ("TikTok", "social_TIKTOK"),
    ("Twitch", "social_TWITCH"),
    ("Discord", "social_DISCORD"),
    ("Hypixel Forums", "social_HYPIXEL"),
];

/// Marker href for links resolved client-side (the discord handle lives in
/// an inline script instead of the anchor).
const PLACEHOLDER_HREF: &str = "javascript:void(0)";

pub fn extract_record(html: &str, kind: RecordKind) -> Result<StatRecord> {
    let doc = Html::parse_document(html);
    let fields = match kind {
        RecordKind::Profile => profile_fields(&doc)?,
        RecordKind::Guild => labeled_fields(card_box(&doc, 1)?, GUILD_FIELDS)?,
        RecordKind::Status => status_fields(&doc)?,
        RecordKind::Socials => social_fields(&doc)?,
        RecordKind::BedwarsSummary => labeled_fields(
            mode_panel(&doc, GameMode::Bedwars)?,
            BEDWARS_SUMMARY_FIELDS,
        )?,
        RecordKind::SkywarsSummary => labeled_fields(
            mode_panel(&doc, GameMode::Skywars)?,
            SKYWARS_SUMMARY_FIELDS,
        )?,
    };
    Ok(StatRecord { kind, fields })
}

fn profile_fields(doc: &Html) -> Result<Vec<(String, String)>> {
    let region = card_box(doc, 0)?;
    // The player name has no label; it sits in the first span of the box.
    let name = region
        .select(&dom::SPAN)
        .next()
        .map(own_text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Extraction("player name span not found".to_string()))?;
    let mut fields = vec![(PROFILE_NAME_FIELD.to_string(), name)];
    fields.extend(labeled_fields(region, PROFILE_FIELDS)?);
    Ok(fields)
}

fn status_fields(doc: &Html) -> Result<Vec<(String, String)>> {
    let region = card_box(doc, 2)?;
    let status = region
        .select(&dom::BOLD)
        .next()
        .map(own_text)
        .ok_or_else(|| Error::Extraction("status text not found".to_string()))?;
    Ok(vec![("Status".to_string(), status)])
}

fn labeled_fields(
    region: ElementRef<'_>,
    spec: &[(&str, &str)],
) -> Result<Vec<(String, String)>> {
    spec.iter()
        .map(|&(field, label)| {
            let value = label_value(region, label)?;
            Ok((field.to_string(), value))
        })
        .collect()
}

/// Find the first `<b>` in the region whose text equals `label` and read
/// the trimmed text following it.
fn label_value(region: ElementRef<'_>, label: &str) -> Result<String> {
    let tag = region
        .select(&dom::BOLD)
        .find(|b| own_text(*b) == label)
        .ok_or_else(|| Error::Extraction(format!("label {label:?} not found")))?;
    sibling_text(tag)
        .ok_or_else(|| Error::Extraction(format!("label {label:?} has no value")))
}

fn social_fields(doc: &Html) -> Result<Vec<(String, String)>> {
    let region = card_box(doc, 3)?;
    let fields = SOCIAL_FIELDS
        .iter()
        .map(|&(field, id)| {
            let link = region
                .select(&dom::ANCHOR)
                .find(|a| a.value().attr("id") == Some(id));
            let value = match link.and_then(|a| a.value().attr("href")) {
                None => MISSING_FIELD.to_string(),
                Some(PLACEHOLDER_HREF) => script_social_handle(doc, id).unwrap_or_else(|| {
                    warn!(id, "social script fallback failed, recording N/A");
                    MISSING_FIELD.to_string()
                }),
                Some(href) => href.to_string(),
            };
            (field.to_string(), value)
        })
        .collect();
    Ok(fields)
}

/// Fragile by nature: the handle is embedded in the click-handler script,
/// recovered by stripping fixed delimiters. Failure here must only cost the
/// one field, never the record.
fn script_social_handle(doc: &Html, id: &str) -> Option<String> {
    let marker = format!("#{id}");
    let script = doc
        .select(&dom::SCRIPT)
        .map(|s| s.text().collect::<String>())
        .find(|text| text.contains(&marker))?;
    let cleaned = script
        .replace("$(document).ready(function () {", "")
        .replace(&format!("$(\"#{id}\").click(function () {{"), "")
        .replace("})", "")
        .replace(");", "")
        .replace('"', "");
    cleaned
        .trim()
        .split(", ")
        .nth(1)?
        .split_whitespace()
        .next()
        .map(str::to_string)
}
