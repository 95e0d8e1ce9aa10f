//! Multi-player comparison: expand subjects, grade each one's mode table,
//! rank by Grade descending.

use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::{self, own_text};
use crate::error::{Error, Result};
use crate::fetch::{PageFetcher, guild_url, player_url};
use crate::grade::overall_grade;
use crate::mode::GameMode;
use crate::normalize::normalize;
use crate::tables::extract_mode_table;

/// Upper bound on guild fan-out; each subject costs one sequential fetch.
pub const MAX_ROSTER_SUBJECTS: usize = 100;

/// Who to compare the primary player against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareSource {
    /// Exactly one other player.
    Player(String),
    /// Every member of the guild the primary player belongs to.
    Guild,
}

/// Players ranked by Grade descending; ties keep enumeration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub mode: GameMode,
    pub entries: Vec<(String, f64)>,
}

pub fn compare(
    fetcher: &dyn PageFetcher,
    primary: &str,
    source: &CompareSource,
    mode: GameMode,
) -> Result<ComparisonResult> {
    let subjects = match source {
        CompareSource::Player(other) => vec![primary.to_string(), other.clone()],
        CompareSource::Guild => {
            let html = fetcher.fetch_html(&guild_url(primary))?;
            let roster = guild_roster(&html)?;
            if roster.len() > MAX_ROSTER_SUBJECTS {
                return Err(Error::RosterTooLarge {
                    found: roster.len(),
                    cap: MAX_ROSTER_SUBJECTS,
                });
            }
            roster
        }
    };

    let mut entries = Vec::with_capacity(subjects.len());
    for subject in &subjects {
        // One bad subject aborts the whole run; the error names it so the
        // caller can tell a broken profile from a network failure.
        let grade = subject_grade(fetcher, subject, mode).map_err(|e| Error::Comparison {
            subject: subject.clone(),
            source: Box::new(e),
        })?;
        debug!(subject, grade, "graded subject");
        entries.push((subject.clone(), grade));
    }

    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(ComparisonResult { mode, entries })
}

fn subject_grade(fetcher: &dyn PageFetcher, subject: &str, mode: GameMode) -> Result<f64> {
    let html = fetcher.fetch_html(&player_url(subject))?;
    let raw = extract_mode_table(&html, mode)?;
    let table = normalize(&raw, mode)?;
    overall_grade(&table, mode)
        .ok_or_else(|| Error::Extraction(format!("{} table has no rows", mode.as_str())))
}

/// Member names from the guild page roster table. The first cell reads like
/// "[MVP+] Name"; the name is the token after the rank tag, or the whole
/// cell for unranked members.
pub fn guild_roster(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let body = doc
        .select(&dom::TABLE_BODY)
        .next()
        .ok_or_else(|| Error::Extraction("guild roster table not found".to_string()))?;

    let mut members = Vec::new();
    for row in body.select(&dom::ROW) {
        let Some(cell) = row.select(&dom::CELL).next() else {
            continue;
        };
        let text = own_text(cell);
        let mut tokens = text.split_whitespace();
        let first = tokens.next();
        if let Some(name) = tokens.next().or(first) {
            members.push(name.to_string());
        }
    }
    if members.is_empty() {
        return Err(Error::Extraction("guild roster is empty".to_string()));
    }
    Ok(members)
}
