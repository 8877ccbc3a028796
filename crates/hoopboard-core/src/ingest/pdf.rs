// Best-effort PDF ranking documents.
//
// Text comes out of the PDF through `TextExtractor`; the line heuristics
// below then look for "<index> <name> (<pos>) <team> ... <blend>" rows. The
// layout of ADP PDFs varies, so an empty result is a Parse error and the UI
// suggests a CSV export instead.

use std::collections::HashMap;
use std::panic;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::IngestError;
use crate::player::IngestedPlayer;

// ---------------------------------------------------------------------------
// Text extraction seam
// ---------------------------------------------------------------------------

/// Pulls plain text out of a PDF byte stream.
pub trait TextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError>;
}

/// `TextExtractor` backed by the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError> {
        // pdf-extract panics on some malformed documents. Silence the hook
        // while extracting so a caught panic does not reach the terminal.
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        let result = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
        panic::set_hook(previous_hook);

        match result {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(IngestError::Parse {
                reason: e.to_string(),
            }),
            Err(_) => Err(IngestError::Parse {
                reason: "the PDF could not be decoded".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Line heuristics
// ---------------------------------------------------------------------------

static SKIP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(https?://\S+)|(ADP Data|Hashtag Basketball|Season|Updated|\bBL(END)?\b)")
        .expect("skip-line regex")
});
static TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*$").expect("trailing-number regex"));
static LEADING_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*[.\-]?\s*").expect("leading-index regex"));
static PAREN_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Z/,]+)\)").expect("position regex"));
static BARE_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(PG|SG|SF|PF|C|G|F)([/,](PG|SG|SF|PF|C|G|F))*$").expect("bare-position regex")
});
static TEAM_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}$").expect("team-code regex"));

/// Name suffixes that look like team codes.
const NAME_SUFFIXES: &[&str] = &["II", "III", "IV"];

fn is_numeric_token(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

/// Parse one cleaned line into a player, or `None` if it is not a player row.
fn parse_line(line: &str) -> Option<IngestedPlayer> {
    if line.is_empty() || SKIP_LINE.is_match(line) {
        return None;
    }

    let blend_match = TRAILING_NUMBER.captures(line)?;
    let blend: f64 = blend_match.get(1)?.as_str().parse().ok()?;
    let body = &line[..blend_match.get(0)?.start()];
    let mut body = LEADING_INDEX.replace(body.trim(), "").into_owned();

    let mut position = String::new();
    let paren = PAREN_POSITION.captures(&body).and_then(|caps| {
        let whole = caps.get(0)?;
        Some((whole.range(), caps[1].to_string()))
    });
    if let Some((range, pos)) = paren {
        position = pos;
        body.replace_range(range, " ");
    }

    let mut parts: Vec<&str> = body.split_whitespace().collect();

    // Other per-site ADP columns sit between the name and the Blend column.
    while parts.last().is_some_and(|t| is_numeric_token(t)) {
        parts.pop();
    }

    let mut team = String::new();
    for _ in 0..2 {
        let Some(&last) = parts.last() else { break };
        if position.is_empty() && BARE_POSITION.is_match(last) {
            position = last.to_string();
        } else if team.is_empty() && TEAM_CODE.is_match(last) && !NAME_SUFFIXES.contains(&last) {
            team = last.to_string();
        } else {
            break;
        }
        parts.pop();
    }

    if parts.len() < 2 || parts[0].to_lowercase().starts_with("http") {
        return None;
    }

    Some(IngestedPlayer {
        player: parts.join(" "),
        team,
        position,
        blend,
    })
}

/// Parse text extracted from an ADP PDF into players.
///
/// Duplicate player names keep the row with the lowest blend.
pub fn parse_pdf_text(text: &str) -> Result<Vec<IngestedPlayer>, IngestError> {
    let mut players: Vec<IngestedPlayer> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for raw in text.lines() {
        let line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let Some(player) = parse_line(&line) else {
            continue;
        };
        match seen.get(&player.player) {
            Some(&idx) => {
                if player.blend < players[idx].blend {
                    debug!("replacing duplicate '{}' with lower blend", player.player);
                    players[idx] = player;
                }
            }
            None => {
                seen.insert(player.player.clone(), players.len());
                players.push(player);
            }
        }
    }

    if players.is_empty() {
        warn!("no player rows found in PDF text ({} lines)", text.lines().count());
        return Err(IngestError::Parse {
            reason: "no player rows with a trailing Blend value".to_string(),
        });
    }
    Ok(players)
}

/// Extract text with `extractor` and parse it into players.
pub fn parse_pdf<E: TextExtractor>(
    extractor: &E,
    bytes: &[u8],
) -> Result<Vec<IngestedPlayer>, IngestError> {
    let text = extractor.extract_text(bytes)?;
    parse_pdf_text(&text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
