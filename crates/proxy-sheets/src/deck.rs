//! Deck list parsing
//!
//! A deck list has one `<amount> <card name>` entry per line. Anything else
//! (blank lines, comments, headers) is ignored.

use crate::constants::MAX_CARD_COUNT;
use crate::types::*;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

const BOM: char = '\u{feff}';

/// A card name with the number of copies wanted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub name: String,
    pub count: u32,
}

/// Every card to print, one element per physical copy, in list order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<String>,
}

impl Deck {
    /// Build a deck from entries, expanding each by its count
    pub fn from_entries(entries: impl IntoIterator<Item = DeckEntry>) -> Self {
        let mut cards = Vec::new();
        for entry in entries {
            cards.extend(std::iter::repeat_n(entry.name, entry.count as usize));
        }
        Self { cards }
    }

    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Consecutive runs of the same name
    pub fn entries(&self) -> Vec<DeckEntry> {
        let mut entries: Vec<DeckEntry> = Vec::new();
        for name in &self.cards {
            match entries.last_mut() {
                Some(last) if last.name == *name => last.count += 1,
                _ => entries.push(DeckEntry {
                    name: name.clone(),
                    count: 1,
                }),
            }
        }
        entries
    }

    /// Unique names in order of first appearance, with their total counts
    pub fn distinct(&self) -> Vec<DeckEntry> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut distinct: Vec<DeckEntry> = Vec::new();

        for name in &self.cards {
            match index.get(name.as_str()) {
                Some(&i) => distinct[i].count += 1,
                None => {
                    index.insert(name.as_str(), distinct.len());
                    distinct.push(DeckEntry {
                        name: name.clone(),
                        count: 1,
                    });
                }
            }
        }

        distinct
    }

    /// Serialize back into deck list text, one line per run
    pub fn to_list_text(&self) -> String {
        self.entries()
            .iter()
            .map(|e| format!("{} {}\n", e.count, e.name))
            .collect()
    }
}

/// Parse deck list text into a deck
pub fn parse_deck_list(text: &str) -> Deck {
    let entries = text.lines().enumerate().filter_map(|(i, line)| {
        let entry = parse_line(line);
        if entry.is_none() && !line.trim().is_empty() {
            debug!("Skipping line {}: {:?}", i + 1, line);
        }
        entry
    });
    Deck::from_entries(entries)
}

/// Parse one `<amount><whitespace><name>` line
fn parse_line(line: &str) -> Option<DeckEntry> {
    let line = line.trim_start_matches(BOM).trim();

    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return None;
    }

    let (amount, rest) = line.split_at(digits_end);
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let name = rest.trim();
    if name.is_empty() {
        return None;
    }

    let Ok(count) = amount.parse::<u32>() else {
        warn!("Skipping {}: amount {} is too large", name, amount);
        return None;
    };
    if count == 0 {
        return None;
    }
    if count > MAX_CARD_COUNT {
        warn!(
            "Skipping {}: amount {} is over the limit of {}",
            name, count, MAX_CARD_COUNT
        );
        return None;
    }

    Some(DeckEntry {
        name: name.to_string(),
        count,
    })
}

/// Read and parse a deck list file
pub async fn load_deck(path: impl AsRef<Path>) -> Result<Deck> {
    let path = path.as_ref().to_owned();

    let exists = match tokio::fs::try_exists(&path).await {
        Ok(exists) => exists,
        Err(source) => return Err(ProxyError::Read { path, source }),
    };
    if !exists {
        return Err(ProxyError::InputNotFound(path));
    }

    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => Ok(parse_deck_list(&contents)),
        Err(source) => Err(ProxyError::Read { path, source }),
    }
}
