//! Plain-text rendering.

use dict_client::{Database, Definition};
use unicode_width::UnicodeWidthStr;

use crate::command::LookupOutcome;

const COLUMN_GAP: &str = "  ";

/// Renders `outcome` as text terminated by a newline.
pub(crate) fn render_human(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Databases { databases } => {
            let rows: Vec<(&str, &str)> = databases
                .iter()
                .map(|database| (database.name(), database.description()))
                .collect();
            columns(&rows, "no databases available\n")
        }
        LookupOutcome::Strategies { strategies } => {
            let rows: Vec<(&str, &str)> = strategies
                .iter()
                .map(|strategy| (strategy.name(), strategy.description()))
                .collect();
            columns(&rows, "no strategies available\n")
        }
        LookupOutcome::Definitions { word, definitions } => {
            if definitions.is_empty() {
                return format!("no definitions found for \"{word}\"\n");
            }
            definitions
                .iter()
                .map(definition_block)
                .collect::<Vec<_>>()
                .join("\n")
        }
        LookupOutcome::Matches { word, matches } => {
            if matches.is_empty() {
                return format!("no matches found for \"{word}\"\n");
            }
            matches.iter().fold(String::new(), |mut text, matched| {
                text.push_str(matched);
                text.push('\n');
                text
            })
        }
    }
}

/// Two columns, the first padded to its widest cell by display width.
fn columns(rows: &[(&str, &str)], empty: &str) -> String {
    if rows.is_empty() {
        return empty.to_owned();
    }
    let width = rows
        .iter()
        .map(|(name, _)| name.width())
        .max()
        .unwrap_or_default();

    let mut text = String::new();
    for (name, description) in rows {
        let padding = " ".repeat(width.saturating_sub(name.width()));
        text.push_str(&format!("{name}{padding}{COLUMN_GAP}{description}\n"));
    }
    text
}

fn definition_block(definition: &Definition) -> String {
    let mut block = format!(
        "{} ({})\n",
        definition.word(),
        source_label(definition.database())
    );
    block.push_str(definition.body());
    if !block.ends_with('\n') {
        block.push('\n');
    }
    block
}

fn source_label(database: &Database) -> &str {
    if database.description().is_empty() {
        database.name()
    } else {
        database.description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dict_client::MatchingStrategy;

    #[test]
    fn aligns_columns_by_display_width() {
        let outcome = LookupOutcome::Databases {
            databases: vec![
                Database::all(),
                Database::new("jmdict", "日本語"),
                Database::new("日本", "Japanese names"),
            ],
        };
        assert_eq!(
            render_human(&outcome),
            "*       All databases\njmdict  日本語\n日本    Japanese names\n"
        );
    }

    #[test]
    fn reports_empty_listings() {
        let outcome = LookupOutcome::Strategies {
            strategies: Vec::<MatchingStrategy>::new(),
        };
        assert_eq!(render_human(&outcome), "no strategies available\n");
    }

    #[test]
    fn separates_definitions_with_blank_lines() {
        let outcome = LookupOutcome::Definitions {
            word: String::from("apple"),
            definitions: vec![
                Definition::new("apple", Database::new("fd", "Freedict"), "A fruit.\n"),
                Definition::new("apple", Database::new("web1913", ""), "A tree.\n"),
            ],
        };
        assert_eq!(
            render_human(&outcome),
            "apple (Freedict)\nA fruit.\n\napple (web1913)\nA tree.\n"
        );
    }

    #[test]
    fn reports_missing_matches_with_the_word() {
        let outcome = LookupOutcome::Matches {
            word: String::from("zzyzx"),
            matches: Vec::new(),
        };
        assert_eq!(render_human(&outcome), "no matches found for \"zzyzx\"\n");
    }
}
