//! Runs a parsed lookup against an open connection.

use std::io::{Read, Write};

use dict_client::{Database, Definition, DictError, DictionaryConnection, MatchingStrategy};
use serde::Serialize;

use crate::cli::LookupCommand;

/// Result of one lookup, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum LookupOutcome {
    /// Selectable databases: the `*` and `!` choices, then the catalogue.
    Databases { databases: Vec<Database> },
    /// Strategies in server order.
    Strategies { strategies: Vec<MatchingStrategy> },
    /// Definitions of `word` in server order.
    Definitions {
        word: String,
        definitions: Vec<Definition>,
    },
    /// Words matching `word`.
    Matches { word: String, matches: Vec<String> },
}

impl LookupCommand {
    /// Performs the lookup on `connection`.
    pub(crate) fn execute<S>(
        &self,
        connection: &mut DictionaryConnection<S>,
    ) -> Result<LookupOutcome, DictError>
    where
        S: Read + Write,
    {
        match self {
            Self::Databases => {
                let mut databases = vec![Database::all(), Database::first_match()];
                databases.extend(connection.database_list()?);
                Ok(LookupOutcome::Databases { databases })
            }
            Self::Strategies => Ok(LookupOutcome::Strategies {
                strategies: connection.strategy_list()?,
            }),
            Self::Define { word, database } => Ok(LookupOutcome::Definitions {
                definitions: connection.definitions(word, &Database::named(database))?,
                word: word.clone(),
            }),
            Self::Match {
                word,
                strategy,
                database,
            } => Ok(LookupOutcome::Matches {
                matches: connection.match_list(
                    word,
                    &MatchingStrategy::new(strategy.as_str(), ""),
                    &Database::named(database),
                )?,
                word: word.clone(),
            }),
        }
    }
}
