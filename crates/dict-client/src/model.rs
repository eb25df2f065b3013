//! Values returned by dictionary lookups.
//!
//! None of these hold a reference back to the connection that produced
//! them; they stay valid after the connection is closed.

use serde::Serialize;

/// Database name meaning "search every database".
pub const ALL_DATABASES: &str = "*";

/// Database name meaning "stop at the first database with a result".
pub const FIRST_MATCH: &str = "!";

/// A dictionary database offered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Database {
    name: String,
    description: String,
}

impl Database {
    /// Creates a database record.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// The `*` pseudo-database covering every database.
    #[must_use]
    pub fn all() -> Self {
        Self::new(ALL_DATABASES, "All databases")
    }

    /// The `!` pseudo-database stopping at the first database with a result.
    #[must_use]
    pub fn first_match() -> Self {
        Self::new(FIRST_MATCH, "Any database")
    }

    /// Builds a database from a name typed by a user, mapping the two
    /// pseudo-database names onto their described sentinels.
    #[must_use]
    pub fn named(name: &str) -> Self {
        match name {
            ALL_DATABASES => Self::all(),
            FIRST_MATCH => Self::first_match(),
            other => Self::new(other, ""),
        }
    }

    /// Name used on the wire.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A matching strategy offered by the server (for example `prefix`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchingStrategy {
    name: String,
    description: String,
}

impl MatchingStrategy {
    /// Creates a strategy record.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Name used on the wire.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One definition of a word, taken from a single database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    word: String,
    database: Database,
    body: String,
}

impl Definition {
    /// Builds a complete definition from its parts.
    #[must_use]
    pub fn new(word: impl Into<String>, database: Database, body: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            database,
            body: body.into(),
        }
    }

    /// The headword as reported by the server.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Database the definition came from.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Definition text; every received line followed by `\n`.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// A definition whose body is still being received.
#[derive(Debug)]
pub(crate) struct DefinitionBuilder {
    word: String,
    database: Database,
    body: String,
}

impl DefinitionBuilder {
    pub(crate) const fn new(word: String, database: Database) -> Self {
        Self {
            word,
            database,
            body: String::new(),
        }
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }

    pub(crate) fn seal(self) -> Definition {
        Definition {
            word: self.word,
            database: self.database,
            body: self.body,
        }
    }
}
