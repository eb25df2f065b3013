//! Per-connection cache of the server's databases.

use std::collections::HashMap;

use crate::model::Database;

/// Databases keyed by name, kept in the order the server listed them.
#[derive(Debug, Default)]
pub(super) struct Catalogue {
    databases: Vec<Database>,
    positions: HashMap<String, usize>,
}

impl Catalogue {
    pub(super) fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    /// Adds a database; a repeated name replaces the earlier record in place.
    pub(super) fn insert(&mut self, database: Database) {
        if let Some(slot) = self
            .positions
            .get(database.name())
            .and_then(|&position| self.databases.get_mut(position))
        {
            *slot = database;
            return;
        }
        self.positions
            .insert(database.name().to_owned(), self.databases.len());
        self.databases.push(database);
    }

    pub(super) fn get(&self, name: &str) -> Option<&Database> {
        self.positions
            .get(name)
            .and_then(|&position| self.databases.get(position))
    }

    pub(super) fn databases(&self) -> &[Database] {
        &self.databases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut catalogue = Catalogue::default();
        catalogue.insert(Database::new("wn", "WordNet"));
        catalogue.insert(Database::new("fd", "Freedict"));
        let names: Vec<&str> = catalogue.databases().iter().map(Database::name).collect();
        assert_eq!(names, ["wn", "fd"]);
    }

    #[test]
    fn repeated_name_replaces_in_place() {
        let mut catalogue = Catalogue::default();
        catalogue.insert(Database::new("wn", "old"));
        catalogue.insert(Database::new("fd", "Freedict"));
        catalogue.insert(Database::new("wn", "new"));
        assert_eq!(catalogue.databases().len(), 2);
        assert_eq!(
            catalogue.get("wn").map(Database::description),
            Some("new")
        );
        assert_eq!(
            catalogue.databases().first().map(Database::name),
            Some("wn")
        );
    }

    #[test]
    fn lookup_misses_unknown_names() {
        let catalogue = Catalogue::default();
        assert!(catalogue.is_empty());
        assert!(catalogue.get("gcide").is_none());
    }
}
