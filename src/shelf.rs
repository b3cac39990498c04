use std::fmt;

/// Which shelf an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shelf {
    /// The user's watchlist ("My List").
    List,
    /// The user's favorites.
    Favorites,
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shelf::List => write!(f, "list"),
            Shelf::Favorites => write!(f, "favorites"),
        }
    }
}

/// Storage key names for the two shelves.
///
/// Fixed at store construction; every context sharing a backend must use the
/// same keys or they are looking at different shelves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShelfKeys {
    pub list: String,
    pub favorites: String,
}

impl Default for ShelfKeys {
    fn default() -> Self {
        ShelfKeys {
            list: "my-list".to_string(),
            favorites: "favorites".to_string(),
        }
    }
}

impl ShelfKeys {
    pub fn new(list: impl Into<String>, favorites: impl Into<String>) -> Self {
        ShelfKeys {
            list: list.into(),
            favorites: favorites.into(),
        }
    }

    /// Resolve a shelf selector to its storage key.
    pub fn key(&self, shelf: Shelf) -> &str {
        match shelf {
            Shelf::List => &self.list,
            Shelf::Favorites => &self.favorites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys() {
        let keys = ShelfKeys::default();
        assert_eq!(keys.key(Shelf::List), "my-list");
        assert_eq!(keys.key(Shelf::Favorites), "favorites");
    }

    #[test]
    fn custom_keys() {
        let keys = ShelfKeys::new("pf_mylist", "pf_favorites");
        assert_eq!(keys.key(Shelf::List), "pf_mylist");
        assert_eq!(keys.key(Shelf::Favorites), "pf_favorites");
    }

    #[test]
    fn display() {
        assert_eq!(Shelf::List.to_string(), "list");
        assert_eq!(Shelf::Favorites.to_string(), "favorites");
    }
}
