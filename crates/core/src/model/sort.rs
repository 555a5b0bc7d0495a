//
// ─── SORT CONFIGURATION ───────────────────────────────────────────────────────
//

/// Sortable columns of the card collection. Wire names are the card service's
/// field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Front,
    Back,
    NextReview,
    CreatedAt,
}

impl SortKey {
    /// The `sortBy` query parameter value.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            SortKey::Front => "front",
            SortKey::Back => "back",
            SortKey::NextReview => "nextReview",
            SortKey::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The `sortDir` query parameter value.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort of the collection view.
///
/// Toggling the active key flips direction; choosing a new key resets the
/// direction to ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::NextReview,
            direction: SortDirection::Asc,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sorts_by_next_review_ascending() {
        let sort = SortConfig::default();
        assert_eq!(sort.key, SortKey::NextReview);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn toggling_same_key_twice_returns_to_ascending() {
        let mut sort = SortConfig::default();
        sort.toggle(SortKey::NextReview);
        assert_eq!(sort.direction, SortDirection::Desc);
        sort.toggle(SortKey::NextReview);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn toggling_a_new_key_resets_to_ascending() {
        let mut sort = SortConfig::default();
        sort.toggle(SortKey::NextReview); // now desc
        sort.toggle(SortKey::Front);
        assert_eq!(sort.key, SortKey::Front);
        assert_eq!(sort.direction, SortDirection::Asc);

        sort.toggle(SortKey::Front); // desc
        sort.toggle(SortKey::Back);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn wire_parameter_names() {
        assert_eq!(SortKey::NextReview.as_param(), "nextReview");
        assert_eq!(SortKey::CreatedAt.as_param(), "createdAt");
        assert_eq!(SortDirection::Asc.as_param(), "asc");
        assert_eq!(SortDirection::Desc.as_param(), "desc");
    }
}
