/// Cities searched successfully this session, oldest first, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    cities: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `city` unless an identical entry exists. Returns whether it was added.
    pub fn record(&mut self, city: &str) -> bool {
        if self.contains(city) {
            return false;
        }
        self.cities.push(city.to_string());
        true
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// Entry at a 1-based position, as shown to the user.
    pub fn get(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|idx| self.cities.get(idx))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_is_not_recorded_twice() {
        let mut history = SearchHistory::new();

        assert!(history.record("Paris"));
        assert!(!history.record("Paris"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut history = SearchHistory::new();
        history.record("Paris");
        history.record("London");
        history.record("Paris");
        history.record("Tokyo");

        assert_eq!(history.iter().collect::<Vec<_>>(), ["Paris", "London", "Tokyo"]);
    }

    #[test]
    fn match_is_exact() {
        let mut history = SearchHistory::new();
        history.record("paris");
        history.record("Paris");

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn positions_are_one_based() {
        let mut history = SearchHistory::new();
        history.record("Paris");

        assert_eq!(history.get(1), Some("Paris"));
        assert_eq!(history.get(0), None);
        assert_eq!(history.get(2), None);
    }
}
