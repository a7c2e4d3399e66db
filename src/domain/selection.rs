use std::collections::BTreeSet;

/// The set codes currently chosen for a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    codes: BTreeSet<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切換選取狀態，回傳切換後是否為已選取
    pub fn toggle(&mut self, code: &str) -> bool {
        let code = normalize(code);
        if code.is_empty() {
            return false;
        }
        if self.codes.remove(&code) {
            false
        } else {
            self.codes.insert(code);
            true
        }
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(&normalize(code))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SelectionStore {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut store = SelectionStore::new();
        for code in iter {
            let code = normalize(code.as_ref());
            if !code.is_empty() {
                store.codes.insert(code);
            }
        }
        store
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = SelectionStore::new();

        assert!(selection.toggle("mh3"));
        assert!(selection.contains("mh3"));
        assert_eq!(selection.len(), 1);

        assert!(!selection.toggle("mh3"));
        assert!(!selection.contains("mh3"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_codes_are_normalized() {
        let mut selection = SelectionStore::new();
        selection.toggle(" MH3 ");

        assert!(selection.contains("mh3"));
        assert!(!selection.toggle("Mh3"));
        assert!(!selection.toggle("   "));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_clear_and_from_iter() {
        let mut selection: SelectionStore = ["otj", "mh3", "otj", ""].into_iter().collect();
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec!["mh3", "otj"]);

        selection.clear();
        assert!(selection.is_empty());
    }
}
