//! Per-tab back/forward history.

use crate::base::address::AddressInfo;

/// The tab's committed navigation entries.
///
/// `record` commits a fresh navigation: any forward tail is truncated, the
/// entry becomes current. `back`/`forward` only move the cursor; the caller
/// re-drives the load for the returned entry.
#[derive(Debug, Default)]
pub struct BackForwardList {
    entries: Vec<AddressInfo>,
    /// Index of the current entry; `None` until the first commit.
    index: Option<usize>,
}

impl BackForwardList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a navigation, truncating any forward entries.
    pub fn record(&mut self, address: AddressInfo) {
        match self.index {
            Some(i) => self.entries.truncate(i + 1),
            None => self.entries.clear(),
        }
        self.entries.push(address);
        self.index = Some(self.entries.len() - 1);
    }

    pub fn current(&self) -> Option<&AddressInfo> {
        self.index.map(|i| &self.entries[i])
    }

    pub fn can_go_back(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.index
            .is_some_and(|i| i + 1 < self.entries.len())
    }

    /// Move the cursor back and return the new current entry.
    pub fn back(&mut self) -> Option<&AddressInfo> {
        let i = self.index?;
        if i == 0 {
            return None;
        }
        self.index = Some(i - 1);
        self.current()
    }

    /// Move the cursor forward and return the new current entry.
    pub fn forward(&mut self) -> Option<&AddressInfo> {
        let i = self.index?;
        if i + 1 >= self.entries.len() {
            return None;
        }
        self.index = Some(i + 1);
        self.current()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(url: &str) -> AddressInfo {
        AddressInfo::parse(url).unwrap()
    }

    #[test]
    fn test_empty_list() {
        let mut list = BackForwardList::new();
        assert!(list.current().is_none());
        assert!(!list.can_go_back());
        assert!(!list.can_go_forward());
        assert!(list.back().is_none());
        assert!(list.forward().is_none());
    }

    #[test]
    fn test_record_and_traverse() {
        let mut list = BackForwardList::new();
        list.record(addr("https://a.example/"));
        list.record(addr("https://b.example/"));
        list.record(addr("https://c.example/"));

        assert_eq!(list.current().unwrap().domain_name().as_str(), "c.example");
        assert!(list.can_go_back());
        assert!(!list.can_go_forward());

        assert_eq!(list.back().unwrap().domain_name().as_str(), "b.example");
        assert!(list.can_go_forward());
        assert_eq!(list.forward().unwrap().domain_name().as_str(), "c.example");
    }

    #[test]
    fn test_record_truncates_forward_tail() {
        let mut list = BackForwardList::new();
        list.record(addr("https://a.example/"));
        list.record(addr("https://b.example/"));
        list.back();
        list.record(addr("https://c.example/"));

        assert_eq!(list.len(), 2);
        assert!(!list.can_go_forward());
        assert_eq!(list.current().unwrap().domain_name().as_str(), "c.example");
    }

    #[test]
    fn test_back_stops_at_first_entry() {
        let mut list = BackForwardList::new();
        list.record(addr("https://a.example/"));
        assert!(list.back().is_none());
        assert_eq!(list.current().unwrap().domain_name().as_str(), "a.example");
    }
}
