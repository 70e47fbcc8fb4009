use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages, when the server reports it
    #[serde(default)]
    pub count: Option<u64>,
    /// URL of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_without_links() {
        let page: Page<u32> = serde_json::from_value(json!({"results": [1, 2, 3]})).unwrap();
        assert_eq!(page.len(), 3);
        assert!(!page.has_next());
        assert_eq!(page.into_iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_page_with_links() {
        let page: Page<u32> = serde_json::from_value(json!({
            "count": 12,
            "next": "https://app.watercrawl.dev/api/v1/core/search/?page=3",
            "previous": null,
            "results": []
        }))
        .unwrap();
        assert_eq!(page.count, Some(12));
        assert!(page.has_next());
        assert!(page.is_empty());
    }
}
