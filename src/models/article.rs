use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One search result as shown in the list. Every field is plain text and
/// defaults to empty when the API left it out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub section_name: String,
    /// ISO-8601 timestamp exactly as received.
    pub published_at: String,
    pub url: String,
    pub author: String,
    /// Trail text, may contain HTML.
    pub summary: String,
}

impl Article {
    pub fn has_link(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// `2017-07-15T21:30:35Z` becomes `Jul 15, 2017`. Values shorter than ten
    /// characters are returned untouched; longer unparseable ones render empty.
    pub fn display_date(&self) -> String {
        if self.published_at.chars().count() < 10 {
            return self.published_at.clone();
        }
        let day: String = self.published_at.chars().take(10).collect();

        match NaiveDate::parse_from_str(&day, "%Y-%m-%d") {
            Ok(date) => date.format("%b %d, %Y").to_string(),
            Err(e) => {
                tracing::debug!("Unparseable publication date {:?}: {}", self.published_at, e);
                String::new()
            }
        }
    }

    /// Trail text with markup stripped, wrapped to `width` columns.
    pub fn summary_text(&self, width: usize) -> String {
        if self.summary.is_empty() {
            return String::new();
        }

        match html2text::from_read(self.summary.as_bytes(), width.max(10)) {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::debug!("Failed to convert trail text: {}", e);
                self.summary.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_date(published_at: &str) -> Article {
        Article {
            published_at: published_at.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn display_date_uses_day_portion() {
        assert_eq!(with_date("2017-07-15T21:30:35Z").display_date(), "Jul 15, 2017");
        assert_eq!(with_date("2024-01-02").display_date(), "Jan 02, 2024");
    }

    #[test]
    fn display_date_short_values_pass_through() {
        assert_eq!(with_date("").display_date(), "");
        assert_eq!(with_date("yesterday").display_date(), "yesterday");
    }

    #[test]
    fn display_date_garbage_is_empty() {
        assert_eq!(with_date("not-a-date-at-all").display_date(), "");
    }

    #[test]
    fn display_date_multibyte_garbage_is_empty() {
        assert_eq!(with_date("2017-07-1é5T00:00Z").display_date(), "");
        assert_eq!(with_date("日付日付日付日付日付").display_date(), "");
        assert_eq!(with_date("日付").display_date(), "日付");
    }

    #[test]
    fn summary_markup_is_stripped() {
        let article = Article {
            summary: "<strong>Breaking:</strong> markets rally".to_string(),
            ..Default::default()
        };

        let text = article.summary_text(80);
        assert!(text.contains("Breaking:"));
        assert!(text.contains("markets rally"));
        assert!(!text.contains("<strong>"));
    }

    #[test]
    fn missing_url_means_no_link() {
        assert!(!Article::default().has_link());
        let article = Article {
            url: "https://www.theguardian.com/world".to_string(),
            ..Default::default()
        };
        assert!(article.has_link());
    }
}
