//! Keyword-based transaction categorization
//!
//! Classification evaluates an explicit, ordered list of keyword rules
//! against the lower-cased description; the first matching rule wins, so
//! rule order is part of the contract rather than an implementation
//! detail. The `Classify` trait is the seam where a statistical
//! classifier could replace the keyword matcher without touching callers.

use crate::models::Category;

/// A swappable description-to-category capability.
pub trait Classify {
    fn classify(&self, description: &str) -> Category;
}

/// One ordered rule: any keyword appearing as a substring of the
/// lower-cased description assigns the category.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// The default heuristic classifier. Pure and deterministic: identical
/// description text always yields the identical category.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<KeywordRule>,
}

impl KeywordClassifier {
    /// Build a classifier with caller-controlled rule ordering.
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordClassifier {
    /// Refund is listed before Advertising so a description like
    /// "Facebook Ads Refund" resolves to Refund and stays visible to the
    /// return-rate metric.
    fn default() -> Self {
        Self::new(vec![
            KeywordRule::new(Category::Refund, &["refund", "return", "chargeback", "rto"]),
            KeywordRule::new(
                Category::Advertising,
                &["ad", "facebook", "google", "meta", "instagram", "marketing"],
            ),
            KeywordRule::new(Category::Salary, &["salary", "wage", "payroll", "stipend"]),
            KeywordRule::new(Category::Rent, &["rent", "office", "lease"]),
            KeywordRule::new(
                Category::Utilities,
                &["electric", "water", "internet", "broadband", "utilit", "phone"],
            ),
            KeywordRule::new(Category::Tax, &["tax", "gst", "tds"]),
        ])
    }
}

impl Classify for KeywordClassifier {
    fn classify(&self, description: &str) -> Category {
        let haystack = description.to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|k| haystack.contains(k.as_str())) {
                return rule.category;
            }
        }
        Category::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_categories() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify("Facebook Ads"), Category::Advertising);
        assert_eq!(classifier.classify("GOOGLE ADWORDS"), Category::Advertising);
        assert_eq!(classifier.classify("Monthly Salary"), Category::Salary);
        assert_eq!(classifier.classify("Office Rent Jan"), Category::Rent);
        assert_eq!(classifier.classify("Electricity Bill"), Category::Utilities);
        assert_eq!(classifier.classify("GST Payment"), Category::Tax);
        assert_eq!(classifier.classify("Customer Refund"), Category::Refund);
        assert_eq!(classifier.classify("Sales"), Category::Other);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Matches both the Refund and Advertising keyword sets; the
        // default ordering lists Refund first.
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify("Facebook Ads Refund"), Category::Refund);
    }

    #[test]
    fn test_custom_rule_ordering_changes_precedence() {
        let classifier = KeywordClassifier::new(vec![
            KeywordRule::new(Category::Advertising, &["ad", "facebook"]),
            KeywordRule::new(Category::Refund, &["refund", "return"]),
        ]);
        assert_eq!(
            classifier.classify("Facebook Ads Refund"),
            Category::Advertising
        );
    }

    #[test]
    fn test_deterministic_across_calls() {
        let classifier = KeywordClassifier::default();
        let first = classifier.classify("Shopify payout");
        for _ in 0..10 {
            assert_eq!(classifier.classify("Shopify payout"), first);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = KeywordClassifier::default();
        assert_eq!(classifier.classify("PAYROLL RUN"), Category::Salary);
        assert_eq!(classifier.classify("payroll run"), Category::Salary);
    }
}
