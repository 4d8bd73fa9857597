//! @ai:module:intent Task record definitions for the review corpus
//! @ai:module:layer domain
//! @ai:module:public_api TaskRecord, IssueCategory, ValueRange
//! @ai:module:stateless true

use crate::error::{AggregateError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// @ai:intent Category of issue a review task was built around
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    BugDetection,
    Security,
    Performance,
    Maintainability,
    Testing,
    Concurrency,
    ErrorHandling,
    Complexity,
    ApiDesign,
    Duplication,
    Coupling,
    Documentation,
    Organization,
    Reusability,
    DesignPatterns,
    Solid,
    Architecture,
    AntiPatterns,
    CodeSmells,
    Style,
    Dependencies,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 21] = [
        IssueCategory::BugDetection,
        IssueCategory::Security,
        IssueCategory::Performance,
        IssueCategory::Maintainability,
        IssueCategory::Testing,
        IssueCategory::Concurrency,
        IssueCategory::ErrorHandling,
        IssueCategory::Complexity,
        IssueCategory::ApiDesign,
        IssueCategory::Duplication,
        IssueCategory::Coupling,
        IssueCategory::Documentation,
        IssueCategory::Organization,
        IssueCategory::Reusability,
        IssueCategory::DesignPatterns,
        IssueCategory::Solid,
        IssueCategory::Architecture,
        IssueCategory::AntiPatterns,
        IssueCategory::CodeSmells,
        IssueCategory::Style,
        IssueCategory::Dependencies,
    ];

    /// @ai:intent Convert category to its serialized representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::BugDetection => "bug_detection",
            IssueCategory::Security => "security",
            IssueCategory::Performance => "performance",
            IssueCategory::Maintainability => "maintainability",
            IssueCategory::Testing => "testing",
            IssueCategory::Concurrency => "concurrency",
            IssueCategory::ErrorHandling => "error_handling",
            IssueCategory::Complexity => "complexity",
            IssueCategory::ApiDesign => "api_design",
            IssueCategory::Duplication => "duplication",
            IssueCategory::Coupling => "coupling",
            IssueCategory::Documentation => "documentation",
            IssueCategory::Organization => "organization",
            IssueCategory::Reusability => "reusability",
            IssueCategory::DesignPatterns => "design_patterns",
            IssueCategory::Solid => "solid",
            IssueCategory::Architecture => "architecture",
            IssueCategory::AntiPatterns => "anti_patterns",
            IssueCategory::CodeSmells => "code_smells",
            IssueCategory::Style => "style",
            IssueCategory::Dependencies => "dependencies",
        }
    }

    /// @ai:intent Human-readable name used in rendered tables
    /// @ai:effects pure
    pub fn display_name(&self) -> &'static str {
        match self {
            IssueCategory::BugDetection => "Bug Detection",
            IssueCategory::Security => "Security",
            IssueCategory::Performance => "Performance",
            IssueCategory::Maintainability => "Maintainability",
            IssueCategory::Testing => "Testing",
            IssueCategory::Concurrency => "Concurrency",
            IssueCategory::ErrorHandling => "Error Handling",
            IssueCategory::Complexity => "Complexity",
            IssueCategory::ApiDesign => "API Design",
            IssueCategory::Duplication => "Duplication",
            IssueCategory::Coupling => "Coupling",
            IssueCategory::Documentation => "Documentation",
            IssueCategory::Organization => "Organization",
            IssueCategory::Reusability => "Reusability",
            IssueCategory::DesignPatterns => "Design Patterns",
            IssueCategory::Solid => "SOLID",
            IssueCategory::Architecture => "Architecture",
            IssueCategory::AntiPatterns => "Anti-Patterns",
            IssueCategory::CodeSmells => "Code Smells",
            IssueCategory::Style => "Style",
            IssueCategory::Dependencies => "Dependencies",
        }
    }

    /// @ai:intent Map a corpus file label (e.g. `CodeSecurityIssues`) onto a category
    /// @ai:effects pure
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let category = match key.as_str() {
            "bugdetection" | "bugs" => IssueCategory::BugDetection,
            "security" | "securityvulnerabilities" | "codesecurityissues" => {
                IssueCategory::Security
            }
            "performance" | "performanceissues" | "codeperformanceissues" => {
                IssueCategory::Performance
            }
            "maintainability" | "codemaintainabilityissues" => IssueCategory::Maintainability,
            "testing" | "testability" | "testingissues" | "codetestingissues" => {
                IssueCategory::Testing
            }
            "concurrency" => IssueCategory::Concurrency,
            "errorhandling" | "errorhandlingissues" | "codeerrorhandlingissues" => {
                IssueCategory::ErrorHandling
            }
            "complexity" | "codecomplexityissues" => IssueCategory::Complexity,
            "api" | "apidesign" => IssueCategory::ApiDesign,
            "dry" | "duplication" | "codeduplicationissues" => IssueCategory::Duplication,
            "coupling" => IssueCategory::Coupling,
            "documentation" | "documentationissues" | "codedocumentationissues" => {
                IssueCategory::Documentation
            }
            "organization" | "codeorganizationissues" => IssueCategory::Organization,
            "reusability" => IssueCategory::Reusability,
            "designpatterns" | "designpatternmisuse" | "codedesignissues" => {
                IssueCategory::DesignPatterns
            }
            "solid" => IssueCategory::Solid,
            "architecture" | "codearchitectureissues" => IssueCategory::Architecture,
            "antipatterns" => IssueCategory::AntiPatterns,
            "codesmells" | "smells" => IssueCategory::CodeSmells,
            "style" | "codestyleissues" => IssueCategory::Style,
            "dependencies" | "codedependencyissues" => IssueCategory::Dependencies,
            _ => return None,
        };

        Some(category)
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Ordered (min, max) pair with min <= max
/// @ai:effects pure
///
/// Serialized as a two-element array `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange<T> {
    min: T,
    max: T,
}

impl<T: PartialOrd + fmt::Display> ValueRange<T> {
    /// @ai:intent Build a range, rejecting inverted or unordered (NaN) bounds
    /// @ai:effects pure
    pub fn new(min: T, max: T) -> Result<Self> {
        match min.partial_cmp(&max) {
            Some(Ordering::Less | Ordering::Equal) => Ok(Self { min, max }),
            _ => Err(AggregateError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            }),
        }
    }
}

impl<T> ValueRange<T> {
    /// Bounds must already satisfy min <= max.
    pub(crate) const fn from_ordered(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Copy> ValueRange<T> {
    pub fn point(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }
}

impl ValueRange<u64> {
    /// @ai:intent Sum review-minute ranges bound by bound
    /// @ai:effects pure
    pub fn sum_of<'a, I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = &'a ValueRange<u32>>,
    {
        ranges
            .into_iter()
            .fold(ValueRange::point(0u64), |acc, r| ValueRange {
                min: acc.min + u64::from(r.min),
                max: acc.max + u64::from(r.max),
            })
    }
}

/// Renders `min-max`, or a single value when both bounds are equal. A
/// precision, if given, applies to both bounds.
impl<T: fmt::Display + PartialEq> fmt::Display for ValueRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) if self.min == self.max => write!(f, "{:.*}", p, self.min),
            Some(p) => write!(f, "{:.*}-{:.*}", p, self.min, p, self.max),
            None if self.min == self.max => write!(f, "{}", self.min),
            None => write!(f, "{}-{}", self.min, self.max),
        }
    }
}

impl<T: Serialize> Serialize for ValueRange<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.min, &self.max).serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for ValueRange<T>
where
    T: Deserialize<'de> + PartialOrd + fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (min, max) = <(T, T)>::deserialize(deserializer)?;
        ValueRange::new(min, max).map_err(serde::de::Error::custom)
    }
}

/// @ai:intent One reviewed code sample
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: u32,
    pub category: IssueCategory,
    pub line_count: u32,
    pub review_minutes: ValueRange<u32>,
    /// Issues the sample's header says it contains
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_issues: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TaskRecord {
    /// @ai:intent Create a task record without optional metadata
    /// @ai:effects pure
    pub fn new(
        id: u32,
        category: IssueCategory,
        line_count: u32,
        review_minutes: ValueRange<u32>,
    ) -> Self {
        Self {
            id,
            category,
            line_count,
            review_minutes,
            declared_issues: None,
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let err = ValueRange::new(5u32, 3).unwrap_err();
        assert_eq!(
            err,
            AggregateError::InvalidRange {
                min: "5".to_string(),
                max: "3".to_string()
            }
        );
        assert!(ValueRange::new(3u32, 3).is_ok());
    }

    #[test]
    fn test_range_display() {
        let minutes = ValueRange::new(10u32, 15).unwrap();
        assert_eq!(minutes.to_string(), "10-15");
        assert_eq!(ValueRange::point(7u32).to_string(), "7");

        let rate = ValueRange::new(60.0, 82.5).unwrap();
        assert_eq!(format!("{:.1}", rate), "60.0-82.5");
    }

    #[test]
    fn test_sum_of_ranges() {
        let ranges = vec![
            ValueRange::new(10u32, 15).unwrap(),
            ValueRange::new(20u32, 30).unwrap(),
        ];
        let total = ValueRange::sum_of(&ranges);
        assert_eq!(total.min(), 30);
        assert_eq!(total.max(), 45);
    }

    #[test]
    fn test_range_deserialize_validates() {
        #[derive(Deserialize)]
        struct Holder {
            range: ValueRange<u32>,
        }

        let ok: Holder = toml::from_str("range = [1, 2]").unwrap();
        assert_eq!(ok.range.max(), 2);

        let bad = toml::from_str::<Holder>("range = [9, 2]");
        assert!(bad.is_err());
    }

    #[test]
    fn test_range_rejects_nan_bounds() {
        #[derive(Debug, Deserialize)]
        struct Holder {
            #[allow(dead_code)]
            range: ValueRange<f64>,
        }

        assert!(toml::from_str::<Holder>("range = [nan, 10.0]").is_err());
        assert!(toml::from_str::<Holder>("range = [10.0, nan]").is_err());
        assert!(ValueRange::new(f64::NAN, f64::NAN).is_err());
        assert!(toml::from_str::<Holder>("range = [60.0, 80.0]").is_ok());
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(
            IssueCategory::from_label("BugDetection"),
            Some(IssueCategory::BugDetection)
        );
        assert_eq!(
            IssueCategory::from_label("CodeSecurityIssues"),
            Some(IssueCategory::Security)
        );
        assert_eq!(
            IssueCategory::from_label("SecurityVulnerabilities"),
            Some(IssueCategory::Security)
        );
        assert_eq!(IssueCategory::from_label("DRY"), Some(IssueCategory::Duplication));
        assert_eq!(IssueCategory::from_label("API"), Some(IssueCategory::ApiDesign));
        assert_eq!(IssueCategory::from_label("Testability"), Some(IssueCategory::Testing));
        assert_eq!(IssueCategory::from_label("Gardening"), None);
    }

    #[test]
    fn test_canonical_names_round_trip_through_labels() {
        for category in IssueCategory::ALL {
            assert_eq!(IssueCategory::from_label(category.as_str()), Some(category));
        }
    }
}
