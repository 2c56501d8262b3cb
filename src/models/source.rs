//! Target sources and audit specifications

use serde::{Deserialize, Serialize};

/// One page to benchmark plus the labels used for its report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSource {
    /// Human-readable name for the report row
    pub name: String,
    /// Short tag identifying the page variant
    pub tag: String,
    /// Page URL handed to the audit engine
    pub url: String,
}

impl TargetSource {
    pub fn new<S: Into<String>>(name: S, tag: S, url: S) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            url: url.into(),
        }
    }
}

/// One metric to extract from a raw audit report and its column heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSpec {
    /// Audit id as reported by the engine (e.g. "first-contentful-paint")
    pub id: String,
    /// Column heading used in the CSV report (e.g. "FCP")
    pub heading: String,
}

impl AuditSpec {
    pub fn new<S: Into<String>>(id: S, heading: S) -> Self {
        Self {
            id: id.into(),
            heading: heading.into(),
        }
    }
}

/// The default set of audits extracted into report columns
pub fn default_audit_specs() -> Vec<AuditSpec> {
    vec![
        AuditSpec::new("time-to-first-byte", "TTFB"),
        AuditSpec::new("first-contentful-paint", "FCP"),
        AuditSpec::new("first-meaningful-paint", "FMP"),
        AuditSpec::new("speed-index", "SPI"),
        AuditSpec::new("interactive", "TTI"),      // Time to Interactive
        AuditSpec::new("max-potential-fid", "FID"), // First Input Delay
        AuditSpec::new("total-blocking-time", "TBT"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_audit_specs_order() {
        let specs = default_audit_specs();
        assert_eq!(specs.len(), 7);
        assert_eq!(specs[0].id, "time-to-first-byte");
        assert_eq!(specs[0].heading, "TTFB");
        assert_eq!(specs[6].heading, "TBT");
    }

    #[test]
    fn test_target_source_construction() {
        let source = TargetSource::new("Landing Page", "landing", "https://example.com");
        assert_eq!(source.name, "Landing Page");
        assert_eq!(source.tag, "landing");
        assert_eq!(source.url, "https://example.com");
    }
}
