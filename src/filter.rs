//! Selection of tracked output files
//!
//! Names are matched with `globset` using path-aware semantics: `*` stays
//! within one path segment, `**` crosses segments, and `{a,b}` alternates.
//! Matching is case-sensitive.

use crate::error::SizeError;
use globset::{GlobBuilder, GlobMatcher};

/// Default include pattern: common script, style and markup outputs
pub const DEFAULT_PATTERN: &str = "**/*.{mjs,js,jsx,css,html}";

/// Include/exclude glob pair
#[derive(Debug, Clone)]
pub struct PatternFilter {
    include: GlobMatcher,
    exclude: Option<GlobMatcher>,
}

impl PatternFilter {
    /// Compile an include pattern and an optional exclude pattern
    ///
    /// ```
    /// use bundle_sizes::filter::PatternFilter;
    ///
    /// let filter = PatternFilter::new("**/*.{js,css}", Some("**/*.map.js")).unwrap();
    /// let kept = filter.filter(["a.js", "a.map.js", "a.css", "a.png"]);
    /// assert_eq!(kept, vec!["a.js", "a.css"]);
    /// ```
    pub fn new(include: &str, exclude: Option<&str>) -> Result<Self, SizeError> {
        Ok(Self {
            include: compile(include)?,
            exclude: exclude.map(compile).transpose()?,
        })
    }

    /// Same exclude pattern, include replaced by an exact file name
    ///
    /// Used when a build emits a single chunk, so that chunk is tracked even
    /// when the configured extensions would not match it.
    pub fn for_single_chunk(&self, chunk_name: &str) -> Result<Self, SizeError> {
        let escaped = globset::escape(chunk_name);
        Ok(Self {
            include: compile(&escaped)?,
            exclude: self.exclude.clone(),
        })
    }

    /// Whether a single name is tracked
    pub fn is_match(&self, name: &str) -> bool {
        self.include.is_match(name)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(name))
    }

    /// Retain the tracked names, preserving input order
    pub fn filter<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter(|name| self.is_match(name.as_ref()))
            .map(|name| name.as_ref().to_string())
            .collect()
    }

    /// Include pattern source
    pub fn include_pattern(&self) -> &str {
        self.include.glob().glob()
    }

    /// Exclude pattern source, if any
    pub fn exclude_pattern(&self) -> Option<&str> {
        self.exclude.as_ref().map(|m| m.glob().glob())
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher, SizeError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| SizeError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_include_and_exclude() {
        let filter = PatternFilter::new("**/*.{js,css}", Some("**/*.map.js")).unwrap();
        let kept = filter.filter(["a.js", "a.map.js", "a.css", "a.png"]);
        assert_eq!(kept, vec!["a.js", "a.css"]);
    }

    #[test]
    fn test_default_pattern_matches_nested_outputs() {
        let filter = PatternFilter::new(DEFAULT_PATTERN, None).unwrap();
        let kept = filter.filter([
            "index.html",
            "assets/main.abc123.js",
            "assets/vendor.mjs",
            "assets/style.css",
            "assets/logo.svg",
            "assets/main.abc123.js.map",
        ]);
        assert_eq!(
            kept,
            vec![
                "index.html",
                "assets/main.abc123.js",
                "assets/vendor.mjs",
                "assets/style.css",
            ]
        );
    }

    #[test]
    fn test_single_star_does_not_cross_separators() {
        let filter = PatternFilter::new("*.js", None).unwrap();
        assert!(filter.is_match("main.js"));
        assert!(!filter.is_match("chunks/main.js"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filter = PatternFilter::new("**/*.js", None).unwrap();
        assert!(filter.is_match("main.js"));
        assert!(!filter.is_match("MAIN.JS"));
    }

    #[test]
    fn test_no_exclude_excludes_nothing() {
        let filter = PatternFilter::new("**/*", None).unwrap();
        assert_eq!(filter.exclude_pattern(), None);
        assert_eq!(filter.filter(["a", "b/c"]).len(), 2);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = PatternFilter::new("**/*.{js,css", None).unwrap_err();
        assert!(matches!(err, SizeError::InvalidPattern { ref pattern, .. } if pattern == "**/*.{js,css"));

        let err = PatternFilter::new("**/*.js", Some("[")).unwrap_err();
        assert!(matches!(err, SizeError::InvalidPattern { ref pattern, .. } if pattern == "["));
    }

    #[test]
    fn test_single_chunk_override_matches_exact_name_only() {
        let filter = PatternFilter::new("**/*.css", None).unwrap();
        assert!(!filter.is_match("main.abcd123.js"));

        let single = filter.for_single_chunk("main.abcd123.js").unwrap();
        assert!(single.is_match("main.abcd123.js"));
        assert!(!single.is_match("other.js"));
        assert_eq!(single.include_pattern(), "main.abcd123.js");
    }

    #[test]
    fn test_single_chunk_override_escapes_glob_characters() {
        let filter = PatternFilter::new(DEFAULT_PATTERN, None).unwrap();
        let single = filter.for_single_chunk("bundle[1].js").unwrap();
        assert!(single.is_match("bundle[1].js"));
        assert!(!single.is_match("bundle1.js"));
    }

    #[test]
    fn test_single_chunk_override_keeps_exclude() {
        let filter = PatternFilter::new(DEFAULT_PATTERN, Some("**/*.min.js")).unwrap();
        let single = filter.for_single_chunk("app.min.js").unwrap();
        assert!(!single.is_match("app.min.js"));
    }
}
