use crate::constants::region;
use crate::options::ValidationError;
use crate::util::normalize_lower;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Known display languages keyed by lowercase code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTable {
    codes: IndexMap<String, String>,
    prefixes: IndexMap<String, String>,
}

impl LanguageTable {
    /// Builds the table from canonical codes such as `en-US` or `de`.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for code in codes {
            let canonical = code.into().trim().to_string();
            if canonical.is_empty() {
                continue;
            }
            let lowered = normalize_lower(&canonical);
            if let Some((prefix, _)) = lowered.split_once('-') {
                table
                    .prefixes
                    .entry(prefix.to_string())
                    .or_insert_with(|| canonical.clone());
            }
            table.codes.insert(lowered, canonical);
        }
        table
    }

    /// Canonical form of `code`, if it is a known language.
    pub fn canonical(&self, code: &str) -> Option<&str> {
        self.codes.get(&normalize_lower(code)).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.canonical(code).is_some()
    }

    /// Looks a tag up by full code first, then by its primary subtag.
    pub(crate) fn lookup_tag(&self, tag: &str) -> Option<&str> {
        let lowered = normalize_lower(tag);
        if let Some(canonical) = self.codes.get(&lowered) {
            return Some(canonical);
        }
        let prefix = lowered.split('-').next().unwrap_or_default();
        self.codes
            .get(prefix)
            .or_else(|| self.prefixes.get(prefix))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// A storefront region.
///
/// `name` is the short name matched against GeoIP results and against the
/// resolved language tag (for example `br` matches `pt-BR`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub slug: String,
    pub name: String,
    pub default_language: String,
    #[serde(default)]
    pub ordering: i32,
}

impl Region {
    pub fn new<S, N, L>(slug: S, name: N, default_language: L, ordering: i32) -> Self
    where
        S: Into<String>,
        N: Into<String>,
        L: Into<String>,
    {
        Self {
            slug: slug.into(),
            name: name.into(),
            default_language: default_language.into(),
            ordering,
        }
    }

    pub fn worldwide<L: Into<String>>(default_language: L) -> Self {
        Self::new(region::WORLDWIDE, region::WORLDWIDE, default_language, 0)
    }
}

/// Known regions, worldwide first and the rest by `ordering` then slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTable {
    worldwide: String,
    regions: IndexMap<String, Region>,
}

impl RegionTable {
    pub fn new<I>(worldwide: Region, others: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Region>,
    {
        let worldwide = Self::normalized(worldwide)?;
        let mut rest: Vec<Region> = Vec::new();
        for candidate in others {
            let candidate = Self::normalized(candidate)?;
            if candidate.slug == worldwide.slug
                || rest.iter().any(|existing| existing.slug == candidate.slug)
            {
                return Err(ValidationError::DuplicateRegion(candidate.slug));
            }
            rest.push(candidate);
        }
        rest.sort_by(|a, b| a.ordering.cmp(&b.ordering).then_with(|| a.slug.cmp(&b.slug)));

        let mut regions = IndexMap::with_capacity(rest.len() + 1);
        let worldwide_slug = worldwide.slug.clone();
        regions.insert(worldwide_slug.clone(), worldwide);
        for candidate in rest {
            regions.insert(candidate.slug.clone(), candidate);
        }

        Ok(Self {
            worldwide: worldwide_slug,
            regions,
        })
    }

    fn normalized(mut candidate: Region) -> Result<Region, ValidationError> {
        candidate.slug = normalize_lower(candidate.slug.trim());
        if candidate.slug.is_empty() {
            return Err(ValidationError::EmptyRegionSlug);
        }
        Ok(candidate)
    }

    pub fn get(&self, slug: &str) -> Option<&Region> {
        self.regions.get(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.regions.contains_key(slug)
    }

    pub fn worldwide(&self) -> &Region {
        &self.regions[self.worldwide.as_str()]
    }

    pub fn is_worldwide(&self, slug: &str) -> bool {
        self.worldwide == slug
    }

    /// All regions in candidate order, worldwide first.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Candidate order without the worldwide sentinel.
    pub fn specific(&self) -> impl Iterator<Item = &Region> {
        self.regions.values().skip(1)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tables_test;
