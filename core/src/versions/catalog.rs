//! versions/catalog.rs
//! Cached, semver-ordered list of selectable codec versions.
use std::cmp::Ordering;

use semver::Version;
use tracing::{debug, warn};

use crate::{
    constants::DEFAULT_REGISTRY_VERSION,
    versions::types::{RegistryLookup, RegistryMeta, VersionInfo},
};

pub struct VersionCatalog {
    lookup: Box<dyn RegistryLookup>,
    cached: Option<Vec<VersionInfo>>,
}

impl VersionCatalog {
    pub fn new(lookup: impl RegistryLookup + 'static) -> Self {
        Self { lookup: Box::new(lookup), cached: None }
    }

    /// Non-yanked versions, newest first, with exactly one marked `latest`.
    ///
    /// Results are cached until `force_refresh`. A failed fetch, or one that
    /// leaves nothing selectable, yields the single default version and is
    /// not cached.
    pub fn versions(&mut self, force_refresh: bool) -> Vec<VersionInfo> {
        if let (Some(cached), false) = (&self.cached, force_refresh) {
            return cached.clone();
        }
        match self.lookup.fetch() {
            Ok(meta) => {
                let versions = resolve_versions(&meta);
                if versions.is_empty() {
                    warn!(fallback = DEFAULT_REGISTRY_VERSION, "registry lists no selectable versions");
                    return fallback_versions();
                }
                debug!(count = versions.len(), "registry versions fetched");
                self.cached = Some(versions.clone());
                versions
            }
            Err(err) => {
                warn!(error = %err, fallback = DEFAULT_REGISTRY_VERSION, "registry lookup failed");
                fallback_versions()
            }
        }
    }

    /// First (newest) selectable version.
    pub fn default_version(&mut self) -> String {
        self.versions(false)
            .into_iter()
            .next()
            .map(|info| info.version)
            .unwrap_or_else(|| DEFAULT_REGISTRY_VERSION.to_string())
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

pub fn fallback_versions() -> Vec<VersionInfo> {
    vec![VersionInfo { version: DEFAULT_REGISTRY_VERSION.to_string(), latest: true, yanked: false }]
}

/// Drop yanked versions, sort newest first, and mark `latest`: the registry's
/// own pick when it survived filtering, otherwise the highest remaining.
pub fn resolve_versions(meta: &RegistryMeta) -> Vec<VersionInfo> {
    let mut versions: Vec<VersionInfo> = meta
        .versions
        .iter()
        .filter(|(_, info)| !info.yanked)
        .map(|(version, _)| VersionInfo::new(version.clone()))
        .collect();
    versions.sort_by(|a, b| compare_desc(&a.version, &b.version));

    let latest = meta
        .latest
        .as_deref()
        .filter(|latest| versions.iter().any(|v| v.version == *latest))
        .map(str::to_string)
        .or_else(|| versions.first().map(|v| v.version.clone()));
    for info in &mut versions {
        info.latest = latest.as_deref() == Some(info.version.as_str());
    }
    versions
}

/// Semver precedence, highest first; unparseable versions sort last.
fn compare_desc(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Ok(a), Ok(b)) => b.cmp(&a),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => b.cmp(a),
    }
}
