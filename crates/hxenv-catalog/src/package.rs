use indexmap::IndexMap;

/// A resolved, platform-specific downloadable package: concrete URL plus
/// the variables and PATH entries it exports once unpacked. Immutable after
/// resolution.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    /// Concrete download URL, fragment already stripped.
    pub url: String,
    /// File name the archive is cached under inside the install root.
    pub archive_file: String,
    /// Directory name the unpacked tree lives under inside the install
    /// root: `archive_file` with its archive suffix stripped.
    pub archive_dir: String,
    /// Variable name → path relative to the unpacked directory.
    pub export_vars: IndexMap<String, String>,
    /// PATH contributions relative to the unpacked directory, in declared
    /// order.
    pub export_paths: Vec<String>,
}
