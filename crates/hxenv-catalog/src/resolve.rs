use indexmap::IndexMap;

use hxenv_error::{Result, ToolchainError};

use crate::data::{self, PackageSpec};
use crate::package::Package;
use crate::platform::Platform;
use crate::template;

/// Resolves a catalog entry into a concrete [`Package`] for the requested
/// version and platform. Pure table lookup plus template substitution; no
/// network activity.
pub fn resolve(name: &str, version: &str, platform: Platform) -> Result<Package> {
    resolve_in(data::PACKAGES, name, version, platform)
}

fn resolve_in(
    catalog: &[PackageSpec],
    name: &str,
    version: &str,
    platform: Platform,
) -> Result<Package> {
    let spec = catalog
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| ToolchainError::UnknownPackage(name.to_string()))?;

    // A named version key ("latest", "stable", ...) wins over the generic
    // template.
    let url_set = spec
        .urls
        .iter()
        .find(|u| u.version_key == version)
        .or_else(|| {
            spec.urls
                .iter()
                .find(|u| u.version_key == data::VERSION_TEMPLATE_KEY)
        })
        .ok_or_else(|| {
            ToolchainError::UnsupportedVersion(name.to_string(), version.to_string())
        })?;

    let template = url_set
        .platforms
        .iter()
        .find(|(key, _)| *key == platform.key())
        .map(|(_, template)| *template)
        .ok_or_else(|| {
            ToolchainError::UnsupportedPlatform(name.to_string(), platform.key().to_string())
        })?;

    let substituted = template::substitute(
        template,
        &[
            ("version", version),
            ("platform", platform.key()),
            ("platform2", platform.alias()),
            ("extension", platform.archive_ext()),
        ],
    );

    // A `#`-delimited fragment overrides the archive name when the real
    // download URL does not end in one.
    let (url, name_source) = match substituted.split_once('#') {
        Some((base, fragment)) => (base.to_string(), fragment.to_string()),
        None => (substituted.clone(), substituted),
    };
    let archive_file = last_path_segment(&name_source).to_string();
    let archive_dir = strip_archive_suffix(&archive_file).to_string();

    Ok(Package {
        name: name.to_string(),
        url,
        archive_file,
        archive_dir,
        export_vars: spec
            .export_vars
            .iter()
            .map(|(var, rel)| ((*var).to_string(), (*rel).to_string()))
            .collect::<IndexMap<_, _>>(),
        export_paths: spec
            .export_paths
            .iter()
            .map(|rel| (*rel).to_string())
            .collect(),
    })
}

/// VM version paired with a haxe release when the caller asks for `auto`.
/// Data-driven prefix match over [`data::NEKO_AUTO_RULES`].
#[must_use]
pub fn neko_version_for(haxe_version: &str) -> &'static str {
    for rule in data::NEKO_AUTO_RULES {
        if rule
            .haxe_prefixes
            .iter()
            .any(|prefix| haxe_version.starts_with(prefix))
        {
            return rule.neko_version;
        }
    }
    data::NEKO_AUTO_DEFAULT
}

fn last_path_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn strip_archive_suffix(file: &str) -> &str {
    file.strip_suffix(".tar.gz")
        .or_else(|| file.strip_suffix(".zip"))
        .unwrap_or(file)
}
