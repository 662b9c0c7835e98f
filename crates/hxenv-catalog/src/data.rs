//! Declarative package catalog. Adding a package or platform is a data
//! change here, never a code change in the resolver.

/// URL templates for one version key of a package.
pub struct UrlSet {
    /// Either a named key matched verbatim against the requested version
    /// (`"latest"`, `"stable"`, `"insider"`) or [`VERSION_TEMPLATE_KEY`].
    pub version_key: &'static str,
    /// Platform key → URL template.
    pub platforms: &'static [(&'static str, &'static str)],
}

/// Catalog entry: where a package downloads from and what it exports once
/// unpacked.
pub struct PackageSpec {
    pub name: &'static str,
    pub urls: &'static [UrlSet],
    /// Variable name → path relative to the unpacked package directory.
    pub export_vars: &'static [(&'static str, &'static str)],
    /// PATH contributions relative to the unpacked package directory.
    pub export_paths: &'static [&'static str],
}

/// Key of the generic template used for any version without a named entry.
pub const VERSION_TEMPLATE_KEY: &str = "version";

pub const PACKAGES: &[PackageSpec] = &[
    PackageSpec {
        name: "haxe",
        urls: &[
            UrlSet {
                version_key: VERSION_TEMPLATE_KEY,
                platforms: &[
                    (
                        "win",
                        "https://github.com/HaxeFoundation/haxe/releases/download/{version}/haxe-{version}-win.zip",
                    ),
                    (
                        "osx",
                        "https://github.com/HaxeFoundation/haxe/releases/download/{version}/haxe-{version}-osx.tar.gz",
                    ),
                    (
                        "linux",
                        "https://github.com/HaxeFoundation/haxe/releases/download/{version}/haxe-{version}-linux64.tar.gz",
                    ),
                ],
            },
            UrlSet {
                version_key: "latest",
                platforms: &[
                    (
                        "win",
                        "http://hxbuilds.s3-website-us-east-1.amazonaws.com/builds/haxe/windows/haxe_latest.zip",
                    ),
                    (
                        "osx",
                        "http://hxbuilds.s3-website-us-east-1.amazonaws.com/builds/haxe/mac/haxe_latest.tar.gz",
                    ),
                    (
                        "linux",
                        "http://hxbuilds.s3-website-us-east-1.amazonaws.com/builds/haxe/linux64/haxe_latest.tar.gz",
                    ),
                ],
            },
        ],
        export_vars: &[
            ("HAXE_PATH", "."),
            ("HAXE_STD_PATH", "./std"),
            ("HAXELIB_PATH", "../haxelib"),
        ],
        export_paths: &["."],
    },
    PackageSpec {
        name: "neko",
        urls: &[UrlSet {
            version_key: VERSION_TEMPLATE_KEY,
            platforms: &[
                ("win", "http://nekovm.org/media/neko-{version}-win.zip"),
                ("osx", "http://nekovm.org/media/neko-{version}-osx64.tar.gz"),
                ("linux", "http://nekovm.org/media/neko-{version}-linux64.tar.gz"),
            ],
        }],
        export_vars: &[("NEKO_PATH", "."), ("LD_LIBRARY_PATH", ".")],
        export_paths: &["."],
    },
    PackageSpec {
        name: "vscode",
        // The update service URL ends in a channel name, not a file name,
        // so every template carries a fragment override naming the archive.
        urls: &[
            UrlSet {
                version_key: "stable",
                platforms: &[
                    (
                        "win",
                        "https://update.code.visualstudio.com/latest/{platform2}/stable#/vscode-stable-{platform}.{extension}",
                    ),
                    (
                        "osx",
                        "https://update.code.visualstudio.com/latest/{platform2}/stable#/vscode-stable-{platform}.{extension}",
                    ),
                    (
                        "linux",
                        "https://update.code.visualstudio.com/latest/{platform2}/stable#/vscode-stable-{platform}.{extension}",
                    ),
                ],
            },
            UrlSet {
                version_key: "insider",
                platforms: &[
                    (
                        "win",
                        "https://update.code.visualstudio.com/latest/{platform2}/insider#/vscode-insider-{platform}.{extension}",
                    ),
                    (
                        "osx",
                        "https://update.code.visualstudio.com/latest/{platform2}/insider#/vscode-insider-{platform}.{extension}",
                    ),
                    (
                        "linux",
                        "https://update.code.visualstudio.com/latest/{platform2}/insider#/vscode-insider-{platform}.{extension}",
                    ),
                ],
            },
            UrlSet {
                version_key: VERSION_TEMPLATE_KEY,
                platforms: &[
                    (
                        "win",
                        "https://update.code.visualstudio.com/{version}/{platform2}/stable#/vscode-{version}-{platform}.{extension}",
                    ),
                    (
                        "osx",
                        "https://update.code.visualstudio.com/{version}/{platform2}/stable#/vscode-{version}-{platform}.{extension}",
                    ),
                    (
                        "linux",
                        "https://update.code.visualstudio.com/{version}/{platform2}/stable#/vscode-{version}-{platform}.{extension}",
                    ),
                ],
            },
        ],
        export_vars: &[],
        export_paths: &[".", "bin"],
    },
];

/// One row of the neko auto-version policy: haxe versions matching any of
/// the prefixes get the pinned VM version.
pub struct VmVersionRule {
    pub haxe_prefixes: &'static [&'static str],
    pub neko_version: &'static str,
}

/// Empirical compatibility pins, not derived from dependency metadata.
pub const NEKO_AUTO_RULES: &[VmVersionRule] = &[
    VmVersionRule {
        haxe_prefixes: &["2"],
        neko_version: "1.8.2",
    },
    VmVersionRule {
        haxe_prefixes: &["3.0", "3.1", "3.2"],
        neko_version: "2.0.0",
    },
];

/// VM version for haxe releases no rule matches.
pub const NEKO_AUTO_DEFAULT: &str = "2.1.0";
