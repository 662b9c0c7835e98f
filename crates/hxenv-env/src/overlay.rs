use indexmap::IndexMap;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use hxenv_catalog::Package;
use hxenv_error::Result;

pub const PATH_VAR: &str = "PATH";

fn host_path_separator() -> char {
    if cfg!(windows) { ';' } else { ':' }
}

/// Environment contributions accumulated from installed packages: named
/// variables plus PATH entries, in package install order. Grows
/// monotonically; merged onto a base environment with [`EnvOverlay::compose`].
#[derive(Debug, Default)]
pub struct EnvOverlay {
    vars: IndexMap<String, PathBuf>,
    path_entries: Vec<PathBuf>,
}

impl EnvOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one package's exports, resolved against its unpacked
    /// directory. Exported variables may point at directories the archive
    /// never shipped (a haxelib repo, a library search path); those are
    /// created here.
    pub fn contribute(&mut self, package: &Package, package_dir: &Path) -> Result<()> {
        for rel in &package.export_paths {
            self.path_entries.push(absolutize(package_dir, rel)?);
        }
        for (name, rel) in &package.export_vars {
            let abs = absolutize(package_dir, rel)?;
            if !abs.exists() {
                fs::create_dir_all(&abs)?;
            }
            self.vars.insert(name.clone(), abs);
        }
        Ok(())
    }

    /// Merges the overlay onto a base environment. Overlay PATH entries
    /// come first, then the base PATH; overlay variables overwrite
    /// same-named base variables; everything else passes through. Pure.
    #[must_use]
    pub fn compose(&self, base: &HashMap<String, String>) -> HashMap<String, String> {
        let separator = host_path_separator();
        let mut env = base.clone();

        let mut path = self.joined_path(separator);
        if let Some(base_path) = base.get(PATH_VAR) {
            if !base_path.is_empty() {
                if !path.is_empty() {
                    path.push(separator);
                }
                path.push_str(base_path);
            }
        }
        env.insert(PATH_VAR.to_string(), path);

        for (name, value) in &self.vars {
            env.insert(name.clone(), value.display().to_string());
        }
        env
    }

    pub fn vars(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.vars.iter().map(|(name, path)| (name.as_str(), path.as_path()))
    }

    #[must_use]
    pub fn path_entries(&self) -> &[PathBuf] {
        &self.path_entries
    }

    #[must_use]
    pub fn joined_path(&self, separator: char) -> String {
        let mut out = String::new();
        for entry in &self.path_entries {
            if !out.is_empty() {
                out.push(separator);
            }
            out.push_str(&entry.display().to_string());
        }
        out
    }
}

/// Resolves `rel` against `package_dir` into an absolute, lexically
/// normalized path. Normalization is lexical on purpose: targets like a
/// not-yet-created haxelib dir cannot be canonicalized.
fn absolutize(package_dir: &Path, rel: &str) -> Result<PathBuf> {
    let joined = package_dir.join(rel);
    let absolute = if joined.is_absolute() {
        joined
    } else {
        env::current_dir()?.join(joined)
    };
    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
