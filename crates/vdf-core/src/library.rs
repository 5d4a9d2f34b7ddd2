//! Steam library discovery.
//!
//! A Steam installation keeps its default library in `<root>/steamapps` and
//! lists any additional ones in `<root>/steamapps/libraryfolders.vdf`. Each
//! library holds one `appmanifest_<appid>.acf` text document per installed
//! app. Two `libraryfolders.vdf` layouts exist:
//!
//! ```text
//! "LibraryFolders"            "libraryfolders"
//! {                           {
//!     "1"  "D:\\Games"            "0"
//! }                               {
//!                                     "path"  "C:\\Steam"
//!                                 }
//!                             }
//! ```
//!
//! Both are accepted. Unreadable or malformed manifests are skipped.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::load_text;

/// App id of "Steamworks Common Redistributables", which is not a game.
pub const REDISTRIBUTABLES_APP_ID: &str = "228980";

/// An app found in a library folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledApp {
    pub app_id: String,
    pub name: String,
    /// `installdir` from the manifest, relative to `<library>/common`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<String>,
    /// The `steamapps` folder the manifest was found in.
    pub library: PathBuf,
}

/// Every library `steamapps` folder known to the installation at `steam_root`,
/// starting with the default one. Duplicates are removed, order is kept.
pub fn library_folders(steam_root: &Path) -> Vec<PathBuf> {
    let default = steam_root.join("steamapps");
    let mut folders = vec![default.clone()];

    let manifest = default.join("libraryfolders.vdf");
    let Some(doc) = load_text(&manifest) else {
        tracing::debug!(path = %manifest.display(), "no readable libraryfolders.vdf");
        return folders;
    };
    if !doc.name().eq_ignore_ascii_case("LibraryFolders") {
        tracing::debug!(name = doc.name(), "unexpected libraryfolders.vdf root");
        return folders;
    }

    for child in doc.children() {
        if child.name().parse::<u32>().is_err() {
            continue;
        }
        let path = child.value().or_else(|| child.get("path").as_str());
        if let Some(path) = path.filter(|p| !p.is_empty()) {
            let folder = PathBuf::from(path).join("steamapps");
            if !folders.contains(&folder) {
                folders.push(folder);
            }
        }
    }
    folders
}

/// Apps installed in one `steamapps` folder, in directory order.
pub fn installed_apps(library: &Path) -> Result<Vec<InstalledApp>> {
    let mut apps = Vec::new();
    for entry in fs::read_dir(library)? {
        let path = entry?.path();
        if !is_app_manifest(&path) {
            continue;
        }
        match read_manifest(&path, library) {
            Some(app) if app.app_id != REDISTRIBUTABLES_APP_ID => apps.push(app),
            Some(_) => {}
            None => tracing::debug!(path = %path.display(), "skipping app manifest"),
        }
    }
    Ok(apps)
}

/// All apps across every library of the installation, deduplicated by app id
/// and sorted by name. Library folders that cannot be listed are skipped.
pub fn scan(steam_root: &Path) -> Vec<InstalledApp> {
    let mut seen = HashSet::new();
    let mut apps = Vec::new();

    for folder in library_folders(steam_root) {
        tracing::trace!(folder = %folder.display(), "scanning library");
        match installed_apps(&folder) {
            Ok(found) => {
                for app in found {
                    if seen.insert(app.app_id.clone()) {
                        apps.push(app);
                    }
                }
            }
            Err(e) => tracing::debug!(folder = %folder.display(), error = %e, "skipping library"),
        }
    }

    apps.sort_by(|a, b| a.name.cmp(&b.name));
    apps
}

fn is_app_manifest(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("appmanifest_") && n.ends_with(".acf"))
}

fn read_manifest(path: &Path, library: &Path) -> Option<InstalledApp> {
    let doc = load_text(path)?;
    if doc.name() != "AppState" {
        return None;
    }
    let app_id = doc.get("appid").as_str().filter(|s| !s.is_empty())?;
    let name = doc.get("name").as_str().filter(|s| !s.is_empty())?;
    Some(InstalledApp {
        app_id: app_id.to_string(),
        name: name.to_string(),
        install_dir: doc.get("installdir").as_str().map(str::to_string),
        library: library.to_path_buf(),
    })
}
