//! On-disk layout of a local application directory

/// Directory holding hosting files and metadata
pub const HOSTING_DIR: &str = "hosting";

/// Default hosting files root, relative to the app root
pub const HOSTING_FILES_DIR: &str = "hosting/files";

/// Hosting attribute metadata, relative to the hosting directory
pub const HOSTING_METADATA_FILE: &str = "metadata.json";

/// Functions directory, relative to the app root
pub const FUNCTIONS_DIR: &str = "functions";

/// Installed dependencies, relative to the app root
pub const NODE_MODULES_DIR: &str = "functions/node_modules";

/// Dependency manifest, relative to the functions directory
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Dependency archive names in lookup order, relative to the functions directory
pub const DEPENDENCY_ARCHIVES: [&str; 4] = [
    "node_modules.zip",
    "node_modules.tar",
    "node_modules.tgz",
    "node_modules.tar.gz",
];

/// Files that mark a directory as an app root; at least one must exist
pub const APP_CONFIG_FILES: [&str; 2] = ["realm_config.json", "config.json"];

/// Tool and VCS directories that never belong to the app
pub const IGNORED_DIRS: [&str; 2] = [".git", ".appdiff"];

/// Whether the `/`-separated path `rel` is `dir` or lies beneath it
pub fn is_under(rel: &str, dir: &str) -> bool {
    rel == dir || rel.starts_with(&format!("{}/", dir))
}

/// Whether a `/`-separated path relative to the app root is excluded from
/// the configuration tree
pub fn is_excluded_from_config(rel: &str) -> bool {
    let under = |dir: &str| is_under(rel, dir);

    if under(HOSTING_FILES_DIR) || under(NODE_MODULES_DIR) {
        return true;
    }
    if IGNORED_DIRS.iter().any(|d| under(d)) {
        return true;
    }
    DEPENDENCY_ARCHIVES
        .iter()
        .any(|name| rel == format!("{}/{}", FUNCTIONS_DIR, name))
}
