//! Shared-resource scan: domain projects and environment configuration.

use crate::core::{ResourceFile, SharedResources};
use crate::io::walker::find_files_by_extension;
use std::path::Path;

const CONFIG_EXTENSIONS: &[&str] = &["properties", "yaml", "yml", "json"];

pub fn analyze_shared_resources(project_name: &str, project_root: &Path) -> SharedResources {
    let mut shared = SharedResources {
        domain_project: project_name.to_lowercase().contains("domain"),
        common_configurations: Vec::new(),
    };

    let resources = project_root.join("src").join("main").join("resources");
    for file in find_files_by_extension(&resources, CONFIG_EXTENSIONS) {
        // Exchange catalog files describe metadata, not environment config.
        if file.to_string_lossy().to_lowercase().contains("catalog") {
            continue;
        }
        let kind = file
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        shared.common_configurations.push(ResourceFile {
            filename: file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            kind,
            path: file.strip_prefix(project_root).unwrap_or(&file).to_path_buf(),
        });
    }

    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn collects_configuration_files_excluding_catalogs() {
        let temp = TempDir::new().unwrap();
        let resources = temp.path().join("src/main/resources");
        fs::create_dir_all(resources.join("catalog")).unwrap();
        fs::write(resources.join("dev.properties"), "env=dev\n").unwrap();
        fs::write(resources.join("app.yaml"), "name: app\n").unwrap();
        fs::write(resources.join("catalog/exchange.json"), "{}").unwrap();

        let shared = analyze_shared_resources("orders-api", temp.path());
        assert!(!shared.domain_project);
        assert_eq!(shared.common_configurations.len(), 2);

        let yaml = shared
            .common_configurations
            .iter()
            .find(|f| f.filename == "app.yaml")
            .unwrap();
        assert_eq!(yaml.kind, ".yaml");
        assert_eq!(yaml.path, Path::new("src/main/resources/app.yaml"));
    }

    #[test]
    fn domain_marker_is_name_based_and_case_insensitive() {
        let temp = TempDir::new().unwrap();
        assert!(analyze_shared_resources("acme-Domain-shared", temp.path()).domain_project);
        assert!(!analyze_shared_resources("orders-api", temp.path()).domain_project);
    }
}
