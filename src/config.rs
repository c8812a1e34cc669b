use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::render::RenderOptions;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub site: SiteConfig,
    pub render: RenderConfig,
}

/// Project layout, relative to the project root.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub static_dir: PathBuf,
    pub content_dir: PathBuf,
    pub template: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            content_dir: PathBuf::from("content"),
            template: PathBuf::from("template.html"),
            output_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    pub heading_levels: bool,
    pub strict_delimiters: bool,
    pub continuation_lines: bool,
}

impl PathsConfig {
    /// Resolve every path against `root`. Absolute paths are kept as-is.
    pub fn resolve(&self, root: &Path) -> PathsConfig {
        PathsConfig {
            static_dir: root.join(&self.static_dir),
            content_dir: root.join(&self.content_dir),
            template: root.join(&self.template),
            output_dir: root.join(&self.output_dir),
        }
    }
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions {
            heading_levels: config.heading_levels,
            strict_delimiters: config.strict_delimiters,
            continuation_lines: config.continuation_lines,
        }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::compiled_default()
            }),
            Err(_) => Self::compiled_default(),
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Defaults bundled with the binary (validated by the build script).
    pub fn compiled_default() -> Self {
        Self::parse(DEFAULT_CONFIG).unwrap_or_default()
    }

    pub fn render_options(&self) -> RenderOptions {
        self.render.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_default_matches_default_impl() {
        assert_eq!(Config::parse(DEFAULT_CONFIG).unwrap(), Config::default());
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml = "[site]\nbase_path = \"/blog/\"\n\n[render]\nheading_levels = true\n";
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.site.base_path, "/blog/");
        assert!(config.render.heading_levels);
        assert!(!config.render.strict_delimiters);
        assert!(!config.render.continuation_lines);
        assert_eq!(config.paths, PathsConfig::default());
    }

    #[test]
    fn render_options_follow_config() {
        let toml = "[render]\nstrict_delimiters = true\ncontinuation_lines = true\n";
        let config = Config::parse(toml).unwrap();
        assert_eq!(
            config.render_options(),
            RenderOptions {
                heading_levels: false,
                strict_delimiters: true,
                continuation_lines: true,
            }
        );
    }

    #[test]
    fn resolve_against_root() {
        let paths = PathsConfig::default().resolve(Path::new("/srv/site"));
        assert_eq!(paths.content_dir, PathBuf::from("/srv/site/content"));
        assert_eq!(paths.template, PathBuf::from("/srv/site/template.html"));
    }

    #[test]
    fn missing_or_invalid_file_falls_back_to_defaults() {
        assert_eq!(Config::load(Path::new("/nonexistent/sitegen.toml")), Config::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitegen.toml");
        std::fs::write(&path, "[site\nbroken").unwrap();
        assert_eq!(Config::load(&path), Config::default());
    }
}
