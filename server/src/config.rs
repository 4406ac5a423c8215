use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use folio::{error, err, Content};
use folio::error::{Result, Chainable};
use folio::templating::{Engine, EngineInit, Templates};

use crate::routes::ROUTE_TEMPLATES;

pub const CONFIG_FILE: &str = "folio.toml";

xflags::xflags! {
    /// Serve the portfolio site.
    cmd folio {
        /// Settings file to read instead of `folio.toml`.
        optional -c, --config path: PathBuf
        /// Address to listen on, e.g. `127.0.0.1:8080`.
        optional --addr addr: String
        /// Directory holding the page templates.
        optional --templates dir: PathBuf
        /// Directory served under the static prefix.
        optional --assets dir: PathBuf
        /// TOML file with principles and projects.
        optional --content path: PathBuf
        /// Log specification, e.g. `debug` or `info,folio=trace`.
        optional --log spec: String
    }
}

#[derive(Debug)]
pub struct Config {
    pub engine: Arc<dyn Engine>,
    pub content: Arc<Content>,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub addr: String,
    pub templates: PathBuf,
    pub assets: PathBuf,
    pub static_prefix: String,
    pub content: Option<PathBuf>,
    pub site: String,
    #[serde(flatten)]
    pub globals: FxHashMap<String, toml::Value>,
}

/// What templates see as `site`.
#[derive(Serialize)]
pub struct Globals<'a> {
    name: &'a str,
    static_prefix: &'a str,
    #[serde(flatten)]
    extra: &'a FxHashMap<String, toml::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            addr: "0.0.0.0:8080".into(),
            templates: "templates".into(),
            assets: "static".into(),
            static_prefix: "/static".into(),
            content: None,
            site: "Thomas Portfolio".into(),
            globals: FxHashMap::default(),
        }
    }
}

impl Settings {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).chain_with(|| error!("invalid settings"))
    }

    fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).chain_with(|| error! {
            "failed to read settings file",
            "path" => path.display(),
        })?;

        Settings::parse(&source).chain_with(|| error!("failed to load settings", "path" => path.display()))
    }

    /// Reads the settings file, if any, then applies `flags` on top.
    ///
    /// An explicit `--config` must exist; the default `folio.toml` is
    /// optional.
    pub fn discover(flags: &Folio) -> Result<Self> {
        let mut settings = match &flags.config {
            Some(path) => Settings::read(path)?,
            None if Path::new(CONFIG_FILE).is_file() => Settings::read(CONFIG_FILE)?,
            None => Settings::default(),
        };

        settings.apply(flags)?;
        Ok(settings)
    }

    pub fn apply(&mut self, flags: &Folio) -> Result<()> {
        if let Some(addr) = &flags.addr {
            self.addr = addr.clone();
        }

        if let Some(templates) = &flags.templates {
            self.templates = templates.clone();
        }

        if let Some(assets) = &flags.assets {
            self.assets = assets.clone();
        }

        if let Some(content) = &flags.content {
            self.content = Some(content.clone());
        }

        let prefix = self.static_prefix.trim_matches('/');
        if prefix.is_empty() {
            return err!("static prefix must not be empty", "prefix" => &self.static_prefix);
        }

        self.static_prefix = format!("/{prefix}");
        Ok(())
    }

    pub fn globals(&self) -> Globals<'_> {
        Globals {
            name: &self.site,
            static_prefix: &self.static_prefix,
            extra: &self.globals,
        }
    }
}

impl Config {
    /// Loads templates from the configured directory and content from the
    /// configured fixture or the built-in table.
    pub fn load<E: EngineInit>(settings: Settings) -> Result<Self> {
        let templates = Templates::dir(&settings.templates);
        Config::from_templates::<E>(settings, &templates)
    }

    pub fn from_templates<E: EngineInit>(settings: Settings, templates: &Templates) -> Result<Self> {
        let engine = E::init(templates, settings.globals())
            .chain_with(|| error!("failed to load templates"))?;

        engine.require(ROUTE_TEMPLATES)?;
        let content = match &settings.content {
            Some(path) => Content::from_toml(path)?,
            None => Content::builtin(),
        };

        Ok(Config {
            engine: Arc::new(engine),
            content: Arc::new(content),
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(args: &[&str]) -> Folio {
        Folio::from_vec(args.iter().map(std::ffi::OsString::from).collect()).unwrap()
    }

    #[test]
    fn defaults() {
        let mut settings = Settings::default();
        settings.apply(&flags(&[])).unwrap();
        assert_eq!(settings.addr, "0.0.0.0:8080");
        assert_eq!(settings.static_prefix, "/static");
        assert_eq!(settings.templates, Path::new("templates"));
        assert_eq!(settings.content, None);
    }

    #[test]
    fn file_values_and_extra_globals() {
        let settings = Settings::parse(r#"
            addr = "127.0.0.1:9000"
            static_prefix = "assets/"
            site = "Jo's Work"
            tagline = "Builder of things"
        "#).unwrap();

        assert_eq!(settings.addr, "127.0.0.1:9000");
        assert_eq!(settings.site, "Jo's Work");
        assert_eq!(settings.assets, Path::new("static"));
        assert_eq!(settings.globals["tagline"].as_str(), Some("Builder of things"));
    }

    #[test]
    fn flags_override_file() {
        let mut settings = Settings::parse(r#"
            addr = "127.0.0.1:9000"
            templates = "site/templates"
            static_prefix = "assets/"
        "#).unwrap();

        settings.apply(&flags(&["--addr", "127.0.0.1:7000", "--content", "content.toml"])).unwrap();
        assert_eq!(settings.addr, "127.0.0.1:7000");
        assert_eq!(settings.templates, Path::new("site/templates"));
        assert_eq!(settings.content.as_deref(), Some(Path::new("content.toml")));
        assert_eq!(settings.static_prefix, "/assets");
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let mut settings = Settings { static_prefix: "/".into(), ..Settings::default() };
        assert!(settings.apply(&flags(&[])).is_err());
    }

    #[test]
    fn bad_settings_are_errors() {
        assert!(Settings::parse("addr = 8080").is_err());

        let error = Settings::discover(&flags(&["--config", "/nonexistent/folio.toml"])).unwrap_err();
        assert_eq!(error.message(), "failed to read settings file");
    }
}
