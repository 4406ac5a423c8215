pub mod minijinja;

use std::fmt::{self, Debug};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::context::PageContext;
use crate::error::{Result, Chainable};

pub trait EngineInit {
    type Engine: Engine + 'static;

    /// Parses every template in `templates`. Fails on the first template that
    /// can't be read or parsed.
    fn init<G: Serialize>(templates: &Templates, globals: G) -> Result<Self::Engine>;
}

/// A write-once registry of named, compiled templates.
pub trait Engine: Send + Sync + Debug {
    /// Renders the template `name` against `context`, writing output to
    /// `output` as it is produced. On error, `output` may already hold a
    /// prefix of the page.
    fn render(
        &self,
        name: &str,
        context: &PageContext,
        output: &mut dyn Write,
    ) -> Result<(), RenderError>;

    fn contains(&self, name: &str) -> bool;

    fn names(&self) -> Vec<&str>;

    /// Checks that every template in `names` was loaded.
    fn require(&self, names: &[&str]) -> Result<()> {
        match names.iter().find(|name| !self.contains(name)) {
            Some(missing) => err! {
                "required template is missing",
                "template" => missing,
                "loaded templates" => self.names().join(", "),
            },
            None => Ok(()),
        }
    }
}

/// Executing a template against a context failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub template: String,
    pub message: String,
}

impl RenderError {
    pub fn new<N: Into<String>, M: fmt::Display>(template: N, message: M) -> Self {
        RenderError { template: template.into(), message: message.to_string() }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.message, f)
    }
}

impl std::error::Error for RenderError { }

crate::error::impl_error_detail_with_std_error!(RenderError);

/// Where template sources come from.
#[derive(Debug, Clone)]
pub enum Templates {
    /// Every non-hidden file below the directory, named by its path relative
    /// to the directory with `/` separators.
    Dir(PathBuf),
    /// Sources given directly as `(name, source)` pairs.
    Inline(Vec<(String, String)>),
}

impl Templates {
    pub fn dir<P: AsRef<Path>>(path: P) -> Self {
        Templates::Dir(path.as_ref().to_path_buf())
    }

    pub fn inline<I, N, S>(sources: I) -> Self
        where I: IntoIterator<Item = (N, S)>, N: Into<String>, S: Into<String>
    {
        Templates::Inline(sources.into_iter().map(|(n, s)| (n.into(), s.into())).collect())
    }

    /// Reads every template source, sorted by name.
    pub fn load(&self) -> Result<Vec<(String, String)>> {
        let root = match self {
            Templates::Inline(sources) => return Ok(sources.clone()),
            Templates::Dir(root) => root,
        };

        if !root.is_dir() {
            return err! {
                "template directory does not exist",
                "path" => root.display(),
            };
        }

        let mut sources = vec![];
        for entry in jwalk::WalkDir::new(root).sort(true) {
            let entry = entry.chain_with(|| error! {
                "failed to walk template directory",
                "path" => root.display(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let name = template_name(root, &path)?;
            let source = std::fs::read_to_string(&path).chain_with(|| error! {
                "failed to read template",
                "path" => path.display(),
            })?;

            sources.push((name, source));
        }

        sources.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(sources)
    }
}

fn template_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root)
        .map_err(|_| error!("template path escapes root", "path" => path.display()))?;

    let mut name = String::new();
    for component in relative.components() {
        let part = component.as_os_str().to_str()
            .ok_or_else(|| error!("template path is not UTF-8", "path" => path.display()))?;

        if !name.is_empty() {
            name.push('/');
        }

        name.push_str(part);
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_sources_are_kept() {
        let templates = Templates::inline([("a.html", "A"), ("b.html", "B")]);
        let sources = templates.load().unwrap();
        assert_eq!(sources, vec![
            ("a.html".to_string(), "A".to_string()),
            ("b.html".to_string(), "B".to_string()),
        ]);
    }

    #[test]
    fn missing_directory_fails() {
        let error = Templates::dir("/nonexistent/templates").load().unwrap_err();
        assert_eq!(error.message(), "template directory does not exist");
    }

    #[test]
    fn names_use_forward_slashes() {
        let root = Path::new("/srv/templates");
        let path = root.join("partials").join("card.html");
        assert_eq!(template_name(root, &path).unwrap(), "partials/card.html");
        assert!(template_name(root, Path::new("/elsewhere/x.html")).is_err());
    }

    #[test]
    fn render_error_displays_message() {
        let error = RenderError::new("index.html", "undefined value (in index.html:3)");
        assert_eq!(error.to_string(), "undefined value (in index.html:3)");
        assert_eq!(error.template, "index.html");
    }
}
