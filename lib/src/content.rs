//! The fixed display data: principles and projects.
//!
//! Content is built once at startup, either from the built-in table or from a
//! TOML fixture, and never changes afterwards. Handlers share it behind an
//! `Arc` and only ever read from it.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, Chainable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipleRecord {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    principles: Vec<PrincipleRecord>,
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

static BUILTIN: Lazy<Content> = Lazy::new(|| {
    fn principle(title: &str, description: &str, icon: &str) -> PrincipleRecord {
        PrincipleRecord { title: title.into(), description: description.into(), icon: icon.into() }
    }

    fn project(title: &str, description: &str, tags: &[&str]) -> ProjectRecord {
        ProjectRecord {
            title: title.into(),
            description: description.into(),
            image: "/static/placeholder.svg".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    const STACK: &[&str] = &["Next.js", "Web3", "Tailwind CSS", "Typescript", "Stripe"];

    Content {
        principles: vec![
            principle(
                "Clean Code",
                "Writing maintainable, scalable code with modern best practices and attention to detail.",
                "/static/icons/code.svg",
            ),
            principle(
                "Thoughtful Design",
                "Creating intuitive interfaces that balance aesthetics with usability and accessibility.",
                "/static/icons/palette.svg",
            ),
            principle(
                "Performance",
                "Optimizing every interaction for speed, efficiency, and delightful user experiences.",
                "/static/icons/zap.svg",
            ),
        ],
        projects: vec![
            project(
                "AI Job Matching Platform",
                "Full-stack AI Job Matching platform using TF-IDF alongside Cosine similarity to compare CV's and jobs.",
                STACK,
            ),
            project(
                "DSG Home Finance",
                "Production Full-stack web application for my father’s business DSG Home Finance.",
                STACK,
            ),
            project(
                "Therapeutic LLM",
                "Dissertation project providing rich context to reasoning LLM's for improved therapeutic output.",
                STACK,
            ),
        ],
    }
});

impl Content {
    /// The content compiled into the binary.
    pub fn builtin() -> Content {
        BUILTIN.clone()
    }

    /// Parses content from TOML with `[[principles]]` and `[[projects]]`
    /// tables. Every record must have a non-empty title.
    pub fn parse(source: &str) -> Result<Content> {
        let content: Content = toml::from_str(source)
            .chain_with(|| error!("invalid content definition"))?;

        let titles = content.principles.iter().map(|p| ("principle", &p.title))
            .chain(content.projects.iter().map(|p| ("project", &p.title)));

        for (i, (kind, title)) in titles.enumerate() {
            if title.trim().is_empty() {
                return err!("content record is missing a title",
                    "record kind" => kind,
                    "record position" => i);
            }
        }

        Ok(content)
    }

    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Content> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).chain_with(|| error! {
            "failed to read content file",
            "path" => path.display(),
        })?;

        Content::parse(&source).chain_with(|| error! {
            "failed to load content",
            "path" => path.display(),
        })
    }

    pub fn principles(&self) -> &[PrincipleRecord] {
        &self.principles
    }

    /// The projects in configured order. Without `with_tags`, every record's
    /// tag list is empty.
    pub fn projects(&self, with_tags: bool) -> Vec<ProjectRecord> {
        self.projects.iter()
            .map(|project| match with_tags {
                true => project.clone(),
                false => ProjectRecord { tags: vec![], ..project.clone() },
            })
            .collect()
    }
}
