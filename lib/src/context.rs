use serde::Serialize;

use crate::content::{PrincipleRecord, ProjectRecord};

/// The data a page template renders against.
///
/// A context is built for a single request and dropped once the response is
/// written. Sequences a page doesn't use stay empty, so templates always see
/// them as defined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageContext {
    pub title: String,
    pub principles: Vec<PrincipleRecord>,
    pub projects: Vec<ProjectRecord>,
}

impl PageContext {
    pub fn new<T: Into<String>>(title: T) -> Self {
        PageContext { title: title.into(), ..Default::default() }
    }

    pub fn with_principles<P: Into<Vec<PrincipleRecord>>>(mut self, principles: P) -> Self {
        self.principles = principles.into();
        self
    }

    pub fn with_projects<P: Into<Vec<ProjectRecord>>>(mut self, projects: P) -> Self {
        self.projects = projects.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;

    #[test]
    fn builder_fills_sequences() {
        let content = Content::builtin();
        let context = PageContext::new("Home")
            .with_principles(content.principles())
            .with_projects(content.projects(false));

        assert_eq!(context.title, "Home");
        assert_eq!(context.principles.len(), 3);
        assert_eq!(context.projects.len(), 3);
    }

    #[test]
    fn absent_sequences_are_empty() {
        let context = PageContext::new("Projects");
        assert!(context.principles.is_empty());
        assert!(context.projects.is_empty());
    }
}
