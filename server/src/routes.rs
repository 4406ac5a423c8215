use rouille::{router, Request, Response};

use folio::{PageContext, ProjectRecord};
use folio::util::sanitize_id;

use crate::assets;
use crate::config::Config;

pub const INDEX: &str = "index.html";
pub const PROJECTS: &str = "projects.html";
pub const PROJECT: &str = "project.html";

/// Templates the routes render; startup fails if one is missing.
pub const ROUTE_TEMPLATES: &[&str] = &[INDEX, PROJECTS, PROJECT];

#[derive(Debug)]
pub struct Site {
    config: Config,
}

impl Site {
    pub fn new(config: Config) -> Self {
        Site { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn handle(&self, request: &Request) -> Response {
        let settings = &self.config.settings;
        if let Some(response) = assets::serve(request, &settings.static_prefix, &settings.assets) {
            return response;
        }

        router!(request,
            (GET) (/) => { self.home() },
            (GET) (/projects) => { self.projects() },
            (GET) (/project) => {
                self.project(&request.get_param("id").unwrap_or_default())
            },
            _ => Response::empty_404()
        )
    }

    fn home(&self) -> Response {
        let content = &self.config.content;
        let context = PageContext::new(format!("Home | {}", self.config.settings.site))
            .with_principles(content.principles())
            .with_projects(content.projects(false));

        self.render(INDEX, &context)
    }

    fn projects(&self) -> Response {
        let context = PageContext::new(format!("Projects | {}", self.config.settings.site))
            .with_projects(self.config.content.projects(true));

        self.render(PROJECTS, &context)
    }

    fn project(&self, id: &str) -> Response {
        let id = sanitize_id(id);
        let project = ProjectRecord {
            title: format!("Project {id}"),
            description: format!("Details for project {id}."),
            image: format!("{}/placeholder.svg", self.config.settings.static_prefix),
            tags: vec![],
        };

        let context = PageContext::new(format!("Project {id}"))
            .with_projects(vec![project]);

        self.render(PROJECT, &context)
    }

    /// Renders into a buffer so that a failing template never sends a
    /// truncated page: the client gets either the whole page or a 500.
    fn render(&self, template: &str, context: &PageContext) -> Response {
        let mut body = Vec::new();
        match self.config.engine.render(template, context, &mut body) {
            Ok(()) => Response::from_data("text/html; charset=utf-8", body),
            Err(e) => {
                log::error!("template error in {}: {e}", e.template);
                Response::text(format!("Template error: {e}")).with_status_code(500)
            }
        }
    }
}
