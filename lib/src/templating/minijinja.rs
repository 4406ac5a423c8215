use std::io::Write;

use derive_more::Debug;
use minijinja::{Environment, UndefinedBehavior};
use minijinja::value::Value;
use serde::Serialize;

use crate::context::PageContext;
use crate::error::{Result, Chainable};
use crate::templating::{Engine, EngineInit, RenderError, Templates};

/// A [`minijinja`] environment holding every template, parsed up front.
///
/// Undefined values are errors: a template that names a field the context
/// doesn't have fails to render instead of printing nothing. Templates whose
/// names end in `.html` are HTML-escaped.
#[derive(Debug)]
pub struct MiniJinjaEngine {
    #[debug(skip)]
    env: Environment<'static>,
    names: Vec<String>,
}

impl EngineInit for MiniJinjaEngine {
    type Engine = Self;

    fn init<G: Serialize>(templates: &Templates, globals: G) -> Result<Self::Engine> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_global("site", Value::from_serialize(&globals));
        env.add_function("year", ext::year);
        env.add_filter("slug", ext::slug);

        let mut names = vec![];
        for (name, source) in templates.load()? {
            env.add_template_owned(name.clone(), source).chain_with(|| error! {
                "failed to parse template",
                "template" => &name,
            })?;

            log::debug!("loaded template {name}");
            names.push(name);
        }

        Ok(MiniJinjaEngine { env, names })
    }
}

impl Engine for MiniJinjaEngine {
    fn render(
        &self,
        name: &str,
        context: &PageContext,
        output: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let template = self.env.get_template(name)
            .map_err(|e| RenderError::new(name, e))?;

        template.render_captured_to(context, output)
            .map_err(|e| RenderError::new(name, e))?;

        Ok(())
    }

    fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn names(&self) -> Vec<&str> {
        self.names.iter().map(|n| n.as_str()).collect()
    }
}

mod ext {
    use chrono::Datelike;

    pub fn slug(value: &str) -> String {
        crate::util::slugify(value)
    }

    pub fn year() -> i32 {
        chrono::Local::now().year()
    }
}

crate::error::impl_error_detail_with_std_error!(minijinja::Error);
