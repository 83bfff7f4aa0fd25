//! Template engine based on MiniJinja

use connpack_core::Metadata;
use minijinja::Environment;
use std::path::Path;

use crate::error::{EngineError, Result, TemplateError};
use crate::filters;
use crate::plan::ProcessingPlan;

/// Template engine builder
pub struct EngineBuilder {
    strict_mode: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self { strict_mode: false }
    }

    /// Set strict mode (fail on undefined variables)
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// Build the engine
    pub fn build(self) -> Engine {
        Engine::new(self.strict_mode)
    }
}

/// The template engine
///
/// Undefined variables render as empty strings unless strict mode is on,
/// and a single trailing newline is dropped from rendered output, as Jinja2 does.
pub struct Engine {
    strict_mode: bool,
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

impl Engine {
    pub fn new(strict_mode: bool) -> Self {
        Self { strict_mode }
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Create a configured MiniJinja environment
    fn create_environment(&self) -> Environment<'static> {
        let mut env = Environment::new();

        if self.strict_mode {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        } else {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Lenient);
        }
        env.set_keep_trailing_newline(false);

        env.add_filter("toyaml", filters::toyaml);
        env.add_filter("tojson", filters::tojson);
        env.add_filter("b64encode", filters::b64encode);
        env.add_filter("b64decode", filters::b64decode);
        env.add_filter("quote", filters::quote);
        env.add_filter("squote", filters::squote);
        env.add_filter("nindent", filters::nindent);
        env.add_filter("required", filters::required);

        env
    }

    /// Render a single template string against the metadata
    pub fn render_string(
        &self,
        template: &str,
        metadata: &Metadata,
        template_name: &str,
    ) -> Result<String> {
        let mut env = self.create_environment();

        env.add_template_owned(template_name.to_string(), template.to_string())
            .map_err(|e| TemplateError::from_minijinja(e, template_name, template))?;

        let tmpl = env
            .get_template(template_name)
            .map_err(|e| TemplateError::from_minijinja(e, template_name, template))?;

        let ctx = minijinja::context! {
            namespace => &metadata.namespace,
            connections => &metadata.connections,
        };

        let rendered = tmpl
            .render(ctx)
            .map_err(|e| TemplateError::from_minijinja(e, template_name, template))?;

        Ok(rendered)
    }

    /// Render every entry of the plan in order, writing each output as it goes
    ///
    /// Returns the base names of the files written. Stops at the first failure;
    /// outputs written before it are left in place.
    pub fn render_plan(&self, plan: &ProcessingPlan, metadata: &Metadata) -> Result<Vec<String>> {
        let mut generated = Vec::with_capacity(plan.len());

        for entry in plan {
            let template = read_template(&entry.template)?;
            let rendered = self.render_string(&template, metadata, &entry.template_name())?;

            std::fs::write(&entry.output, rendered).map_err(|source| EngineError::Write {
                path: entry.output.clone(),
                source,
            })?;

            tracing::debug!(
                "Rendered {} to {}",
                entry.template.display(),
                entry.output.display()
            );
            generated.push(entry.output_name());
        }

        Ok(generated)
    }
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            tracing::error!("File not found: {}", path.display());
            EngineError::TemplateNotFound {
                path: path.to_path_buf(),
            }
        } else {
            tracing::error!("Cannot read template: {}", path.display());
            EngineError::TemplateRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
