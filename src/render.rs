//! HTML rendering over Tera
//!
//! Text fields are HTML-escaped when a form is accepted, so templates print
//! stored text with `| safe` and let Tera escape everything else.

use std::sync::Arc;

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::AppResult;

#[derive(Clone)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    /// Load every template matching `glob`
    pub fn load(glob: &str) -> AppResult<Self> {
        let tera = Tera::new(glob)?;
        tracing::debug!(
            "Loaded templates: {:?}",
            tera.get_template_names().collect::<Vec<_>>()
        );
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render `name` with `data` as the template context
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> AppResult<Html<String>> {
        let context = Context::from_serialize(data)?;
        Ok(Html(self.tera.render(name, &context)?))
    }
}
