//! Server-rendered HTML fragments for the activity feed.

pub mod reassign;

use tera::{Context, Tera};

pub use reassign::ReassignActivityView;

const REASSIGN_TEMPLATE: &str = "activity/reassign_issue.html";

/// Compiled templates, embedded in the binary at build time.
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            REASSIGN_TEMPLATE,
            include_str!("../../templates/activity/reassign_issue.html"),
        )?;
        Ok(Self { tera })
    }

    /// Render a reassignment feed entry. Text fields are HTML-escaped.
    pub fn render_reassign(&self, view: &ReassignActivityView) -> Result<String, tera::Error> {
        let context = Context::from_serialize(view)?;
        self.tera.render(REASSIGN_TEMPLATE, &context)
    }
}
