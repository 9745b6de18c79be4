use tera::Tera;
use tracing::info;

const TEMPLATES_GLOB: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*");

#[derive(Debug)]
pub struct TemplateManager {
    tera: Tera,
}

impl TemplateManager {
    pub fn init() -> Result<Self, tera::Error> {
        info!("{:<20} - Initializing the Template manager", "templ manager");
        let tera = Tera::new(TEMPLATES_GLOB)?;

        Ok(Self { tera })
    }

    /// Renders a template file from the 'html/' directory to a String without `Context`.
    pub fn render_html_to_string(&self, template_file: &str) -> Result<String, tera::Error> {
        let template = format!("html/{template_file}");
        self.tera.render(&template, &tera::Context::new())
    }
}
