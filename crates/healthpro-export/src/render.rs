use serde::Serialize;
use tera::{Context, Tera};

use crate::document::RenderableDocument;
use crate::error::ExportError;
use crate::styles::PageOptions;

/// The built-in report layout. The name's `.html` suffix turns on
/// autoescaping for every interpolated value.
pub const REPORT_TEMPLATE_NAME: &str = "report.html";
pub const REPORT_TEMPLATE: &str = include_str!("../templates/report.html.tera");

/// Render a Tera template against any serializable context.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The serialized `context` fields become the template variables.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    context: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context = Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

#[derive(Serialize)]
struct ReportContext<'a> {
    doc: &'a RenderableDocument,
    page_rule: String,
    print_background: bool,
}

/// Render a document to standalone HTML with the built-in layout.
pub fn render_report_html(document: &RenderableDocument, page: &PageOptions) -> Result<String, ExportError> {
    render_template(
        REPORT_TEMPLATE_NAME,
        REPORT_TEMPLATE,
        &ReportContext {
            doc: document,
            page_rule: page.css_page_rule(),
            print_background: page.print_background,
        },
    )
}
