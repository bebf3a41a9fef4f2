use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::error::{ErrorReport, HttpError};
use crate::domain::types::PageLayout;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: SiteChrome) -> Response {
    let content = ErrorPageView::not_found();
    let mut response =
        render_template_response(ErrorTemplate { chrome, content }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// Shared header/footer values, sourced from static configuration.
#[derive(Clone)]
pub struct SiteChrome {
    pub brand_title: String,
    pub footer_copy: String,
}

pub struct LandingPageView {
    pub title: String,
    pub meta_description: Option<String>,
    pub blocks_html: Vec<String>,
}

pub struct CasePageView {
    pub title: String,
    pub client: Option<String>,
    pub excerpt: Option<String>,
    pub blocks_html: Vec<String>,
}

/// A composed custom page. Every raw channel arrives here already resolved
/// by the trust gate: `head_html` sanitized, `style_html` scoped verbatim
/// CSS, `script_html` the guarded script element, `body_html` either the
/// structured block sequence or the sanitized raw fallback, never both.
pub struct CustomPageView {
    pub title: String,
    pub head_html: String,
    pub style_html: String,
    pub script_html: String,
    pub body_html: String,
    pub header_visible: bool,
    pub footer_visible: bool,
    pub layout: PageLayout,
}

pub struct ErrorPageView {
    pub heading: String,
    pub message: String,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            heading: "Page not found".to_string(),
            message: "The page you are looking for does not exist or is not published."
                .to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub chrome: SiteChrome,
    pub page: LandingPageView,
}

#[derive(Template)]
#[template(path = "case.html")]
pub struct CaseTemplate {
    pub chrome: SiteChrome,
    pub page: CasePageView,
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub chrome: SiteChrome,
    pub page: CustomPageView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub chrome: SiteChrome,
    pub content: ErrorPageView,
}
