//! Page composition root.
//!
//! Assembles final pages: landing pages and cases render their stored
//! block sequence; custom pages choose between the structured path
//! (embedded blocks) and the raw-HTML fallback, then thread the raw
//! CSS/JS channels through the trust gate. A missing or unpublished page
//! composes to `None` and is presented as not-found by the HTTP layer.

use std::sync::Arc;

use metrics::counter;
use tracing::warn;

use crate::application::blocks::BlockService;
use crate::application::error::HttpError;
use crate::application::repos::{CasesRepo, CustomPagesRepo, LandingPagesRepo, RepoError};
use crate::application::trust::TrustGate;
use crate::domain::blocks::{EmbeddedBlock, decode_landing_content};
use crate::domain::entities::CustomPageRecord;
use crate::presentation::blocks::{
    render_case_sequence, render_landing_content, render_landing_sequence,
};
use crate::presentation::views::{CasePageView, CustomPageView, LandingPageView};

const SOURCE: &str = "application::pages::CompositionService";

#[derive(Clone)]
pub struct CompositionService {
    landing_pages: Arc<dyn LandingPagesRepo>,
    cases: Arc<dyn CasesRepo>,
    custom_pages: Arc<dyn CustomPagesRepo>,
    blocks: BlockService,
    trust: Arc<TrustGate>,
}

impl CompositionService {
    pub fn new(
        landing_pages: Arc<dyn LandingPagesRepo>,
        cases: Arc<dyn CasesRepo>,
        custom_pages: Arc<dyn CustomPagesRepo>,
        blocks: BlockService,
        trust: Arc<TrustGate>,
    ) -> Self {
        Self {
            landing_pages,
            cases,
            custom_pages,
            blocks,
            trust,
        }
    }

    pub async fn landing_page(&self, slug: &str) -> Result<Option<LandingPageView>, HttpError> {
        let record = self
            .landing_pages
            .find_by_slug(slug)
            .await
            .map_err(|err| repo_failure("find_landing_page", err))?;

        let Some(record) = record else {
            return Ok(None);
        };
        if !record.published {
            return Ok(None);
        }

        let blocks = self
            .blocks
            .list_landing_blocks(record.id)
            .await
            .map_err(|err| repo_failure("list_landing_blocks", err))?;

        Ok(Some(LandingPageView {
            title: record.title,
            meta_description: record.meta_description,
            blocks_html: render_landing_sequence(&blocks),
        }))
    }

    pub async fn case_page(&self, slug: &str) -> Result<Option<CasePageView>, HttpError> {
        let record = self
            .cases
            .find_by_slug(slug)
            .await
            .map_err(|err| repo_failure("find_case", err))?;

        let Some(record) = record else {
            return Ok(None);
        };
        if !record.published {
            return Ok(None);
        }

        let blocks = self
            .blocks
            .list_case_blocks(record.id)
            .await
            .map_err(|err| repo_failure("list_case_blocks", err))?;

        Ok(Some(CasePageView {
            title: record.title,
            client: record.client,
            excerpt: record.excerpt,
            blocks_html: render_case_sequence(&blocks),
        }))
    }

    pub async fn custom_page(&self, slug: &str) -> Result<Option<CustomPageView>, HttpError> {
        let record = self
            .custom_pages
            .find_by_slug(slug)
            .await
            .map_err(|err| repo_failure("find_custom_page", err))?;

        let Some(record) = record else {
            return Ok(None);
        };
        if !record.published {
            return Ok(None);
        }

        Ok(Some(compose_custom_page(record, &self.trust)))
    }
}

/// Compose a custom page record into its final view.
///
/// The structured and raw paths are mutually exclusive per render: a
/// non-empty embedded block sequence wins and the raw HTML channel is
/// skipped entirely; only an empty/absent sequence activates the fallback.
pub fn compose_custom_page(record: CustomPageRecord, trust: &TrustGate) -> CustomPageView {
    let embedded = embedded_blocks(&record);

    let body_html = if embedded.is_empty() {
        trust.sanitize_html(&record.html_content)
    } else {
        let mut rendered = Vec::with_capacity(embedded.len());
        for (index, block) in embedded.iter().enumerate() {
            match decode_landing_content(&block.kind, &block.content) {
                Ok(content) => {
                    if let Some(html) = render_landing_content(&content, index) {
                        rendered.push(html);
                    }
                }
                Err(err) => {
                    counter!("vetrina_blocks_skipped_total").increment(1);
                    warn!(
                        target = SOURCE,
                        page_id = %record.id,
                        slug = %record.slug,
                        index,
                        kind = %block.kind,
                        error = %err,
                        "Skipping undecodable embedded block"
                    );
                }
            }
        }
        rendered.join("\n")
    };

    let head_html = if record.custom_head.trim().is_empty() {
        String::new()
    } else {
        trust.sanitize_head(&record.custom_head)
    };
    let style_html = if record.css_content.trim().is_empty() {
        String::new()
    } else {
        trust.scoped_style(&record.css_content)
    };
    let script_html = if record.js_content.trim().is_empty() {
        String::new()
    } else {
        trust.script_element(&record.js_content)
    };

    CustomPageView {
        title: record.title,
        head_html,
        style_html,
        script_html,
        body_html,
        header_visible: record.header_visible,
        footer_visible: record.footer_visible,
        layout: record.layout,
    }
}

fn embedded_blocks(record: &CustomPageRecord) -> Vec<EmbeddedBlock> {
    if record.blocks_content.is_null() {
        return Vec::new();
    }
    match serde_json::from_value::<Vec<EmbeddedBlock>>(record.blocks_content.clone()) {
        Ok(blocks) => blocks,
        Err(err) => {
            warn!(
                target = SOURCE,
                page_id = %record.id,
                slug = %record.slug,
                error = %err,
                "blocks_content is not a block array; using the raw HTML fallback"
            );
            Vec::new()
        }
    }
}

fn repo_failure(operation: &'static str, err: RepoError) -> HttpError {
    warn!(
        target = SOURCE,
        operation,
        error = %err,
        retryable = err.is_retryable(),
        "Repository call failed during composition"
    );
    HttpError::from_repo(SOURCE, "Failed to load page content", &err)
}
