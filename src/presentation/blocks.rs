//! Block renderer dispatch.
//!
//! Pure mapping from `(decoded block, index)` to markup: one askama
//! template per kind, dispatch by exhaustive match on the content variant.
//! Callers hand in blocks already ordered by the data layer; nothing is
//! re-sorted here. A block whose template fails renders as nothing; the
//! failure is counted and logged, siblings are unaffected.

use askama::Template;
use metrics::counter;
use tracing::warn;

use crate::application::blocks::{CaseBlock, LandingBlock};
use crate::domain::blocks::{
    BenefitsContent, CaseBlockContent, CtaContent, FaqContent, FeaturesContent, FormContent,
    HeroContent, LandingBlockContent, PricingContent, TestimonialsContent, TextColumnsContent,
    TextContent,
};

const SOURCE: &str = "presentation::blocks";

#[derive(Template)]
#[template(path = "blocks/hero.html")]
struct HeroBlockTemplate<'a> {
    index: usize,
    hero: &'a HeroContent,
}

#[derive(Template)]
#[template(path = "blocks/features.html")]
struct FeaturesBlockTemplate<'a> {
    index: usize,
    content: &'a FeaturesContent,
}

#[derive(Template)]
#[template(path = "blocks/cta.html")]
struct CtaBlockTemplate<'a> {
    index: usize,
    content: &'a CtaContent,
}

#[derive(Template)]
#[template(path = "blocks/form.html")]
struct FormBlockTemplate<'a> {
    index: usize,
    content: &'a FormContent,
}

#[derive(Template)]
#[template(path = "blocks/testimonials.html")]
struct TestimonialsBlockTemplate<'a> {
    index: usize,
    content: &'a TestimonialsContent,
}

#[derive(Template)]
#[template(path = "blocks/pricing.html")]
struct PricingBlockTemplate<'a> {
    index: usize,
    content: &'a PricingContent,
}

#[derive(Template)]
#[template(path = "blocks/faq.html")]
struct FaqBlockTemplate<'a> {
    index: usize,
    content: &'a FaqContent,
}

#[derive(Template)]
#[template(path = "blocks/text.html")]
struct TextBlockTemplate<'a> {
    index: usize,
    content: &'a TextContent,
}

#[derive(Template)]
#[template(path = "blocks/text_columns.html")]
struct TextColumnsBlockTemplate<'a> {
    index: usize,
    content: &'a TextColumnsContent,
}

#[derive(Template)]
#[template(path = "blocks/benefits.html")]
struct BenefitsBlockTemplate<'a> {
    index: usize,
    content: &'a BenefitsContent,
}

/// Render one decoded landing content payload at `index`.
pub fn render_landing_content(content: &LandingBlockContent, index: usize) -> Option<String> {
    let rendered = match content {
        LandingBlockContent::Hero(hero) => HeroBlockTemplate { index, hero }.render(),
        LandingBlockContent::Features(content) => {
            FeaturesBlockTemplate { index, content }.render()
        }
        LandingBlockContent::Cta(content) => CtaBlockTemplate { index, content }.render(),
        LandingBlockContent::Form(content) => FormBlockTemplate { index, content }.render(),
        LandingBlockContent::Testimonials(content) => {
            TestimonialsBlockTemplate { index, content }.render()
        }
        LandingBlockContent::Pricing(content) => PricingBlockTemplate { index, content }.render(),
        LandingBlockContent::Faq(content) => FaqBlockTemplate { index, content }.render(),
        LandingBlockContent::Text(content) => TextBlockTemplate { index, content }.render(),
    };
    emit(content.kind().as_str(), index, rendered)
}

/// Render one decoded case content payload at `index`.
pub fn render_case_content(content: &CaseBlockContent, index: usize) -> Option<String> {
    let rendered = match content {
        CaseBlockContent::Hero(hero) => HeroBlockTemplate { index, hero }.render(),
        CaseBlockContent::TextColumns(content) => {
            TextColumnsBlockTemplate { index, content }.render()
        }
        CaseBlockContent::Benefits(content) => BenefitsBlockTemplate { index, content }.render(),
    };
    emit(content.kind().as_str(), index, rendered)
}

/// Dispatch over an already-ordered landing sequence.
pub fn render_landing_sequence(blocks: &[LandingBlock]) -> Vec<String> {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| render_landing_content(&block.content, index))
        .collect()
}

/// Dispatch over an already-ordered case sequence.
pub fn render_case_sequence(blocks: &[CaseBlock]) -> Vec<String> {
    blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| render_case_content(&block.content, index))
        .collect()
}

fn emit(kind: &str, index: usize, rendered: Result<String, askama::Error>) -> Option<String> {
    match rendered {
        Ok(html) => Some(html),
        Err(err) => {
            counter!("vetrina_blocks_render_failed_total").increment(1);
            warn!(
                target = SOURCE,
                kind,
                index,
                error = %err,
                "Block template failed; rendering nothing for this block"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::blocks::{decode_case_content, decode_landing_content};

    use super::*;

    #[test]
    fn hero_renders_escaped_structured_fields() {
        let content = decode_landing_content(
            "hero",
            &json!({"titulo": "Fast <em>launch</em>", "subtitulo": "now"}),
        )
        .expect("hero decodes");

        let html = render_landing_content(&content, 0).expect("hero renders");
        // structured fields are escaped, never interpreted as markup
        assert!(!html.contains("<em>"));
        assert!(html.contains("Fast"));
        assert!(html.contains("data-block-index=\"0\""));
    }

    #[test]
    fn benefits_render_icon_classes_not_icon_markup() {
        let content = decode_case_content(
            "benefits",
            &json!({"benefits": [{"icon": "Zap", "titulo": "B", "descricao": "C"}]}),
        )
        .expect("benefits decode");

        let html = render_case_content(&content, 2).expect("benefits render");
        assert!(html.contains("icon-zap"));
        assert!(html.contains("data-block-index=\"2\""));
    }

    #[test]
    fn sequence_preserves_input_order() {
        let hero = decode_case_content("hero", &json!({"titulo": "A"})).expect("hero");
        let benefits = decode_case_content(
            "benefits",
            &json!({"benefits": [{"icon": "Zap", "titulo": "B", "descricao": "C"}]}),
        )
        .expect("benefits");

        let blocks: Vec<CaseBlock> = [hero, benefits]
            .into_iter()
            .enumerate()
            .map(|(position, content)| CaseBlock {
                record: crate::domain::entities::BlockRecord {
                    id: uuid::Uuid::from_u128(position as u128 + 1),
                    owner_id: uuid::Uuid::nil(),
                    kind: content.kind().as_str().to_string(),
                    position: position as i32,
                    content: content.to_value().expect("serialize"),
                    created_at: time::OffsetDateTime::UNIX_EPOCH,
                    updated_at: time::OffsetDateTime::UNIX_EPOCH,
                },
                content,
            })
            .collect();

        let outputs = render_case_sequence(&blocks);
        assert_eq!(outputs.len(), 2);
        assert!(outputs[0].contains("block-hero"));
        assert!(outputs[1].contains("block-benefits"));

        // re-rendering the same state yields the same sequence
        assert_eq!(outputs, render_case_sequence(&blocks));
    }
}
