//! Block schema registry: the closed set of block kinds and the typed
//! payload each kind carries.
//!
//! A stored block is a `(kind, JSON payload)` pair. This module is the
//! single source of truth for which kinds exist and what their payloads
//! look like: decoding turns the stored pair into one of the sum types
//! below, and every renderer dispatches on that sum type exhaustively.
//! Adding a kind means adding an enum variant, a payload struct and a
//! template; existing descriptors are never touched.
//!
//! Rust field names are English; the persisted JSON keeps the store's
//! original wire names (`titulo`, `descricao`, …) via serde renames so
//! existing rows stay readable.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingBlockKind {
    Hero,
    Features,
    Cta,
    Form,
    Testimonials,
    Pricing,
    Faq,
    Text,
}

impl LandingBlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LandingBlockKind::Hero => "hero",
            LandingBlockKind::Features => "features",
            LandingBlockKind::Cta => "cta",
            LandingBlockKind::Form => "form",
            LandingBlockKind::Testimonials => "testimonials",
            LandingBlockKind::Pricing => "pricing",
            LandingBlockKind::Faq => "faq",
            LandingBlockKind::Text => "text",
        }
    }
}

impl TryFrom<&str> for LandingBlockKind {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "hero" => Ok(LandingBlockKind::Hero),
            "features" => Ok(LandingBlockKind::Features),
            "cta" => Ok(LandingBlockKind::Cta),
            "form" => Ok(LandingBlockKind::Form),
            "testimonials" => Ok(LandingBlockKind::Testimonials),
            "pricing" => Ok(LandingBlockKind::Pricing),
            "faq" => Ok(LandingBlockKind::Faq),
            "text" => Ok(LandingBlockKind::Text),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseBlockKind {
    Hero,
    TextColumns,
    Benefits,
}

impl CaseBlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseBlockKind::Hero => "hero",
            CaseBlockKind::TextColumns => "text_columns",
            CaseBlockKind::Benefits => "benefits",
        }
    }
}

impl TryFrom<&str> for CaseBlockKind {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "hero" => Ok(CaseBlockKind::Hero),
            "text_columns" => Ok(CaseBlockKind::TextColumns),
            "benefits" => Ok(CaseBlockKind::Benefits),
            _ => Err(()),
        }
    }
}

/// Closed icon vocabulary for feature/benefit items. Structured payloads
/// carry an icon *name*, never markup; the renderer maps the name to a CSS
/// class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconName {
    Zap,
    Shield,
    Star,
    Heart,
    Check,
    CheckCircle,
    Users,
    Rocket,
    Target,
    TrendingUp,
    Award,
    Globe,
    Settings,
    Clock,
    BarChart,
    Lightbulb,
}

impl IconName {
    pub fn css_class(self) -> &'static str {
        match self {
            IconName::Zap => "icon-zap",
            IconName::Shield => "icon-shield",
            IconName::Star => "icon-star",
            IconName::Heart => "icon-heart",
            IconName::Check => "icon-check",
            IconName::CheckCircle => "icon-check-circle",
            IconName::Users => "icon-users",
            IconName::Rocket => "icon-rocket",
            IconName::Target => "icon-target",
            IconName::TrendingUp => "icon-trending-up",
            IconName::Award => "icon-award",
            IconName::Globe => "icon-globe",
            IconName::Settings => "icon-settings",
            IconName::Clock => "icon-clock",
            IconName::BarChart => "icon-bar-chart",
            IconName::Lightbulb => "icon-lightbulb",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "subtitulo", default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(
        rename = "imagem_principal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub main_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub icon: IconName,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturesContent {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "subtitulo", default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub features: Vec<FeatureItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtaContent {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "texto_botao")]
    pub button_label: String,
    #[serde(rename = "url_botao")]
    pub button_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFieldType {
    Text,
    Email,
    Phone,
    Textarea,
}

impl FormFieldType {
    pub fn is_textarea(self) -> bool {
        matches!(self, FormFieldType::Textarea)
    }

    /// `type` attribute used for single-line inputs.
    pub fn input_type(self) -> &'static str {
        match self {
            FormFieldType::Email => "email",
            FormFieldType::Phone => "tel",
            FormFieldType::Text | FormFieldType::Textarea => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "rotulo")]
    pub label: String,
    #[serde(rename = "tipo")]
    pub field_type: FormFieldType,
    #[serde(rename = "obrigatorio", default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormContent {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "campos")]
    pub fields: Vec<FormField>,
    #[serde(rename = "texto_envio", default, skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(rename = "nome")]
    pub author: String,
    #[serde(rename = "cargo", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "texto")]
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestimonialsContent {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "preco")]
    pub price: String,
    #[serde(rename = "periodo", default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(rename = "destaque", default)]
    pub highlighted: bool,
    #[serde(rename = "texto_botao", default, skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
    #[serde(rename = "url_botao", default, skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingContent {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub plans: Vec<PricingPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    #[serde(rename = "pergunta")]
    pub question: String,
    #[serde(rename = "resposta")]
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqContent {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "conteudo")]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextColumn {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(rename = "conteudo")]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextColumnsContent {
    #[serde(rename = "titulo", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "colunas")]
    pub columns: Vec<TextColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitItem {
    pub icon: IconName,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitsContent {
    pub benefits: Vec<BenefitItem>,
}

/// Typed content of a landing-page block, one variant per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum LandingBlockContent {
    Hero(HeroContent),
    Features(FeaturesContent),
    Cta(CtaContent),
    Form(FormContent),
    Testimonials(TestimonialsContent),
    Pricing(PricingContent),
    Faq(FaqContent),
    Text(TextContent),
}

impl LandingBlockContent {
    pub fn kind(&self) -> LandingBlockKind {
        match self {
            LandingBlockContent::Hero(_) => LandingBlockKind::Hero,
            LandingBlockContent::Features(_) => LandingBlockKind::Features,
            LandingBlockContent::Cta(_) => LandingBlockKind::Cta,
            LandingBlockContent::Form(_) => LandingBlockKind::Form,
            LandingBlockContent::Testimonials(_) => LandingBlockKind::Testimonials,
            LandingBlockContent::Pricing(_) => LandingBlockKind::Pricing,
            LandingBlockContent::Faq(_) => LandingBlockKind::Faq,
            LandingBlockContent::Text(_) => LandingBlockKind::Text,
        }
    }

    /// Serialize back to the persisted payload shape (wire field names).
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            LandingBlockContent::Hero(content) => serde_json::to_value(content),
            LandingBlockContent::Features(content) => serde_json::to_value(content),
            LandingBlockContent::Cta(content) => serde_json::to_value(content),
            LandingBlockContent::Form(content) => serde_json::to_value(content),
            LandingBlockContent::Testimonials(content) => serde_json::to_value(content),
            LandingBlockContent::Pricing(content) => serde_json::to_value(content),
            LandingBlockContent::Faq(content) => serde_json::to_value(content),
            LandingBlockContent::Text(content) => serde_json::to_value(content),
        }
    }
}

/// Typed content of a case-study block, one variant per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseBlockContent {
    Hero(HeroContent),
    TextColumns(TextColumnsContent),
    Benefits(BenefitsContent),
}

impl CaseBlockContent {
    pub fn kind(&self) -> CaseBlockKind {
        match self {
            CaseBlockContent::Hero(_) => CaseBlockKind::Hero,
            CaseBlockContent::TextColumns(_) => CaseBlockKind::TextColumns,
            CaseBlockContent::Benefits(_) => CaseBlockKind::Benefits,
        }
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            CaseBlockContent::Hero(content) => serde_json::to_value(content),
            CaseBlockContent::TextColumns(content) => serde_json::to_value(content),
            CaseBlockContent::Benefits(content) => serde_json::to_value(content),
        }
    }
}

/// One element of a custom page's embedded `blocks_content` array.
/// Embedded blocks reuse the landing-kind schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedBlock {
    pub kind: String,
    pub content: serde_json::Value,
}

#[derive(Debug, Error)]
pub enum BlockContentError {
    #[error("unsupported block kind `{kind}`")]
    UnsupportedKind { kind: String },
    #[error("payload for block kind `{kind}` is malformed: {message}")]
    Payload { kind: &'static str, message: String },
}

impl BlockContentError {
    fn payload(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Payload {
            kind,
            message: message.into(),
        }
    }
}

/// Decode a stored `(kind, payload)` pair into typed landing content.
///
/// Unknown kinds and malformed payloads are distinct errors: the first is
/// a registry miss, the second a contract violation of a known schema.
pub fn decode_landing_content(
    kind: &str,
    payload: &serde_json::Value,
) -> Result<LandingBlockContent, BlockContentError> {
    let kind = LandingBlockKind::try_from(kind).map_err(|()| BlockContentError::UnsupportedKind {
        kind: kind.to_string(),
    })?;
    decode_landing_payload(kind, payload)
}

pub fn decode_landing_payload(
    kind: LandingBlockKind,
    payload: &serde_json::Value,
) -> Result<LandingBlockContent, BlockContentError> {
    let content = match kind {
        LandingBlockKind::Hero => LandingBlockContent::Hero(typed(kind.as_str(), payload)?),
        LandingBlockKind::Features => LandingBlockContent::Features(typed(kind.as_str(), payload)?),
        LandingBlockKind::Cta => LandingBlockContent::Cta(typed(kind.as_str(), payload)?),
        LandingBlockKind::Form => LandingBlockContent::Form(typed(kind.as_str(), payload)?),
        LandingBlockKind::Testimonials => {
            LandingBlockContent::Testimonials(typed(kind.as_str(), payload)?)
        }
        LandingBlockKind::Pricing => LandingBlockContent::Pricing(typed(kind.as_str(), payload)?),
        LandingBlockKind::Faq => LandingBlockContent::Faq(typed(kind.as_str(), payload)?),
        LandingBlockKind::Text => LandingBlockContent::Text(typed(kind.as_str(), payload)?),
    };
    validate_landing(&content)?;
    Ok(content)
}

/// Decode a stored `(kind, payload)` pair into typed case content.
pub fn decode_case_content(
    kind: &str,
    payload: &serde_json::Value,
) -> Result<CaseBlockContent, BlockContentError> {
    let kind = CaseBlockKind::try_from(kind).map_err(|()| BlockContentError::UnsupportedKind {
        kind: kind.to_string(),
    })?;
    decode_case_payload(kind, payload)
}

pub fn decode_case_payload(
    kind: CaseBlockKind,
    payload: &serde_json::Value,
) -> Result<CaseBlockContent, BlockContentError> {
    let content = match kind {
        CaseBlockKind::Hero => CaseBlockContent::Hero(typed(kind.as_str(), payload)?),
        CaseBlockKind::TextColumns => CaseBlockContent::TextColumns(typed(kind.as_str(), payload)?),
        CaseBlockKind::Benefits => CaseBlockContent::Benefits(typed(kind.as_str(), payload)?),
    };
    validate_case(&content)?;
    Ok(content)
}

fn typed<T: DeserializeOwned>(
    kind: &'static str,
    payload: &serde_json::Value,
) -> Result<T, BlockContentError> {
    serde_json::from_value(payload.clone())
        .map_err(|err| BlockContentError::payload(kind, err.to_string()))
}

fn validate_landing(content: &LandingBlockContent) -> Result<(), BlockContentError> {
    let kind = content.kind().as_str();
    match content {
        LandingBlockContent::Hero(hero) => validate_hero(kind, hero),
        LandingBlockContent::Cta(cta) => {
            ensure_non_empty(kind, "titulo", &cta.title)?;
            ensure_non_empty(kind, "texto_botao", &cta.button_label)?;
            ensure_http_url(kind, "url_botao", &cta.button_url)
        }
        LandingBlockContent::Testimonials(testimonials) => {
            for entry in &testimonials.testimonials {
                if let Some(avatar) = entry.avatar_url.as_deref() {
                    ensure_http_url(kind, "avatar_url", avatar)?;
                }
            }
            Ok(())
        }
        LandingBlockContent::Pricing(pricing) => {
            for plan in &pricing.plans {
                if let Some(button_url) = plan.button_url.as_deref() {
                    ensure_http_url(kind, "url_botao", button_url)?;
                }
            }
            Ok(())
        }
        LandingBlockContent::Features(_)
        | LandingBlockContent::Form(_)
        | LandingBlockContent::Faq(_)
        | LandingBlockContent::Text(_) => Ok(()),
    }
}

fn validate_case(content: &CaseBlockContent) -> Result<(), BlockContentError> {
    let kind = content.kind().as_str();
    match content {
        CaseBlockContent::Hero(hero) => validate_hero(kind, hero),
        CaseBlockContent::TextColumns(_) | CaseBlockContent::Benefits(_) => Ok(()),
    }
}

fn validate_hero(kind: &'static str, hero: &HeroContent) -> Result<(), BlockContentError> {
    ensure_non_empty(kind, "titulo", &hero.title)?;
    if let Some(logo) = hero.logo_url.as_deref() {
        ensure_http_url(kind, "logo_url", logo)?;
    }
    if let Some(image) = hero.main_image.as_deref() {
        ensure_http_url(kind, "imagem_principal", image)?;
    }
    Ok(())
}

fn ensure_non_empty(
    kind: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), BlockContentError> {
    if value.trim().is_empty() {
        return Err(BlockContentError::payload(
            kind,
            format!("field `{field}` must not be empty"),
        ));
    }
    Ok(())
}

fn ensure_http_url(
    kind: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), BlockContentError> {
    let parsed = Url::parse(value).map_err(|err| {
        BlockContentError::payload(kind, format!("field `{field}` is not a valid URL: {err}"))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BlockContentError::payload(
            kind,
            format!("field `{field}` must use an http(s) URL"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_hero_with_wire_field_names() {
        let payload = json!({
            "titulo": "Launch faster",
            "subtitulo": "Ship your site in a day",
            "descricao": "Blocks instead of bespoke markup",
            "tags": ["saas", "b2b"],
            "imagem_principal": "https://cdn.example.com/hero.png"
        });

        let content = decode_landing_content("hero", &payload).expect("hero decodes");
        let LandingBlockContent::Hero(hero) = content else {
            panic!("expected hero variant");
        };
        assert_eq!(hero.title, "Launch faster");
        assert_eq!(hero.subtitle.as_deref(), Some("Ship your site in a day"));
        assert_eq!(
            hero.main_image.as_deref(),
            Some("https://cdn.example.com/hero.png")
        );
    }

    #[test]
    fn unknown_kind_is_a_registry_miss() {
        let err = decode_landing_content("carousel", &json!({})).expect_err("unknown kind");
        assert!(matches!(
            err,
            BlockContentError::UnsupportedKind { kind } if kind == "carousel"
        ));
    }

    #[test]
    fn malformed_payload_is_a_contract_violation() {
        // benefits requires a `benefits` array of items
        let err =
            decode_case_content("benefits", &json!({"benefits": "nope"})).expect_err("bad payload");
        assert!(matches!(err, BlockContentError::Payload { kind, .. } if kind == "benefits"));
    }

    #[test]
    fn unknown_icon_name_rejects() {
        let payload = json!({
            "benefits": [{"icon": "Sparkles9000", "titulo": "B", "descricao": "C"}]
        });
        let err = decode_case_content("benefits", &payload).expect_err("unknown icon");
        assert!(matches!(err, BlockContentError::Payload { .. }));
    }

    #[test]
    fn decode_benefits_with_known_icon() {
        let payload = json!({
            "benefits": [{"icon": "Zap", "titulo": "B", "descricao": "C"}]
        });
        let content = decode_case_content("benefits", &payload).expect("benefits decode");
        let CaseBlockContent::Benefits(benefits) = content else {
            panic!("expected benefits variant");
        };
        assert_eq!(benefits.benefits.len(), 1);
        assert_eq!(benefits.benefits[0].icon, IconName::Zap);
        assert_eq!(benefits.benefits[0].icon.css_class(), "icon-zap");
    }

    #[test]
    fn hero_with_non_http_url_rejects() {
        let payload = json!({
            "titulo": "A",
            "logo_url": "javascript:alert(1)"
        });
        let err = decode_landing_content("hero", &payload).expect_err("bad scheme");
        assert!(matches!(err, BlockContentError::Payload { .. }));
    }

    #[test]
    fn hero_with_empty_title_rejects() {
        let err =
            decode_landing_content("hero", &json!({"titulo": "   "})).expect_err("empty title");
        assert!(matches!(err, BlockContentError::Payload { .. }));
    }

    #[test]
    fn extra_payload_fields_are_tolerated() {
        // schemas are evolvable: an older reader must accept newer payloads
        let payload = json!({
            "titulo": "A",
            "nova_propriedade": true
        });
        decode_landing_content("hero", &payload).expect("extra field tolerated");
    }

    #[test]
    fn roundtrip_preserves_wire_names() {
        let payload = json!({
            "titulo": "Planos",
            "plans": [{
                "nome": "Pro",
                "preco": "R$ 99",
                "periodo": "mes",
                "features": ["tudo"],
                "destaque": true
            }]
        });
        let content = decode_landing_content("pricing", &payload).expect("pricing decode");
        let value = content.to_value().expect("serialize");
        assert_eq!(value["plans"][0]["nome"], "Pro");
        assert_eq!(value["plans"][0]["destaque"], true);
        assert_eq!(value["titulo"], "Planos");
    }

    #[test]
    fn landing_and_case_hero_share_a_schema() {
        let payload = json!({"titulo": "A"});
        let landing = decode_landing_content("hero", &payload).expect("landing hero");
        let case = decode_case_content("hero", &payload).expect("case hero");
        assert_eq!(landing.kind(), LandingBlockKind::Hero);
        assert_eq!(case.kind(), CaseBlockKind::Hero);
    }

    #[test]
    fn form_field_types_are_closed() {
        let payload = json!({
            "campos": [{"nome": "email", "rotulo": "Email", "tipo": "email", "obrigatorio": true}]
        });
        decode_landing_content("form", &payload).expect("known field type");

        let bad = json!({
            "campos": [{"nome": "x", "rotulo": "X", "tipo": "file"}]
        });
        let err = decode_landing_content("form", &bad).expect_err("unknown field type");
        assert!(matches!(err, BlockContentError::Payload { .. }));
    }
}
