//! Rendering Contract
//!
//! Each template is a pure function from [`TemplateProps`] to a [`Scene`] on a
//! fixed 1200x630 canvas. Missing optional fields degrade to a fallback; they
//! never remove a required region.

pub mod layouts;
mod svg;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{AppState, ExtendedField};
use crate::schema;
use crate::templates::{TemplateCatalog, TemplateId};

pub use svg::to_svg;

pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 630;

/// Color used when a color expression is empty.
pub const FALLBACK_COLOR: &str = "#000000";

pub type RenderFn = fn(&TemplateProps) -> Scene;

/// Flat input record handed to a template's render function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateProps {
    pub template: TemplateId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    #[serde(flatten)]
    pub extended: BTreeMap<ExtendedField, String>,
}

impl TemplateProps {
    /// Build the record for the state's active template, carrying only the
    /// extended fields that template declares.
    pub fn from_state(state: &AppState) -> Self {
        let template = state.style.template;
        let extended = schema::fields_for(template)
            .iter()
            .filter_map(|d| {
                state
                    .content
                    .extended
                    .get(d.key)
                    .map(|value| (d.key, value.to_string()))
            })
            .collect();

        Self {
            template,
            title: state.content.title.clone(),
            description: state.content.description.clone(),
            icon: state.content.icon.clone(),
            background_color: state.style.background_color.clone(),
            text_color: state.style.text_color.clone(),
            accent_color: state.style.accent_color.clone(),
            extended,
        }
    }

    /// Non-empty extended value.
    pub fn field(&self, field: ExtendedField) -> Option<&str> {
        self.extended
            .get(&field)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn field_or_description(&self, field: ExtendedField) -> &str {
        self.field(field).unwrap_or(&self.description)
    }

    pub fn field_or<'a>(&'a self, field: ExtendedField, fallback: &'a str) -> &'a str {
        self.field(field).unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Background {
    Solid(String),
    Gradient(String),
}

impl Background {
    pub fn parse(expr: &str) -> Self {
        let expr = expr.trim();
        if expr.is_empty() {
            Background::Solid(FALLBACK_COLOR.to_string())
        } else if expr.contains("gradient(") {
            Background::Gradient(expr.to_string())
        } else {
            Background::Solid(expr.to_string())
        }
    }

    /// Best single color for targets without gradient support: the first hex
    /// stop of a gradient, or the solid color itself.
    pub fn primary_color(&self) -> &str {
        match self {
            Background::Solid(color) => color.as_str(),
            Background::Gradient(expr) => first_hex_color(expr).unwrap_or(FALLBACK_COLOR),
        }
    }
}

fn first_hex_color(expr: &str) -> Option<&str> {
    let start = expr.find('#')?;
    let rest = &expr[start..];
    let end = rest[1..]
        .find(|c: char| !c.is_ascii_hexdigit())
        .map_or(rest.len(), |i| i + 1);
    let color = &rest[..end];
    matches!(color.len(), 4 | 7 | 9).then_some(color)
}

fn color_or_fallback(expr: &str) -> String {
    let expr = expr.trim();
    if expr.is_empty() {
        FALLBACK_COLOR.to_string()
    } else {
        expr.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionRole {
    Badge,
    Icon,
    Title,
    Description,
    Meta,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub role: RegionRole,
    /// Text content, or the source URL for image regions.
    pub content: String,
    pub font_size: u32,
    pub accent: bool,
}

/// Visual tree produced by a render function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub template: TemplateId,
    pub width: u32,
    pub height: u32,
    pub background: Background,
    pub text_color: String,
    pub accent_color: String,
    pub regions: Vec<Region>,
}

impl Scene {
    pub fn new(props: &TemplateProps) -> Self {
        Self {
            template: props.template,
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            background: Background::parse(&props.background_color),
            text_color: color_or_fallback(&props.text_color),
            accent_color: color_or_fallback(&props.accent_color),
            regions: Vec::new(),
        }
    }

    pub fn push(&mut self, role: RegionRole, content: impl Into<String>, font_size: u32) -> &mut Self {
        self.regions.push(Region {
            role,
            content: content.into(),
            font_size,
            accent: false,
        });
        self
    }

    pub fn push_accent(&mut self, role: RegionRole, content: impl Into<String>, font_size: u32) -> &mut Self {
        self.regions.push(Region {
            role,
            content: content.into(),
            font_size,
            accent: true,
        });
        self
    }

    pub fn region(&self, role: RegionRole) -> Option<&Region> {
        self.regions.iter().find(|r| r.role == role)
    }

    pub fn regions_of(&self, role: RegionRole) -> impl Iterator<Item = &Region> + '_ {
        self.regions.iter().filter(move |r| r.role == role)
    }
}

/// Title size tiers: `[long (> 50 chars), medium (> 35 chars), short]`.
pub fn title_size(title: &str, tiers: [u32; 3]) -> u32 {
    match title.chars().count() {
        n if n > 50 => tiers[0],
        n if n > 35 => tiers[1],
        _ => tiers[2],
    }
}

/// Render the state's active template.
pub fn render_state(state: &AppState) -> Scene {
    let props = TemplateProps::from_state(state);
    let entry = TemplateCatalog::new().entry(props.template);
    (entry.render)(&props)
}
