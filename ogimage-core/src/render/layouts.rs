//! Per-template layouts.

use super::{title_size, RegionRole, Scene, TemplateProps};
use crate::model::ExtendedField;

const DEFAULT_DURATION: &str = "32:15";
const DEFAULT_HANDLE: &str = "@handle";

/// Icon, title, description stacked: the shape most templates share.
fn stacked(props: &TemplateProps, icon_size: u32, tiers: [u32; 3], description_size: u32) -> Scene {
    let mut scene = Scene::new(props);
    scene
        .push(RegionRole::Icon, props.icon.as_str(), icon_size)
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, tiers))
        .push(RegionRole::Description, props.description.as_str(), description_size);
    scene
}

pub fn gradient(props: &TemplateProps) -> Scene {
    stacked(props, 80, [48, 56, 64], 28)
}

pub fn minimal(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    scene
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [44, 52, 60]))
        .push(RegionRole::Description, props.description.as_str(), 26)
        .push_accent(RegionRole::Icon, props.icon.as_str(), 48);
    scene
}

pub fn modern(props: &TemplateProps) -> Scene {
    stacked(props, 72, [44, 52, 60], 26)
}

pub fn bold(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    scene
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [52, 60, 72]))
        .push_accent(RegionRole::Description, props.description.as_str(), 30)
        .push(RegionRole::Icon, props.icon.as_str(), 64);
    scene
}

pub fn split(props: &TemplateProps) -> Scene {
    stacked(props, 160, [40, 48, 56], 24)
}

pub fn glass(props: &TemplateProps) -> Scene {
    stacked(props, 72, [44, 52, 60], 26)
}

pub fn startup(props: &TemplateProps) -> Scene {
    stacked(props, 64, [44, 52, 60], 26)
}

pub fn blog(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    if let Some(category) = props.field(ExtendedField::Category) {
        scene.push_accent(RegionRole::Badge, category, 20);
    }
    scene
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [40, 48, 56]))
        .push(RegionRole::Description, props.description.as_str(), 24);

    let byline: Vec<&str> = [ExtendedField::Author, ExtendedField::ReadTime]
        .into_iter()
        .filter_map(|f| props.field(f))
        .collect();
    if !byline.is_empty() {
        scene.push(RegionRole::Meta, byline.join(" · "), 20);
    }
    scene
}

pub fn hero(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    scene
        .push_accent(RegionRole::Badge, props.field_or_description(ExtendedField::Tag), 20)
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [48, 56, 64]))
        .push(RegionRole::Icon, props.icon.as_str(), 56);
    scene
}

pub fn notice(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    scene.push(RegionRole::Icon, props.icon.as_str(), 120);
    if let Some(kind) = props.field(ExtendedField::Tag) {
        scene.push_accent(RegionRole::Badge, kind, 20);
    }
    scene
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [40, 48, 56]))
        .push(RegionRole::Description, props.description.as_str(), 24);
    scene
}

pub fn image_right(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    scene
        .push_accent(RegionRole::Badge, props.field_or_description(ExtendedField::Tag), 18)
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [38, 46, 54]));
    match props.field(ExtendedField::ImageUrl) {
        Some(url) => scene.push(RegionRole::Image, url, 0),
        None => scene.push(RegionRole::Icon, props.icon.as_str(), 140),
    };
    scene
}

pub fn logos(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    scene
        .push(RegionRole::Icon, props.icon.as_str(), 96)
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [44, 52, 60]))
        .push(RegionRole::Description, props.field_or_description(ExtendedField::Tagline), 24);
    scene
}

pub fn podcast(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    scene
        .push_accent(RegionRole::Badge, props.field_or_description(ExtendedField::EpisodeNumber), 20)
        .push(RegionRole::Icon, props.icon.as_str(), 96)
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [40, 48, 56]));
    if let Some(show) = props.field(ExtendedField::ShowName) {
        scene.push(RegionRole::Meta, show, 22);
    }
    scene.push_accent(RegionRole::Meta, props.field_or(ExtendedField::Duration, DEFAULT_DURATION), 20);
    scene
}

pub fn event(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    scene
        .push(RegionRole::Icon, props.icon.as_str(), 72)
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [44, 52, 60]))
        .push_accent(RegionRole::Meta, props.field_or_description(ExtendedField::Date), 24);
    if let Some(location) = props.field(ExtendedField::Location) {
        scene.push(RegionRole::Meta, location, 24);
    }
    scene
}

pub fn social(props: &TemplateProps) -> Scene {
    let mut scene = Scene::new(props);
    scene
        .push(RegionRole::Icon, props.icon.as_str(), 120)
        .push(RegionRole::Title, props.title.as_str(), title_size(&props.title, [44, 52, 60]))
        .push(RegionRole::Description, props.description.as_str(), 24)
        .push_accent(RegionRole::Meta, props.field_or(ExtendedField::Handle, DEFAULT_HANDLE), 22);
    if let Some(platform) = props.field(ExtendedField::Platform) {
        scene.push(RegionRole::Meta, platform, 20);
    }
    scene
}

pub fn banner(props: &TemplateProps) -> Scene {
    stacked(props, 88, [42, 50, 58], 24)
}
