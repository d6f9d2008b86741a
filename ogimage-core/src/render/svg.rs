//! SVG encoding of a [`Scene`].

use std::fmt::Write;

use super::{Background, RegionRole, Scene};

const MARGIN_TOP: u32 = 80;
const LINE_GAP: u32 = 24;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Regions are stacked top to bottom, horizontally centered.
pub fn to_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height
    );

    let fill = escape(scene.background.primary_color());
    let _ = write!(svg, r#"<rect width="100%" height="100%" fill="{fill}"/>"#);
    if let Background::Gradient(expr) = &scene.background {
        let _ = write!(svg, "<desc>{}</desc>", escape(expr));
    }

    let center = scene.width / 2;
    let mut y = MARGIN_TOP;
    for region in &scene.regions {
        if region.role == RegionRole::Image {
            let size = scene.height / 2;
            let _ = write!(
                svg,
                r#"<image href="{href}" x="{x}" y="{y}" width="{size}" height="{size}"/>"#,
                href = escape(&region.content),
                x = center.saturating_sub(size / 2),
            );
            y += size + LINE_GAP;
            continue;
        }

        y += region.font_size;
        let color = if region.accent { &scene.accent_color } else { &scene.text_color };
        let _ = write!(
            svg,
            r#"<text x="{center}" y="{y}" font-size="{size}" fill="{fill}" text-anchor="middle" data-role="{role}">{text}</text>"#,
            size = region.font_size,
            fill = escape(color),
            role = format!("{:?}", region.role).to_lowercase(),
            text = escape(&region.content),
        );
        y += LINE_GAP;
    }

    svg.push_str("</svg>");
    svg
}
