use crate::constants::SELECTION_RING_PADDING;
use crate::layout::scene::Scene;
use crate::layout::style::BACKGROUND_COLOR;
use crate::layout::style::BORDER_COLOR;
use crate::layout::style::HEADER_BORDER_COLOR;
use crate::layout::style::HEADER_COLOR;
use crate::layout::style::LINK_GRADIENT;
use crate::layout::style::LINK_OPACITY;
use crate::layout::style::NODE_STROKE_COLOR;
use crate::layout::style::TEXT_COLOR;
use crate::layout::style::TOOLTIP_BACKGROUND;
use crate::layout::view::ViewTransform;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(
        width: f64,
        height: f64,
    ) -> Self {
        Self { width, height }
    }

    /// Nothing can be drawn on a surface without area
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Something a [`crate::layout::LayoutEngine`] can draw frames onto. The
/// caller owns the surface; the engine only keeps a weak handle to it.
pub trait RenderSurface {
    fn size(&self) -> SurfaceSize;

    fn draw(
        &mut self,
        scene: &Scene,
    );

    /// Remove everything previously drawn
    fn clear(&mut self);
}

/// Renders each frame to a standalone SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    size: SurfaceSize,
    document: String,
    frames: usize,
}

impl SvgSurface {
    pub fn new(
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            document: String::new(),
            frames: 0,
        }
    }

    /// Last drawn frame, empty after a clear
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames
    }
}

impl RenderSurface for SvgSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn draw(
        &mut self,
        scene: &Scene,
    ) {
        self.document = render_svg(scene);
        self.frames += 1;
    }

    fn clear(&mut self) {
        self.document.clear();
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn transform_attr(transform: &ViewTransform) -> String {
    format!(
        "translate({:.3},{:.3}) scale({:.4})",
        transform.translate.x, transform.translate.y, transform.scale
    )
}

pub fn render_svg(scene: &Scene) -> String {
    let (width, height) = (scene.size.width, scene.size.height);
    let transform = transform_attr(&scene.transform);
    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    ));
    svg.push_str(&format!(
        r#"<defs><linearGradient id="link-gradient" gradientUnits="userSpaceOnUse"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient></defs>"#,
        LINK_GRADIENT[0], LINK_GRADIENT[1]
    ));

    // Chrome: card, header band, title
    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="{}" rx="8" ry="8" stroke="{}" stroke-width="1"/>"#,
        width, height, BACKGROUND_COLOR, BORDER_COLOR
    ));
    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="{}" rx="8" ry="0"/>"#,
        width, scene.header_height, HEADER_COLOR
    ));
    svg.push_str(&format!(
        r#"<line x1="0" y1="{y}" x2="{w}" y2="{y}" stroke="{}" stroke-width="1"/>"#,
        HEADER_BORDER_COLOR,
        y = scene.header_height,
        w = width
    ));
    svg.push_str(&format!(
        r#"<text x="20" y="{}" fill="{}" font-size="14px" font-weight="bold">{}</text>"#,
        scene.header_height / 2.0 + 5.0,
        TEXT_COLOR,
        escape(scene.title)
    ));

    svg.push_str(&format!(
        r#"<g class="links" transform="{}" stroke="url(#link-gradient)" stroke-opacity="{}">"#,
        transform, LINK_OPACITY
    ));
    for link in &scene.links {
        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke-width="{:.3}"/>"#,
            link.from.x, link.from.y, link.to.x, link.to.y, link.width
        ));
    }
    svg.push_str("</g>");

    svg.push_str(&format!(r#"<g class="nodes" transform="{}">"#, transform));
    for node in &scene.nodes {
        svg.push_str(&format!(
            r#"<g class="node" data-id="{}" transform="translate({:.2},{:.2})">"#,
            escape(&node.id),
            node.position.x,
            node.position.y
        ));
        svg.push_str(&format!(
            r#"<circle r="{}" fill="none" stroke="{}" stroke-width="1.5" stroke-dasharray="3,3" opacity="{}"/>"#,
            node.radius + SELECTION_RING_PADDING,
            TEXT_COLOR,
            if node.selected { 1.0 } else { 0.3 }
        ));
        svg.push_str(&format!(
            r#"<circle r="{}" fill="{}" stroke="{}" stroke-width="0.5"/>"#,
            node.radius, node.color, NODE_STROKE_COLOR
        ));
        if let Some(label) = &node.label {
            svg.push_str(&format!(
                r#"<text dx="{}" dy=".35em" font-size="10px" fill="{}">{}</text>"#,
                node.radius + 5.0,
                TEXT_COLOR,
                escape(label)
            ));
        }
        svg.push_str("</g>");
    }
    svg.push_str("</g>");

    svg.push_str(&format!(
        r#"<g class="legend" transform="{} translate({:.2},{:.2})">"#,
        transform, scene.legend.origin.x, scene.legend.origin.y
    ));
    for entry in &scene.legend.entries {
        svg.push_str(&format!(
            r#"<g transform="translate({},{})"><circle r="{}" fill="{}"/><text x="10" y="4" font-size="10px" fill="{}">{}</text></g>"#,
            entry.offset.x,
            entry.offset.y,
            entry.radius,
            entry.color,
            TEXT_COLOR,
            escape(entry.label)
        ));
    }
    svg.push_str("</g>");

    if let Some(tooltip) = &scene.tooltip {
        svg.push_str(&format!(
            r#"<g class="tooltip" transform="translate({:.2},{:.2})"><rect x="0" y="0" width="280" height="{}" rx="4" fill="{}"/>"#,
            tooltip.anchor.x,
            tooltip.anchor.y,
            16.0 * tooltip.lines().len() as f64 + 8.0,
            TOOLTIP_BACKGROUND
        ));
        for (row, line) in tooltip.lines().iter().enumerate() {
            svg.push_str(&format!(
                r#"<text x="8" y="{}" font-size="12px" fill="{}">{}</text>"#,
                16.0 * (row as f64 + 1.0),
                TEXT_COLOR,
                escape(line)
            ));
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_graph;
    use crate::test_utils::fixtures::TestFixtures;

    #[test]
    fn empty_size_is_detected() {
        assert!(SurfaceSize::new(0.0, 100.0).is_empty());
        assert!(SurfaceSize::new(100.0, f64::NAN).is_empty());
        assert!(!SurfaceSize::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn draws_and_clears() {
        let model = build_graph(&TestFixtures::change_to_self_view());
        let mut surface = SvgSurface::new(640.0, 480.0);
        let scene = Scene::build(&model, surface.size());

        surface.draw(&scene);
        assert_eq!(surface.frames_drawn(), 1);
        assert!(surface.document().starts_with("<svg"));
        assert_eq!(surface.document().matches(r#"class="node""#).count(), 3);
        assert!(surface.document().contains("Transaction Flow Visualization"));

        surface.clear();
        assert!(surface.document().is_empty());
    }
}
