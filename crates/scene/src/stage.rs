use crate::components::{Geometry2D, Opacity, TextContent};
use crate::element::ElementId;
use foundation::handles::Handle;

/// Retained store of animated presentation elements.
///
/// The host owns one long-lived `Stage`. Every applied timeline frame
/// rewrites the opacities, geometry and text of the same elements in place,
/// the way a retained SVG or DOM host mutates existing nodes rather than
/// rebuilding the tree. Component columns run parallel and are indexed by
/// element handle.
#[derive(Debug, Default)]
pub struct Stage {
    next_index: u32,
    opacities: Vec<Option<Opacity>>,
    geometries: Vec<Option<Geometry2D>>,
    texts: Vec<Option<TextContent>>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> ElementId {
        let id = ElementId(Handle::new(self.next_index, 0));
        self.next_index += 1;
        let idx = id.index() as usize;
        self.ensure_capacity(idx);
        id
    }

    pub fn len(&self) -> usize {
        self.next_index as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }

    pub fn set_opacity(&mut self, element: ElementId, opacity: Opacity) {
        self.ensure_capacity(element.index() as usize);
        self.opacities[element.index() as usize] = Some(opacity);
    }

    pub fn set_geometry(&mut self, element: ElementId, geometry: Geometry2D) {
        self.ensure_capacity(element.index() as usize);
        self.geometries[element.index() as usize] = Some(geometry);
    }

    pub fn set_text(&mut self, element: ElementId, text: TextContent) {
        self.ensure_capacity(element.index() as usize);
        self.texts[element.index() as usize] = Some(text);
    }

    pub fn opacity(&self, element: ElementId) -> Option<Opacity> {
        self.opacities
            .get(element.index() as usize)
            .and_then(|o| *o)
    }

    pub fn geometry(&self, element: ElementId) -> Option<&Geometry2D> {
        self.geometries
            .get(element.index() as usize)
            .and_then(|g| g.as_ref())
    }

    pub fn text(&self, element: ElementId) -> Option<&TextContent> {
        self.texts
            .get(element.index() as usize)
            .and_then(|t| t.as_ref())
    }

    /// Elements that carry geometry and are not fully transparent.
    ///
    /// Elements without an opacity component count as opaque.
    pub fn visible_elements(&self) -> Vec<(ElementId, Opacity, &Geometry2D)> {
        let mut out = Vec::new();
        for (idx, geometry) in self.geometries.iter().enumerate() {
            let Some(geometry) = geometry else { continue };
            let opacity = self
                .opacities
                .get(idx)
                .and_then(|o| *o)
                .unwrap_or(Opacity::opaque());
            if !opacity.is_visible() {
                continue;
            }

            out.push((ElementId(Handle::new(idx as u32, 0)), opacity, geometry));
        }
        out
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.opacities.len() <= idx {
            let new_len = idx + 1;
            self.opacities.resize(new_len, None);
            self.geometries.resize(new_len, None);
            self.texts.resize(new_len, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Stage;
    use crate::components::{Geometry2D, Opacity, TextContent};
    use foundation::math::Vec2;

    fn segment() -> Geometry2D {
        Geometry2D::polyline(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)])
    }

    #[test]
    fn spawn_and_collect_visible_elements() {
        let mut stage = Stage::new();
        let element = stage.spawn();
        stage.set_geometry(element, segment());
        stage.set_opacity(element, Opacity::opaque());

        let visible = stage.visible_elements();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].0, element);
    }

    #[test]
    fn transparent_elements_are_filtered() {
        let mut stage = Stage::new();
        let element = stage.spawn();
        stage.set_geometry(element, segment());
        stage.set_opacity(element, Opacity::transparent());

        assert!(stage.visible_elements().is_empty());
    }

    #[test]
    fn missing_opacity_defaults_to_opaque() {
        let mut stage = Stage::new();
        let element = stage.spawn();
        stage.set_geometry(element, segment());

        assert_eq!(stage.visible_elements().len(), 1);
    }

    #[test]
    fn rewriting_components_replaces_them_in_place() {
        let mut stage = Stage::new();
        let element = stage.spawn();
        stage.set_text(element, TextContent::new("2008"));
        stage.set_opacity(element, Opacity::new(0.5));
        stage.set_text(element, TextContent::new("2009"));
        stage.set_opacity(element, Opacity::new(0.5));

        assert_eq!(stage.len(), 1);
        assert_eq!(stage.text(element).unwrap().text, "2009");
        assert_eq!(stage.opacity(element).unwrap().value, 0.5);
    }
}
