use ratatui::layout::Rect;

use crate::model::task::{Category, TaskId};
use crate::ops::task_ops::Edge;

/// Stacking layer of a clickable region. A modal dialog sits above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Base,
    Dialog,
}

/// What a click on a region means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    BarBody(TaskId),
    BarHandle(TaskId, Edge),
    PrevMonth,
    NextMonth,
    CategoryToggle(Category),
    TimeWindow,
    SearchBox,
    DialogName,
    DialogCategory,
    DialogCancel,
    DialogSubmit,
}

/// Clickable regions recorded during the last render
#[derive(Debug, Clone, Default)]
pub struct InteractionMap {
    regions: Vec<(Layer, Rect, Target)>,
}

impl InteractionMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register(&mut self, layer: Layer, rect: Rect, target: Target) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((layer, rect, target));
        }
    }

    /// Topmost target under the point. Later registrations are drawn over
    /// earlier ones, so they win.
    pub fn target_at(&self, layer: Layer, x: u16, y: u16) -> Option<Target> {
        self.regions
            .iter()
            .rev()
            .filter(|(l, _, _)| *l == layer)
            .find(|(_, rect, _)| {
                x >= rect.x
                    && x < rect.x.saturating_add(rect.width)
                    && y >= rect.y
                    && y < rect.y.saturating_add(rect.height)
            })
            .map(|(_, _, target)| *target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_region_wins() {
        let mut map = InteractionMap::default();
        map.register(Layer::Base, Rect::new(10, 5, 20, 1), Target::BarBody(7));
        map.register(
            Layer::Base,
            Rect::new(10, 5, 1, 1),
            Target::BarHandle(7, Edge::Start),
        );
        assert_eq!(
            map.target_at(Layer::Base, 10, 5),
            Some(Target::BarHandle(7, Edge::Start))
        );
        assert_eq!(map.target_at(Layer::Base, 11, 5), Some(Target::BarBody(7)));
        assert_eq!(map.target_at(Layer::Base, 30, 5), None);
        assert_eq!(map.target_at(Layer::Base, 11, 6), None);
    }

    #[test]
    fn layers_are_separate() {
        let mut map = InteractionMap::default();
        map.register(Layer::Base, Rect::new(0, 0, 10, 10), Target::PrevMonth);
        map.register(Layer::Dialog, Rect::new(2, 2, 3, 1), Target::DialogCancel);
        assert_eq!(map.target_at(Layer::Dialog, 0, 0), None);
        assert_eq!(map.target_at(Layer::Dialog, 3, 2), Some(Target::DialogCancel));
        assert_eq!(map.target_at(Layer::Base, 3, 2), Some(Target::PrevMonth));
    }

    #[test]
    fn empty_rects_are_not_registered() {
        let mut map = InteractionMap::default();
        map.register(Layer::Base, Rect::new(0, 0, 0, 1), Target::NextMonth);
        assert_eq!(map.target_at(Layer::Base, 0, 0), None);
    }
}
