use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// Paint order is back-to-front: ascending z, then insertion order. Later items
/// composite over earlier ones.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });

        self.sorted_dirty = true;
    }

    /// Iterates items in paint order without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    /// Consumes the list and returns its commands in paint order.
    pub fn into_commands(mut self) -> Vec<DrawCmd> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        let mut slots: Vec<Option<DrawCmd>> = self.items.into_iter().map(|i| Some(i.cmd)).collect();
        self.sorted_indices
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect()
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn dot(list: &mut DrawList, z: i32, x: f32) {
        list.push_solid_circle(ZIndex::new(z), Vec2::new(x, 0.0), 1.0, Color::BLACK);
    }

    fn xs(cmds: &[DrawCmd]) -> Vec<f32> {
        cmds.iter()
            .map(|c| match c {
                DrawCmd::Ellipse(e) => e.center.x,
                other => panic!("unexpected command {other:?}"),
            })
            .collect()
    }

    // ── paint order ───────────────────────────────────────────────────────

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        dot(&mut list, 2, 0.0);
        dot(&mut list, 1, 1.0);
        dot(&mut list, 2, 2.0);
        dot(&mut list, 0, 3.0);

        assert_eq!(xs(&list.into_commands()), vec![3.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn iter_matches_into_commands() {
        let mut list = DrawList::new();
        dot(&mut list, 1, 0.0);
        dot(&mut list, 0, 1.0);

        let iterated: Vec<DrawCmd> = list.iter_in_paint_order().map(|i| i.cmd.clone()).collect();
        assert_eq!(iterated, list.into_commands());
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        dot(&mut list, 0, 0.0);
        list.clear();
        assert!(list.is_empty());

        dot(&mut list, 0, 5.0);
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(list.len(), 1);
    }
}
