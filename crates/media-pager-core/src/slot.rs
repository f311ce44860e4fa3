//! Content slots: the three recyclable records behind the live views.

/// Stable identity of a slot inside the window's arena.
///
/// Slots are never reallocated, so an id stays valid for the life of the
/// browser even as the slot is relabeled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u8);

impl SlotId {
    pub(crate) const fn new(raw: u8) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Maps a drifting logical index into `[0, count)`.
///
/// Uses true modulo so negative indices wrap from the end. A count of zero
/// is treated as a single item.
#[inline]
pub fn effective_index(index: i64, count: usize) -> usize {
    let count = count.max(1) as i64;
    index.rem_euclid(count) as usize
}

/// One of the three live slots.
#[derive(Clone, Debug)]
pub struct ContentSlot<I> {
    pub(crate) id: SlotId,
    /// Logical index, unbounded in carousel style.
    pub(crate) index: i64,
    /// Offset in item spans; `0.0` is centered.
    pub(crate) position: f32,
    pub(crate) content: Option<I>,
    /// Effective index of the outstanding or last applied fetch.
    pub(crate) requested: Option<usize>,
}

impl<I> ContentSlot<I> {
    pub(crate) fn new(id: SlotId, index: i64) -> Self {
        Self {
            id,
            index,
            position: index as f32,
            content: None,
            requested: None,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn content(&self) -> Option<&I> {
        self.content.as_ref()
    }

    pub fn requested_index(&self) -> Option<usize> {
        self.requested
    }

    pub fn effective_index(&self, count: usize) -> usize {
        effective_index(self.index, count)
    }

    /// Whether the logical index addresses a real item without wrapping.
    pub fn is_in_range(&self, count: usize) -> bool {
        self.index >= 0 && (self.index as u64) < count.max(1) as u64
    }

    pub(crate) fn relabel(&mut self, index: i64, position: f32) {
        self.index = index;
        self.position = position;
        self.content = None;
        self.requested = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_index_wraps_negative_indices() {
        assert_eq!(effective_index(-1, 10), 9);
        assert_eq!(effective_index(-10, 10), 0);
        assert_eq!(effective_index(-11, 10), 9);
        assert_eq!(effective_index(23, 10), 3);
        assert_eq!(effective_index(i64::MIN + 1, 7), (i64::MIN + 1).rem_euclid(7) as usize);
    }

    #[test]
    fn zero_count_is_treated_as_one() {
        assert_eq!(effective_index(5, 0), 0);
        assert_eq!(effective_index(-5, 0), 0);
    }

    #[test]
    fn relabel_clears_content() {
        let mut slot = ContentSlot::new(SlotId::new(0), -1);
        assert_eq!(slot.position(), -1.0);
        slot.content = Some("image");
        slot.requested = Some(9);

        slot.relabel(2, 2.0);
        assert_eq!(slot.index(), 2);
        assert!(slot.content().is_none());
        assert_eq!(slot.requested_index(), None);
    }

    #[test]
    fn range_check_ignores_wrapping() {
        let slot: ContentSlot<()> = ContentSlot::new(SlotId::new(0), -1);
        assert!(!slot.is_in_range(3));
        let slot: ContentSlot<()> = ContentSlot::new(SlotId::new(1), 2);
        assert!(slot.is_in_range(3));
        assert!(!slot.is_in_range(2));
    }
}
