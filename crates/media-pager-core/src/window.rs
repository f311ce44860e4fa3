//! The sliding window: exactly three slots recycled around a drifting index.
//!
//! The slots live in a fixed arena and are never created or destroyed after
//! construction. A separate ring order records which arena entry currently
//! plays the previous, middle, and next role. Rotation relabels the slot at
//! one end with the index beyond the other end and moves it there.

use crate::slot::{ContentSlot, SlotId};

/// Number of live slots.
pub const SLOT_COUNT: usize = 3;

/// Direction a slot is recycled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// The previous slot moves past the next one; focus advances.
    Forward,
    /// The next slot moves before the previous one; focus goes back.
    Backward,
}

#[derive(Clone, Debug)]
pub struct SlidingWindow<I> {
    slots: [ContentSlot<I>; SLOT_COUNT],
    /// Arena ids in `[previous, middle, next]` order.
    order: [SlotId; SLOT_COUNT],
}

impl<I> Default for SlidingWindow<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> SlidingWindow<I> {
    /// Creates the window with indices `-1, 0, 1` at positions `-1, 0, 1`.
    pub fn new() -> Self {
        let ids = [SlotId::new(0), SlotId::new(1), SlotId::new(2)];
        Self {
            slots: [
                ContentSlot::new(ids[0], -1),
                ContentSlot::new(ids[1], 0),
                ContentSlot::new(ids[2], 1),
            ],
            order: ids,
        }
    }

    pub fn slot(&self, id: SlotId) -> &ContentSlot<I> {
        &self.slots[id.index()]
    }

    pub(crate) fn slot_mut(&mut self, id: SlotId) -> &mut ContentSlot<I> {
        &mut self.slots[id.index()]
    }

    pub fn previous(&self) -> &ContentSlot<I> {
        self.slot(self.order[0])
    }

    pub fn middle(&self) -> &ContentSlot<I> {
        self.slot(self.order[1])
    }

    pub fn next(&self) -> &ContentSlot<I> {
        self.slot(self.order[2])
    }

    /// Slots ordered `[previous, middle, next]`.
    pub fn slots(&self) -> [&ContentSlot<I>; SLOT_COUNT] {
        [self.previous(), self.middle(), self.next()]
    }

    /// Arena ids ordered `[previous, middle, next]`.
    pub fn order(&self) -> [SlotId; SLOT_COUNT] {
        self.order
    }

    /// Slots in arena order, independent of their current role.
    pub fn iter(&self) -> impl Iterator<Item = &ContentSlot<I>> {
        self.slots.iter()
    }

    /// Recycles the previous slot to `highest + 1` and returns it.
    pub fn rotate_forward(&mut self) -> SlotId {
        let recycled = self.order[0];
        let highest = self.next().index;
        let slot = self.slot_mut(recycled);
        let position = slot.position + SLOT_COUNT as f32;
        slot.relabel(highest + 1, position);
        self.order.rotate_left(1);
        recycled
    }

    /// Recycles the next slot to `lowest - 1` and returns it.
    pub fn rotate_backward(&mut self) -> SlotId {
        let recycled = self.order[SLOT_COUNT - 1];
        let lowest = self.previous().index;
        let slot = self.slot_mut(recycled);
        let position = slot.position - SLOT_COUNT as f32;
        slot.relabel(lowest - 1, position);
        self.order.rotate_right(1);
        recycled
    }

    pub fn rotate(&mut self, rotation: Rotation) -> SlotId {
        match rotation {
            Rotation::Forward => self.rotate_forward(),
            Rotation::Backward => self.rotate_backward(),
        }
    }

    pub fn shift_all(&mut self, by: f32) {
        for slot in &mut self.slots {
            slot.position += by;
        }
    }

    /// Moves every slot `by` items in one relabel and lays the window out
    /// around `middle_position`. Content is dropped.
    ///
    /// Positions are rebuilt from the middle slot rather than shifted, so
    /// adjacency survives large offsets.
    pub fn jump(&mut self, by: i64, middle_position: f32) {
        for (offset, id) in self.order.into_iter().enumerate() {
            let slot = &mut self.slots[id.index()];
            let index = slot.index + by;
            slot.relabel(index, middle_position + offset as f32 - 1.0);
        }
    }

    /// Subtracts `by` from every logical index, keeping positions and
    /// content. Used with multiples of the item count, so effective indices
    /// are unchanged.
    pub fn rebase(&mut self, by: i64) {
        for slot in &mut self.slots {
            slot.index -= by;
        }
    }

    /// Restores the initial labels and drops all content.
    pub fn reset(&mut self) {
        let ids = [SlotId::new(0), SlotId::new(1), SlotId::new(2)];
        for (offset, id) in ids.iter().enumerate() {
            let index = offset as i64 - 1;
            self.slots[id.index()].relabel(index, index as f32);
        }
        self.order = ids;
    }
}
