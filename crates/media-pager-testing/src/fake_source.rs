//! In-memory collaborators for driving a [`BrowserEngine`] in tests.
//!
//! [`BrowserEngine`]: media_pager_core::BrowserEngine

use media_pager_core::{ContentCompletion, FocusObserver, MediaSource};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A media source that parks every request until the test completes it.
///
/// Clones share state, so a test can keep a handle after moving the source
/// into an engine. Images are the strings `"image-{index}"`.
#[derive(Clone, Default)]
pub struct FakeMediaSource {
    count: Rc<Cell<usize>>,
    pending: Rc<RefCell<Vec<ContentCompletion<String>>>>,
    history: Rc<RefCell<Vec<usize>>>,
}

impl FakeMediaSource {
    pub fn new(count: usize) -> Self {
        let source = Self::default();
        source.count.set(count);
        source
    }

    pub fn set_count(&self, count: usize) {
        self.count.set(count);
    }

    pub fn image_for(index: usize) -> String {
        format!("image-{index}")
    }

    /// Indices of requests that have not been completed yet, oldest first.
    pub fn pending_indices(&self) -> Vec<usize> {
        self.pending.borrow().iter().map(|c| c.index()).collect()
    }

    /// Every index ever requested, in request order.
    pub fn requested_indices(&self) -> Vec<usize> {
        self.history.borrow().clone()
    }

    pub fn clear_history(&self) {
        self.history.borrow_mut().clear();
    }

    /// Removes the oldest pending request for `index` without answering it.
    pub fn take(&self, index: usize) -> Option<ContentCompletion<String>> {
        let mut pending = self.pending.borrow_mut();
        let at = pending.iter().position(|c| c.index() == index)?;
        Some(pending.remove(at))
    }

    /// Answers the oldest pending request for `index`. Returns whether one
    /// was pending.
    pub fn complete(&self, index: usize) -> bool {
        match self.take(index) {
            Some(completion) => {
                completion.complete(index, Some(Self::image_for(index)));
                true
            }
            None => false,
        }
    }

    /// Answers every pending request, newest first, to exercise
    /// out-of-order delivery.
    pub fn complete_all_reversed(&self) -> usize {
        let drained: Vec<_> = self.pending.borrow_mut().drain(..).rev().collect();
        let answered = drained.len();
        for completion in drained {
            let index = completion.index();
            completion.complete(index, Some(Self::image_for(index)));
        }
        answered
    }

    /// Answers every pending request in request order.
    pub fn complete_all(&self) -> usize {
        let drained: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        let answered = drained.len();
        for completion in drained {
            let index = completion.index();
            completion.complete(index, Some(Self::image_for(index)));
        }
        answered
    }
}

impl MediaSource for FakeMediaSource {
    type Image = String;

    fn item_count(&self) -> usize {
        self.count.get()
    }

    fn request_image(&self, index: usize, completion: ContentCompletion<String>) {
        log::trace!("fake source parked request for {index}");
        self.history.borrow_mut().push(index);
        self.pending.borrow_mut().push(completion);
    }
}

/// Records every focus notification it receives.
#[derive(Debug, Default)]
pub struct RecordingFocusObserver {
    seen: RefCell<Vec<usize>>,
}

impl RecordingFocusObserver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<usize> {
        self.seen.borrow().clone()
    }

    pub fn last(&self) -> Option<usize> {
        self.seen.borrow().last().copied()
    }
}

impl FocusObserver for RecordingFocusObserver {
    fn focus_changed(&self, index: usize) {
        self.seen.borrow_mut().push(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completing_an_unrequested_index_reports_false() {
        let source = FakeMediaSource::new(3);
        assert!(!source.complete(1));
        assert_eq!(source.item_count(), 3);
        source.set_count(0);
        assert_eq!(source.item_count(), 0);
    }

    #[test]
    fn recording_observer_keeps_order() {
        let observer = RecordingFocusObserver::new();
        observer.focus_changed(2);
        observer.focus_changed(1);
        assert_eq!(observer.notifications(), vec![2, 1]);
        assert_eq!(observer.last(), Some(1));
    }
}
