//! Collaborators the engine consumes: the media source and the focus
//! observer, plus the completion handle that carries fetched images back.
//!
//! Image fetches may finish on any thread, out of order, or never. A
//! [`ContentCompletion`] owns the sending half of the engine's delivery
//! channel and is consumed when completed, so each request is answered at
//! most once. Deliveries only touch slot state when the engine drains them
//! on its own thread.

use crate::slot::SlotId;
use std::sync::mpsc;

/// The browsed collection.
pub trait MediaSource {
    /// Image handle produced by fetches.
    type Image;

    /// Number of items. Queried at every decision, never cached; `0` is
    /// treated as a single item.
    fn item_count(&self) -> usize;

    /// Starts fetching the image for `index`. The fetch reports back through
    /// `completion` with the same index.
    fn request_image(&self, index: usize, completion: ContentCompletion<Self::Image>);
}

/// Notified when the focused item changes.
///
/// The engine holds observers weakly and never keeps them alive.
pub trait FocusObserver {
    fn focus_changed(&self, index: usize);
}

/// Single-use reply handle for one image request.
#[derive(Debug)]
pub struct ContentCompletion<I> {
    slot: SlotId,
    requested: usize,
    sender: mpsc::Sender<ContentDelivery<I>>,
}

impl<I> ContentCompletion<I> {
    pub(crate) fn new(slot: SlotId, requested: usize, sender: mpsc::Sender<ContentDelivery<I>>) -> Self {
        Self {
            slot,
            requested,
            sender,
        }
    }

    /// The effective index this request was issued for.
    pub fn index(&self) -> usize {
        self.requested
    }

    /// Hands the result back to the engine. `reported_index` must be the
    /// index the request was issued for; a mismatch is discarded.
    pub fn complete(self, reported_index: usize, image: Option<I>) {
        let delivery = ContentDelivery {
            slot: self.slot,
            requested: self.requested,
            reported: reported_index,
            image,
        };
        if self.sender.send(delivery).is_err() {
            log::trace!("browser dropped before image {reported_index} arrived");
        }
    }
}

/// A fetch result waiting to be applied on the engine's thread.
#[derive(Debug)]
pub(crate) struct ContentDelivery<I> {
    pub(crate) slot: SlotId,
    pub(crate) requested: usize,
    pub(crate) reported: usize,
    pub(crate) image: Option<I>,
}
