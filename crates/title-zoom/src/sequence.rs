//! Ordered title frames with a playback cursor.
//!
//! Frames live in an arena and are linked by [`FrameId`] indices, so the
//! sequence can drop an arbitrary frame in O(1) without reference cycles.
//! Head, tail, and cursor are ids into the same arena; every structural
//! edit keeps the three consistent with membership.
//!
//! The cursor walks the frames in order. Each frame stays current for its
//! lifetime in ticks. Once the cursor falls off the tail the sequence is
//! past-end, and stays there until rewound.
//!
//! A frame's countdown is reset when the cursor lands on it, so rewinding
//! and advancing are O(1) regardless of length. Slots freed by
//! [`FrameSequence::remove`] are reused by later pushes, so the arena never
//! holds more slots than the peak number of live frames. A [`FrameId`] of a
//! removed frame may therefore name a newer frame after a push.

use std::sync::Arc;

use matrixrain_bitmap::IndexBitmap;

/// Stable handle to a frame in a [`FrameSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(usize);

/// One pre-rendered zoom step.
#[derive(Debug, Clone)]
pub struct TitleFrame {
    bitmap: Arc<IndexBitmap>,
    factor: f64,
    iterations_to_live: u32,
    curr_iteration: i64,
    accelerate: bool,
}

impl TitleFrame {
    pub fn new(
        bitmap: IndexBitmap,
        factor: f64,
        iterations_to_live: u32,
        accelerate: bool,
    ) -> Self {
        Self {
            bitmap: Arc::new(bitmap),
            factor,
            iterations_to_live,
            curr_iteration: iterations_to_live as i64,
            accelerate,
        }
    }

    /// Shared read-only handle to the frame's bitmap.
    pub fn bitmap(&self) -> &Arc<IndexBitmap> {
        &self.bitmap
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Lifetime in ticks.
    pub fn iterations_to_live(&self) -> u32 {
        self.iterations_to_live
    }

    /// Ticks left before the cursor moves on. Only meaningful while the
    /// frame is current.
    pub fn curr_iteration(&self) -> i64 {
        self.curr_iteration
    }

    pub fn accelerate(&self) -> bool {
        self.accelerate
    }

    fn rewind(&mut self) {
        self.curr_iteration = self.iterations_to_live as i64;
    }
}

/// Where the playback cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Playback has not been started.
    NotStarted,
    /// The given frame is current.
    Active(FrameId),
    /// The cursor moved past the last frame. Sticky.
    PastEnd,
}

#[derive(Debug)]
struct FrameNode {
    frame: TitleFrame,
    prev: Option<FrameId>,
    next: Option<FrameId>,
}

/// Frames in playback order plus the cursor over them.
#[derive(Debug)]
pub struct FrameSequence {
    nodes: Vec<Option<FrameNode>>,
    free: Vec<usize>,
    head: Option<FrameId>,
    tail: Option<FrameId>,
    state: PlaybackState,
    accelerate: bool,
    len: usize,
}

impl Default for FrameSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSequence {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            state: PlaybackState::NotStarted,
            accelerate: false,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<FrameId> {
        self.head
    }

    pub fn tail(&self) -> Option<FrameId> {
        self.tail
    }

    pub fn get(&self, id: FrameId) -> Option<&TitleFrame> {
        self.node(id).map(|n| &n.frame)
    }

    /// Successor of a live frame.
    pub fn next_of(&self, id: FrameId) -> Option<FrameId> {
        self.node(id).and_then(|n| n.next)
    }

    /// Predecessor of a live frame.
    pub fn prev_of(&self, id: FrameId) -> Option<FrameId> {
        self.node(id).and_then(|n| n.prev)
    }

    /// Frames from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, &TitleFrame)> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let id = cursor?;
            let node = self.node(id)?;
            cursor = node.next;
            Some((id, &node.frame))
        })
    }

    /// Append a frame after the current tail.
    pub fn push_back(&mut self, frame: TitleFrame) -> FrameId {
        let node = FrameNode {
            frame,
            prev: self.tail,
            next: None,
        };
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                FrameId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                FrameId(self.nodes.len() - 1)
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Unlink and return a frame.
    ///
    /// If the removed frame was current, the cursor moves to its successor
    /// with a fresh countdown (or past-end) without touching the accelerate
    /// signal. Removing an
    /// id that is no longer in the sequence returns `None`.
    pub fn remove(&mut self, id: FrameId) -> Option<TitleFrame> {
        let node = self.nodes.get_mut(id.0)?.take()?;
        self.free.push(id.0);

        match node.prev {
            Some(prev) => {
                if let Some(p) = self.node_mut(prev) {
                    p.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(n) = self.node_mut(next) {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        if self.state == PlaybackState::Active(id) {
            self.enter(node.next);
        }

        self.len -= 1;
        Some(node.frame)
    }

    /// Drop every frame and return to [`PlaybackState::NotStarted`].
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Point the cursor at the head with a fresh countdown.
    pub fn set_cursor_at_first_frame(&mut self) {
        self.accelerate = false;
        self.enter(self.head);
    }

    /// Make `id` current with its full lifetime, or go past-end on `None`.
    fn enter(&mut self, id: Option<FrameId>) {
        self.state = PlaybackState::PastEnd;
        if let Some(id) = id {
            if let Some(node) = self.node_mut(id) {
                node.frame.rewind();
                self.state = PlaybackState::Active(id);
            }
        }
    }

    /// Advance one tick.
    ///
    /// The current frame's countdown drops by one; when it runs out the
    /// cursor moves to the next frame and the accelerate signal takes that
    /// frame's flag. On any other tick the signal is cleared.
    pub fn set_cursor_at_next_frame(&mut self) {
        let PlaybackState::Active(current) = self.state else {
            return;
        };

        self.accelerate = false;
        let Some(node) = self.node_mut(current) else {
            self.state = PlaybackState::PastEnd;
            return;
        };

        node.frame.curr_iteration -= 1;
        if node.frame.curr_iteration > 0 {
            return;
        }

        let next = node.next;
        self.enter(next);
        match self.current().map(TitleFrame::accelerate) {
            Some(accelerate) => self.accelerate = accelerate,
            None => tracing::debug!("Title playback reached the end of the sequence"),
        }
    }

    pub fn is_cursor_after_last_frame(&self) -> bool {
        self.state == PlaybackState::PastEnd
    }

    /// The current frame, if playback is active.
    pub fn current(&self) -> Option<&TitleFrame> {
        match self.state {
            PlaybackState::Active(id) => self.get(id),
            _ => None,
        }
    }

    /// The accelerate signal as of the last tick; `false` unless a frame is current.
    pub fn accelerate_signal(&self) -> bool {
        self.current().is_some() && self.accelerate
    }

    fn node(&self, id: FrameId) -> Option<&FrameNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: FrameId) -> Option<&mut FrameNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }
}
