//! Construction frame stack.
//!
//! One frame per construct that is open or completed but not yet attached to
//! its parent. The bottom frame is the top-level expression of the current
//! parameter, field, temporary or annotation.

use super::arena::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub node: NodeId,
    /// Slot opened by a slot begin-event and not yet closed.
    pub slot: Option<usize>,
    /// The construct received its end-event (leaves are sealed on arrival).
    pub sealed: bool,
}

#[derive(Debug, Default)]
pub struct FrameStack {
    frames: Vec<Frame>,
}

impl FrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_open(&mut self, node: NodeId) {
        self.frames.push(Frame {
            node,
            slot: None,
            sealed: false,
        });
    }

    pub fn push_sealed(&mut self, node: NodeId) {
        self.frames.push(Frame {
            node,
            slot: None,
            sealed: true,
        });
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    #[inline]
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
