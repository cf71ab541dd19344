//! Deferred rescoping
//!
//! Style element changes do not rescope immediately. Hosts are queued and
//! the embedder drains the queue once per animation frame.

use std::collections::VecDeque;

use shady_dom::NodeId;

/// FIFO of hosts waiting for the next frame
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: VecDeque<NodeId>,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a host; repeated requests are kept
    pub fn request(&mut self, host: NodeId) {
        self.pending.push_back(host);
    }

    /// Take everything queued so far. Requests made while the frame runs
    /// wait for the next one.
    pub fn take_frame(&mut self) -> Vec<NodeId> {
        self.frames += 1;
        self.pending.drain(..).collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of frames taken
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shady_dom::DomTree;

    #[test]
    fn test_fifo_without_dedup() {
        let mut tree = DomTree::new();
        let a = tree.create_element("x-a");
        let b = tree.create_element("x-b");

        let mut frames = FrameScheduler::new();
        frames.request(a);
        frames.request(b);
        frames.request(a);
        assert_eq!(frames.pending_len(), 3);

        assert_eq!(frames.take_frame(), vec![a, b, a]);
        assert_eq!(frames.pending_len(), 0);
        assert!(frames.take_frame().is_empty());
        assert_eq!(frames.frame_count(), 2);
    }
}
