// src/crawl/frontier.rs
// =============================================================================
// The frontier: URLs discovered but not fetched yet.
//
// It is a plain FIFO queue, which is what makes the crawl breadth-first.
// It does NOT remove duplicates. The same URL may sit in the queue several
// times; the scheduler drops the extra copies when it pops them and finds
// them already visited. Keeping it that way decides which discovery of a URL
// "wins" the fetch: always the first one enqueued.
// =============================================================================

use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
}

impl Frontier {
    // A frontier holding exactly the seed
    pub fn seeded(seed: impl Into<String>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(seed.into());
        Self { queue }
    }

    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn extend<I>(&mut self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.queue.extend(urls);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_frontier_holds_only_the_seed() {
        let mut frontier = Frontier::seeded("https://example.com/");
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.pop().as_deref(), Some("https://example.com/"));
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_fifo_order_with_duplicates() {
        let mut frontier = Frontier::default();
        frontier.extend(vec!["a".to_string(), "b".to_string()]);
        frontier.extend(vec!["a".to_string()]);

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop().as_deref(), Some("a"));
        assert_eq!(frontier.pop().as_deref(), Some("b"));
        assert_eq!(frontier.pop().as_deref(), Some("a"));
    }
}
