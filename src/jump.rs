//! Label-driven quick jumps.
//!
//! Every occurrence of a search character gets a label, assigned round-robin
//! over the label alphabet. Typing a label narrows to that label's group and
//! relabels it, until one occurrence is left.

use crate::traits::TextBuffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpGroup {
    pub label: char,
    pub targets: Vec<usize>,
}

/// Result of starting or narrowing a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpStep {
    /// A single occurrence is left.
    Resolved(usize),
    /// More than one occurrence is left; labels were (re)assigned.
    Narrowed,
    /// Nothing matched.
    Aborted,
}

#[derive(Debug, Clone, Default)]
pub struct JumpIndex {
    groups: Vec<JumpGroup>,
}

impl JumpIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current label assignment, for hosts that draw labels.
    pub fn groups(&self) -> &[JumpGroup] {
        &self.groups
    }

    pub fn is_active(&self) -> bool {
        !self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn start<B: TextBuffer + ?Sized>(
        &mut self,
        buf: &B,
        search: char,
        labels: &[char],
        ignore_case: bool,
    ) -> JumpStep {
        let same = |c: char| {
            if ignore_case {
                c.to_lowercase().eq(search.to_lowercase())
            } else {
                c == search
            }
        };
        let targets: Vec<usize> = (0..buf.len_chars())
            .filter(|&i| buf.char_at(i).is_some_and(same))
            .collect();
        log::debug!("jump search {search:?}: {} matches", targets.len());
        self.settle(targets, labels)
    }

    pub fn advance(&mut self, label: char, labels: &[char]) -> JumpStep {
        let chosen = self
            .groups
            .iter()
            .position(|g| g.label.eq_ignore_ascii_case(&label))
            .map(|i| self.groups.swap_remove(i));
        match chosen {
            Some(group) => self.settle(group.targets, labels),
            None => {
                self.clear();
                JumpStep::Aborted
            }
        }
    }

    fn settle(&mut self, targets: Vec<usize>, labels: &[char]) -> JumpStep {
        match targets.as_slice() {
            [] => {
                self.clear();
                JumpStep::Aborted
            }
            [only] => {
                let only = *only;
                self.clear();
                JumpStep::Resolved(only)
            }
            _ if labels.is_empty() => {
                self.clear();
                JumpStep::Aborted
            }
            _ => {
                self.groups = partition(&targets, labels);
                JumpStep::Narrowed
            }
        }
    }
}

/// Deal targets round-robin onto labels, dropping labels left empty.
fn partition(targets: &[usize], labels: &[char]) -> Vec<JumpGroup> {
    let mut groups: Vec<JumpGroup> = labels
        .iter()
        .map(|&label| JumpGroup {
            label,
            targets: Vec::new(),
        })
        .collect();
    for (i, &target) in targets.iter().enumerate() {
        groups[i % labels.len()].targets.push(target);
    }
    groups.retain(|g| !g.targets.is_empty());
    groups
}
