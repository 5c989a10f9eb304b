use np_core::NavigationState;

/// Session history with a cursor, like a browser tab's back/forward stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionHistory {
    entries: Vec<NavigationState>,
    cursor: usize,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `state` after the cursor, dropping any forward entries.
    pub fn push(&mut self, state: NavigationState) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(state);
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrites the entry under the cursor.
    pub fn replace(&mut self, state: NavigationState) {
        match self.entries.get_mut(self.cursor) {
            Some(entry) => *entry = state,
            None => self.push(state),
        }
    }

    pub fn back(&mut self) -> Option<&NavigationState> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    pub fn forward(&mut self) -> Option<&NavigationState> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn current(&self) -> Option<&NavigationState> {
        self.entries.get(self.cursor)
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Location strings of every entry, oldest first.
    pub fn urls(&self) -> Vec<String> {
        self.entries.iter().map(NavigationState::to_query).collect()
    }
}
