use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Screens the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    ModeSelection,
    Search,
    SearchSummary,
    Grid,
    ModelDetail,
    TrainingConfig,
    ProteinSearch,
}

/// Serializable view of the navigator state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationSnapshot {
    pub active: View,
    pub back: Vec<View>,
    pub forward: Vec<View>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Back/forward history of screens, independent of browser history.
///
/// The back stack always holds the root at index 0 and the active view on
/// top. Pushing clears the forward stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNavigator {
    back: Vec<View>,
    forward: VecDeque<View>,
}

impl Default for ViewNavigator {
    fn default() -> Self {
        Self::new(View::default())
    }
}

impl ViewNavigator {
    pub fn new(root: View) -> Self {
        Self {
            back: vec![root],
            forward: VecDeque::new(),
        }
    }

    pub fn active(&self) -> View {
        // back is never empty
        self.back[self.back.len() - 1]
    }

    pub fn push(&mut self, view: View) {
        self.back.push(view);
        self.forward.clear();
    }

    pub fn back(&mut self) {
        if self.back.len() <= 1 {
            return;
        }
        if let Some(view) = self.back.pop() {
            self.forward.push_front(view);
        }
    }

    pub fn forward(&mut self) {
        if let Some(view) = self.forward.pop_front() {
            self.back.push(view);
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.back.len() > 1
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            active: self.active(),
            back: self.back.clone(),
            forward: self.forward.iter().copied().collect(),
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
        }
    }
}
