use indexmap::IndexMap;

use super::task::Category;

/// Rolling "within N weeks" cutoff for the time filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
}

impl TimeWindow {
    pub fn weeks(self) -> u32 {
        match self {
            TimeWindow::OneWeek => 1,
            TimeWindow::TwoWeeks => 2,
            TimeWindow::ThreeWeeks => 3,
        }
    }

    pub fn from_weeks(weeks: u32) -> Option<Self> {
        match weeks {
            1 => Some(TimeWindow::OneWeek),
            2 => Some(TimeWindow::TwoWeeks),
            3 => Some(TimeWindow::ThreeWeeks),
            _ => None,
        }
    }

    /// Days ahead of today covered by the window
    pub fn days(self) -> u32 {
        self.weeks() * 7
    }

    /// Label shown in the window selector (`None` = no cutoff)
    pub fn label(window: Option<Self>) -> &'static str {
        match window {
            None => "All dates",
            Some(TimeWindow::OneWeek) => "Within 1 week",
            Some(TimeWindow::TwoWeeks) => "Within 2 weeks",
            Some(TimeWindow::ThreeWeeks) => "Within 3 weeks",
        }
    }

    /// All → 1 week → 2 weeks → 3 weeks → All
    pub fn cycle(window: Option<Self>) -> Option<Self> {
        match window {
            None => Some(TimeWindow::OneWeek),
            Some(TimeWindow::OneWeek) => Some(TimeWindow::TwoWeeks),
            Some(TimeWindow::TwoWeeks) => Some(TimeWindow::ThreeWeeks),
            Some(TimeWindow::ThreeWeeks) => None,
        }
    }
}

/// Everything that narrows the visible task set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Case-insensitive substring matched against task names
    pub query: String,
    /// Per-category visibility, in display order
    pub categories: IndexMap<Category, bool>,
    pub window: Option<TimeWindow>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            query: String::new(),
            categories: Category::ALL.iter().map(|&c| (c, true)).collect(),
            window: None,
        }
    }
}

impl FilterState {
    /// Whether tasks of `category` are currently shown. Missing entries count as shown.
    pub fn is_shown(&self, category: Category) -> bool {
        self.categories.get(&category).copied().unwrap_or(true)
    }

    pub fn set_shown(&mut self, category: Category, shown: bool) {
        self.categories.insert(category, shown);
    }

    /// Flip a category's visibility, returning the new value
    pub fn toggle(&mut self, category: Category) -> bool {
        let shown = !self.is_shown(category);
        self.set_shown(category, shown);
        shown
    }

}
