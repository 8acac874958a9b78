use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "All News")]
    All,
    #[serde(rename = "Trending")]
    Trending,
    #[serde(rename = "My Area")]
    MyArea,
    #[serde(rename = "Kolkata")]
    Kolkata,
    #[serde(rename = "Districts")]
    Districts,
    #[serde(rename = "West Bengal")]
    State,
    #[serde(rename = "Breaking")]
    Breaking,
}

impl Category {
    /// Tab order on the home screen.
    pub const TABS: [Category; 7] = [
        Category::All,
        Category::Trending,
        Category::MyArea,
        Category::Breaking,
        Category::Kolkata,
        Category::Districts,
        Category::State,
    ];

    /// Categories an editor may publish under.
    pub const PUBLISHABLE: [Category; 4] = [
        Category::Breaking,
        Category::Kolkata,
        Category::Districts,
        Category::State,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All News",
            Category::Trending => "Trending",
            Category::MyArea => "My Area",
            Category::Kolkata => "Kolkata",
            Category::Districts => "Districts",
            Category::State => "West Bengal",
            Category::Breaking => "Breaking",
        }
    }

    pub fn cycle(&self) -> Self {
        cycle_in(&Self::TABS, *self)
    }

    pub fn cycle_publishable(&self) -> Self {
        cycle_in(&Self::PUBLISHABLE, *self)
    }
}

fn cycle_in(order: &[Category], current: Category) -> Category {
    let next = order
        .iter()
        .position(|c| *c == current)
        .map(|i| (i + 1) % order.len())
        .unwrap_or(0);
    order[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_around_tabs() {
        let mut category = Category::All;
        for _ in 0..Category::TABS.len() {
            category = category.cycle();
        }
        assert_eq!(category, Category::All);
        assert_eq!(Category::State.cycle(), Category::All);
    }

    #[test]
    fn publishable_cycle_skips_virtual_categories() {
        assert_eq!(Category::State.cycle_publishable(), Category::Breaking);
        assert_eq!(Category::Trending.cycle_publishable(), Category::Breaking);
    }

    #[test]
    fn wire_names_match_labels() {
        for category in Category::TABS {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }
}
