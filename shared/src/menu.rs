//! Menu catalogue views
//!
//! Filter then sort over the in-memory dish list, plus per-course counts.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{CourseType, MenuItem};

/// Catalogue filter; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    pub query: String,
    pub course: Option<CourseType>,
    pub active: Option<bool>,
}

impl MenuFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        if self.course.is_some_and(|course| course != item.course) {
            return false;
        }
        if self.active.is_some_and(|active| active != item.active) {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        query.is_empty() || item.name.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Course,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Column sort state; no key keeps backend order (by name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuSort {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl MenuSort {
    pub fn by(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Header click: same key flips the direction, another key starts ascending
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.reversed();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Asc;
        }
    }

    fn compare(&self, a: &MenuItem, b: &MenuItem) -> Ordering {
        let ordering = match self.key {
            None => return Ordering::Equal,
            Some(SortKey::Course) => a.course.cmp(&b.course),
            // inactive first when ascending
            Some(SortKey::Active) => a.active.cmp(&b.active),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Filter, then stable-sort
pub fn apply(items: &[MenuItem], filter: &MenuFilter, sort: &MenuSort) -> Vec<MenuItem> {
    let mut view: Vec<MenuItem> = items.iter().filter(|it| filter.matches(it)).cloned().collect();
    view.sort_by(|a, b| sort.compare(a, b));
    view
}

/// Dishes per course over the whole catalogue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CourseCounts {
    pub entree: usize,
    pub plat: usize,
    pub dessert: usize,
    pub total: usize,
}

impl CourseCounts {
    pub fn of(items: &[MenuItem]) -> Self {
        items.iter().fold(Self::default(), |mut counts, item| {
            match item.course {
                CourseType::Entree => counts.entree += 1,
                CourseType::Plat => counts.plat += 1,
                CourseType::Dessert => counts.dessert += 1,
            }
            counts.total += 1;
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn dish(name: &str, course: CourseType, active: bool) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            name: name.into(),
            course,
            active,
        }
    }

    fn catalogue() -> Vec<MenuItem> {
        vec![
            dish("Baba au rhum", CourseType::Dessert, true),
            dish("Blanquette", CourseType::Plat, false),
            dish("Oeufs mimosa", CourseType::Entree, true),
            dish("Poisson du jour", CourseType::Plat, true),
            dish("Velouté", CourseType::Entree, false),
        ]
    }

    fn names(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_filter_combines_criteria() {
        let filter = MenuFilter {
            query: " OEUF ".into(),
            ..Default::default()
        };
        assert_eq!(names(&apply(&catalogue(), &filter, &MenuSort::default())), ["Oeufs mimosa"]);

        let filter = MenuFilter {
            course: Some(CourseType::Plat),
            active: Some(true),
            ..Default::default()
        };
        assert_eq!(names(&apply(&catalogue(), &filter, &MenuSort::default())), ["Poisson du jour"]);
    }

    #[test]
    fn test_course_sort_is_stable_and_reversible() {
        let items = catalogue();
        let asc = apply(&items, &MenuFilter::default(), &MenuSort::by(SortKey::Course, SortDirection::Asc));
        assert_eq!(
            names(&asc),
            ["Oeufs mimosa", "Velouté", "Blanquette", "Poisson du jour", "Baba au rhum"]
        );

        let desc = apply(&items, &MenuFilter::default(), &MenuSort::by(SortKey::Course, SortDirection::Desc));
        assert_eq!(names(&desc)[0], "Baba au rhum");
    }

    #[test]
    fn test_active_sort_puts_inactive_first() {
        let sorted = apply(&catalogue(), &MenuFilter::default(), &MenuSort::by(SortKey::Active, SortDirection::Asc));
        assert!(!sorted[0].active);
        assert!(!sorted[1].active);
        assert!(sorted[2..].iter().all(|i| i.active));
    }

    #[test]
    fn test_toggle() {
        let mut sort = MenuSort::default();
        sort.toggle(SortKey::Course);
        assert_eq!(sort, MenuSort::by(SortKey::Course, SortDirection::Asc));
        sort.toggle(SortKey::Course);
        assert_eq!(sort.direction, SortDirection::Desc);
        sort.toggle(SortKey::Active);
        assert_eq!(sort, MenuSort::by(SortKey::Active, SortDirection::Asc));
    }

    #[test]
    fn test_counts() {
        let counts = CourseCounts::of(&catalogue());
        assert_eq!(counts, CourseCounts { entree: 2, plat: 2, dessert: 1, total: 5 });
    }
}
