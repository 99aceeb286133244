//! Course Type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Dish category of a kitchen sheet (entrée / plat / dessert)
///
/// The declaration order is the service order, so `Ord` sorts courses the
/// way the kitchen sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CourseType {
    Entree,
    Plat,
    Dessert,
}

impl CourseType {
    /// All courses in service order
    pub const ALL: [CourseType; 3] = [CourseType::Entree, CourseType::Plat, CourseType::Dessert];

    /// Wire / display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entree => "entrée",
            Self::Plat => "plat",
            Self::Dessert => "dessert",
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown course type: {0}")]
pub struct UnknownCourseType(pub String);

impl FromStr for CourseType {
    type Err = UnknownCourseType;

    /// Case-insensitive, accent-tolerant (`entree`, `Entrées` ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase().replace('é', "e");
        match folded.as_str() {
            "entree" | "entrees" => Ok(Self::Entree),
            "plat" | "plats" => Ok(Self::Plat),
            "dessert" | "desserts" => Ok(Self::Dessert),
            _ => Err(UnknownCourseType(s.to_string())),
        }
    }
}

impl TryFrom<String> for CourseType {
    type Error = UnknownCourseType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CourseType> for String {
    fn from(value: CourseType) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!("entrée".parse::<CourseType>().unwrap(), CourseType::Entree);
        assert_eq!("Entree".parse::<CourseType>().unwrap(), CourseType::Entree);
        assert_eq!("ENTRÉES".parse::<CourseType>().unwrap(), CourseType::Entree);
        assert_eq!(" plat ".parse::<CourseType>().unwrap(), CourseType::Plat);
        assert!("fromage".parse::<CourseType>().is_err());
    }

    #[test]
    fn test_serde_uses_french_labels() {
        let json = serde_json::to_string(&CourseType::Entree).unwrap();
        assert_eq!(json, "\"entrée\"");
        let back: CourseType = serde_json::from_str("\"entree\"").unwrap();
        assert_eq!(back, CourseType::Entree);
    }

    #[test]
    fn test_service_order() {
        let mut courses = vec![CourseType::Dessert, CourseType::Entree, CourseType::Plat];
        courses.sort();
        assert_eq!(courses, CourseType::ALL.to_vec());
    }
}
