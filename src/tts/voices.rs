//! Voice catalog returned by `GET /voices`.

use super::types::Gender;
use serde::{Deserialize, Serialize};

/// A cloned voice the server can use as a preset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub gender: Gender,
}

/// Voice names grouped by gender, as served by the voice listing endpoint:
/// `{"Man": ["Achird", ...], "Woman": ["Aoede", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCatalog {
    #[serde(rename = "Man", default)]
    man: Vec<String>,
    #[serde(rename = "Woman", default)]
    woman: Vec<String>,
}

impl VoiceCatalog {
    pub fn new(man: Vec<String>, woman: Vec<String>) -> Self {
        Self { man, woman }
    }

    pub fn by_gender(&self, gender: Gender) -> &[String] {
        match gender {
            Gender::Man => &self.man,
            Gender::Woman => &self.woman,
        }
    }

    /// Flattened listing, men first, server order within each group.
    pub fn voices(&self) -> Vec<Voice> {
        self.iter()
            .map(|(name, gender)| Voice {
                name: name.to_string(),
                gender,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Gender)> + '_ {
        self.man
            .iter()
            .map(|n| (n.as_str(), Gender::Man))
            .chain(self.woman.iter().map(|n| (n.as_str(), Gender::Woman)))
    }

    pub fn contains(&self, name: &str, gender: Gender) -> bool {
        self.by_gender(gender).iter().any(|n| n == name)
    }

    /// Genders under which `name` is available.
    pub fn genders_of(&self, name: &str) -> Vec<Gender> {
        self.iter()
            .filter(|(n, _)| *n == name)
            .map(|(_, g)| g)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.man.len() + self.woman.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
