use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// A label outside the known set; shown with no filled bolts.
    Unknown,
}

impl Difficulty {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Легко" => Difficulty::Easy,
            "Средне" => Difficulty::Medium,
            "Сложно" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }

    /// Filled bolts on a three-bolt scale.
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Unknown => 0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub reps_per_set: u32,
    pub sets: u32,
    /// Seconds.
    pub rest_time_between_sets: u32,
    pub technique_description: String,
    pub technique_image_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    pub is_favorite: bool,
    pub name: String,
    pub author: String,
    pub muscle_group: String,
    pub main_image_name: String,
    pub workouts_per_week: u32,
    pub exercises: Vec<Exercise>,
    pub description: String,
    /// Localized label as stored in the content file.
    pub difficulty: String,
    /// Minutes.
    pub estimated_duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_calories_burned: Option<u32>,
}

impl Workout {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_label(&self.difficulty)
    }

    /// Shortens the description to at most `max_chars` characters, cutting at
    /// the last space so words are not split.
    pub fn description_preview(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            return self.description.clone();
        }
        let prefix: String = self.description.chars().take(max_chars).collect();
        match prefix.rfind(' ') {
            Some(pos) => prefix[..=pos].to_string(),
            None => prefix,
        }
    }
}
