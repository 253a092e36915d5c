use serde::{Deserialize, Serialize};

/// One timed focus exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Instruction line shown under the exercise area.
    #[serde(default)]
    pub instructions: String,
    pub duration_secs: u64,
}

/// Ordered, fixed list of focus exercises for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCatalogue {
    pub exercises: Vec<ExerciseDefinition>,
}

impl ExerciseCatalogue {
    /// Sustained, selective and divided attention, one minute each.
    pub fn standard() -> Self {
        Self {
            exercises: vec![
                ExerciseDefinition {
                    id: "sustained".into(),
                    title: "Sustained Attention".into(),
                    description: "Track the moving object while ignoring distractions".into(),
                    instructions:
                        "Follow the blue circle with your eyes, try to ignore the gray distractions."
                            .into(),
                    duration_secs: 60,
                },
                ExerciseDefinition {
                    id: "selective".into(),
                    title: "Selective Attention".into(),
                    description: "Find specific items in the visual scene".into(),
                    instructions:
                        "Focus on finding patterns in the movements while maintaining concentration."
                            .into(),
                    duration_secs: 60,
                },
                ExerciseDefinition {
                    id: "divided".into(),
                    title: "Divided Attention".into(),
                    description: "Complete two tasks simultaneously".into(),
                    instructions:
                        "Mentally track both the position and the movement pattern simultaneously."
                            .into(),
                    duration_secs: 60,
                },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExerciseDefinition> {
        self.exercises.get(index)
    }

    pub fn total_duration_secs(&self) -> u64 {
        self.exercises.iter().map(|e| e.duration_secs).sum()
    }
}

impl Default for ExerciseCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalogue_has_three_exercises() {
        let c = ExerciseCatalogue::default();
        assert_eq!(c.len(), 3);
        let ids: Vec<_> = c.exercises.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["sustained", "selective", "divided"]);
    }

    #[test]
    fn total_duration() {
        assert_eq!(ExerciseCatalogue::default().total_duration_secs(), 180);
    }
}
