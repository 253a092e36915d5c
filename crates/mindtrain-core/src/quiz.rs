//! Knowledge quiz, the second phase of a session.
//!
//! Linear: answer the current question once, read the explanation, move on.
//! The runner keeps its own score and never talks to the session controller;
//! finishing the quiz does not end the session.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Knowledge,
    Strategy,
}

impl QuestionKind {
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Knowledge => "Knowledge Question",
            QuestionKind::Strategy => "Strategy Application",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub kind: QuestionKind,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

/// The built-in question bank.
pub fn standard_questions() -> Vec<QuizQuestion> {
    fn q(
        id: u32,
        kind: QuestionKind,
        question: &str,
        options: [&str; 4],
        correct_answer: usize,
        explanation: &str,
    ) -> QuizQuestion {
        QuizQuestion {
            id,
            kind,
            question: question.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer,
            explanation: explanation.into(),
        }
    }

    vec![
        q(
            1,
            QuestionKind::Knowledge,
            "Which part of the brain is often underdeveloped in people with ADHD?",
            ["Prefrontal cortex", "Temporal lobe", "Cerebellum", "Amygdala"],
            0,
            "The prefrontal cortex, responsible for executive functions like planning and impulse control, is often underdeveloped in people with ADHD.",
        ),
        q(
            2,
            QuestionKind::Knowledge,
            "Which of these is NOT an effective environmental strategy for ADHD?",
            [
                "Using noise-cancelling headphones",
                "Working in complete silence at all times",
                "Creating a dedicated workspace",
                "Using visual reminders",
            ],
            1,
            "Working in complete silence is not always best for everyone with ADHD. Many people with ADHD actually focus better with some background noise.",
        ),
        q(
            3,
            QuestionKind::Strategy,
            "You have a big project due in two weeks. What's the most effective approach?",
            [
                "Wait until you feel motivated to start",
                "Break it into small tasks with deadlines",
                "Pull an all-nighter the day before",
                "Rely on the pressure of the deadline",
            ],
            1,
            "Breaking large projects into smaller, manageable tasks with specific deadlines helps overcome procrastination and overwhelm.",
        ),
        q(
            4,
            QuestionKind::Strategy,
            "You keep forgetting important items when leaving home. What should you try?",
            [
                "Accept that forgetfulness is just part of ADHD",
                "Create a checklist by the door",
                "Buy duplicates of everything",
                "Leave earlier each day",
            ],
            1,
            "Creating a visual checklist by the door provides an external reminder system, which compensates for working memory challenges.",
        ),
    ]
}

/// Result of answering one question.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerFeedback {
    pub question: usize,
    pub selected: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: String,
    pub score: u32,
}

/// Where the quiz stands after `next_question()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizProgress {
    Question { index: usize },
    Completed { score: u32, total: usize },
}

#[derive(Debug, Clone)]
pub struct QuizRunner {
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<usize>,
    score: u32,
    completed: bool,
}

impl QuizRunner {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let completed = questions.is_empty();
        Self {
            questions,
            current: 0,
            selected: None,
            score: 0,
            completed,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.completed {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// 0.0 .. 100.0, counting the current question once it is answered.
    pub fn progress_pct(&self) -> f64 {
        if self.questions.is_empty() || self.completed {
            return 100.0;
        }
        let done = self.current + usize::from(self.selected.is_some());
        done as f64 / self.questions.len() as f64 * 100.0
    }

    /// Answer the current question. The first answer is final.
    pub fn select_option(&mut self, index: usize) -> Result<AnswerFeedback, QuizError> {
        if self.completed {
            return Err(QuizError::Completed);
        }
        if self.selected.is_some() {
            return Err(QuizError::AlreadyAnswered {
                question: self.current,
            });
        }
        let question = &self.questions[self.current];
        if index >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                index,
                len: question.options.len(),
            });
        }

        let is_correct = index == question.correct_answer;
        if is_correct {
            self.score += 1;
        }
        self.selected = Some(index);
        Ok(AnswerFeedback {
            question: self.current,
            selected: index,
            correct_answer: question.correct_answer,
            is_correct,
            explanation: question.explanation.clone(),
            score: self.score,
        })
    }

    pub fn next_question(&mut self) -> Result<QuizProgress, QuizError> {
        if self.completed {
            return Err(QuizError::Completed);
        }
        if self.selected.is_none() {
            return Err(QuizError::NotAnswered {
                question: self.current,
            });
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            Ok(QuizProgress::Question {
                index: self.current,
            })
        } else {
            self.completed = true;
            Ok(QuizProgress::Completed {
                score: self.score,
                total: self.questions.len(),
            })
        }
    }
}

impl Default for QuizRunner {
    fn default() -> Self {
        Self::new(standard_questions())
    }
}
