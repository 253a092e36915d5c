use clap::Args;
use mindtrain_core::quiz::standard_questions;
use mindtrain_core::{QuizProgress, QuizRunner};

use super::print_json_line;

#[derive(Args)]
pub struct QuizArgs {
    /// Zero-based option indices, one per question (e.g. "0,1,1,1").
    /// Without answers the question bank is printed.
    #[arg(long, value_delimiter = ',')]
    answers: Vec<usize>,
}

pub fn run(args: QuizArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.answers.is_empty() {
        println!("{}", serde_json::to_string_pretty(&standard_questions())?);
        return Ok(());
    }

    let mut quiz = QuizRunner::new(standard_questions());
    for &choice in &args.answers {
        let feedback = quiz.select_option(choice)?;
        print_json_line(&feedback)?;
        if let QuizProgress::Completed { score, total } = quiz.next_question()? {
            println!("score: {score}/{total}");
            return Ok(());
        }
    }

    println!(
        "answered {} of {} questions (score so far: {})",
        quiz.current_index(),
        quiz.total(),
        quiz.score()
    );
    Ok(())
}
