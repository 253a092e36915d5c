use mindtrain_core::ExerciseCatalogue;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let catalogue = ExerciseCatalogue::standard();
    println!("{}", serde_json::to_string_pretty(&catalogue.exercises)?);
    Ok(())
}
