use eggtimer_core::preset;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(preset::list())?);
    Ok(())
}
