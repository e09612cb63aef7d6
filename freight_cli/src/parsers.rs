use std::time::Duration;

pub fn parse_timeout(input: &str) -> Result<Duration, String> {
    freight_estimator::config::parse_duration(input)
        .ok_or_else(|| String::from("Invalid duration"))
}

pub fn parse_surcharge(input: &str) -> Result<f64, String> {
    let factor: f64 = input
        .parse()
        .map_err(|_| format!("Invalid number: {}", input))?;

    if (1.0..=3.0).contains(&factor) {
        Ok(factor)
    } else {
        Err(String::from("Surcharge factor must be between 1.0 and 3.0"))
    }
}
