//! Derived city health index.

/// 0-100 health index of a city; 100 is best.
///
/// Starts at 100 and subtracts penalties for air quality, crime and
/// temperature extremes. Never increases as any input worsens.
pub fn city_health_index(aqi: u32, crime_rate: f64, temperature: f64) -> u8 {
    let aqi_penalty = match aqi {
        a if a > 200 => 50,
        a if a > 150 => 35,
        a if a > 100 => 20,
        a if a > 50 => 10,
        _ => 0,
    };

    let crime_penalty = if crime_rate > 1000.0 {
        30
    } else if crime_rate > 500.0 {
        20
    } else if crime_rate > 300.0 {
        10
    } else if crime_rate > 150.0 {
        5
    } else {
        0
    };

    let temperature_penalty = if temperature > 40.0 || temperature < 10.0 {
        20
    } else if temperature > 35.0 || temperature < 15.0 {
        10
    } else {
        0
    };

    let index = 100 - aqi_penalty - crime_penalty - temperature_penalty;
    index.clamp(0, 100) as u8
}
