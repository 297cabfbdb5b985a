/// Map a provider condition text to a single emoji.
///
/// Case-insensitive substring match, first hit wins, checked in the order
/// sun/clear, cloud, rain, thunder, snow, fog/mist. Anything else is a rainbow.
pub fn condition_to_emoji(condition: &str) -> &'static str {
    let cond = condition.to_lowercase();
    let has = |needle: &str| cond.contains(needle);

    if has("sun") || has("clear") {
        "☀️"
    } else if has("cloud") {
        "☁️"
    } else if has("rain") {
        "🌧️"
    } else if has("thunder") {
        "⛈️"
    } else if has("snow") {
        "❄️"
    } else if has("fog") || has("mist") {
        "🌫️"
    } else {
        "🌈"
    }
}
