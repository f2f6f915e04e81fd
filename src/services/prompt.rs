//! System prompt construction.

use crate::api::models::RequestContext;

/// Fixed persona instructions sent with every request.
pub const SYSTEM_PROMPT: &str = "You are Nudge, a decisive AI assistant that makes decisions for users. CRITICAL: You MUST respond in MAXIMUM 2 sentences. Make ONE clear decision - do NOT give options or present choices. Be direct and decisive. Tell the user exactly what to do, not what they could do. No fluff, just one actionable decision.";

const CONTEXT_TRAILER: &str = " Use this context to give relevant, timely advice.";

/// Build the natural-language context suffix appended to the system prompt.
///
/// Returns an empty string when no context was supplied. Coordinates are
/// rounded to two decimal places.
pub fn build_context_suffix(context: Option<&RequestContext>) -> String {
    let Some(context) = context else {
        return String::new();
    };

    let mut suffix = format!(
        "\n\nCONTEXT: Current date is {}, time is {} ({}).",
        context.date, context.time, context.timezone
    );
    if let Some(location) = &context.location {
        suffix.push_str(&format!(
            " User's location: {}°N, {}°E.",
            to_fixed_2(location.latitude),
            to_fixed_2(location.longitude)
        ));
    }
    suffix.push_str(CONTEXT_TRAILER);
    suffix
}

/// Format a coordinate with two decimals.
///
/// Exact ties round away from zero (`37.125` -> `37.13`) and negative zero
/// prints as `0.00`, the way browser clients render the same values.
/// `{:.2}` alone rounds exact ties to even.
pub fn to_fixed_2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs.is_infinite() {
        return format!("{}Infinity", sign);
    }

    // A value sits exactly halfway between two hundredths only when it is an
    // odd multiple of 1/8; multiplying by 8 and 100 is exact in that range.
    let eighths = abs * 8.0;
    if abs < 1e15 && eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let hundredths = (abs * 100.0).ceil() as u64;
        return format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100);
    }

    format!("{}{:.2}", sign, abs)
}

/// Full system prompt: persona followed by the optional context suffix.
pub fn build_system_prompt(context: Option<&RequestContext>) -> String {
    let mut prompt = String::from(SYSTEM_PROMPT);
    prompt.push_str(&build_context_suffix(context));
    prompt
}
