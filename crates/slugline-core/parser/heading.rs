//! Scene heading recognizer shared by the FDX and Fountain parsers
//!
//! A candidate is a heading when, after leading whitespace, it opens with
//! `INT/EXT`, `I/E`, `INT` or `EXT` (any case) followed by `.` or
//! whitespace. The rest of the line is split on a trailing time-of-day
//! marker: a dash or en-dash, then one of the six time-of-day words, then
//! nothing but whitespace or punctuation.
//!
//! ```text
//! INT. WAREHOUSE - NIGHT      -> INT     | WAREHOUSE        | NIGHT
//! i/e car – dusk.             -> INT/EXT | car              | DUSK
//! EXT. HOUSE - KITCHEN - DAY  -> EXT     | HOUSE - KITCHEN  | DAY
//! INT. KITCHEN                -> INT     | KITCHEN          | DAY (default)
//! INT.                        -> INT     | INT.             | DAY (fallback)
//! ```

use super::scene::{IntExt, TimeOfDay};
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening token and separator. Alternation is leftmost-first, so the
/// longer `INT/EXT` must precede `INT`.
static OPENING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(INT/EXT|I/E|INT|EXT)(?:\.|\s)").expect("valid opening token pattern")
});

/// Trailing time-of-day marker. The lazy location group combined with the
/// end anchor selects the last qualifying dash.
static TIME_OF_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)\s*[-\x{2013}]\s*(DAY|NIGHT|MORNING|EVENING|DAWN|DUSK)[\s\p{P}]*$")
        .expect("valid time-of-day pattern")
});

/// Fields extracted from a recognized heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub int_ext: IntExt,
    pub location: String,
    pub time_of_day: TimeOfDay,
    /// Location could not be isolated and holds the whole candidate
    pub degraded: bool,
}

/// Recognize a scene heading
///
/// Returns `None` when the candidate does not open with an interior/exterior
/// token. A candidate that opens correctly but yields no location is still
/// returned, with the whole trimmed candidate as its location.
///
/// # Example
///
/// ```rust
/// use slugline_core::parser::recognize_heading;
/// use slugline_core::{IntExt, TimeOfDay};
///
/// let heading = recognize_heading("INT. WAREHOUSE - NIGHT").unwrap();
/// assert_eq!(heading.int_ext, IntExt::Int);
/// assert_eq!(heading.location, "WAREHOUSE");
/// assert_eq!(heading.time_of_day, TimeOfDay::Night);
///
/// assert!(recognize_heading("She enters.").is_none());
/// ```
pub fn recognize_heading(candidate: &str) -> Option<HeadingMatch> {
    let candidate = candidate.trim();
    let opening = OPENING.captures(candidate)?;

    let int_ext = IntExt::from_token(&opening[1]).unwrap_or_default();
    let remainder = &candidate[opening.get(0).map_or(0, |m| m.end())..];

    let (location, time_of_day) = match TIME_OF_DAY.captures(remainder) {
        Some(marker) => (
            marker.get(1).map_or("", |m| m.as_str()).trim(),
            TimeOfDay::from_token(&marker[2]).unwrap_or_default(),
        ),
        None => (remainder.trim(), TimeOfDay::Day),
    };

    let degraded = location.is_empty();
    let location = if degraded { candidate } else { location };

    Some(HeadingMatch {
        int_ext,
        location: location.to_string(),
        time_of_day,
        degraded,
    })
}

/// Whether the candidate opens with an interior/exterior token
pub fn is_scene_heading(candidate: &str) -> bool {
    OPENING.is_match(candidate.trim())
}
