// Text normalization — raw post text to scorer-ready text.
//
// The cleaning rules run in a fixed order because later rules depend on
// earlier ones leaving clean token boundaries. Mentions and short URLs
// are only stripped when they start the string or follow a character
// outside [A-Za-z0-9._-], which keeps email-like and mid-word `@` or
// URL fragments intact.

use std::sync::LazyLock;

use regex_lite::Regex;

// `@` followed by a letter then letters/digits/hyphen/underscore. The
// leading capture stands in for a lookbehind: the boundary character is
// matched and re-inserted by the replacement.
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^A-Za-z0-9_.-])@[A-Za-z]+[A-Za-z0-9_-]+").expect("mention regex")
});

static NOISE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n|&gt;|RT :").expect("noise regex"));

static SHORT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^A-Za-z0-9_.-])https://t\.co/[A-Za-z0-9_,'-]+").expect("short-url regex")
});

/// Clean raw post text for scoring. Pure and total: malformed input
/// yields an empty or partially-cleaned string, never an error.
///
/// Order matters: mentions, then newline/entity/`RT :` noise, then
/// t.co short URLs, then supplementary-plane characters (emoji), then
/// a surrounding-whitespace trim.
pub fn normalize(raw: &str) -> String {
    let text = MENTION_RE.replace_all(raw, "${1}");
    let text = NOISE_RE.replace_all(&text, "");
    let text = SHORT_URL_RE.replace_all(&text, "${1}");
    let text: String = text.chars().filter(|c| (*c as u32) < 0x10000).collect();
    text.trim().to_string()
}
