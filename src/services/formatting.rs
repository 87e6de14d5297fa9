//! Protect code and math spans from a translation pass.
//!
//! DESIGN
//! ======
//! Three regex passes run in order: fenced code blocks, inline code, then
//! equations. Each match is swapped for a numbered placeholder such as
//! `{CODE_BLOCK_0}`. A later pass can capture text that already holds an
//! earlier placeholder (an equation wrapping inline code), so restoration
//! walks the passes backwards.
//!
//! Placeholder-shaped text already present in the input is stashed first
//! under its own `LITERAL` label and restored last, so a restore never
//! rewrites prose it did not emit.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```[\s\S]*?```").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").expect("valid regex"));
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(CODE_BLOCK|INLINE_CODE|EQUATION|LITERAL)_(\d+)\}").expect("valid regex")
});
static EQUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\$[\s\S]*?\$\$|\$[^$]*\$").expect("valid regex"));

/// Text with protected spans swapped out, plus what is needed to put them back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Protected {
    pub text: String,
    code_blocks: Vec<String>,
    inline_code: Vec<String>,
    equations: Vec<String>,
    literals: Vec<String>,
}

fn stash(re: &Regex, text: &str, label: &str, spans: &mut Vec<String>) -> String {
    re.replace_all(text, |caps: &Captures<'_>| {
        spans.push(caps[0].to_string());
        format!("{{{label}_{}}}", spans.len() - 1)
    })
    .into_owned()
}

/// One pass over `text`; replacement spans are never rescanned.
fn unstash(text: String, label: &str, spans: &[String]) -> String {
    if spans.is_empty() {
        return text;
    }
    PLACEHOLDER
        .replace_all(&text, |caps: &Captures<'_>| {
            let span = (&caps[1] == label)
                .then(|| caps[2].parse::<usize>().ok())
                .flatten()
                .and_then(|i| spans.get(i));
            span.map_or_else(|| caps[0].to_string(), Clone::clone)
        })
        .into_owned()
}

#[must_use]
pub fn protect(text: &str) -> Protected {
    let mut out = Protected::default();
    let text = stash(&PLACEHOLDER, text, "LITERAL", &mut out.literals);
    let text = stash(&CODE_BLOCK, &text, "CODE_BLOCK", &mut out.code_blocks);
    let text = stash(&INLINE_CODE, &text, "INLINE_CODE", &mut out.inline_code);
    out.text = stash(&EQUATION, &text, "EQUATION", &mut out.equations);
    out
}

impl Protected {
    /// Put the stashed spans back into `translated`.
    #[must_use]
    pub fn restore(&self, translated: String) -> String {
        let text = unstash(translated, "EQUATION", &self.equations);
        let text = unstash(text, "INLINE_CODE", &self.inline_code);
        let text = unstash(text, "CODE_BLOCK", &self.code_blocks);
        unstash(text, "LITERAL", &self.literals)
    }
}

/// Protect then restore with an identity translation in between.
#[must_use]
pub fn preserve_formatting(text: &str) -> String {
    let protected = protect(text);
    protected.restore(protected.text.clone())
}

#[cfg(test)]
#[path = "formatting_test.rs"]
mod tests;
