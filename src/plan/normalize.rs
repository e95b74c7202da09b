//! Copy length clamping
//!
//! Lengths are counted in characters (Unicode scalar values), not bytes.

use super::schema::{StoryCopy, StoryPlan};

/// Appended to every truncated field
pub const ELLIPSIS: char = '…';

/// Maximum character count for each copy field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyLimits {
    pub headline: usize,
    pub subhead: usize,
    pub cta: usize,
    pub footer: usize,
}

impl Default for CopyLimits {
    fn default() -> Self {
        Self {
            headline: 28,
            subhead: 90,
            cta: 10,
            footer: 30,
        }
    }
}

impl CopyLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headline(mut self, max: usize) -> Self {
        self.headline = max;
        self
    }

    pub fn with_subhead(mut self, max: usize) -> Self {
        self.subhead = max;
        self
    }

    pub fn with_cta(mut self, max: usize) -> Self {
        self.cta = max;
        self
    }

    pub fn with_footer(mut self, max: usize) -> Self {
        self.footer = max;
        self
    }
}

/// Trim `input` and shorten it to at most `max` characters
///
/// Text that fits after trimming is returned unchanged. Otherwise the first
/// `max - 1` characters are kept, trailing whitespace is dropped and a single
/// [`ELLIPSIS`] is appended. A `max` of zero yields an empty string.
pub fn clamp(input: &str, max: usize) -> String {
    let trimmed = input.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let head: String = trimmed.chars().take(max - 1).collect();
    let mut clamped = head.trim_end().to_string();
    clamped.push(ELLIPSIS);
    clamped
}

/// Clamp every copy field with the default limits
pub fn normalize(plan: StoryPlan) -> StoryPlan {
    normalize_with(plan, &CopyLimits::default())
}

/// Clamp every copy field with custom limits
///
/// Palette, style mode and template id pass through untouched.
pub fn normalize_with(plan: StoryPlan, limits: &CopyLimits) -> StoryPlan {
    let copy = StoryCopy {
        headline: clamp(&plan.copy.headline, limits.headline),
        subhead: clamp(&plan.copy.subhead, limits.subhead),
        cta: clamp(&plan.copy.cta, limits.cta),
        footer: clamp(&plan.copy.footer, limits.footer),
    };
    StoryPlan { copy, ..plan }
}
