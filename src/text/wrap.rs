use crate::foundation::error::ReelResult;

/// Width budget a caption line must fit in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WrapBudget {
    /// Measured pixel width, `tile_width - 2 * side_padding`.
    Pixels {
        /// Padding kept clear on each side of the tile, in pixels.
        side_padding: u32,
    },
    /// Character count per line.
    Chars {
        /// Explicit count. When absent it is derived as `max(10, tile_width / (font_size / 2))`.
        #[serde(default)]
        max_chars: Option<usize>,
    },
}

impl Default for WrapBudget {
    fn default() -> Self {
        Self::Pixels { side_padding: 10 }
    }
}

impl WrapBudget {
    /// Numeric budget for a tile of `tile_width` pixels, in the unit the measure uses.
    pub fn limit(self, tile_width: u32, font_size: f32) -> f32 {
        match self {
            Self::Pixels { side_padding } => {
                tile_width.saturating_sub(side_padding.saturating_mul(2)) as f32
            }
            Self::Chars {
                max_chars: Some(n),
            } => n as f32,
            Self::Chars { max_chars: None } => {
                let per_char = ((font_size / 2.0).floor() as u32).max(1);
                (tile_width / per_char).max(10) as f32
            }
        }
    }

    /// `true` when lines are measured in characters rather than pixels.
    pub fn counts_chars(self) -> bool {
        matches!(self, Self::Chars { .. })
    }
}

/// Greedily break `text` into lines whose measured width stays within `budget`.
///
/// Words are separated by any whitespace. A word that alone exceeds the budget is emitted on its
/// own line unsplit. At most `max_lines` lines are produced; the rest of the text is dropped.
pub fn wrap_words<F>(
    text: &str,
    budget: f32,
    max_lines: usize,
    mut measure: F,
) -> ReelResult<Vec<String>>
where
    F: FnMut(&str) -> ReelResult<f32>,
{
    let mut lines = Vec::new();
    if max_lines == 0 {
        return Ok(lines);
    }

    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if measure(&candidate)? <= budget {
            line = candidate;
            continue;
        }

        lines.push(std::mem::replace(&mut line, word.to_string()));
        if lines.len() == max_lines {
            return Ok(lines);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    Ok(lines)
}

/// Character-count measure used with [`WrapBudget::Chars`].
pub fn char_width(text: &str) -> ReelResult<f32> {
    Ok(text.chars().count() as f32)
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
