//! Rendering of rewritten fenced code blocks.

/// Opening fence of a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    /// Fence character, `` ` `` or `~`.
    pub marker: char,
    /// Number of fence characters.
    pub len: usize,
}

impl Default for Fence {
    fn default() -> Self {
        Self {
            marker: '`',
            len: 3,
        }
    }
}

impl Fence {
    /// Read the fence at the start of `text`, falling back to three backticks.
    pub fn detect(text: &str) -> Self {
        let Some(marker) = text.chars().next().filter(|c| *c == '`' || *c == '~') else {
            return Self::default();
        };
        let len = text.chars().take_while(|c| *c == marker).count();
        Self {
            marker,
            len: len.max(3),
        }
    }

    /// A fence that cannot be closed early by `value` and is legal with
    /// `info`.
    pub fn fitted(self, info: &str, value: &str) -> Self {
        let marker = if self.marker == '`' && info.contains('`') {
            '~'
        } else {
            self.marker
        };
        let len = self.len.max(longest_run(value, marker) + 1).max(3);
        Self { marker, len }
    }
}

/// Length of the longest run of `marker` in `text`.
fn longest_run(text: &str, marker: char) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == marker {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Render a fenced block. The first line is emitted without `indent`;
/// every following line is prefixed with it. `value` is written verbatim
/// followed by one newline, so a value ending in `\n` keeps it on reparse.
pub fn render_fence(
    fence: Fence,
    lang: Option<&str>,
    meta: Option<&str>,
    value: &str,
    indent: &str,
) -> String {
    let mut info = lang.unwrap_or_default().to_string();
    if let Some(meta) = meta.filter(|m| !m.is_empty()) {
        if !info.is_empty() {
            info.push(' ');
        }
        info.push_str(meta);
    }

    let fence = fence.fitted(&info, value);
    let delimiter: String = std::iter::repeat_n(fence.marker, fence.len).collect();

    let mut out = String::with_capacity(value.len() + info.len() + 2 * fence.len + 8);
    out.push_str(&delimiter);
    out.push_str(&info);
    out.push('\n');

    if !value.is_empty() {
        for line in value.split('\n') {
            if line.is_empty() {
                out.push_str(indent.trim_end());
            } else {
                out.push_str(indent);
                out.push_str(line);
            }
            out.push('\n');
        }
    }

    out.push_str(indent);
    out.push_str(&delimiter);
    out
}
