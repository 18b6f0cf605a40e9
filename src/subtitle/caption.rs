//! Animated caption renderer (§4.G): per-word render state driven by a
//! subtitle's `words` array.

use crate::easing::Ease;
use crate::subtitle::srt::{Subtitle, Word};

/// The closed set of caption animation modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionMode {
    None,
    WordHighlight,
    WordByWord,
    Karaoke,
    Bounce,
    Typewriter,
}

/// Per-word render state for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WordState {
    pub text: String,
    pub visible: bool,
    pub highlighted: bool,
    pub scale: f64,
    pub offset_y: f64,
    pub opacity: f64,
    /// `karaoke`'s left-to-right colour progress, `None` otherwise.
    pub karaoke_progress: Option<f64>,
}

impl WordState {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            visible: true,
            highlighted: false,
            scale: 1.0,
            offset_y: 0.0,
            opacity: 1.0,
            karaoke_progress: None,
        }
    }
}

/// Full caption render state for one subtitle at time `t`.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionState {
    pub words: Vec<WordState>,
}

/// Evaluate `subtitle`'s caption state at time `t` under `mode`.
pub fn render_caption(subtitle: &Subtitle, mode: CaptionMode, t: f64) -> CaptionState {
    if subtitle.words.is_empty() || mode == CaptionMode::None {
        return CaptionState {
            words: vec![WordState::plain(&subtitle.text)],
        };
    }

    let words = match mode {
        CaptionMode::None => unreachable!(),
        CaptionMode::WordHighlight => word_highlight(&subtitle.words, t),
        CaptionMode::WordByWord => word_by_word(&subtitle.words, t, subtitle.end_time),
        CaptionMode::Karaoke => karaoke(&subtitle.words, t),
        CaptionMode::Bounce => bounce(&subtitle.words, t),
        CaptionMode::Typewriter => typewriter(&subtitle.words, t),
    };

    CaptionState { words }
}

fn word_highlight(words: &[Word], t: f64) -> Vec<WordState> {
    words
        .iter()
        .map(|w| {
            let active = t >= w.start_time && t < w.end_time;
            let mut s = WordState::plain(&w.text);
            if active {
                s.highlighted = true;
                s.scale = 1.15;
                s.offset_y = -4.0;
            }
            s
        })
        .collect()
}

fn word_by_word(words: &[Word], t: f64, subtitle_end: f64) -> Vec<WordState> {
    let mut out = Vec::new();
    for (i, w) in words.iter().enumerate() {
        let is_last = i == words.len() - 1;
        let active = if is_last {
            t >= w.start_time && t < subtitle_end
        } else {
            t >= w.start_time && t < w.end_time
        };
        if active {
            out.push(WordState::plain(&w.text));
        }
    }
    out
}

fn karaoke(words: &[Word], t: f64) -> Vec<WordState> {
    words
        .iter()
        .map(|w| {
            let mut s = WordState::plain(&w.text);
            if t >= w.end_time {
                s.highlighted = true;
            } else if t >= w.start_time {
                s.highlighted = true;
                let span = (w.end_time - w.start_time).max(1e-9);
                s.karaoke_progress = Some(((t - w.start_time) / span).clamp(0.0, 1.0));
            }
            s
        })
        .collect()
}

fn bounce(words: &[Word], t: f64) -> Vec<WordState> {
    const WINDOW: f64 = 0.3;
    words
        .iter()
        .map(|w| {
            let mut s = WordState::plain(&w.text);
            let relative = t - w.start_time;
            if relative < 0.0 {
                s.visible = false;
                s.opacity = 0.0;
                s.scale = 0.0;
            } else if relative < WINDOW {
                let progress = relative / WINDOW;
                let bounced = Ease::OutBounce.apply(progress);
                s.opacity = progress.min(1.0);
                s.scale = bounced;
            }
            s
        })
        .collect()
}

fn typewriter(words: &[Word], t: f64) -> Vec<WordState> {
    const FADE: f64 = 0.1;
    let mut out = Vec::new();
    for w in words {
        if t < w.start_time {
            continue;
        }
        let mut s = WordState::plain(&w.text);
        let relative = t - w.start_time;
        if relative < FADE {
            s.opacity = (relative / FADE).clamp(0.0, 1.0);
        }
        out.push(s);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Id;

    fn subtitle() -> Subtitle {
        Subtitle {
            id: Id::new("a"),
            start_time: 0.0,
            end_time: 2.0,
            text: "hi there".into(),
            words: vec![
                Word { text: "hi".into(), start_time: 0.0, end_time: 1.0 },
                Word { text: "there".into(), start_time: 1.0, end_time: 2.0 },
            ],
            style_preset: None,
        }
    }

    #[test]
    fn word_highlight_marks_only_the_active_word() {
        let state = render_caption(&subtitle(), CaptionMode::WordHighlight, 1.5);
        assert!(!state.words[0].highlighted);
        assert!(state.words[1].highlighted);
    }

    #[test]
    fn word_by_word_shows_only_active_word() {
        let state = render_caption(&subtitle(), CaptionMode::WordByWord, 0.5);
        assert_eq!(state.words.len(), 1);
        assert_eq!(state.words[0].text, "hi");
    }

    #[test]
    fn word_by_word_persists_last_word_past_its_own_end() {
        let state = render_caption(&subtitle(), CaptionMode::WordByWord, 1.9);
        assert_eq!(state.words.len(), 1);
        assert_eq!(state.words[0].text, "there");
    }

    #[test]
    fn karaoke_progress_is_clamped_and_monotone() {
        let state = render_caption(&subtitle(), CaptionMode::Karaoke, 0.25);
        assert_eq!(state.words[0].karaoke_progress, Some(0.25));
        assert!(state.words[0].highlighted);
    }
}
