//! SRT parse/emit and the pure CRUD operations over a subtitle list (§4.G).

use crate::foundation::core::Id;
use crate::foundation::error::Diagnostic;

/// A single word within a subtitle's text, with its own timing for the
/// animated caption renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    pub text: String,
    pub start_time: f64,
    pub end_time: f64,
}

/// One subtitle entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Subtitle {
    pub id: Id,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default)]
    pub style_preset: Option<String>,
}

impl Subtitle {
    fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Parse a timestamp of form `HH:MM:SS,mmm` or `HH:MM:SS.mmm` into seconds.
fn parse_timestamp(s: &str) -> Option<f64> {
    let s = s.trim();
    let (main, ms) = {
        let idx = s.rfind([',', '.'])?;
        (&s[..idx], &s[idx + 1..])
    };
    if ms.len() != 3 || !ms.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut parts = main.split(':');
    let h: u32 = parts.next()?.parse().ok()?;
    let m: u32 = parts.next()?.parse().ok()?;
    let s_part: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || h > 99 || m >= 60 || s_part >= 60 {
        return None;
    }
    let ms: u32 = ms.parse().ok()?;
    Some(f64::from(h) * 3600.0 + f64::from(m) * 60.0 + f64::from(s_part) + f64::from(ms) / 1000.0)
}

fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;
    let s = total_s % 60;
    let total_m = total_s / 60;
    let m = total_m % 60;
    let h = total_m / 60;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Parse SRT `content`, never throwing: malformed blocks contribute a
/// [`Diagnostic`] and are skipped, parsing continues. CRLF is normalised
/// to LF before splitting.
pub fn parse_srt(content: &str) -> (Vec<Subtitle>, Vec<Diagnostic>) {
    let normalized = content.replace("\r\n", "\n");
    let mut subtitles = Vec::new();
    let mut diagnostics = Vec::new();

    let mut block_index = 0usize;
    for block in split_blocks(&normalized) {
        if block.trim().is_empty() {
            continue;
        }
        let lines: Vec<&str> = block.lines().collect();
        if lines.len() < 2 {
            diagnostics.push(
                Diagnostic::new("block must have an index, time range, and text")
                    .with_block(block_index),
            );
            block_index += 1;
            continue;
        }

        let range_line = lines[1];
        let Some((start_str, end_str)) = range_line.split_once("-->") else {
            diagnostics.push(
                Diagnostic::new("missing '-->' in time range line")
                    .with_block(block_index)
                    .with_line(1),
            );
            block_index += 1;
            continue;
        };

        let (Some(start), Some(end)) =
            (parse_timestamp(start_str), parse_timestamp(end_str))
        else {
            diagnostics.push(
                Diagnostic::new("invalid timestamp").with_block(block_index).with_line(1),
            );
            block_index += 1;
            continue;
        };

        let text = lines[2..].join("\n");
        subtitles.push(Subtitle {
            id: Id::new(format!("srt-{block_index}")),
            start_time: start,
            end_time: end,
            text,
            words: Vec::new(),
            style_preset: None,
        });
        block_index += 1;
    }

    (subtitles, diagnostics)
}

fn split_blocks(s: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\n' && i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
            blocks.push(&s[start..i]);
            while i < bytes.len() && bytes[i] == b'\n' {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }
    if start < s.len() {
        blocks.push(&s[start..]);
    }
    blocks
}

/// Emit `subtitles` as SRT text, sorted by `start_time` with 1-based indices.
pub fn export_srt(subtitles: &[Subtitle]) -> String {
    let mut sorted: Vec<&Subtitle> = subtitles.iter().collect();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut out = String::new();
    for (i, sub) in sorted.iter().enumerate() {
        out.push_str(&format!("{}\n", i + 1));
        out.push_str(&format!(
            "{} --> {}\n",
            format_timestamp(sub.start_time),
            format_timestamp(sub.end_time)
        ));
        out.push_str(&sub.text);
        out.push_str("\n\n");
    }
    out
}

/// Result of a mutating subtitle operation.
pub type SubtitleResult = Result<Vec<Subtitle>, String>;

pub fn add(subtitles: &[Subtitle], new: Subtitle) -> SubtitleResult {
    let mut out = subtitles.to_vec();
    out.push(new);
    Ok(out)
}

pub fn update(subtitles: &[Subtitle], id: &Id, text: Option<String>, start: Option<f64>, end: Option<f64>) -> SubtitleResult {
    let mut out = subtitles.to_vec();
    let Some(sub) = out.iter_mut().find(|s| &s.id == id) else {
        return Err(format!("no subtitle with id {id}"));
    };
    if let Some(t) = text {
        sub.text = t;
    }
    if let Some(s) = start {
        sub.start_time = s;
    }
    if let Some(e) = end {
        sub.end_time = e;
    }
    Ok(out)
}

pub fn remove(subtitles: &[Subtitle], id: &Id) -> SubtitleResult {
    Ok(subtitles.iter().filter(|s| &s.id != id).cloned().collect())
}

/// Split the subtitle `id` at `split_time` (absolute), which must fall
/// strictly within its range.
pub fn split(subtitles: &[Subtitle], id: &Id, split_time: f64) -> SubtitleResult {
    let mut out = Vec::with_capacity(subtitles.len() + 1);
    let mut found = false;
    for sub in subtitles {
        if &sub.id == id {
            if split_time <= sub.start_time || split_time >= sub.end_time {
                return Err("splitTime must fall strictly within the subtitle".into());
            }
            found = true;
            let mut first = sub.clone();
            first.end_time = split_time;
            first.id = Id::new(format!("{}-a", sub.id.as_str()));
            let mut second = sub.clone();
            second.start_time = split_time;
            second.id = Id::new(format!("{}-b", sub.id.as_str()));
            out.push(first);
            out.push(second);
        } else {
            out.push(sub.clone());
        }
    }
    if !found {
        return Err(format!("no subtitle with id {id}"));
    }
    Ok(out)
}

/// Merge adjacent subtitles whose gap is `<= threshold` seconds,
/// concatenating both `text` and `words` of the later into the earlier.
pub fn merge_adjacent(subtitles: &[Subtitle], threshold: f64) -> SubtitleResult {
    let mut sorted = subtitles.to_vec();
    sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut out: Vec<Subtitle> = Vec::new();
    for sub in sorted {
        if let Some(last) = out.last_mut() {
            if sub.start_time - last.end_time <= threshold {
                last.text = format!("{}\n{}", last.text, sub.text);
                last.words.extend(sub.words);
                last.end_time = sub.end_time.max(last.end_time);
                continue;
            }
        }
        out.push(sub);
    }
    Ok(out)
}

/// Shift every subtitle's timing by `offset`, clamping the result to `>= 0`.
pub fn shift_all(subtitles: &[Subtitle], offset: f64) -> SubtitleResult {
    Ok(subtitles
        .iter()
        .map(|s| {
            let mut s = s.clone();
            let duration = s.duration();
            s.start_time = (s.start_time + offset).max(0.0);
            s.end_time = s.start_time + duration;
            s
        })
        .collect())
}

/// Apply a named style preset, from a small closed set.
pub fn apply_style_preset(subtitles: &[Subtitle], id: &Id, preset: &str) -> SubtitleResult {
    const KNOWN: &[&str] = &["default", "bold", "outline", "shadow-box", "minimal"];
    if !KNOWN.contains(&preset) {
        return Err(format!("unknown style preset '{preset}'"));
    }
    let mut out = subtitles.to_vec();
    let Some(sub) = out.iter_mut().find(|s| &s.id == id) else {
        return Err(format!("no subtitle with id {id}"));
    };
    sub.style_preset = Some(preset.to_string());
    Ok(out)
}
