//! Text overlay
//!
//! Works out which strings go where for the current mode. The web build
//! writes them into DOM elements; native logs them.

use crate::consts::*;
use crate::sim::{GameState, Mode};

/// Which font a line uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Normal,
    Debug,
}

impl TextStyle {
    pub fn size(self) -> f32 {
        match self {
            TextStyle::Title => TITLE_FONT_SIZE,
            TextStyle::Normal => FONT_SIZE,
            TextStyle::Debug => FONT_SIZE / 2.0,
        }
    }
}

/// A positioned line of text (baseline at `y`)
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

pub const TITLE: &str = "GALACTIC ASTEROID BELT";
pub const PRESS_START: &str = "PRESS SPACE KEY";
pub const GAME_OVER: &str = "GAME OVER!";
pub const PRESS_RESTART: &str = "PRESS 'R' KEY TO RESTART";

/// Score shown in the top-right corner while playing
pub fn score_text(distance: u64) -> String {
    format!("Distance: {:8} m", distance)
}

pub fn final_distance_text(distance: u64) -> String {
    format!("DISTANCE TRAVELLED: {} M", distance)
}

/// Title and body lines for a mode; empty strings are spacer rows
fn screen_text(mode: Mode, distance: u64) -> (Vec<String>, Vec<String>) {
    let blank = |n: usize| vec![String::new(); n];
    match mode {
        Mode::Title => {
            let mut body = blank(7);
            body.push(PRESS_START.to_string());
            (vec![TITLE.to_string()], body)
        }
        Mode::Game => (Vec::new(), Vec::new()),
        Mode::GameOver => {
            let mut body = blank(6);
            body.push(final_distance_text(distance));
            body.extend(blank(3));
            body.push(PRESS_RESTART.to_string());
            (vec![GAME_OVER.to_string()], body)
        }
    }
}

/// Centre a column of lines starting a quarter of the way down the screen
fn layout_column(lines: &[String], style: TextStyle, out: &mut Vec<TextLine>) {
    let size = style.size();
    for (i, text) in lines.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        let half_len = (text.chars().count() / 2) as f32;
        out.push(TextLine {
            text: text.clone(),
            x: ((SCREEN_WIDTH - half_len * size) / 2.0).floor(),
            y: SCREEN_HEIGHT / 4.0 + (i as f32 + 4.0) * size,
            style,
        });
    }
}

/// Every line of text to draw this frame
pub fn overlay(state: &GameState, fps: Option<f32>) -> Vec<TextLine> {
    let mut out = Vec::new();

    let (titles, body) = screen_text(state.mode, state.distance);
    layout_column(&titles, TextStyle::Title, &mut out);
    layout_column(&body, TextStyle::Normal, &mut out);

    if state.mode == Mode::Game {
        let text = score_text(state.distance);
        let width = text.chars().count() as f32 * FONT_SIZE / 2.0;
        out.push(TextLine {
            text,
            x: SCREEN_WIDTH - width,
            y: FONT_SIZE,
            style: TextStyle::Normal,
        });
    }

    if let Some(fps) = fps {
        out.push(TextLine {
            text: format!("FPS: {:.2}", fps),
            x: 0.0,
            y: TextStyle::Debug.size(),
            style: TextStyle::Debug,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_screen() {
        let state = GameState::new(1);
        let lines = overlay(&state, None);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, TITLE);
        assert_eq!(lines[0].style, TextStyle::Title);
        // 22 chars -> 11 * 36 = 396; (1028 - 396) / 2 = 316
        assert_eq!(lines[0].x, 316.0);
        assert_eq!(lines[0].y, 180.0 + 4.0 * 36.0);
        assert_eq!(lines[1].text, PRESS_START);
        assert_eq!(lines[1].y, 180.0 + 11.0 * 24.0);
    }

    #[test]
    fn test_score_while_playing() {
        let mut state = GameState::new(1);
        state.mode = Mode::Game;
        state.distance = 4321;
        let lines = overlay(&state, Some(59.94));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Distance:     4321 m");
        assert_eq!(lines[0].x, SCREEN_WIDTH - 20.0 * 12.0);
        assert_eq!(lines[1].text, "FPS: 59.94");
    }

    #[test]
    fn test_game_over_shows_distance() {
        let mut state = GameState::new(1);
        state.mode = Mode::GameOver;
        state.distance = 987;
        let lines = overlay(&state, None);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![GAME_OVER, "DISTANCE TRAVELLED: 987 M", PRESS_RESTART]
        );
        assert_eq!(lines[1].y, 180.0 + 10.0 * 24.0);
        assert_eq!(lines[2].y, 180.0 + 14.0 * 24.0);
    }
}
