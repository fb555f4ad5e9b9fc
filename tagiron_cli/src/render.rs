use std::io::Write;

use crossterm::style::{Color as TermColor, Stylize};
use crossterm::{cursor, queue, terminal};
use tagiron::{Color, GameState, Hand, QuestionCard, QuestionScore, Tile, Timeline};
use unicode_width::UnicodeWidthStr;

use crate::Lang;

const BORDER_WIDTH: usize = 90;
const HANDS_PER_LINE: usize = 5;
/// Up to this many candidates are always listed.
pub const LIST_CANDIDATES_UP_TO: usize = 10;

// The tags used in the card texts of the catalog.
const COLOR_TAGS: [(&str, Color); 3] = [
    ("red", Color::Red),
    ("blue", Color::Blue),
    ("green", Color::Green),
];

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Red => TermColor::DarkRed,
        Color::Blue => TermColor::DarkBlue,
        Color::Green => TermColor::DarkGreen,
    }
}

/// The tile's number in the tile's color.
pub fn colored_tile(tile: Tile) -> String {
    tile.number()
        .to_string()
        .with(term_color(tile.color()))
        .to_string()
}

pub fn colored_hand(hand: &Hand) -> String {
    let tiles: Vec<String> = hand.iter().map(|&tile| colored_tile(tile)).collect();
    format!("Hand<{}>", tiles.join(" "))
}

/// Styles the text between color tags such as `<red>3</red>`.
///
/// Unknown or unclosed tags are kept as they are.
pub fn colorize(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    'scan: while let Some(start) = rest.find('<') {
        for (tag, color) in COLOR_TAGS {
            let open = format!("<{}>", tag);
            let close = format!("</{}>", tag);
            let Some(inner) = rest[start..].strip_prefix(open.as_str()) else {
                continue;
            };
            if let Some(end) = inner.find(close.as_str()) {
                out.push_str(&rest[..start]);
                out.push_str(&inner[..end].with(term_color(color)).to_string());
                rest = &inner[end + close.len()..];
                continue 'scan;
            }
        }
        out.push_str(&rest[..=start]);
        rest = &rest[start + 1..];
    }
    out.push_str(rest);
    out
}

pub fn strip_color_tags(text: &str) -> String {
    let mut text = String::from(text);
    for (tag, _) in COLOR_TAGS {
        text = text
            .replace(&format!("<{}>", tag), "")
            .replace(&format!("</{}>", tag), "");
    }
    text
}

/// Terminal columns taken by `text`, ignoring color tags.
///
/// East Asian wide and ambiguous characters take two columns.
pub fn display_width(text: &str) -> usize {
    strip_color_tags(text).as_str().width_cjk()
}

/// Pads `text` with spaces to `width` terminal columns.
pub fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(padding))
}

pub fn card_text(card: &QuestionCard, lang: Lang) -> &str {
    match lang {
        Lang::Ja => &card.ja,
        Lang::En => &card.en,
    }
}

fn index_label(idx: usize, len: usize) -> String {
    let width = len.saturating_sub(1).to_string().len() + 2;
    format!("{:width$}", format!("[{}]", idx), width = width)
}

pub fn clear_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    queue!(w, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))
}

pub fn print_border<W: Write>(w: &mut W) -> std::io::Result<()> {
    writeln!(w, "{}", "=".repeat(BORDER_WIDTH))
}

/// One line per card: id, index (if requested) and text, aligned in columns.
pub fn show_cards<W: Write>(
    w: &mut W,
    cards: &[QuestionCard],
    lang: Lang,
    with_index: bool,
) -> std::io::Result<()> {
    let id_width = cards
        .iter()
        .map(|card| card.id.as_str().len())
        .max()
        .unwrap_or(0);
    for (idx, card) in cards.iter().enumerate() {
        let id = pad(card.id.as_str(), id_width);
        let text = colorize(card_text(card, lang));
        if with_index {
            writeln!(w, "{} {} {}", id, index_label(idx, cards.len()), text)?;
        } else {
            writeln!(w, "{} {}", id, text)?;
        }
    }
    Ok(())
}

pub fn show_candidates<W: Write>(w: &mut W, candidates: &[Hand]) -> std::io::Result<()> {
    writeln!(w, "Candidates: [")?;
    let lines: Vec<String> = candidates
        .chunks(HANDS_PER_LINE)
        .map(|chunk| {
            let hands: Vec<String> = chunk.iter().map(colored_hand).collect();
            format!("    {}", hands.join(", "))
        })
        .collect();
    writeln!(w, "{}", lines.join(",\n"))?;
    writeln!(w, "]")
}

/// The player's hand, the field, the message (if any) and the candidates.
///
/// The candidates are listed when there are few of them or `show_all` is set.
pub fn show_dashboard<W: Write>(
    w: &mut W,
    state: &GameState,
    message: &str,
    show_all: bool,
    lang: Lang,
) -> std::io::Result<()> {
    writeln!(w, "Your hand: {}", colored_hand(state.hand()))?;
    print_border(w)?;
    writeln!(w, "Current {} question cards:", state.field().len())?;
    show_cards(w, state.field(), lang, false)?;
    print_border(w)?;
    if !message.is_empty() {
        writeln!(w, "!! {}", message)?;
        print_border(w)?;
    }
    writeln!(w, "Current candidates: {}", state.candidates().len())?;
    if state.candidates().len() <= LIST_CANDIDATES_UP_TO || show_all {
        show_candidates(w, state.candidates())?;
    }
    print_border(w)
}

/// The questions with their entropy and the size of their largest group.
pub fn show_question_scores<W: Write>(
    w: &mut W,
    scores: &[QuestionScore],
    lang: Lang,
) -> std::io::Result<()> {
    let labels: Vec<String> = scores
        .iter()
        .map(|score| score.question.to_string())
        .collect();
    let label_width = labels.iter().map(|label| label.len()).max().unwrap_or(0);
    let texts: Vec<String> = scores
        .iter()
        .map(|score| String::from(card_text(score.question.card(), lang)))
        .collect();
    let text_width = texts.iter().map(|text| display_width(text)).max().unwrap_or(0);
    writeln!(w, "Available {} questions:", scores.len())?;
    print_border(w)?;
    for (idx, ((score, label), text)) in scores.iter().zip(&labels).zip(&texts).enumerate() {
        writeln!(
            w,
            "{} {} {} Ent {:.3}, Max {}",
            index_label(idx, scores.len()),
            pad(label, label_width),
            colorize(&pad(text, text_width)),
            score.entropy,
            score.largest_group
        )?;
    }
    print_border(w)
}

/// Every recorded state with what led to it. The current one is marked with `*`.
pub fn show_history<W: Write>(w: &mut W, timeline: &Timeline) -> std::io::Result<()> {
    writeln!(w, "History:")?;
    for (idx, state) in timeline.states().iter().enumerate() {
        let marker = if idx == timeline.cursor() { "*" } else { " " };
        writeln!(
            w,
            "{} {} {} (candidates: {})",
            marker,
            index_label(idx, timeline.len()),
            state.last_action(),
            state.candidates().len()
        )?;
    }
    print_border(w)
}

#[cfg(test)]
mod tests {
    use tagiron::{default_catalog, hand, tile, QuestionCardId};

    use super::*;

    #[test]
    fn color_tags() {
        let text = "How many <red>red</red> tiles?";
        assert_eq!(strip_color_tags(text), "How many red tiles?");
        assert_eq!(
            colorize(text),
            format!("How many {} tiles?", "red".with(TermColor::DarkRed))
        );
        assert_eq!(colored_tile(tile!("5")), "5".with(TermColor::DarkGreen).to_string());
        assert_eq!(colorize("a < b <red>c"), "a < b <red>c");
        assert_eq!(
            colorize("<blue>1</blue><green>5</green>"),
            format!("{}{}", "1".with(TermColor::DarkBlue), "5".with(TermColor::DarkGreen))
        );
    }

    #[test]
    fn clear_screen_moves_to_top_left() {
        let mut out = Vec::new();
        clear_screen(&mut out).unwrap();
        assert_eq!(out, b"\x1b[2J\x1b[1;1H");
    }

    #[test]
    fn wide_characters_take_two_columns() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("😀"), 2);
        assert_eq!(display_width("★○"), 4);
        assert_eq!(display_width("<blue>青</blue>の数"), 6);
        assert_eq!(pad("赤", 4), "赤  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }

    #[test]
    fn candidates_five_per_line() {
        let hands: Vec<Hand> = (0..7).map(|_| hand!("1r 3b 5 7r 9b")).collect();
        let mut out = Vec::new();
        show_candidates(&mut out, &hands).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].matches("Hand<").count(), 5);
        assert!(lines[1].ends_with(','));
        assert_eq!(lines[2].matches("Hand<").count(), 2);
        assert_eq!(lines[3], "]");
    }

    #[test]
    fn dashboard_lists_only_few_candidates() {
        let state = GameState::new(hand!("1r 3b 5 7r 9b"), default_catalog().unwrap());
        let mut out = Vec::new();
        show_dashboard(&mut out, &state, "Hello", false, Lang::En).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Current 0 question cards:"));
        assert!(out.contains("!! Hello"));
        assert!(out.contains("Current candidates: 3003"));
        assert!(!out.contains("Candidates: ["));

        let mut out = Vec::new();
        show_dashboard(&mut out, &state, "", true, Lang::En).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Candidates: ["));
        assert!(!out.contains("!!"));
    }

    #[test]
    fn history_marks_the_cursor() {
        let mut timeline = Timeline::new(GameState::new(
            hand!("1r 3b 5 7r 9b"),
            default_catalog().unwrap(),
        ));
        let added = timeline.current().add_question_card(0).unwrap();
        timeline.record(added);
        timeline.travel_to(0).unwrap();
        let mut out = Vec::new();
        show_history(&mut out, &timeline).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "* [0] started with hand 1r 3b 5 7r 9b (candidates: 3003)");
        assert_eq!(
            lines[2],
            format!(
                "  [1] added question card `{}` (candidates: 3003)",
                QuestionCardId::Where0
            )
        );
    }

    #[test]
    fn score_table() {
        let state = GameState::new(hand!("1r 3b 5 7r 9b"), default_catalog().unwrap())
            .add_question_card(0)
            .unwrap();
        let scores = state.question_scores();
        let mut out = Vec::new();
        show_question_scores(&mut out, &scores, Lang::En).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Available 1 questions:"));
        assert!(out.contains("[0] where_0"));
        assert!(out.contains(&format!("Ent {:.3}, Max", scores[0].entropy)));
    }
}
