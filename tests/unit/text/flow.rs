use super::*;
use crate::text::test_support::block_font;

fn text_of(line: &Line) -> String {
    line.glyphs.iter().map(|g| g.ch).collect()
}

fn lines(text: &str, width: Option<f32>, wrap: WrapStyle) -> Vec<String> {
    let font = block_font(8.0);
    let runs = [Run {
        font: &font,
        text,
        size: 8.0,
    }];
    flow(&runs, width, wrap)
        .unwrap()
        .lines
        .iter()
        .map(text_of)
        .collect()
}

#[test]
fn single_line_without_width() {
    let font = block_font(8.0);
    let runs = [Run {
        font: &font,
        text: "ab cd",
        size: 8.0,
    }];
    let flow = flow(&runs, None, WrapStyle::Word).unwrap();
    assert_eq!(flow.lines.len(), 1);
    assert_eq!(flow.width(), 20.0);
    assert_eq!(flow.height(), 8.0);
    let xs: Vec<f32> = flow.lines[0].glyphs.iter().map(|g| g.x).collect();
    assert_eq!(xs, vec![0.0, 4.0, 8.0, 12.0, 16.0]);
}

#[test]
fn word_wrap_breaks_between_words() {
    assert_eq!(lines("ab cd", Some(12.0), WrapStyle::Word), vec!["ab", "cd"]);
    assert_eq!(
        lines("ab cd ef", Some(20.0), WrapStyle::Word),
        vec!["ab cd", "ef"]
    );
}

#[test]
fn wrapped_lines_drop_trailing_space_from_width() {
    let font = block_font(8.0);
    let runs = [Run {
        font: &font,
        text: "ab cd",
        size: 8.0,
    }];
    let flow = flow(&runs, Some(12.0), WrapStyle::Word).unwrap();
    assert_eq!(flow.lines[0].width, 8.0);
    assert_eq!(flow.height(), 16.0);
}

#[test]
fn long_words_fall_back_to_characters() {
    assert_eq!(
        lines("abcdef", Some(8.0), WrapStyle::Word),
        vec!["ab", "cd", "ef"]
    );
}

#[test]
fn character_wrap_breaks_anywhere() {
    assert_eq!(
        lines("abcdef", Some(10.0), WrapStyle::Character),
        vec!["ab", "cd", "ef"]
    );
}

#[test]
fn no_wrap_ignores_width() {
    assert_eq!(lines("ab cd ef", Some(8.0), WrapStyle::None), vec!["ab cd ef"]);
}

#[test]
fn newlines_always_break() {
    assert_eq!(lines("ab\ncd", None, WrapStyle::None), vec!["ab", "cd"]);
    assert_eq!(lines("a\n\nb", None, WrapStyle::Word), vec!["a", "", "b"]);
}

#[test]
fn mixed_sizes_share_a_baseline() {
    let small = block_font(8.0);
    let big = block_font(16.0);
    let runs = [
        Run {
            font: &small,
            text: "ab",
            size: 8.0,
        },
        Run {
            font: &big,
            text: "cd",
            size: 16.0,
        },
    ];
    let flow = flow(&runs, None, WrapStyle::Word).unwrap();
    assert_eq!(flow.lines.len(), 1);
    assert_eq!(flow.lines[0].metrics.ascent, 12.0);
    assert_eq!(flow.width(), 8.0 + 16.0);
    assert_eq!(flow.height(), 16.0);
    assert_eq!(flow.lines[0].glyphs[2].run, 1);
}

#[test]
fn empty_text_has_one_line_of_height() {
    let font = block_font(8.0);
    let runs = [Run {
        font: &font,
        text: "",
        size: 8.0,
    }];
    let flow = flow(&runs, None, WrapStyle::Word).unwrap();
    assert_eq!(flow.width(), 0.0);
    assert_eq!(flow.height(), 8.0);
}
