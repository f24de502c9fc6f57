use super::*;

fn px8(s: &str) -> ReelResult<f32> {
    Ok(s.chars().count() as f32 * 8.0)
}

const SAMPLES: &[&str] = &[
    "",
    "Lorem Ipsum 1",
    "Image Lorem Ipsum that is a very long description and should wrap to next line",
    "Saree Image Lorem Ipsum is also quite long and must be handled properly",
    "Supercalifragilisticexpialidocious fits nowhere at all",
    "  leading   and\ttrailing \n whitespace  ",
];

#[test]
fn lines_fit_budget_except_lone_overwide_words() {
    for text in SAMPLES {
        for budget in [40.0, 96.0, 280.0] {
            let lines = wrap_words(text, budget, usize::MAX, px8).unwrap();
            for line in &lines {
                let w = px8(line).unwrap();
                assert!(
                    w <= budget || !line.contains(' '),
                    "{line:?} is {w}px wide with budget {budget}"
                );
            }
        }
    }
}

#[test]
fn max_lines_truncates_silently() {
    let text = SAMPLES[2];
    let all = wrap_words(text, 96.0, usize::MAX, px8).unwrap();
    assert!(all.len() > 4);

    let kept = wrap_words(text, 96.0, 4, px8).unwrap();
    assert_eq!(kept.len(), 4);
    assert_eq!(kept[..], all[..4]);

    assert!(wrap_words(text, 96.0, 0, px8).unwrap().is_empty());
}

#[test]
fn wrapping_is_idempotent() {
    for text in SAMPLES {
        for (budget, max_lines) in [(96.0, usize::MAX), (280.0, 4), (40.0, 2)] {
            let once = wrap_words(text, budget, max_lines, px8).unwrap();
            let again = wrap_words(&once.join(" "), budget, max_lines, px8).unwrap();
            assert_eq!(once, again, "{text:?}");
        }
    }
}

#[test]
fn empty_and_whitespace_only_text_yield_no_lines() {
    assert!(wrap_words("", 100.0, 4, px8).unwrap().is_empty());
    assert!(wrap_words(" \t\n ", 100.0, 4, px8).unwrap().is_empty());
}

#[test]
fn overwide_word_sits_alone() {
    let lines = wrap_words("a Supercalifragilistic b", 40.0, 4, px8).unwrap();
    assert_eq!(lines, vec!["a", "Supercalifragilistic", "b"]);
}

#[test]
fn greedy_fill_matches_char_budget() {
    let lines = wrap_words(
        "Image Lorem Ipsum that is a very long description",
        22.0,
        4,
        char_width,
    )
    .unwrap();
    assert_eq!(
        lines,
        vec!["Image Lorem Ipsum that", "is a very long", "description"]
    );
}

#[test]
fn budget_limits() {
    let px = WrapBudget::Pixels { side_padding: 10 };
    assert_eq!(px.limit(300, 16.0), 280.0);
    assert!(!px.counts_chars());

    let fixed = WrapBudget::Chars {
        max_chars: Some(22),
    };
    assert_eq!(fixed.limit(300, 14.0), 22.0);

    let derived = WrapBudget::Chars { max_chars: None };
    assert_eq!(derived.limit(300, 16.0), 37.0);
    assert_eq!(derived.limit(40, 16.0), 10.0);
    assert!(derived.counts_chars());
}

#[test]
fn budget_serde_shape() {
    let b: WrapBudget = serde_json::from_str(r#"{"kind":"chars"}"#).unwrap();
    assert_eq!(b, WrapBudget::Chars { max_chars: None });
    let b: WrapBudget = serde_json::from_str(r#"{"kind":"pixels","side_padding":4}"#).unwrap();
    assert_eq!(b, WrapBudget::Pixels { side_padding: 4 });
}
