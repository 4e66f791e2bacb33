use super::*;

const W: f64 = 990.0;

fn assert_band_rules(title: &str) {
    let d = fit_title_font_size(title, W);
    assert!((MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&d.font_size));
    let at = |size: u32| count_lines(title, W, size);
    match d.base_lines {
        0..=2 => {
            assert!(d.font_size >= BASE_FONT_SIZE);
            assert!(at(d.font_size) <= 2);
            if d.font_size < MAX_FONT_SIZE {
                assert!(at(d.font_size + 1) > 2, "{title}: {} was not the largest", d.font_size);
            }
        }
        n @ (3 | 4) => {
            assert!(d.font_size >= BASE_FONT_SIZE);
            assert_eq!(at(d.font_size), n);
            if d.font_size < MAX_FONT_SIZE {
                assert_ne!(at(d.font_size + 1), n);
            }
        }
        _ => {
            if d.font_size == BASE_FONT_SIZE {
                assert!((MIN_FONT_SIZE..BASE_FONT_SIZE).all(|s| at(s) > MAX_TITLE_LINES));
            } else {
                assert!(d.font_size < BASE_FONT_SIZE);
                assert!(at(d.font_size) <= MAX_TITLE_LINES);
                assert!(((d.font_size + 1)..BASE_FONT_SIZE).all(|s| at(s) > MAX_TITLE_LINES));
            }
        }
    }
}

#[test]
fn secret_to_better_sleep_grows_to_largest_two_line_size() {
    let title = "THE SECRET TO BETTER SLEEP EVERY NIGHT";
    let d = fit_title_font_size(title, W);
    assert_eq!(d.base_lines, 2);
    assert_eq!(d.font_size, 90);
    assert_band_rules(title);
}

#[test]
fn three_line_titles_keep_three_lines() {
    let title = "Five habits of people who never get sick and how you can copy them today";
    let d = fit_title_font_size(title, W);
    assert_eq!(d.base_lines, 3);
    assert_eq!(d.font_size, 82);
    assert_eq!(count_lines(title, W, 82), 3);
    assert_eq!(count_lines(title, W, 83), 4);
}

#[test]
fn four_line_titles_keep_four_lines() {
    let title = "How to build strong bones after forty with simple daily movement and smart nutrition choices";
    let d = fit_title_font_size(title, W);
    assert_eq!(d.base_lines, 4);
    assert_eq!(d.font_size, 82);
}

#[test]
fn long_titles_shrink_until_four_lines() {
    let title = "Why you should stop counting calories and start counting plants instead of obsessing over numbers";
    let d = fit_title_font_size(title, W);
    assert_eq!(d.base_lines, 5);
    assert_eq!(d.font_size, 76);
    assert_eq!(count_lines(title, W, 76), 4);
    assert_eq!(count_lines(title, W, 77), 5);
}

#[test]
fn unsatisfiable_titles_fall_back_to_base_size() {
    let word = "X".repeat(60);
    let title = vec![word.as_str(); 6].join(" ");
    let d = fit_title_font_size(&title, W);
    assert!(d.base_lines >= 5);
    assert_eq!(d.font_size, BASE_FONT_SIZE);
}

#[test]
fn empty_title_grows_to_max() {
    assert_eq!(auto_fit_font_size("", W), MAX_FONT_SIZE);
    assert_eq!(auto_fit_font_size("   ", W), MAX_FONT_SIZE);
}

#[test]
fn band_rules_hold_across_a_corpus() {
    for title in [
        "Hydrate",
        "Eat more fiber for gut health",
        "What your morning coffee is really doing to your hormones and your sleep",
        "Ten simple swaps that make your weekly grocery shop healthier cheaper and faster",
        "The ultimate beginner guide to building a sustainable morning routine that actually sticks for good this year and beyond",
        "a b c d e f g h i j k l m n o p q r s t u v w x y z a b c d e f g h i j k l m n o p q r s t u v w x y z",
    ] {
        assert_band_rules(title);
    }
}

#[test]
fn fitting_is_deterministic() {
    let title = "What your morning coffee is really doing to your hormones and your sleep";
    assert_eq!(fit_title_font_size(title, W), fit_title_font_size(title, W));
}
