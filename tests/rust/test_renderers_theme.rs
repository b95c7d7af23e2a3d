use super::*;

#[test]
fn test_standard_unicode_styles() {
    let theme = NodeTheme::standard();
    assert_eq!(theme.box_chars(NodeKind::Phase, CharSet::Unicode).top_left, '╔');
    assert_eq!(theme.box_chars(NodeKind::Decision, CharSet::Unicode).top_left, '╭');
    assert_eq!(theme.box_chars(NodeKind::Execute, CharSet::Unicode).horizontal, '━');
    assert_eq!(theme.box_chars(NodeKind::Merge, CharSet::Unicode).vertical, '╎');
    assert_eq!(
        theme.box_chars(NodeKind::Step, CharSet::Unicode),
        BoxChars::unicode()
    );
}

#[test]
fn test_standard_ascii_styles() {
    let theme = NodeTheme::standard();
    assert_eq!(theme.box_chars(NodeKind::Phase, CharSet::Ascii).horizontal, '=');
    assert_eq!(theme.box_chars(NodeKind::Decision, CharSet::Ascii).top_right, '\\');
    assert_eq!(theme.box_chars(NodeKind::Step, CharSet::Ascii), BoxChars::ascii());
}

#[test]
fn test_every_kind_distinct_in_standard_unicode() {
    let theme = NodeTheme::standard();
    let styles: Vec<BoxChars> = NodeKind::ALL
        .iter()
        .map(|k| theme.box_chars(*k, CharSet::Unicode))
        .collect();
    for (i, a) in styles.iter().enumerate() {
        for b in &styles[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_plain_falls_back() {
    let theme = NodeTheme::plain();
    for kind in NodeKind::ALL {
        assert_eq!(theme.box_chars(kind, CharSet::Ascii), BoxChars::ascii());
    }
}

#[test]
fn test_with_style_overrides() {
    let custom = BoxChars::ascii().with_outline(['@', '@', '@', '@'], '~', '!');
    let theme = NodeTheme::standard().with_style(NodeKind::Step, CharSet::Ascii, custom);
    assert_eq!(theme.box_chars(NodeKind::Step, CharSet::Ascii).top_left, '@');
    assert_eq!(theme.box_chars(NodeKind::Step, CharSet::Unicode), BoxChars::unicode());
}
