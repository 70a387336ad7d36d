//! StaticDocument を使った背景色解決のシナリオテスト

mod utils;

use orinium_backdrop::engine::background::{
    BackgroundError, BackgroundResolver, Confidence, IndeterminateReason, Resolution,
    ResolverConfig, is_opaque, resolve,
};
use orinium_backdrop::engine::bridge::StyleProperty;
use orinium_backdrop::engine::css::values::Color;
use orinium_backdrop::engine::document::{ElementId, StaticDocument};
use utils::{VIEWPORT, blank_page, boxed, init_logger};

#[test]
fn opaque_element_returns_its_own_color() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    let el = doc.append(
        body,
        "div",
        boxed(0.0, 0.0, 50.0, 50.0),
        "background-color: rgb(1, 2, 3)",
    )?;

    let mut visited = Vec::new();
    let result = BackgroundResolver::default().resolve_into(&mut doc, &el, &mut visited)?;

    assert_eq!(
        result,
        Resolution::Resolved {
            color: Color::rgb(1, 2, 3),
            confidence: Confidence::Exact,
        }
    );
    assert_eq!(visited, vec![el]);
    assert!(doc.scroll_log().is_empty(), "opaque elements are not scrolled");
    Ok(())
}

#[test]
fn half_black_over_unstyled_root_is_mid_gray() -> anyhow::Result<()> {
    init_logger();
    let mut doc = StaticDocument::new(VIEWPORT);
    let el = doc.append(
        doc.root(),
        "div",
        boxed(10.0, 10.0, 100.0, 20.0),
        "background-color: rgba(0, 0, 0, 0.5); opacity: 1",
    )?;

    let result = resolve(&mut doc, &el)?;
    assert_eq!(result.color(), Some(Color::rgb(128, 128, 128)));
    Ok(())
}

#[test]
fn transparent_element_takes_opaque_ancestor_color() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    let section = doc.append(
        body,
        "section",
        boxed(0.0, 0.0, 400.0, 300.0),
        "background-color: rgb(10, 20, 30)",
    )?;
    let el = doc.append(
        section,
        "p",
        boxed(20.0, 20.0, 100.0, 20.0),
        "background-color: transparent",
    )?;

    let mut visited = Vec::new();
    let result = BackgroundResolver::default().resolve_into(&mut doc, &el, &mut visited)?;

    assert_eq!(result.color(), Some(Color::rgb(10, 20, 30)));
    assert_eq!(visited, vec![el, section]);
    Ok(())
}

#[test]
fn ancestor_not_covering_element_is_indeterminate() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    let narrow = doc.append(body, "div", boxed(0.0, 0.0, 50.0, 300.0), "background-color: #000")?;
    let el = doc.append(narrow, "span", boxed(0.0, 0.0, 120.0, 20.0), "")?;

    let result = resolve(&mut doc, &el)?;
    assert_eq!(
        result,
        Resolution::Indeterminate(IndeterminateReason::NotContained)
    );
    Ok(())
}

#[test]
fn background_image_is_indeterminate_regardless_of_ancestors() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    doc.set_style(body, "background-color: #fff")?;
    let el = doc.append(
        body,
        "div",
        boxed(0.0, 0.0, 50.0, 50.0),
        "background-image: url(hero.png); background-color: rgb(0, 0, 0)",
    )?;

    let mut visited = Vec::new();
    let result = BackgroundResolver::default().resolve_into(&mut doc, &el, &mut visited)?;
    assert_eq!(
        result,
        Resolution::Indeterminate(IndeterminateReason::BackgroundImage)
    );
    assert_eq!(visited, vec![el]);
    assert!(doc.scroll_log().is_empty());
    Ok(())
}

#[test]
fn background_image_behind_element_is_indeterminate() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    doc.set_style(body, "background-image: linear-gradient(red, blue)")?;
    let el = doc.append(
        body,
        "div",
        boxed(0.0, 0.0, 50.0, 50.0),
        "background-color: rgba(255, 255, 255, 0.2)",
    )?;

    let result = resolve(&mut doc, &el)?;
    assert!(result.is_indeterminate());
    assert!(is_opaque(&doc, &body)?, "image backgrounds count as opaque");
    assert!(!is_opaque(&doc, &el)?);
    Ok(())
}

#[test]
fn zero_height_root_leaves_no_opaque_ancestor() -> anyhow::Result<()> {
    init_logger();
    let mut doc = StaticDocument::new(boxed(0.0, 0.0, 800.0, 0.0));
    let body = doc.append(doc.root(), "body", VIEWPORT, "")?;
    let el = doc.append(body, "div", boxed(0.0, 0.0, 10.0, 10.0), "")?;

    let result = resolve(&mut doc, &el)?;
    assert_eq!(
        result,
        Resolution::Indeterminate(IndeterminateReason::NoOpaqueAncestor)
    );
    Ok(())
}

#[test]
fn zero_height_wrappers_are_skipped() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    doc.set_style(body, "background-color: rgb(0, 0, 255)")?;
    // 高さ 0 のラッパーは要素を含まないが、候補から外れるので問題にならない
    let wrapper = doc.append(body, "div", boxed(0.0, 0.0, 800.0, 0.0), "")?;
    let el = doc.append(wrapper, "span", boxed(0.0, 0.0, 40.0, 16.0), "")?;

    let mut visited = Vec::new();
    let result = BackgroundResolver::default().resolve_into(&mut doc, &el, &mut visited)?;
    assert_eq!(result.color(), Some(Color::rgb(0, 0, 255)));
    assert!(!visited.contains(&wrapper));
    Ok(())
}

#[test]
fn visited_includes_zero_alpha_layers() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    let outer = doc.append(
        body,
        "div",
        boxed(0.0, 0.0, 400.0, 400.0),
        "background-color: rgb(200, 0, 0)",
    )?;
    let middle = doc.append(
        outer,
        "div",
        boxed(0.0, 0.0, 300.0, 300.0),
        "background-color: rgba(0, 0, 0, 0)",
    )?;
    let el = doc.append(
        middle,
        "div",
        boxed(0.0, 0.0, 100.0, 100.0),
        "background-color: rgba(0, 0, 200, 0.5)",
    )?;

    let mut visited = Vec::new();
    let result = BackgroundResolver::default().resolve_into(&mut doc, &el, &mut visited)?;

    assert_eq!(result.color(), Some(Color::rgb(100, 0, 100)));
    assert_eq!(visited, vec![el, middle, outer]);
    Ok(())
}

#[test]
fn opacity_scales_background_alpha() -> anyhow::Result<()> {
    init_logger();
    let mut doc = StaticDocument::new(VIEWPORT);
    let el = doc.append(
        doc.root(),
        "div",
        boxed(0.0, 0.0, 10.0, 10.0),
        "background-color: rgb(0, 0, 0); opacity: 0.5",
    )?;

    assert_eq!(resolve(&mut doc, &el)?.color(), Some(Color::rgb(128, 128, 128)));
    Ok(())
}

#[test]
fn translucent_stack_flattens_back_to_front() -> anyhow::Result<()> {
    init_logger();
    let mut doc = StaticDocument::new(VIEWPORT);
    let back = doc.append(doc.root(), "div", VIEWPORT, "background-color: rgba(0, 0, 255, 0.5)")?;
    let front = doc.append(
        back,
        "div",
        boxed(0.0, 0.0, 100.0, 100.0),
        "background-color: rgba(255, 0, 0, 0.5)",
    )?;

    // red 50% over (blue 50% over white)
    assert_eq!(resolve(&mut doc, &front)?.color(), Some(Color::rgb(192, 64, 128)));
    Ok(())
}

#[test]
fn translucent_element_is_scrolled_into_view_once() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    doc.set_style(body, "background-color: #fff")?;
    let el = doc.append(
        body,
        "div",
        boxed(0.0, 450.0, 100.0, 100.0),
        "background-color: rgba(0, 0, 0, 0.1)",
    )?;

    resolve(&mut doc, &el)?;
    assert_eq!(doc.scroll_log(), &[el]);
    assert_eq!(doc.scroll_offset().y, 450.0);
    Ok(())
}

#[test]
fn custom_canvas_color() -> anyhow::Result<()> {
    init_logger();
    let mut doc = StaticDocument::new(VIEWPORT);
    let el = doc.append(
        doc.root(),
        "div",
        boxed(0.0, 0.0, 10.0, 10.0),
        "background-color: rgba(255, 255, 255, 0.5)",
    )?;

    let resolver = BackgroundResolver::new(ResolverConfig {
        canvas_color: Color::BLACK,
        ..Default::default()
    });
    assert_eq!(resolver.resolve(&mut doc, &el)?.color(), Some(Color::rgb(128, 128, 128)));
    Ok(())
}

/// 位置指定された祖先があるとき、ヒットテストの順序がツリー順より優先される
fn overlapping_page() -> anyhow::Result<(StaticDocument, ElementId)> {
    let (mut doc, body) = blank_page();
    let card = doc.append(
        body,
        "div",
        boxed(0.0, 0.0, 400.0, 400.0),
        "background-color: rgb(255, 0, 0); position: relative; left: 5px",
    )?;
    doc.append(
        body,
        "aside",
        boxed(0.0, 0.0, 400.0, 400.0),
        "background-color: rgb(0, 0, 255); position: absolute; z-index: 1",
    )?;
    let el = doc.append(
        card,
        "p",
        boxed(20.0, 20.0, 100.0, 20.0),
        "background-color: rgba(0, 0, 0, 0.5); position: relative; z-index: 2",
    )?;
    Ok((doc, el))
}

#[test]
fn ambiguous_stacking_uses_hit_test_order() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, el) = overlapping_page()?;

    let result = resolve(&mut doc, &el)?;
    assert_eq!(
        result,
        Resolution::Resolved {
            color: Color::rgb(0, 0, 128),
            confidence: Confidence::Exact,
        }
    );
    Ok(())
}

#[test]
fn ambiguous_stacking_without_hit_test_falls_back_to_tree_order() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, el) = overlapping_page()?;
    doc.set_hit_testing(false);

    let result = resolve(&mut doc, &el)?;
    assert_eq!(
        result,
        Resolution::Resolved {
            color: Color::rgb(128, 0, 0),
            confidence: Confidence::BestEffort,
        }
    );
    Ok(())
}

#[test]
fn unparsable_background_color_is_an_error() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    let el = doc.append(body, "div", boxed(0.0, 0.0, 10.0, 10.0), "background-color: chartreuse")?;

    match resolve(&mut doc, &el) {
        Err(BackgroundError::InvalidColor { property, text, .. }) => {
            assert_eq!(property, StyleProperty::BackgroundColor);
            assert_eq!(text, "chartreuse");
        }
        other => panic!("expected InvalidColor, got {other:?}"),
    }
    Ok(())
}

#[test]
fn out_of_range_opacity_is_an_error() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    let el = doc.append(body, "div", boxed(0.0, 0.0, 10.0, 10.0), "opacity: 2")?;

    assert!(matches!(
        resolve(&mut doc, &el),
        Err(BackgroundError::InvalidOpacity(_))
    ));
    Ok(())
}

#[test]
fn resolving_the_root_itself_uses_the_canvas() -> anyhow::Result<()> {
    init_logger();
    let mut doc = StaticDocument::new(VIEWPORT);
    let root = doc.root();
    doc.set_style(root, "background-color: rgba(0, 0, 0, 0.5)")?;

    assert_eq!(resolve(&mut doc, &root)?.color(), Some(Color::rgb(128, 128, 128)));
    Ok(())
}

#[test]
fn nearly_opaque_layers_do_not_hide_an_image_behind_them() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    doc.set_style(body, "background-image: url(a.png)")?;
    let div = doc.append(
        body,
        "div",
        boxed(0.0, 0.0, 200.0, 200.0),
        "background-color: rgba(255, 255, 255, 0.99)",
    )?;
    let el = doc.append(
        div,
        "p",
        boxed(10.0, 10.0, 100.0, 20.0),
        "background-color: rgba(0, 0, 0, 0.99)",
    )?;

    let mut visited = Vec::new();
    let result = BackgroundResolver::default().resolve_into(&mut doc, &el, &mut visited)?;
    assert_eq!(result, Resolution::Indeterminate(IndeterminateReason::BackgroundImage));
    assert_eq!(visited, vec![el, div, body]);
    Ok(())
}

#[test]
fn opaque_within_epsilon_reports_full_alpha() -> anyhow::Result<()> {
    init_logger();
    let (mut doc, body) = blank_page();
    let el = doc.append(
        body,
        "div",
        boxed(0.0, 0.0, 50.0, 50.0),
        "background-color: rgba(1, 2, 3, 0.99995)",
    )?;

    let result = resolve(&mut doc, &el)?;
    assert_eq!(
        result,
        Resolution::Resolved {
            color: Color::rgb(1, 2, 3),
            confidence: Confidence::Exact,
        }
    );
    assert!(doc.scroll_log().is_empty());
    Ok(())
}
