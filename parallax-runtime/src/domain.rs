//! # Domain 模块
//!
//! 滚动区间推导：把元素几何、触发点与属性自身的垂直位移
//! 耦合成一对绝对滚动位置。
//!
//! ## 推导公式
//!
//! ```text
//! spread_offset(锚点, 比例) = 视口高度 × 比例 − 锚点偏移(元素高度)
//! domain = [top − spread_offset(start) + 垂直位移.from,
//!           top − spread_offset(finish) + 垂直位移.to]
//! ```
//!
//! 垂直位移项使触发点跟随元素**动画中**的有效边缘：例如高度收缩的
//! 元素，其触发点跟踪的是收缩后的底边而非原始底边。
//!
//! domain 不保证 `start < end`，比较时须先排序。

use crate::attr::Attr;
use crate::spread::{Spread, SpreadPoint};
use crate::value::AttributeChange;

/// 滚动区间：动画开始与完成时的绝对页面滚动位置
pub type Domain = [f64; 2];

/// 视野包络缓冲（像素）
///
/// 滚动事件并非每个刻度都送达，包络两端各放出一段缓冲，
/// 保证端值总能被写入。
pub const INVIEW_BUFFER: f64 = 30.0;

/// 触发点换算为相对元素顶边的滚动偏移
pub fn spread_offset(viewport_height: f64, element_height: f64, point: SpreadPoint) -> f64 {
    viewport_height * point.fraction - point.anchor.offset(element_height)
}

/// 属性在动画两端引起的垂直位移（像素）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalChange {
    /// from 端位移
    pub from: f64,
    /// to 端位移
    pub to: f64,
}

/// 计算属性的垂直位移语义
///
/// - `translateY` / `top` / `bottom` / `fontSize`：直接取分量值
/// - `height`：底边锚定增长，位移为 `值 − 元素高度`
/// - `margin` / `padding`：上下两个盒分量之和
/// - `scaleY`：`元素高度 × 值`
/// - `skewY`：`元素高度 × (值 + 1)`
/// - 其余属性无垂直位移
pub fn vertical_change(attr: Attr, change: &AttributeChange, element_height: f64) -> VerticalChange {
    match attr {
        Attr::TranslateY | Attr::Top | Attr::Bottom | Attr::FontSize => VerticalChange {
            from: change.from_number(0),
            to: change.to_number(0),
        },
        Attr::Height => VerticalChange {
            from: change.from_number(0) - element_height,
            to: change.to_number(0) - element_height,
        },
        Attr::Margin | Attr::Padding => VerticalChange {
            from: change.from_number(0) + change.from_number(2),
            to: change.to_number(0) + change.to_number(2),
        },
        Attr::ScaleY => VerticalChange {
            from: element_height * change.from_number(0),
            to: element_height * change.to_number(0),
        },
        Attr::SkewY => VerticalChange {
            from: element_height * (change.from_number(0) + 1.0),
            to: element_height * (change.to_number(0) + 1.0),
        },
        _ => VerticalChange { from: 0.0, to: 0.0 },
    }
}

/// 推导一个属性的滚动区间
///
/// # 参数
///
/// - `top`: 元素顶边到页面顶部的绝对距离（未变换几何）
/// - `element_height`: 元素高度
/// - `viewport_height`: 视口高度
/// - `spread`: 触发区间
/// - `attr` / `change`: 属性及其 from/to 变化
pub fn build_domain(
    top: f64,
    element_height: f64,
    viewport_height: f64,
    spread: &Spread,
    attr: Attr,
    change: &AttributeChange,
) -> Domain {
    let start_offset = spread_offset(viewport_height, element_height, spread.start);
    let finish_offset = spread_offset(viewport_height, element_height, spread.finish);
    let vertical = vertical_change(attr, change, element_height);

    [
        top - start_offset + vertical.from,
        top - finish_offset + vertical.to,
    ]
}

/// 全属性 domain 的包络：逐元素 min/max
///
/// 定义元素需要重算的滚动范围（"视野内"判定）。
/// 空迭代器（无声明属性）返回 `[0, 0]`。
pub fn max_domain<'a>(domains: impl Iterator<Item = &'a Domain>) -> Domain {
    let mut envelope: Option<Domain> = None;

    for &[a, b] in domains {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        envelope = Some(match envelope {
            None => [lo, hi],
            Some([min, max]) => [min.min(lo), max.max(hi)],
        });
    }

    envelope.unwrap_or([0.0, 0.0])
}

/// 滚动位置是否落在包络（± 缓冲）内
pub fn in_view(max_domain: Domain, scroll: f64, buffer: f64) -> bool {
    let [min, max] = max_domain;
    scroll >= min - buffer && scroll <= max + buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spread::Anchor;
    use crate::value::{AttrValue, AttributeChange};

    fn single(from: f64, to: f64) -> AttributeChange {
        AttributeChange::new(vec![AttrValue::px(from)], vec![AttrValue::px(to)])
    }

    #[test]
    fn test_spread_offset() {
        // 视口 800，元素高 200
        assert_eq!(
            spread_offset(800.0, 200.0, SpreadPoint::new(Anchor::Top, 1.0)),
            800.0
        );
        assert_eq!(
            spread_offset(800.0, 200.0, SpreadPoint::new(Anchor::Bottom, 0.0)),
            -200.0
        );
        assert_eq!(
            spread_offset(800.0, 200.0, SpreadPoint::new(Anchor::Center, 0.5)),
            300.0
        );
    }

    #[test]
    fn test_build_domain_translate_y() {
        // top=500, height=200, 视口 800, translateY value=100（from=-50, to=+50）
        let domain = build_domain(
            500.0,
            200.0,
            800.0,
            &Spread::default(),
            Attr::TranslateY,
            &single(-50.0, 50.0),
        );

        // [500 - 800 + (-50), 500 - (-200) + 50]
        assert_eq!(domain, [-350.0, 750.0]);
    }

    #[test]
    fn test_build_domain_explicit_default_spread_matches_implicit() {
        let change = single(-50.0, 50.0);
        let implicit = build_domain(
            500.0,
            200.0,
            800.0,
            &Spread::default(),
            Attr::TranslateY,
            &change,
        );
        let explicit = build_domain(
            500.0,
            200.0,
            800.0,
            &Spread::ordered(
                SpreadPoint::new(Anchor::Top, 1.0),
                SpreadPoint::new(Anchor::Bottom, 0.0),
            ),
            Attr::TranslateY,
            &change,
        );

        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_vertical_change_passthrough() {
        let vc = vertical_change(Attr::Top, &single(-50.0, 50.0), 200.0);
        assert_eq!(vc, VerticalChange { from: -50.0, to: 50.0 });
    }

    #[test]
    fn test_vertical_change_height_is_bottom_anchored() {
        // height 从 100 到 300：位移 = 值 − 元素高度
        let vc = vertical_change(Attr::Height, &single(100.0, 300.0), 200.0);
        assert_eq!(vc, VerticalChange { from: -100.0, to: 100.0 });
    }

    #[test]
    fn test_vertical_change_box_sums_vertical_components() {
        // margin 上下分量之和
        let change = AttributeChange::new(
            vec![
                AttrValue::px(10.0),
                AttrValue::px(0.0),
                AttrValue::px(10.0),
                AttrValue::px(0.0),
            ],
            vec![
                AttrValue::px(0.0),
                AttrValue::px(0.0),
                AttrValue::px(0.0),
                AttrValue::px(0.0),
            ],
        );
        let vc = vertical_change(Attr::Margin, &change, 200.0);
        assert_eq!(vc, VerticalChange { from: 20.0, to: 0.0 });
    }

    #[test]
    fn test_vertical_change_scale_and_skew() {
        let vc = vertical_change(Attr::ScaleY, &single(0.5, 1.5), 200.0);
        assert_eq!(vc, VerticalChange { from: 100.0, to: 300.0 });

        let vc = vertical_change(Attr::SkewY, &single(-0.5, 0.5), 200.0);
        assert_eq!(vc, VerticalChange { from: 100.0, to: 300.0 });
    }

    #[test]
    fn test_vertical_change_horizontal_attrs_are_zero() {
        for attr in [
            Attr::TranslateX,
            Attr::Opacity,
            Attr::Rotate,
            Attr::ScaleX,
            Attr::SkewX,
            Attr::Left,
            Attr::Width,
        ] {
            let vc = vertical_change(attr, &single(-50.0, 50.0), 200.0);
            assert_eq!(vc, VerticalChange { from: 0.0, to: 0.0 }, "{attr}");
        }
    }

    #[test]
    fn test_zero_height_collapses_domain() {
        // 退化几何：高度 0，translateY 无值时 domain 收缩为一个点
        let domain = build_domain(
            500.0,
            0.0,
            800.0,
            &Spread::ordered(
                SpreadPoint::new(Anchor::Top, 0.5),
                SpreadPoint::new(Anchor::Bottom, 0.5),
            ),
            Attr::Opacity,
            &single(0.0, 1.0),
        );

        assert_eq!(domain[0], domain[1]);
    }

    #[test]
    fn test_max_domain_envelope() {
        let domains = [[-300.0, 800.0], [100.0, 200.0], [900.0, -100.0]];
        assert_eq!(max_domain(domains.iter()), [-300.0, 900.0]);
    }

    #[test]
    fn test_max_domain_widens_with_new_attribute() {
        let narrow = [[100.0, 200.0]];
        let wide = [[100.0, 200.0], [-500.0, 1500.0]];

        assert_eq!(max_domain(narrow.iter()), [100.0, 200.0]);
        assert_eq!(max_domain(wide.iter()), [-500.0, 1500.0]);
    }

    #[test]
    fn test_max_domain_empty() {
        assert_eq!(max_domain([].iter()), [0.0, 0.0]);
    }

    #[test]
    fn test_in_view_buffer() {
        let envelope = [0.0, 100.0];

        assert!(in_view(envelope, 50.0, INVIEW_BUFFER));
        assert!(in_view(envelope, -30.0, INVIEW_BUFFER));
        assert!(in_view(envelope, 130.0, INVIEW_BUFFER));
        assert!(!in_view(envelope, -31.0, INVIEW_BUFFER));
        assert!(!in_view(envelope, 131.0, INVIEW_BUFFER));
    }
}
