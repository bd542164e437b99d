//! # Compositor 模块
//!
//! 变换 / 样式合成器：在给定滚动位置求值全部缩放，序列化为
//! 内联变换字符串与样式字符串。
//!
//! ## 合成规则
//!
//! - 六个矩阵通道（scaleX, skewY, skewX, scaleY, translateX, translateY）
//!   以作者预设矩阵为基线：未声明的通道原样透传，声明的通道取
//!   缩放求值结果（平移通道的百分比值按元素宽高换算）
//! - 旋转通道（rotate / rotateX / rotateY / rotateZ / rotate3d）不并入
//!   矩阵，作为独立 token 追加在矩阵之后。这不是数学意义上的
//!   真合成，是已知的近似
//! - 样式属性逐分量求值：opacity 输出裸数字，百分比标注输出 `N%`，
//!   其余输出 `Npx`；盒属性展开为四个长手属性
//!
//! 本模块是纯函数（记录 + 滚动位置 → 字符串），不触碰宿主。

use crate::attr::Attr;
use crate::record::ElementRecord;
use crate::value::ValueUnit;

/// 单位矩阵
pub const IDENTITY_MATRIX: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// 追加在矩阵之后的旋转通道（顺序固定）
const ROTATION_ATTRS: [Attr; 5] = [
    Attr::Rotate,
    Attr::RotateX,
    Attr::RotateY,
    Attr::RotateZ,
    Attr::Rotate3d,
];

/// 合成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composited {
    /// 内联变换字符串，如 `matrix(1,0,0,1,0,-25) rotate(45deg)`
    pub transform: String,
    /// 内联样式字符串，如 `opacity:0.5;marginTop:10px;`
    pub style: String,
}

/// 在给定滚动位置合成一个记录
///
/// 无声明属性的记录返回作者预设矩阵与空样式（恒等性质）。
pub fn evaluate(record: &ElementRecord, scroll: f64) -> Composited {
    Composited {
        transform: compose_transform(record, scroll),
        style: compose_style(record, scroll),
    }
}

/// 合成变换字符串
fn compose_transform(record: &ElementRecord, scroll: f64) -> String {
    let [init_sx, init_sky, init_skx, init_sy, init_tx, init_ty] = record.initial_matrix;

    let sx = matrix_channel(record, Attr::ScaleX, init_sx, scroll);
    let sky = matrix_channel(record, Attr::SkewY, init_sky, scroll);
    let skx = matrix_channel(record, Attr::SkewX, init_skx, scroll);
    let sy = matrix_channel(record, Attr::ScaleY, init_sy, scroll);
    let tx = translate_channel(record, Attr::TranslateX, init_tx, record.dimensions.width, scroll);
    let ty = translate_channel(record, Attr::TranslateY, init_ty, record.dimensions.height, scroll);

    let mut out = format!(
        "matrix({},{},{},{},{},{})",
        fmt_number(sx),
        fmt_number(sky),
        fmt_number(skx),
        fmt_number(sy),
        fmt_number(tx),
        fmt_number(ty),
    );

    for attr in ROTATION_ATTRS {
        if let Some(token) = rotation_token(record, attr, scroll) {
            out.push(' ');
            out.push_str(&token);
        }
    }

    out
}

/// 普通矩阵通道：未声明透传基线，声明则求值
fn matrix_channel(record: &ElementRecord, attr: Attr, initial: f64, scroll: f64) -> f64 {
    match record.transforms.get(&attr) {
        None => initial,
        Some(anim) => anim.component(0, scroll),
    }
}

/// 平移通道：声明值替换基线偏移；百分比值按元素尺寸换算为像素
fn translate_channel(
    record: &ElementRecord,
    attr: Attr,
    initial: f64,
    size: f64,
    scroll: f64,
) -> f64 {
    match record.transforms.get(&attr) {
        None => initial,
        Some(anim) => {
            let value = anim.component(0, scroll);
            match anim.change.unit(0) {
                ValueUnit::Percent => value / 100.0 * size,
                ValueUnit::Px => value,
            }
        }
    }
}

/// 旋转通道的独立 token
fn rotation_token(record: &ElementRecord, attr: Attr, scroll: f64) -> Option<String> {
    let anim = record.transforms.get(&attr)?;

    let token = match attr {
        Attr::Rotate3d => {
            // 四分量：x 轴、y 轴、z 轴、角度（仅角度带 deg）
            format!(
                "rotate3d({},{},{},{}deg)",
                fmt_number(anim.component(0, scroll)),
                fmt_number(anim.component(1, scroll)),
                fmt_number(anim.component(2, scroll)),
                fmt_number(anim.component(3, scroll)),
            )
        }
        _ => format!(
            "{}({}deg)",
            attr.name(),
            fmt_number(anim.component(0, scroll))
        ),
    };

    Some(token)
}

/// 合成样式字符串
///
/// BTreeMap 迭代顺序确定，两次相同输入产生逐字节相同的输出。
fn compose_style(record: &ElementRecord, scroll: f64) -> String {
    let mut out = String::new();

    for (attr, anim) in &record.styles {
        let names = attr.longhand_names();
        if names.len() > 1 {
            // 盒属性展开为长手，各分量独立求值
            for (i, name) in names.iter().enumerate() {
                out.push_str(name);
                out.push(':');
                out.push_str(&style_value(
                    *attr,
                    anim.component(i, scroll),
                    anim.change.unit(i),
                ));
                out.push(';');
            }
        } else {
            out.push_str(attr.name());
            out.push(':');
            out.push_str(&style_value(
                *attr,
                anim.component(0, scroll),
                anim.change.unit(0),
            ));
            out.push(';');
        }
    }

    out
}

/// 单个样式值的显示格式
fn style_value(attr: Attr, value: f64, unit: ValueUnit) -> String {
    match unit {
        ValueUnit::Percent => format!("{}%", fmt_number(value)),
        ValueUnit::Px => match attr {
            Attr::Opacity => fmt_number(value),
            _ => format!("{}px", fmt_number(value)),
        },
    }
}

/// 数值显示：归一化 -0，其余交给 f64 的最短表示
fn fmt_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ElementId;
    use crate::record::{AnimatedAttribute, Dimensions, ElementRecord};
    use crate::scale::LinearScale;
    use crate::spread::Spread;
    use crate::value::{AttrValue, AttributeChange};

    fn dims() -> Dimensions {
        Dimensions {
            top: 500.0,
            height: 200.0,
            width: 400.0,
        }
    }

    fn empty_record() -> ElementRecord {
        ElementRecord::new(ElementId::new(1), dims(), IDENTITY_MATRIX)
    }

    fn animated(attr: Attr, from: Vec<AttrValue>, to: Vec<AttrValue>) -> AnimatedAttribute {
        AnimatedAttribute::build(
            attr,
            AttributeChange::new(from, to),
            Spread::default(),
            &dims(),
            800.0,
        )
    }

    #[test]
    fn test_identity_record() {
        // 恒等性质：无声明属性 → 原始矩阵 + 空样式
        let record = empty_record();
        let out = evaluate(&record, 1234.5);

        assert_eq!(out.transform, "matrix(1,0,0,1,0,0)");
        assert_eq!(out.style, "");
    }

    #[test]
    fn test_identity_preserves_initial_matrix() {
        let mut record = empty_record();
        record.initial_matrix = [2.0, 0.5, -0.5, 2.0, 10.0, -20.0];

        let out = evaluate(&record, 0.0);
        assert_eq!(out.transform, "matrix(2,0.5,-0.5,2,10,-20)");
    }

    #[test]
    fn test_translate_y_midpoint() {
        let mut record = empty_record();
        let anim = animated(
            Attr::TranslateY,
            vec![AttrValue::px(-50.0)],
            vec![AttrValue::px(50.0)],
        );
        let [d0, d1] = anim.domain;
        record.transforms.insert(Attr::TranslateY, anim);

        // domain 中点 → from/to 中点 0
        let out = evaluate(&record, (d0 + d1) / 2.0);
        assert_eq!(out.transform, "matrix(1,0,0,1,0,0)");

        // domain 起点 → from
        let out = evaluate(&record, d0);
        assert_eq!(out.transform, "matrix(1,0,0,1,0,-50)");
    }

    #[test]
    fn test_translate_percent_converts_against_size() {
        let mut record = empty_record();
        let anim = animated(
            Attr::TranslateX,
            vec![AttrValue::percent(-50.0)],
            vec![AttrValue::percent(50.0)],
        );
        let [d0, _] = anim.domain;
        record.transforms.insert(Attr::TranslateX, anim);

        // -50% × 宽 400 = -200px
        let out = evaluate(&record, d0);
        assert_eq!(out.transform, "matrix(1,0,0,1,-200,0)");
    }

    #[test]
    fn test_declared_translate_replaces_initial_offset() {
        let mut record = empty_record();
        record.initial_matrix = [1.0, 0.0, 0.0, 1.0, 99.0, 99.0];
        let anim = animated(
            Attr::TranslateY,
            vec![AttrValue::px(-50.0)],
            vec![AttrValue::px(50.0)],
        );
        let [d0, _] = anim.domain;
        record.transforms.insert(Attr::TranslateY, anim);

        // 声明的 translateY 替换基线偏移；未声明的 translateX 透传
        let out = evaluate(&record, d0);
        assert_eq!(out.transform, "matrix(1,0,0,1,99,-50)");
    }

    #[test]
    fn test_rotation_appended_after_matrix() {
        let mut record = empty_record();
        let anim = animated(
            Attr::Rotate,
            vec![AttrValue::px(0.0)],
            vec![AttrValue::px(90.0)],
        );
        let [_, d1] = anim.domain;
        record.transforms.insert(Attr::Rotate, anim);

        let out = evaluate(&record, d1);
        assert_eq!(out.transform, "matrix(1,0,0,1,0,0) rotate(90deg)");
    }

    #[test]
    fn test_rotate3d_token() {
        let mut record = empty_record();
        let anim = animated(
            Attr::Rotate3d,
            vec![
                AttrValue::px(1.0),
                AttrValue::px(0.0),
                AttrValue::px(0.0),
                AttrValue::px(0.0),
            ],
            vec![
                AttrValue::px(1.0),
                AttrValue::px(0.0),
                AttrValue::px(0.0),
                AttrValue::px(180.0),
            ],
        );
        let [_, d1] = anim.domain;
        record.transforms.insert(Attr::Rotate3d, anim);

        let out = evaluate(&record, d1);
        assert_eq!(out.transform, "matrix(1,0,0,1,0,0) rotate3d(1,0,0,180deg)");
    }

    #[test]
    fn test_truncated_scales_render_missing_components_as_zero() {
        // 记录字段公开可改：手工构造 scales 少于分量数的四分量
        // 属性，缺失分量按 0 渲染而非 panic
        let mut record = empty_record();
        record.transforms.insert(
            Attr::Rotate3d,
            AnimatedAttribute {
                change: AttributeChange::new(vec![AttrValue::px(1.0)], vec![AttrValue::px(1.0)]),
                spread: Spread::default(),
                domain: [0.0, 100.0],
                scales: vec![LinearScale::new([0.0, 100.0], [1.0, 1.0])],
            },
        );

        let out = evaluate(&record, 50.0);
        assert_eq!(out.transform, "matrix(1,0,0,1,0,0) rotate3d(1,0,0,0deg)");
    }

    #[test]
    fn test_opacity_bare_number() {
        let mut record = empty_record();
        let anim = animated(
            Attr::Opacity,
            vec![AttrValue::px(0.0)],
            vec![AttrValue::px(1.0)],
        );
        let [d0, d1] = anim.domain;
        record.styles.insert(Attr::Opacity, anim);

        let out = evaluate(&record, (d0 + d1) / 2.0);
        assert_eq!(out.style, "opacity:0.5;");
    }

    #[test]
    fn test_margin_expands_longhands() {
        let mut record = empty_record();
        let anim = animated(
            Attr::Margin,
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
        let [d0, _] = anim.domain;
        record.styles.insert(Attr::Margin, anim);

        let out = evaluate(&record, d0);
        assert_eq!(
            out.style,
            "marginTop:10px;marginRight:0px;marginBottom:10px;marginLeft:0px;"
        );
    }

    #[test]
    fn test_percent_style_value() {
        let mut record = empty_record();
        let anim = animated(
            Attr::Width,
            vec![AttrValue::percent(50.0)],
            vec![AttrValue::percent(100.0)],
        );
        let [_, d1] = anim.domain;
        record.styles.insert(Attr::Width, anim);

        let out = evaluate(&record, d1);
        assert_eq!(out.style, "width:100%;");
    }

    #[test]
    fn test_style_order_deterministic() {
        // BTreeMap 键序：两个样式属性的输出顺序与插入顺序无关
        let mut record = empty_record();
        let opacity = animated(
            Attr::Opacity,
            vec![AttrValue::px(0.0)],
            vec![AttrValue::px(1.0)],
        );
        let font_size = animated(
            Attr::FontSize,
            vec![AttrValue::px(12.0)],
            vec![AttrValue::px(24.0)],
        );
        record.styles.insert(Attr::Opacity, opacity);
        record.styles.insert(Attr::FontSize, font_size);

        // 远超两者 domain 上端，全部钳制在 to 端
        let out = evaluate(&record, 1e6);
        assert_eq!(out.style, "fontSize:24px;opacity:1;");
    }

    #[test]
    fn test_snapshot_full_composition() {
        let mut record = empty_record();
        let translate = animated(
            Attr::TranslateY,
            vec![AttrValue::px(-50.0)],
            vec![AttrValue::px(50.0)],
        );
        let rotate = animated(
            Attr::Rotate,
            vec![AttrValue::px(0.0)],
            vec![AttrValue::px(90.0)],
        );
        let opacity = animated(
            Attr::Opacity,
            vec![AttrValue::px(0.0)],
            vec![AttrValue::px(1.0)],
        );
        let [_, d1] = translate.domain;
        record.transforms.insert(Attr::TranslateY, translate);
        record.transforms.insert(Attr::Rotate, rotate);
        record.styles.insert(Attr::Opacity, opacity);

        let out = evaluate(&record, d1);
        insta::assert_snapshot!(
            format!("{} | {}", out.transform, out.style),
            @"matrix(1,0,0,1,0,50) rotate(90deg) | opacity:1;"
        );
    }

    #[test]
    fn test_fmt_number_normalizes_negative_zero() {
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(1.0), "1");
        assert_eq!(fmt_number(-2.5), "-2.5");
    }
}
