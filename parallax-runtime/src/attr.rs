//! # Attr 模块
//!
//! 可动画属性的完整定义。
//!
//! 引擎识别 22 个属性，分为两类：
//!
//! - **Transform**：合成进 `matrix(...)` 或作为旋转 token 追加
//! - **Style**：输出为内联样式（`名称:值;`）
//!
//! 每个属性还携带两项静态元数据：
//!
//! - 分量数：`margin` / `padding` / `rotate3d` 为 4 分量，其余为 1 分量
//! - 长手展开名：盒属性在样式输出时展开为四个长手属性

use serde::{Deserialize, Serialize};

/// 属性分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrKind {
    /// 变换属性（进入 transform 字符串）
    Transform,
    /// 普通样式属性（进入内联样式字符串）
    Style,
}

/// 可动画属性
///
/// 声明属性名采用 camelCase（与页面标记中的声明词汇一致），
/// 通过 [`Attr::name`] / [`Attr::from_name`] 互转。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Attr {
    TranslateY,
    TranslateX,
    ScaleX,
    ScaleY,
    SkewX,
    SkewY,
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    Rotate3d,
    Width,
    Height,
    Padding,
    Margin,
    FontSize,
    ZIndex,
    Opacity,
    Top,
    Right,
    Bottom,
    Left,
}

impl Attr {
    /// 全部识别属性
    pub const ALL: [Attr; 22] = [
        Attr::TranslateY,
        Attr::TranslateX,
        Attr::ScaleX,
        Attr::ScaleY,
        Attr::SkewX,
        Attr::SkewY,
        Attr::Rotate,
        Attr::RotateX,
        Attr::RotateY,
        Attr::RotateZ,
        Attr::Rotate3d,
        Attr::Width,
        Attr::Height,
        Attr::Padding,
        Attr::Margin,
        Attr::FontSize,
        Attr::ZIndex,
        Attr::Opacity,
        Attr::Top,
        Attr::Right,
        Attr::Bottom,
        Attr::Left,
    ];

    /// 声明属性名（camelCase）
    pub fn name(&self) -> &'static str {
        match self {
            Attr::TranslateY => "translateY",
            Attr::TranslateX => "translateX",
            Attr::ScaleX => "scaleX",
            Attr::ScaleY => "scaleY",
            Attr::SkewX => "skewX",
            Attr::SkewY => "skewY",
            Attr::Rotate => "rotate",
            Attr::RotateX => "rotateX",
            Attr::RotateY => "rotateY",
            Attr::RotateZ => "rotateZ",
            Attr::Rotate3d => "rotate3d",
            Attr::Width => "width",
            Attr::Height => "height",
            Attr::Padding => "padding",
            Attr::Margin => "margin",
            Attr::FontSize => "fontSize",
            Attr::ZIndex => "zIndex",
            Attr::Opacity => "opacity",
            Attr::Top => "top",
            Attr::Right => "right",
            Attr::Bottom => "bottom",
            Attr::Left => "left",
        }
    }

    /// 按声明属性名查找
    pub fn from_name(name: &str) -> Option<Attr> {
        Attr::ALL.iter().copied().find(|a| a.name() == name)
    }

    /// 属性分类
    pub fn kind(&self) -> AttrKind {
        match self {
            Attr::TranslateY
            | Attr::TranslateX
            | Attr::ScaleX
            | Attr::ScaleY
            | Attr::SkewX
            | Attr::SkewY
            | Attr::Rotate
            | Attr::RotateX
            | Attr::RotateY
            | Attr::RotateZ
            | Attr::Rotate3d => AttrKind::Transform,
            _ => AttrKind::Style,
        }
    }

    /// 声明值的分量数
    ///
    /// 盒属性的四个分量按 CSS 短手顺序：上、右、下、左。
    /// `rotate3d` 的四个分量为：x 轴、y 轴、z 轴、角度。
    pub fn component_count(&self) -> usize {
        match self {
            Attr::Margin | Attr::Padding | Attr::Rotate3d => 4,
            _ => 1,
        }
    }

    /// 样式输出时使用的属性名
    ///
    /// 盒属性展开为四个长手属性，其余属性返回自身名称。
    pub fn longhand_names(&self) -> &'static [&'static str] {
        match self {
            Attr::Margin => &["marginTop", "marginRight", "marginBottom", "marginLeft"],
            Attr::Padding => &[
                "paddingTop",
                "paddingRight",
                "paddingBottom",
                "paddingLeft",
            ],
            Attr::TranslateY => &["translateY"],
            Attr::TranslateX => &["translateX"],
            Attr::ScaleX => &["scaleX"],
            Attr::ScaleY => &["scaleY"],
            Attr::SkewX => &["skewX"],
            Attr::SkewY => &["skewY"],
            Attr::Rotate => &["rotate"],
            Attr::RotateX => &["rotateX"],
            Attr::RotateY => &["rotateY"],
            Attr::RotateZ => &["rotateZ"],
            Attr::Rotate3d => &["rotate3d"],
            Attr::Width => &["width"],
            Attr::Height => &["height"],
            Attr::FontSize => &["fontSize"],
            Attr::ZIndex => &["zIndex"],
            Attr::Opacity => &["opacity"],
            Attr::Top => &["top"],
            Attr::Right => &["right"],
            Attr::Bottom => &["bottom"],
            Attr::Left => &["left"],
        }
    }
}

impl std::fmt::Display for Attr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
