//! # Host 模块
//!
//! 外部协作者接口定义。
//!
//! ## 架构边界
//!
//! 引擎核心是纯逻辑：不读页面、不写样式、不订阅事件。
//! 所有 I/O 经由宿主实现的三个 trait 注入：
//!
//! - [`ViewportSource`]：滚动位置、视口高度、元素几何与已有变换
//! - [`StyleSink`]：内联样式 / 变换写入
//! - [`DeclarationSource`]：读取页面标记中的声明属性
//!
//! 元素以不透明句柄 [`ElementId`] 表示，生命周期由宿主页面管理，
//! 引擎从不拥有元素。

use serde::{Deserialize, Serialize};

/// 元素句柄
///
/// 由宿主分配的不透明标识，引擎只持有、不拥有。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl ElementId {
    /// 创建元素句柄
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// 元素几何盒
///
/// `top` 是**视口相对**值（等价 `getBoundingClientRect().top`），
/// 引擎自行加上当前滚动位置换算为页面绝对值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    /// 顶边到视口顶部的距离
    pub top: f64,
    /// 元素高度
    pub height: f64,
    /// 元素宽度
    pub width: f64,
}

/// 视口 / 几何信息源
pub trait ViewportSource {
    /// 当前页面滚动位置
    fn scroll_position(&self) -> f64;

    /// 当前视口高度
    fn viewport_height(&self) -> f64;

    /// 元素几何盒（视口相对）
    fn element_box(&self, element: ElementId) -> ElementBox;

    /// 元素上作者预设的 2D 变换矩阵
    ///
    /// 六分量顺序：`[scaleX, skewY, skewX, scaleY, translateX, translateY]`。
    /// 无变换时返回 `None`（等价单位矩阵）。
    fn computed_matrix(&self, element: ElementId) -> Option<[f64; 6]>;
}

/// 样式写入端
pub trait StyleSink {
    /// 写入内联样式字符串
    fn write_style(&mut self, element: ElementId, style: &str);

    /// 写入内联变换字符串
    fn write_transform(&mut self, element: ElementId, transform: &str);

    /// 清空内联样式（resize 时先撤销变换再量几何）
    fn clear_style(&mut self, element: ElementId);
}

/// 声明属性源
pub trait DeclarationSource {
    /// 读取元素上的声明属性
    ///
    /// # 参数
    ///
    /// - `attribute`: 带前缀的完整属性名，如 `parelax-translateY`
    ///
    /// # 返回
    ///
    /// 属性存在时返回原始声明字符串，否则 `None`。
    fn read_declaration(&self, element: ElementId, attribute: &str) -> Option<String>;
}
