//! # Page 模块
//!
//! 内存页面模型：为引擎核心提供三个协作者 trait 的无头实现。
//!
//! 页面从场景 JSON 反序列化，元素以下标作为句柄。几何是静态的
//! （不随写入的变换反馈，真实页面才有布局回流），这使得输出
//! 完全确定，适合测试与演示。

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use parallax_runtime::{DeclarationSource, ElementBox, ElementId, StyleSink, ViewportSource};

/// 场景加载错误
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// 文件读取失败
    #[error("读取场景文件失败: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 格式无效
    #[error("场景 JSON 无效: {0}")]
    Json(#[from] serde_json::Error),
}

/// 模拟元素
#[derive(Debug, Clone, Deserialize)]
pub struct SimElement {
    /// 元素名（仅用于展示）
    pub name: String,
    /// 顶边到页面顶部的绝对距离（未变换几何）
    pub top: f64,
    /// 元素高度
    pub height: f64,
    /// 元素宽度
    pub width: f64,
    /// 作者预设的 2D 变换矩阵
    #[serde(default)]
    pub matrix: Option<[f64; 6]>,
    /// 声明属性（带前缀的完整属性名 → 声明字符串）
    #[serde(default)]
    pub declarations: HashMap<String, String>,
    /// 最近写入的内联样式
    #[serde(skip)]
    pub inline_style: String,
    /// 最近写入的内联变换
    #[serde(skip)]
    pub inline_transform: String,
}

/// 模拟页面
#[derive(Debug, Clone, Deserialize)]
pub struct SimPage {
    /// 视口高度
    pub viewport_height: f64,
    /// 当前滚动位置
    #[serde(default)]
    pub scroll: f64,
    /// 页面元素
    pub elements: Vec<SimElement>,
}

impl SimPage {
    /// 从场景文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// 从 JSON 文本解析
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// 全部元素句柄（下标即句柄）
    pub fn element_ids(&self) -> Vec<ElementId> {
        (0..self.elements.len() as u64).map(ElementId::new).collect()
    }

    /// 按句柄取元素
    pub fn element(&self, id: ElementId) -> &SimElement {
        &self.elements[id.value() as usize]
    }

    /// 设置滚动位置
    pub fn set_scroll(&mut self, scroll: f64) {
        self.scroll = scroll;
    }

    /// 设置视口高度
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    fn element_mut(&mut self, id: ElementId) -> &mut SimElement {
        &mut self.elements[id.value() as usize]
    }
}

impl ViewportSource for SimPage {
    fn scroll_position(&self) -> f64 {
        self.scroll
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn element_box(&self, element: ElementId) -> ElementBox {
        let el = self.element(element);
        ElementBox {
            // 视口相对值，与真实页面的测量语义一致
            top: el.top - self.scroll,
            height: el.height,
            width: el.width,
        }
    }

    fn computed_matrix(&self, element: ElementId) -> Option<[f64; 6]> {
        self.element(element).matrix
    }
}

impl StyleSink for SimPage {
    fn write_style(&mut self, element: ElementId, style: &str) {
        self.element_mut(element).inline_style = style.to_string();
    }

    fn write_transform(&mut self, element: ElementId, transform: &str) {
        self.element_mut(element).inline_transform = transform.to_string();
    }

    fn clear_style(&mut self, element: ElementId) {
        let el = self.element_mut(element);
        el.inline_style.clear();
        el.inline_transform.clear();
    }
}

impl DeclarationSource for SimPage {
    fn read_declaration(&self, element: ElementId, attribute: &str) -> Option<String> {
        self.element(element).declarations.get(attribute).cloned()
    }
}
