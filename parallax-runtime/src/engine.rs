//! # Engine 模块
//!
//! 引擎控制器：编排 setup / 滚动 / resize 三条路径。
//!
//! ## 状态机
//!
//! ```text
//! Uninitialized ──init()──► Enabled ◄──enable()──┐
//!                              │                  │
//!                              └──disable()──► Disabled
//! ```
//!
//! - `init`：扫描元素声明、构建记录、执行首次合成，随后自动启用
//! - `enable` / `disable`：幂等开关，记录全部保留，再次启用无需重建
//! - `on_scroll`：只重算包络（± 缓冲）覆盖当前滚动位置的记录；
//!   范围外的记录保持上次写入的样式（视为已在屏外）
//! - `on_resize`：撤销内联样式后重量几何，重算 domain 并重绑缩放
//!   （range 保留），最后在当前滚动位置重新合成
//!
//! ## 实例隔离
//!
//! 所有可变状态都在实例字段里，多个引擎实例互不串扰。

use serde::{Deserialize, Serialize};

use crate::attr::{Attr, AttrKind};
use crate::compositor::{self, IDENTITY_MATRIX};
use crate::declaration::parse_declaration;
use crate::domain::INVIEW_BUFFER;
use crate::error::ConfigError;
use crate::host::{DeclarationSource, ElementId, StyleSink, ViewportSource};
use crate::record::{AnimatedAttribute, Dimensions, ElementRecord};

/// 默认声明属性前缀
pub const DEFAULT_PREFIX: &str = "parelax";

/// 引擎状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EngineStatus {
    /// 尚未 init
    #[default]
    Uninitialized,
    /// 已启用：响应滚动与 resize
    Enabled,
    /// 已停用：记录保留，事件忽略
    Disabled,
}

/// setup 阶段的配置警告
///
/// 声明解析失败只排除出错元素，其余元素继续动画；
/// 错误以数据形式交还调用方（由宿主决定如何上报）。
#[derive(Debug, Clone, PartialEq)]
pub struct SetupWarning {
    /// 出错元素
    pub element: ElementId,
    /// 出错属性的声明名
    pub attribute: &'static str,
    /// 具体错误
    pub error: ConfigError,
}

impl std::fmt::Display for SetupWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} 的 '{}' 声明无效：{}",
            self.element, self.attribute, self.error
        )
    }
}

/// 视差引擎
///
/// 泛型参数 `H` 是宿主：同时实现视口信息源、样式写入端与
/// 声明属性源。引擎拥有宿主实例并通过它完成全部 I/O。
///
/// # 使用示例
///
/// ```ignore
/// let page = SimPage::from_json(&text)?;
/// let ids = page.element_ids();
///
/// let mut engine = ParallaxEngine::new(page);
/// engine.init(&ids);
///
/// // 宿主事件循环里：
/// engine.on_scroll();
/// engine.on_resize();
/// ```
pub struct ParallaxEngine<H> {
    /// 宿主
    host: H,
    /// 声明属性前缀
    prefix: String,
    /// 状态机
    status: EngineStatus,
    /// 当前滚动位置
    current_scroll: f64,
    /// 当前视口高度
    viewport_height: f64,
    /// 视野包络缓冲
    inview_buffer: f64,
    /// 全部元素记录
    records: Vec<ElementRecord>,
    /// setup 阶段收集的配置警告
    warnings: Vec<SetupWarning>,
}

impl<H> ParallaxEngine<H>
where
    H: ViewportSource + StyleSink + DeclarationSource,
{
    /// 创建引擎（默认前缀）
    pub fn new(host: H) -> Self {
        Self::with_prefix(host, DEFAULT_PREFIX)
    }

    /// 创建引擎（自定义声明前缀）
    pub fn with_prefix(host: H, prefix: impl Into<String>) -> Self {
        Self {
            host,
            prefix: prefix.into(),
            status: EngineStatus::Uninitialized,
            current_scroll: 0.0,
            viewport_height: 0.0,
            inview_buffer: INVIEW_BUFFER,
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// setup：构建全部元素记录并执行首次合成，然后启用
    ///
    /// # 参数
    ///
    /// - `elements`: 宿主发现的候选元素（元素发现本身是宿主职责）
    ///
    /// 声明解析失败的元素被排除并记入 [`Self::warnings`]，
    /// 无声明属性的元素直接跳过。
    pub fn init(&mut self, elements: &[ElementId]) {
        self.current_scroll = self.host.scroll_position();
        self.viewport_height = self.host.viewport_height();
        self.records.clear();
        self.warnings.clear();

        for &element in elements {
            match self.build_record(element) {
                Ok(Some(record)) => self.records.push(record),
                Ok(None) => {}
                Err(warning) => self.warnings.push(warning),
            }
        }

        // 首次合成：元素落到当前滚动位置对应的状态
        for index in 0..self.records.len() {
            self.apply(index);
        }

        self.status = EngineStatus::Enabled;
    }

    /// 启用（幂等）
    ///
    /// 未 init 时无记录可启用，保持原状态。
    pub fn enable(&mut self) {
        if self.status == EngineStatus::Disabled {
            self.status = EngineStatus::Enabled;
        }
    }

    /// 停用（幂等）
    ///
    /// 记录全部保留，重新启用无需重建。
    pub fn disable(&mut self) {
        if self.status == EngineStatus::Enabled {
            self.status = EngineStatus::Disabled;
        }
    }

    /// 是否处于启用状态
    pub fn is_enabled(&self) -> bool {
        self.status == EngineStatus::Enabled
    }

    /// 滚动事件处理
    ///
    /// 事件不携带载荷，滚动位置从宿主读取。只合成包络（± 缓冲）
    /// 覆盖当前位置的记录；范围外的记录有意保持旧样式。
    pub fn on_scroll(&mut self) {
        if self.status != EngineStatus::Enabled {
            return;
        }

        self.current_scroll = self.host.scroll_position();

        for index in 0..self.records.len() {
            if self.records[index].is_in_view(self.current_scroll, self.inview_buffer) {
                self.apply(index);
            }
        }
    }

    /// resize 事件处理
    ///
    /// 每条记录：先清空内联样式（撤销变换，量到未变换的盒），
    /// 重量几何、重算 domain、重绑缩放（range 保留）、重算包络，
    /// 最后在当前滚动位置重新合成——视口变化跨越后动画的当前
    /// 视觉位置得以保持。
    pub fn on_resize(&mut self) {
        if self.status != EngineStatus::Enabled {
            return;
        }

        self.viewport_height = self.host.viewport_height();

        for index in 0..self.records.len() {
            let element = self.records[index].element;

            self.host.clear_style(element);
            let bx = self.host.element_box(element);
            let dimensions = Dimensions {
                top: bx.top + self.current_scroll,
                height: bx.height,
                width: bx.width,
            };

            let record = &mut self.records[index];
            record.dimensions = dimensions;
            for (attr, anim) in record.transforms.iter_mut() {
                anim.rebind(*attr, &dimensions, self.viewport_height);
            }
            for (attr, anim) in record.styles.iter_mut() {
                anim.rebind(*attr, &dimensions, self.viewport_height);
            }
            record.recompute_max_domain();

            self.apply(index);
        }
    }

    /// 直接在指定滚动位置求值一条记录（测试入口，纯函数）
    pub fn evaluate(record: &ElementRecord, scroll: f64) -> compositor::Composited {
        compositor::evaluate(record, scroll)
    }

    /// 当前滚动位置
    pub fn current_scroll(&self) -> f64 {
        self.current_scroll
    }

    /// 当前视口高度
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// 全部元素记录
    pub fn records(&self) -> &[ElementRecord] {
        &self.records
    }

    /// setup 阶段收集的配置警告
    pub fn warnings(&self) -> &[SetupWarning] {
        &self.warnings
    }

    /// 宿主引用
    pub fn host(&self) -> &H {
        &self.host
    }

    /// 宿主可变引用
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// 扫描一个元素的声明，构建记录
    ///
    /// # 返回
    ///
    /// - `Ok(Some(record))`: 至少一条有效声明
    /// - `Ok(None)`: 无声明属性，跳过
    /// - `Err(warning)`: 任一声明解析失败，整个元素作废
    fn build_record(&self, element: ElementId) -> Result<Option<ElementRecord>, SetupWarning> {
        let bx = self.host.element_box(element);
        let dimensions = Dimensions {
            top: bx.top + self.current_scroll,
            height: bx.height,
            width: bx.width,
        };
        let initial_matrix = self.host.computed_matrix(element).unwrap_or(IDENTITY_MATRIX);

        let mut record = ElementRecord::new(element, dimensions, initial_matrix);

        for attr in Attr::ALL {
            let name = format!("{}-{}", self.prefix, attr.name());
            let Some(raw) = self.host.read_declaration(element, &name) else {
                continue;
            };

            let parsed = parse_declaration(attr, &raw).map_err(|error| SetupWarning {
                element,
                attribute: attr.name(),
                error,
            })?;

            let anim = AnimatedAttribute::build(
                attr,
                parsed.change,
                parsed.spread,
                &dimensions,
                self.viewport_height,
            );

            match attr.kind() {
                AttrKind::Transform => record.transforms.insert(attr, anim),
                AttrKind::Style => record.styles.insert(attr, anim),
            };
        }

        if record.attribute_count() == 0 {
            return Ok(None);
        }

        record.recompute_max_domain();
        Ok(Some(record))
    }

    /// 合成一条记录并写入宿主
    fn apply(&mut self, index: usize) {
        let out = compositor::evaluate(&self.records[index], self.current_scroll);
        let element = self.records[index].element;
        self.host.write_style(element, &out.style);
        self.host.write_transform(element, &out.transform);
    }
}
