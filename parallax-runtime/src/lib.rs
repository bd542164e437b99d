//! # Parallax Runtime
//!
//! 滚动驱动视差引擎的核心运行时库。
//!
//! ## 架构概述
//!
//! `parallax-runtime` 是纯逻辑核心，不依赖任何页面环境或事件系统。
//! 它通过三个注入的协作者 trait 与宿主层（Host）通信：
//!
//! ```text
//! Host                                Engine
//!   │                                    │
//!   │◄── ViewportSource（几何/滚动）────│ on_scroll() / on_resize()
//!   │◄── DeclarationSource（声明属性）──│ init()
//!   │◄── StyleSink（样式写入）──────────│
//! ```
//!
//! 每次滚动事件都是一次完整、独立的重算：声明解析为强类型的
//! 变化描述，按元素几何推导出滚动区间（domain），逐分量建立带
//! 钳制的线性缩放，最后把全部通道合成为一条变换/样式字符串。
//!
//! ## 核心类型
//!
//! - [`ParallaxEngine`]：引擎控制器（setup / 滚动 / resize 编排）
//! - [`ElementRecord`]：单个元素的动画记录
//! - [`Composited`]：合成结果（变换 + 样式字符串）
//! - [`ConfigError`]：声明解析错误
//!
//! ## 模块结构
//!
//! - [`attr`]：识别属性集合与静态元数据
//! - [`value`]：带单位标注的数值与 from/to 变化描述
//! - [`spread`]：视口相对触发点
//! - [`declaration`]：声明字符串解析
//! - [`domain`]：滚动区间推导
//! - [`scale`]：带钳制的线性缩放
//! - [`record`]：元素动画记录
//! - [`compositor`]：变换/样式合成
//! - [`engine`]：引擎控制器
//! - [`host`]：外部协作者接口
//! - [`error`]：错误类型定义

pub mod attr;
pub mod compositor;
pub mod declaration;
pub mod domain;
pub mod engine;
pub mod error;
pub mod host;
pub mod record;
pub mod scale;
pub mod spread;
pub mod value;

// 重导出核心类型
pub use attr::{Attr, AttrKind};
pub use compositor::{Composited, IDENTITY_MATRIX, evaluate};
pub use declaration::{ParsedDeclaration, parse_declaration};
pub use domain::{Domain, INVIEW_BUFFER, build_domain, max_domain};
pub use engine::{DEFAULT_PREFIX, EngineStatus, ParallaxEngine, SetupWarning};
pub use error::{ConfigError, ConfigResult};
pub use host::{DeclarationSource, ElementBox, ElementId, StyleSink, ViewportSource};
pub use record::{AnimatedAttribute, Dimensions, ElementRecord};
pub use scale::LinearScale;
pub use spread::{Anchor, Spread, SpreadPoint};
pub use value::{AttrValue, AttributeChange, ValueUnit};
