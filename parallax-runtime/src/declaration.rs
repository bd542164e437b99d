//! # Declaration 模块
//!
//! 声明字符串解析器（手写字符串解析，无正则依赖）。
//!
//! ## 声明格式
//!
//! ```text
//! value=<spec>;spread=<锚点>,<比例>,<锚点>,<比例>
//! ```
//!
//! `<spec>` 有两种写法：
//!
//! - 裸数值：`value=100` — 对称展开为 `from = -50, to = +50`，
//!   多分量属性复制到每个分量
//! - 键值对：`value=from=10 0 10 0,to=0 0 0 0` — 分量按空白分隔，
//!   百分比 token（`50%`）保留单位标注
//!
//! `spread` 段可省略，默认 `top,1,bottom,0`；两个触发点解析后
//! 按比例降序排序。
//!
//! ## 错误策略
//!
//! 缺少 `value=`、未知锚点、数值无法解析、分量数不符都是致命配置
//! 错误：解析立即失败，调用方将该元素排除。

use crate::attr::Attr;
use crate::error::ConfigError;
use crate::spread::{Anchor, Spread, SpreadPoint};
use crate::value::{AttrValue, AttributeChange};

/// 解析完成的声明
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDeclaration {
    /// from/to 变化描述
    pub change: AttributeChange,
    /// 触发区间
    pub spread: Spread,
}

/// 解析一条声明字符串
///
/// # 参数
///
/// - `attr`: 声明所属的属性（决定分量数）
/// - `raw`: 原始声明字符串
///
/// # 错误
///
/// 任何格式错误都返回 [`ConfigError`]，该声明整体作废。
pub fn parse_declaration(attr: Attr, raw: &str) -> Result<ParsedDeclaration, ConfigError> {
    let mut value_spec: Option<&str> = None;
    let mut spread_spec: Option<&str> = None;

    // 顶层按 ';' 分段，每段按第一个 '=' 切出键
    for segment in raw.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.split_once('=') {
            Some(("value", rest)) => value_spec = Some(rest),
            Some(("spread", rest)) => spread_spec = Some(rest),
            // 未识别的段不属于本引擎，忽略
            _ => {}
        }
    }

    let value_spec = value_spec.ok_or_else(|| ConfigError::MissingValue {
        attr: attr.name().to_string(),
    })?;

    let change = parse_change(attr, value_spec)?;
    let spread = match spread_spec {
        Some(spec) => parse_spread(spec)?,
        None => Spread::default(),
    };

    Ok(ParsedDeclaration { change, spread })
}

/// 解析 `<spec>` 段为 from/to 变化描述
fn parse_change(attr: Attr, spec: &str) -> Result<AttributeChange, ConfigError> {
    if spec.contains(',') {
        parse_keyed_change(attr, spec)
    } else {
        parse_symmetric_change(attr, spec)
    }
}

/// 裸数值写法：对称展开为 ±一半，复制到每个分量
fn parse_symmetric_change(attr: Attr, spec: &str) -> Result<AttributeChange, ConfigError> {
    let value = AttrValue::parse(spec)?;
    let count = attr.component_count();

    Ok(AttributeChange::new(
        vec![value.scaled(-0.5); count],
        vec![value.scaled(0.5); count],
    ))
}

/// 键值对写法：`from=.. ..,to=.. ..`
fn parse_keyed_change(attr: Attr, spec: &str) -> Result<AttributeChange, ConfigError> {
    let mut from: Option<Vec<AttrValue>> = None;
    let mut to: Option<Vec<AttrValue>> = None;

    for pair in spec.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let Some((key, tokens)) = pair.split_once('=') else {
            return Err(ConfigError::InvalidNumber {
                token: pair.to_string(),
            });
        };
        let components = parse_components(attr, tokens)?;
        match key.trim() {
            "from" => from = Some(components),
            "to" => to = Some(components),
            _ => {}
        }
    }

    let from = from.ok_or(ConfigError::MissingChangeKey {
        attr: attr.name().to_string(),
        key: "from",
    })?;
    let to = to.ok_or(ConfigError::MissingChangeKey {
        attr: attr.name().to_string(),
        key: "to",
    })?;

    Ok(AttributeChange::new(from, to))
}

/// 解析一侧的分量列表（空白分隔），并校验分量数
fn parse_components(attr: Attr, tokens: &str) -> Result<Vec<AttrValue>, ConfigError> {
    let components: Vec<AttrValue> = tokens
        .split_whitespace()
        .map(AttrValue::parse)
        .collect::<Result<_, _>>()?;

    let expected = attr.component_count();
    if components.len() != expected {
        return Err(ConfigError::ComponentCount {
            attr: attr.name().to_string(),
            expected,
            got: components.len(),
        });
    }

    Ok(components)
}

/// 解析 `spread` 段：`锚点,比例,锚点,比例`
fn parse_spread(spec: &str) -> Result<Spread, ConfigError> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(ConfigError::MalformedSpread {
            raw: spec.to_string(),
        });
    }

    let a = parse_spread_point(parts[0], parts[1])?;
    let b = parse_spread_point(parts[2], parts[3])?;

    Ok(Spread::ordered(a, b))
}

fn parse_spread_point(anchor: &str, fraction: &str) -> Result<SpreadPoint, ConfigError> {
    let anchor = Anchor::parse(anchor)?;
    let fraction: f64 = fraction
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            token: fraction.to_string(),
        })?;

    Ok(SpreadPoint::new(anchor, fraction))
}
