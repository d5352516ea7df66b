use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DescriptionError, Result};

pub const SPACING_ENV: &str = "STORYBOARD_SPACING";

/// 序列化时标签冒号后的空白策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// 与解析规则一致，保证往返稳定
    #[default]
    Canonical,
    /// 逐字节复现旧模板
    Legacy,
}

impl FromStr for Spacing {
    type Err = DescriptionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" => Ok(Spacing::Canonical),
            "legacy" => Ok(Spacing::Legacy),
            _ => Err(DescriptionError::InvalidSpacing(s.to_string())),
        }
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spacing::Canonical => f.write_str("canonical"),
            Spacing::Legacy => f.write_str("legacy"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub spacing: Spacing,
}

impl Config {
    /// 命令行参数优先，其次环境变量，最后默认值
    pub fn resolve(spacing_arg: Option<&str>, spacing_env: Option<&str>) -> Result<Self> {
        let spacing = match (spacing_arg, spacing_env) {
            (Some(value), _) => value.parse()?,
            (None, Some(value)) if !value.trim().is_empty() => value.parse()?,
            _ => Spacing::default(),
        };
        debug!("Resolved spacing: {}", spacing);
        Ok(Self { spacing })
    }

    pub fn from_env(spacing_arg: Option<&str>) -> Result<Self> {
        let env_value = std::env::var(SPACING_ENV).ok();
        Self::resolve(spacing_arg, env_value.as_deref())
    }
}
