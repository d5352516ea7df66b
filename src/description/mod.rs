mod codec;

pub use codec::DescriptionCodec;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::Spacing;
use crate::error::Result;

/// 描述文本中的一个条目（角色 / 分镜 / 视频镜头）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionBlock {
    /// 条目标签，例如 "Character 1"、"Storyboard 2"
    pub unique_key: String,
    /// 角色名或出场角色列表
    pub story_role: String,
    /// 描述正文
    pub content: String,
}

impl DescriptionBlock {
    pub fn new(
        unique_key: impl Into<String>,
        story_role: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            unique_key: unique_key.into(),
            story_role: story_role.into(),
            content: content.into(),
        }
    }

    /// 从 JSON 数组读取条目列表
    pub fn list_from_json(json: &str) -> Result<Vec<DescriptionBlock>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 某一阶段描述块的文本格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionFormat {
    /// 条目标签前缀，后接空格和序号
    pub key_label: &'static str,
    /// 第二行的角色标签
    pub role_label: &'static str,
    /// 标签冒号之后的分隔符
    pub key_separator: &'static str,
    /// 旧模板使用的分隔符
    pub legacy_key_separator: &'static str,
}

impl DescriptionFormat {
    pub const ROLE: DescriptionFormat = DescriptionFormat {
        key_label: "Character",
        role_label: "Character",
        key_separator: " ",
        legacy_key_separator: " ",
    };

    pub const FIRST_FRAME: DescriptionFormat = DescriptionFormat {
        key_label: "Storyboard",
        role_label: "Characters",
        key_separator: "",
        legacy_key_separator: "",
    };

    /// 旧模板在冒号后多写了一个空格
    pub const VIDEO: DescriptionFormat = DescriptionFormat {
        key_label: "Video",
        role_label: "Characters",
        key_separator: "",
        legacy_key_separator: " ",
    };

    pub fn separator(&self, spacing: Spacing) -> &'static str {
        match spacing {
            Spacing::Canonical => self.key_separator,
            Spacing::Legacy => self.legacy_key_separator,
        }
    }

    /// 匹配单个条目的正则：标签行、角色行、正文行
    pub fn pattern(&self) -> Regex {
        let source = format!(
            r"({key} [0-9]+):[^\S\n]?\n{role}:[^\S\n](.*)\n(.*)",
            key = regex::escape(self.key_label),
            role = regex::escape(self.role_label),
        );
        Regex::new(&source).expect("description pattern is a valid regex")
    }

    pub fn render(&self, block: &DescriptionBlock, spacing: Spacing) -> String {
        format!(
            "{}:{}\n{}: {}\n{}",
            block.unique_key,
            self.separator(spacing),
            self.role_label,
            block.story_role,
            block.content
        )
    }
}
