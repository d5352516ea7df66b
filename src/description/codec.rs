use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{DescriptionBlock, DescriptionFormat};
use crate::config::{Config, Spacing};
use crate::phase::DescriptionPhase;

static ROLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| DescriptionFormat::ROLE.pattern());

static FIRST_FRAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| DescriptionFormat::FIRST_FRAME.pattern());

static VIDEO_PATTERN: LazyLock<Regex> = LazyLock::new(|| DescriptionFormat::VIDEO.pattern());

fn pattern_for(phase: DescriptionPhase) -> &'static Regex {
    match phase {
        DescriptionPhase::Role => &*ROLE_PATTERN,
        DescriptionPhase::FirstFrame => &*FIRST_FRAME_PATTERN,
        DescriptionPhase::Video => &*VIDEO_PATTERN,
    }
}

/// 描述块的解析、合并与序列化
///
/// 所有操作对任意输入都有定义：没有匹配到任何条目时返回 `None`，
/// 目标标签不存在时原样序列化。
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionCodec {
    spacing: Spacing,
}

impl DescriptionCodec {
    pub fn new(spacing: Spacing) -> Self {
        Self { spacing }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.spacing)
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// 按出现顺序提取所有条目
    pub fn parse(&self, raw: &str, phase: DescriptionPhase) -> Option<Vec<DescriptionBlock>> {
        let blocks: Vec<DescriptionBlock> = pattern_for(phase)
            .captures_iter(raw)
            .map(|caps| DescriptionBlock {
                unique_key: caps[1].to_string(),
                story_role: caps[2].to_string(),
                content: caps[3].to_string(),
            })
            .collect();

        if blocks.is_empty() {
            debug!("No {} entries found in {} characters", phase, raw.len());
            return None;
        }

        debug!("Parsed {} {} entries", blocks.len(), phase);
        Some(blocks)
    }

    pub fn serialize(&self, block: &DescriptionBlock, phase: DescriptionPhase) -> String {
        phase.format().render(block, self.spacing)
    }

    pub fn serialize_all(&self, blocks: &[DescriptionBlock], phase: DescriptionPhase) -> String {
        blocks
            .iter()
            .map(|block| self.serialize(block, phase))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 替换指定标签条目的正文后整体序列化
    pub fn merge_by_key(
        &self,
        phase: DescriptionPhase,
        replacement: &str,
        blocks: &[DescriptionBlock],
        target_key: &str,
    ) -> String {
        let mut replaced = false;
        let merged: Vec<String> = blocks
            .iter()
            .map(|block| {
                if block.unique_key == target_key {
                    replaced = true;
                    let edited = DescriptionBlock {
                        content: replacement.to_string(),
                        ..block.clone()
                    };
                    self.serialize(&edited, phase)
                } else {
                    self.serialize(block, phase)
                }
            })
            .collect();

        if !replaced {
            debug!("Key {:?} not found among {} {} entries", target_key, blocks.len(), phase);
        }

        merged.join("\n")
    }

    /// 解析原始文本并合并；没有结构化内容时不产生输出
    pub fn merge_description(
        &self,
        phase: DescriptionPhase,
        raw: &str,
        replacement: &str,
        target_key: &str,
    ) -> Option<String> {
        let blocks = self.parse(raw, phase)?;
        Some(self.merge_by_key(phase, replacement, &blocks, target_key))
    }

    /// 清空某个条目的正文，用于请求重新生成该条描述
    pub fn clear_description(
        &self,
        phase: DescriptionPhase,
        raw: &str,
        target_key: &str,
    ) -> Option<String> {
        self.merge_description(phase, raw, "", target_key)
    }
}
