use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::description::DescriptionFormat;
use crate::error::DescriptionError;

/// 后端生成任务的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPhase {
    RoleDescription,
    RoleImage,
    FirstFrameDescription,
    FirstFrameImage,
    VideoDescription,
    Video,
    Tone,
    Audio,
    Film,
}

impl TaskPhase {
    pub const ALL: [TaskPhase; 9] = [
        TaskPhase::RoleDescription,
        TaskPhase::RoleImage,
        TaskPhase::FirstFrameDescription,
        TaskPhase::FirstFrameImage,
        TaskPhase::VideoDescription,
        TaskPhase::Video,
        TaskPhase::Tone,
        TaskPhase::Audio,
        TaskPhase::Film,
    ];

    /// 阶段在后端消息中使用的标签
    pub fn tag(&self) -> &'static str {
        match self {
            TaskPhase::RoleDescription => "RoleDescription",
            TaskPhase::RoleImage => "RoleImage",
            TaskPhase::FirstFrameDescription => "FirstFrameDescription",
            TaskPhase::FirstFrameImage => "FirstFrameImage",
            TaskPhase::VideoDescription => "VideoDescription",
            TaskPhase::Video => "Video",
            TaskPhase::Tone => "Tone",
            TaskPhase::Audio => "Audio",
            TaskPhase::Film => "Film",
        }
    }

    /// 该阶段是否产出结构化的描述块
    pub fn description_phase(&self) -> Option<DescriptionPhase> {
        match self {
            TaskPhase::RoleDescription => Some(DescriptionPhase::Role),
            TaskPhase::FirstFrameDescription => Some(DescriptionPhase::FirstFrame),
            TaskPhase::VideoDescription => Some(DescriptionPhase::Video),
            _ => None,
        }
    }
}

impl fmt::Display for TaskPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TaskPhase {
    type Err = DescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskPhase::ALL
            .into_iter()
            .find(|phase| phase.tag() == s.trim())
            .ok_or_else(|| DescriptionError::UnknownPhase(s.to_string()))
    }
}

/// 带有结构化描述块的三个阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DescriptionPhase {
    /// 角色描述
    Role,
    /// 分镜首帧描述
    FirstFrame,
    /// 分镜视频描述
    Video,
}

impl DescriptionPhase {
    pub fn task_phase(&self) -> TaskPhase {
        match self {
            DescriptionPhase::Role => TaskPhase::RoleDescription,
            DescriptionPhase::FirstFrame => TaskPhase::FirstFrameDescription,
            DescriptionPhase::Video => TaskPhase::VideoDescription,
        }
    }

    pub fn format(&self) -> &'static DescriptionFormat {
        match self {
            DescriptionPhase::Role => &DescriptionFormat::ROLE,
            DescriptionPhase::FirstFrame => &DescriptionFormat::FIRST_FRAME,
            DescriptionPhase::Video => &DescriptionFormat::VIDEO,
        }
    }
}

impl fmt::Display for DescriptionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.task_phase().fmt(f)
    }
}

impl FromStr for DescriptionPhase {
    type Err = DescriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let phase: TaskPhase = s.parse()?;
        phase
            .description_phase()
            .ok_or(DescriptionError::NotDescriptionPhase(phase))
    }
}

/// 向导中展示的流程步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowStage {
    GenerateRole,
    GenerateStoryBoardImage,
    GenerateStoryBoardVideo,
    GenerateStoryBoardAudio,
    VideoEdit,
    Result,
}

impl FlowStage {
    pub const ORDER: [FlowStage; 6] = [
        FlowStage::GenerateRole,
        FlowStage::GenerateStoryBoardImage,
        FlowStage::GenerateStoryBoardVideo,
        FlowStage::GenerateStoryBoardAudio,
        FlowStage::VideoEdit,
        FlowStage::Result,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FlowStage::GenerateRole => "Generate characters",
            FlowStage::GenerateStoryBoardImage => "Generate storyboard images",
            FlowStage::GenerateStoryBoardVideo => "Generate storyboard videos",
            FlowStage::GenerateStoryBoardAudio => "Generate storyboard audio",
            FlowStage::VideoEdit => "Edit video",
            FlowStage::Result => "Result",
        }
    }

    /// 该步骤包含的任务阶段
    pub fn task_phases(&self) -> &'static [TaskPhase] {
        match self {
            FlowStage::GenerateRole => &[TaskPhase::RoleDescription, TaskPhase::RoleImage],
            FlowStage::GenerateStoryBoardImage => {
                &[TaskPhase::FirstFrameDescription, TaskPhase::FirstFrameImage]
            }
            FlowStage::GenerateStoryBoardVideo => &[TaskPhase::VideoDescription, TaskPhase::Video],
            FlowStage::GenerateStoryBoardAudio => &[TaskPhase::Tone, TaskPhase::Audio],
            FlowStage::VideoEdit => &[TaskPhase::Film],
            FlowStage::Result => &[],
        }
    }

    /// 任务阶段所属的步骤
    pub fn of(phase: TaskPhase) -> FlowStage {
        FlowStage::ORDER
            .into_iter()
            .find(|stage| stage.task_phases().contains(&phase))
            .unwrap_or(FlowStage::Result)
    }

    pub fn next(&self) -> Option<FlowStage> {
        let position = FlowStage::ORDER.iter().position(|stage| stage == self)?;
        FlowStage::ORDER.get(position + 1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_phase_tags_round_trip() {
        for phase in TaskPhase::ALL {
            assert_eq!(phase.tag().parse::<TaskPhase>().unwrap(), phase);
            assert_eq!(phase.to_string(), phase.tag());
        }
        assert!(matches!(
            "Storyboard".parse::<TaskPhase>(),
            Err(DescriptionError::UnknownPhase(_))
        ));
    }

    #[test]
    fn test_description_phase_from_tag() {
        assert_eq!(
            "RoleDescription".parse::<DescriptionPhase>().unwrap(),
            DescriptionPhase::Role
        );
        assert_eq!(
            "VideoDescription".parse::<DescriptionPhase>().unwrap(),
            DescriptionPhase::Video
        );
        assert!(matches!(
            "Tone".parse::<DescriptionPhase>(),
            Err(DescriptionError::NotDescriptionPhase(TaskPhase::Tone))
        ));
        assert_eq!(TaskPhase::Film.description_phase(), None);
    }

    #[test]
    fn test_flow_stage_grouping() {
        assert_eq!(FlowStage::of(TaskPhase::RoleImage), FlowStage::GenerateRole);
        assert_eq!(
            FlowStage::of(TaskPhase::FirstFrameDescription),
            FlowStage::GenerateStoryBoardImage
        );
        assert_eq!(FlowStage::of(TaskPhase::Tone), FlowStage::GenerateStoryBoardAudio);
        assert_eq!(FlowStage::of(TaskPhase::Film), FlowStage::VideoEdit);

        for phase in TaskPhase::ALL {
            assert!(FlowStage::of(phase).task_phases().contains(&phase));
        }
    }

    #[test]
    fn test_flow_stage_order() {
        assert_eq!(
            FlowStage::GenerateRole.next(),
            Some(FlowStage::GenerateStoryBoardImage)
        );
        assert_eq!(FlowStage::VideoEdit.next(), Some(FlowStage::Result));
        assert_eq!(FlowStage::Result.next(), None);
    }
}
