use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::description::DescriptionBlock;

/// 按卡片序号记录的标记集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMarks(BTreeSet<usize>);

impl IndexMarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, index: usize) {
        self.0.insert(index);
    }

    pub fn unmark(&mut self, index: usize) {
        self.0.remove(&index);
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn extend(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.0.extend(indices);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// `0..count` 中的每个序号都已标记
    pub fn covers(&self, count: usize) -> bool {
        (0..count).all(|index| self.0.contains(&index))
    }
}

impl FromIterator<usize> for IndexMarks {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 编辑后需要提示用户重新生成的卡片
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerateTracker {
    first_frame_description: IndexMarks,
    first_frame_image: IndexMarks,
    video: IndexMarks,
    audio: IndexMarks,
}

impl RegenerateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分镜描述需要重新编辑
    pub fn first_frame_description(&self) -> &IndexMarks {
        &self.first_frame_description
    }

    pub fn first_frame_image(&self) -> &IndexMarks {
        &self.first_frame_image
    }

    pub fn video(&self) -> &IndexMarks {
        &self.video
    }

    pub fn audio(&self) -> &IndexMarks {
        &self.audio
    }

    /// 角色描述修改后，出现该角色的分镜描述都需要更新
    pub fn role_description_edited(&mut self, role: &str, frames: &[DescriptionBlock]) {
        if role.is_empty() {
            return;
        }
        let affected: Vec<usize> = frames
            .iter()
            .enumerate()
            .filter(|(_, frame)| frame.story_role.contains(role))
            .map(|(index, _)| index)
            .collect();
        debug!("Role {:?} appears in storyboard frames {:?}", role, affected);
        self.first_frame_description.extend(affected);
    }

    /// 分镜描述被编辑或重新生成
    pub fn first_frame_description_edited(&mut self, index: usize) {
        self.first_frame_description.unmark(index);
        self.first_frame_image.mark(index);
    }

    pub fn first_frame_image_regenerated(&mut self, index: usize, videos_present: bool) {
        self.first_frame_image.unmark(index);
        if videos_present {
            self.video.mark(index);
        }
    }

    /// 视频描述被编辑或重新生成
    pub fn video_description_edited(&mut self, index: usize) {
        self.video.mark(index);
    }

    pub fn video_regenerated(&mut self, index: usize) {
        self.video.unmark(index);
    }

    pub fn audio_line_edited(&mut self, index: usize) {
        self.audio.mark(index);
    }

    pub fn audio_regenerated(&mut self, index: usize) {
        self.audio.unmark(index);
    }
}

/// 某一步骤中已加载完成的媒体
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadTracker {
    loaded: IndexMarks,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个序号加载完成；仅当这一次使 `0..total` 全部完成时返回 true
    pub fn loaded(&mut self, index: usize, total: usize) -> bool {
        let was_complete = self.loaded.covers(total);
        self.loaded.mark(index);
        !was_complete && self.loaded.covers(total)
    }

    pub fn reset(&mut self, index: usize) {
        self.loaded.unmark(index);
    }

    pub fn is_complete(&self, total: usize) -> bool {
        self.loaded.covers(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<DescriptionBlock> {
        vec![
            DescriptionBlock::new("Storyboard 1", "Alice, Bob", "They meet"),
            DescriptionBlock::new("Storyboard 2", "Bob", "Bob leaves"),
            DescriptionBlock::new("Storyboard 3", "Alice", "Alice waits"),
        ]
    }

    #[test]
    fn test_index_marks() {
        let mut marks = IndexMarks::new();
        assert!(marks.is_empty());
        assert!(marks.covers(0));

        marks.mark(2);
        marks.mark(0);
        marks.mark(40);
        assert_eq!(marks.iter().collect::<Vec<_>>(), vec![0, 2, 40]);
        assert!(!marks.covers(3));

        marks.mark(1);
        assert!(marks.covers(3));

        marks.unmark(2);
        assert!(!marks.is_marked(2));
        assert_eq!(marks.len(), 3);
    }

    #[test]
    fn test_role_edit_marks_frames_with_role() {
        let mut tracker = RegenerateTracker::new();
        tracker.role_description_edited("Alice", &frames());

        assert_eq!(tracker.first_frame_description().iter().collect::<Vec<_>>(), vec![0, 2]);

        tracker.role_description_edited("", &frames());
        assert_eq!(tracker.first_frame_description().len(), 2);
    }

    #[test]
    fn test_first_frame_cascade() {
        let mut tracker = RegenerateTracker::new();
        tracker.role_description_edited("Bob", &frames());
        assert!(tracker.first_frame_description().is_marked(1));

        tracker.first_frame_description_edited(1);
        assert!(!tracker.first_frame_description().is_marked(1));
        assert!(tracker.first_frame_image().is_marked(1));

        tracker.first_frame_image_regenerated(1, true);
        assert!(!tracker.first_frame_image().is_marked(1));
        assert!(tracker.video().is_marked(1));

        tracker.video_regenerated(1);
        assert!(tracker.video().is_empty());
    }

    #[test]
    fn test_image_regenerated_without_videos() {
        let mut tracker = RegenerateTracker::new();
        tracker.first_frame_description_edited(0);
        tracker.first_frame_image_regenerated(0, false);

        assert!(tracker.first_frame_image().is_empty());
        assert!(tracker.video().is_empty());
    }

    #[test]
    fn test_audio_marks() {
        let mut tracker = RegenerateTracker::new();
        tracker.video_description_edited(3);
        tracker.audio_line_edited(3);
        assert!(tracker.audio().is_marked(3));

        tracker.audio_regenerated(3);
        assert!(tracker.audio().is_empty());
        assert!(tracker.video().is_marked(3));
    }

    #[test]
    fn test_load_tracker_completes_once() {
        let mut videos = LoadTracker::new();
        assert!(!videos.loaded(1, 3));
        assert!(!videos.loaded(0, 3));
        assert!(videos.loaded(2, 3));
        assert!(videos.is_complete(3));

        // reloading an already loaded video does not complete the stage again
        assert!(!videos.loaded(2, 3));

        videos.reset(0);
        assert!(!videos.is_complete(3));
        assert!(videos.loaded(0, 3));
    }

    #[test]
    fn test_load_tracker_ignores_out_of_range_indices() {
        let mut videos = LoadTracker::new();
        assert!(!videos.loaded(5, 1));
        assert!(videos.loaded(0, 1));
        assert!(!videos.loaded(0, 1));
    }
}
