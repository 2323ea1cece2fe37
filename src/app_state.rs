//! Menu state: the two quality groups, which one has focus, and the tier picked in each.

/// One of the two independent option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Video,
    Audio,
}

impl Group {
    pub const fn index(self) -> usize {
        match self {
            Group::Video => 0,
            Group::Audio => 1,
        }
    }

    /// Maps any signed position onto a group, saturating at either end.
    pub fn from_clamped(position: isize) -> Self {
        if position <= 0 {
            Group::Video
        } else {
            Group::Audio
        }
    }
}

/// Video quality tiers, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoTier {
    P360,
    P480,
    Hd,
    Fhd,
    Qhd,
    Uhd4k,
}

impl VideoTier {
    pub const ALL: [VideoTier; 6] = [
        VideoTier::P360,
        VideoTier::P480,
        VideoTier::Hd,
        VideoTier::Fhd,
        VideoTier::Qhd,
        VideoTier::Uhd4k,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            VideoTier::P360 => "360p",
            VideoTier::P480 => "480p",
            VideoTier::Hd => "HD",
            VideoTier::Fhd => "FHD",
            VideoTier::Qhd => "QHD",
            VideoTier::Uhd4k => "4K",
        }
    }

    /// Height ceiling handed to yt-dlp for this tier.
    ///
    /// These are part of the download contract and intentionally do not match the
    /// labels (e.g. "HD" allows up to 1080, "QHD" up to 4320).
    pub const fn height_ceiling(&self) -> u32 {
        match self {
            VideoTier::P360 => 480,
            VideoTier::P480 => 720,
            VideoTier::Hd => 1080,
            VideoTier::Fhd => 1440,
            VideoTier::Qhd => 4320,
            VideoTier::Uhd4k => 6480,
        }
    }
}

/// Audio quality tiers, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioTier {
    Worst,
    Best,
}

impl AudioTier {
    pub const ALL: [AudioTier; 2] = [AudioTier::Worst, AudioTier::Best];

    pub const fn label(&self) -> &'static str {
        match self {
            AudioTier::Worst => "Worst",
            AudioTier::Best => "Best",
        }
    }

    /// yt-dlp format selector for this tier.
    pub const fn selector(&self) -> &'static str {
        match self {
            AudioTier::Worst => "worstaudio",
            AudioTier::Best => "bestaudio",
        }
    }
}

/// Ordered, immutable list of labelled tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    title: &'static str,
    labels: Vec<&'static str>,
}

impl OptionGroup {
    pub fn video() -> Self {
        Self {
            title: "Video quality",
            labels: VideoTier::ALL.iter().map(VideoTier::label).collect(),
        }
    }

    pub fn audio() -> Self {
        Self {
            title: "Audio quality",
            labels: AudioTier::ALL.iter().map(AudioTier::label).collect(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Index of the last tier. Groups are never empty.
    pub fn last_index(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }
}

/// The tiers picked when the menu was confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub video: VideoTier,
    pub audio: AudioTier,
}

/// Focus plus per-group selected index.
///
/// All mutation goes through [`OptionModel::set_focus`] and
/// [`OptionModel::set_index`], which saturate out-of-range requests at the nearest
/// bound instead of failing or wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionModel {
    groups: [OptionGroup; 2],
    focus: Group,
    indices: [usize; 2],
}

impl Default for OptionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionModel {
    pub fn new() -> Self {
        Self {
            groups: [OptionGroup::video(), OptionGroup::audio()],
            focus: Group::Video,
            indices: [0, 0],
        }
    }

    pub fn current_focus(&self) -> Group {
        self.focus
    }

    pub fn current_index(&self, group: Group) -> usize {
        self.indices[group.index()]
    }

    pub fn group_size(&self, group: Group) -> usize {
        self.groups[group.index()].len()
    }

    pub fn group(&self, group: Group) -> &OptionGroup {
        &self.groups[group.index()]
    }

    pub fn set_focus(&mut self, focus: isize) {
        self.focus = Group::from_clamped(focus);
    }

    pub fn set_index(&mut self, group: Group, index: isize) {
        let last = self.groups[group.index()].last_index();
        self.indices[group.index()] = index.clamp(0, last as isize) as usize;
    }

    pub fn selection(&self) -> Selection {
        Selection {
            video: VideoTier::ALL[self.current_index(Group::Video)],
            audio: AudioTier::ALL[self.current_index(Group::Audio)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_starts_at_origin() {
        let model = OptionModel::new();
        assert_eq!(model.current_focus(), Group::Video);
        assert_eq!(model.current_index(Group::Video), 0);
        assert_eq!(model.current_index(Group::Audio), 0);
    }

    #[test]
    fn test_group_sizes_and_labels() {
        let model = OptionModel::new();
        assert_eq!(model.group_size(Group::Video), 6);
        assert_eq!(model.group_size(Group::Audio), 2);
        assert_eq!(
            model.group(Group::Video).labels(),
            &["360p", "480p", "HD", "FHD", "QHD", "4K"]
        );
        assert_eq!(model.group(Group::Audio).labels(), &["Worst", "Best"]);
    }

    #[test]
    fn test_set_focus_saturates() {
        let mut model = OptionModel::new();
        model.set_focus(-5);
        assert_eq!(model.current_focus(), Group::Video);
        model.set_focus(1);
        assert_eq!(model.current_focus(), Group::Audio);
        model.set_focus(42);
        assert_eq!(model.current_focus(), Group::Audio);
    }

    #[test]
    fn test_set_index_saturates_at_last_tier() {
        let mut model = OptionModel::new();
        model.set_index(Group::Video, 99);
        assert_eq!(model.current_index(Group::Video), 5);
        model.set_index(Group::Audio, 2);
        assert_eq!(model.current_index(Group::Audio), 1);
    }

    #[test]
    fn test_set_index_saturates_at_zero() {
        let mut model = OptionModel::new();
        model.set_index(Group::Video, 3);
        model.set_index(Group::Video, -1);
        assert_eq!(model.current_index(Group::Video), 0);
    }

    #[test]
    fn test_set_index_leaves_other_group_alone() {
        let mut model = OptionModel::new();
        model.set_index(Group::Audio, 1);
        assert_eq!(model.current_index(Group::Video), 0);
        assert_eq!(model.current_index(Group::Audio), 1);
    }

    #[test]
    fn test_selection_reflects_indices() {
        let mut model = OptionModel::new();
        model.set_index(Group::Video, 2);
        model.set_index(Group::Audio, 1);
        assert_eq!(
            model.selection(),
            Selection {
                video: VideoTier::Hd,
                audio: AudioTier::Best,
            }
        );
    }

    #[test]
    fn test_height_ceilings_are_preserved() {
        let ceilings: Vec<u32> = VideoTier::ALL.iter().map(|t| t.height_ceiling()).collect();
        assert_eq!(ceilings, vec![480, 720, 1080, 1440, 4320, 6480]);
    }

    #[test]
    fn test_group_from_clamped() {
        assert_eq!(Group::from_clamped(-1), Group::Video);
        assert_eq!(Group::from_clamped(0), Group::Video);
        assert_eq!(Group::from_clamped(2), Group::Audio);
        assert_eq!(Group::Audio.index(), 1);
    }
}
