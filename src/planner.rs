//! Decides whether a file needs rewriting and which audio tracks survive.

use crate::tracks::ClassificationResult;

/// Default flag assignment for one track in the remux instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultFlag {
    pub track_id: u64,
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationPlan {
    needs_track_removal: bool,
    needs_default_change: bool,
    keep_track_ids: Vec<u64>,
    remove_track_ids: Vec<u64>,
    new_default_track_id: Option<u64>,
    demote_track_ids: Vec<u64>,
}

impl MutationPlan {
    pub fn needs_track_removal(&self) -> bool {
        self.needs_track_removal
    }

    pub fn needs_default_change(&self) -> bool {
        self.needs_default_change
    }

    /// English audio tracks to keep, in their original order.
    pub fn keep_track_ids(&self) -> &[u64] {
        &self.keep_track_ids
    }

    pub fn remove_track_ids(&self) -> &[u64] {
        &self.remove_track_ids
    }

    pub fn new_default_track_id(&self) -> Option<u64> {
        self.new_default_track_id
    }

    /// Kept tracks that must be explicitly flagged non-default.
    pub fn demote_track_ids(&self) -> &[u64] {
        &self.demote_track_ids
    }

    /// Default flags to pass to the remux, first the new default then every
    /// other kept track switched off. Empty when the default is unchanged.
    pub fn default_flags(&self) -> Vec<DefaultFlag> {
        let Some(new_default) = self.new_default_track_id else {
            return Vec::new();
        };

        std::iter::once(DefaultFlag {
            track_id: new_default,
            default: true,
        })
        .chain(self.demote_track_ids.iter().map(|&track_id| DefaultFlag {
            track_id,
            default: false,
        }))
        .collect()
    }

    /// Audio track selection for the remux, or `None` to keep all tracks.
    pub fn audio_track_selection(&self) -> Option<&[u64]> {
        self.needs_track_removal
            .then_some(self.keep_track_ids.as_slice())
    }

    pub fn describe(&self) -> String {
        let mut changes = Vec::new();
        if self.needs_track_removal {
            changes.push(format!(
                "remove {} non-English track(s)",
                self.remove_track_ids.len()
            ));
        }
        if let Some(id) = self.new_default_track_id {
            changes.push(format!("set English track {} as default", id));
        }
        changes.join(" and ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanDecision {
    /// No English audio at all; the file is left alone.
    NoEnglishAudio,
    NoChange,
    Apply(MutationPlan),
}

impl PlanDecision {
    pub fn plan(&self) -> Option<&MutationPlan> {
        match self {
            Self::Apply(plan) => Some(plan),
            _ => None,
        }
    }
}

pub fn plan(classification: &ClassificationResult) -> PlanDecision {
    let Some(first) = classification.first_english() else {
        return PlanDecision::NoEnglishAudio;
    };

    let needs_track_removal = !classification.non_english_track_ids.is_empty();
    let needs_default_change = !first.is_default;

    if !needs_track_removal && !needs_default_change {
        return PlanDecision::NoChange;
    }

    let keep_track_ids = classification.english_track_ids();
    let demote_track_ids = if needs_default_change {
        keep_track_ids[1..].to_vec()
    } else {
        Vec::new()
    };

    PlanDecision::Apply(MutationPlan {
        needs_track_removal,
        needs_default_change,
        remove_track_ids: classification.non_english_track_ids.iter().copied().collect(),
        new_default_track_id: needs_default_change.then_some(first.id),
        keep_track_ids,
        demote_track_ids,
    })
}
