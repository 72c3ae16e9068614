// src/detection/templates.rs
//
// Static wording for every issue: title, one-line cause/remedy summary and
// the fix step. Nothing here is generated at runtime.

use super::result::{FixStep, IssueKind};

/// Fixed text of one fix step
pub struct FixTemplate {
    pub title: &'static str,
    pub action: &'static str,
    pub when: &'static str,
    pub how: &'static str,
    pub recheck: &'static str,
}

impl FixTemplate {
    pub fn to_step(&self) -> FixStep {
        FixStep {
            title: self.title.to_string(),
            action: self.action.to_string(),
            when: self.when.to_string(),
            how: self.how.to_string(),
            recheck: self.recheck.to_string(),
        }
    }
}

/// Fixed text of one issue
pub struct IssueTemplate {
    pub title: &'static str,
    pub summary: &'static str,
    pub fixes: &'static [FixTemplate],
}

const LOUDNESS_TOO_HOT: IssueTemplate = IssueTemplate {
    title: "Integrated loudness is above target",
    summary: "Why: integrated loudness sits above the benchmark. What: pull back gain into the limiter.",
    fixes: &[FixTemplate {
        title: "Bring loudness down",
        action: "Lower the master bus gain or the limiter input.",
        when: "During final gain staging, before export",
        how: "Work in 0.5 dB steps and bounce a short loop after each change.",
        recheck: "loudness.integrated_lufs should fall toward the target range.",
    }],
};

const LOUDNESS_TOO_COLD: IssueTemplate = IssueTemplate {
    title: "Integrated loudness is below target",
    summary: "Why: integrated loudness trails the benchmark. What: raise level with controlled limiting.",
    fixes: &[FixTemplate {
        title: "Bring loudness up",
        action: "Add bus gain ahead of a gentle limiter.",
        when: "During final gain staging, before export",
        how: "Work in 0.5 dB steps and listen for pumping or distortion after each change.",
        recheck: "loudness.integrated_lufs should rise toward the target range.",
    }],
};

const TRUE_PEAK_RISK: IssueTemplate = IssueTemplate {
    title: "True peak exceeds safe headroom",
    summary: "Why: interpolated peaks pass the safety ceiling. What: lower the ceiling or the input to avoid overs.",
    fixes: &[FixTemplate {
        title: "Restore peak headroom",
        action: "Drop the limiter ceiling or trim the bus feeding it.",
        when: "While setting final limiting",
        how: "Trim 0.3 to 1.0 dB and confirm transients no longer overshoot.",
        recheck: "true_peak.true_peak_dbfs should end at or below the threshold.",
    }],
};

const LOW_END_BUILDUP: IssueTemplate = IssueTemplate {
    title: "Low-end buildup above benchmark",
    summary: "Why: sub and low bands carry more energy than the benchmark. What: tighten the low end with EQ or dynamics.",
    fixes: &[FixTemplate {
        title: "Tame low-end energy",
        action: "Use a gentle low shelf or a dynamic EQ on the sub/low region.",
        when: "While balancing kick and bass",
        how: "Cut 0.5 to 2.0 dB in the loudest band; switch to dynamic EQ if the cut causes pumping.",
        recheck: "spectral.sub and spectral.low deltas should shrink toward zero.",
    }],
};

const HARSH_MIDS: IssueTemplate = IssueTemplate {
    title: "High-mid harshness above target",
    summary: "Why: the high-mid band is hotter than the benchmark. What: soften it with static or dynamic EQ.",
    fixes: &[FixTemplate {
        title: "Soften the high mids",
        action: "Apply a narrow cut or dynamic suppression in the 2-6 kHz region.",
        when: "While taming vocal or guitar bite",
        how: "Start at 1 dB of reduction and widen the Q until the edge goes without dulling the mix.",
        recheck: "spectral.highmid delta should trend down toward the target.",
    }],
};

const DULL_TOP: IssueTemplate = IssueTemplate {
    title: "Top-end energy below target",
    summary: "Why: high and air bands fall short of the benchmark. What: restore presence with care.",
    fixes: &[FixTemplate {
        title: "Open up the top end",
        action: "Use a gentle high shelf, or an exciter in small doses.",
        when: "During final tonal polish",
        how: "Boost in small increments and listen for brittleness or sibilance.",
        recheck: "spectral.air and spectral.high deltas should rise toward zero.",
    }],
};

const STEREO_WIDTH_IMBALANCE: IssueTemplate = IssueTemplate {
    title: "Stereo field outside target behavior",
    summary: "Why: stereo width or correlation is outside the expected range. What: adjust width processing and check mono.",
    fixes: &[FixTemplate {
        title: "Rebalance the stereo image",
        action: "Pull back side gain if too wide, or widen the sides if too narrow.",
        when: "Once the spatial balance is settled",
        how: "Move the M/S balance in small steps and check mono compatibility after each one.",
        recheck: "stereo.width_proxy and stereo.correlation should approach the benchmark range.",
    }],
};

const DYNAMICS_TOO_CRUSHED: IssueTemplate = IssueTemplate {
    title: "Dynamics are over-compressed",
    summary: "Why: crest factor is below target. What: give transients and dynamic range back.",
    fixes: &[FixTemplate {
        title: "Recover dynamics",
        action: "Ease off bus compression and limiting to win back transient headroom.",
        when: "While setting bus dynamics",
        how: "Raise thresholds or lower ratios a little at a time while keeping the tone intact.",
        recheck: "dynamics.crest_db should climb toward the target range.",
    }],
};

const DYNAMICS_TOO_SPIKY: IssueTemplate = IssueTemplate {
    title: "Dynamics are overly spiky",
    summary: "Why: crest factor is above target. What: control peak excursions.",
    fixes: &[FixTemplate {
        title: "Contain peaks",
        action: "Add moderate compression or limiting to catch the loudest transients.",
        when: "While setting bus dynamics",
        how: "Lower thresholds or raise ratios a little at a time while keeping the tone intact.",
        recheck: "dynamics.crest_db should fall toward the target range.",
    }],
};

/// Wording for an issue kind
pub fn template_for(kind: IssueKind) -> &'static IssueTemplate {
    match kind {
        IssueKind::LoudnessTooHot => &LOUDNESS_TOO_HOT,
        IssueKind::LoudnessTooCold => &LOUDNESS_TOO_COLD,
        IssueKind::TruePeakRisk => &TRUE_PEAK_RISK,
        IssueKind::LowEndBuildup => &LOW_END_BUILDUP,
        IssueKind::HarshMids => &HARSH_MIDS,
        IssueKind::DullTop => &DULL_TOP,
        IssueKind::StereoWidthImbalance => &STEREO_WIDTH_IMBALANCE,
        IssueKind::DynamicsTooCrushed => &DYNAMICS_TOO_CRUSHED,
        IssueKind::DynamicsTooSpiky => &DYNAMICS_TOO_SPIKY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [IssueKind; 9] = [
        IssueKind::LoudnessTooHot,
        IssueKind::LoudnessTooCold,
        IssueKind::TruePeakRisk,
        IssueKind::LowEndBuildup,
        IssueKind::HarshMids,
        IssueKind::DullTop,
        IssueKind::StereoWidthImbalance,
        IssueKind::DynamicsTooCrushed,
        IssueKind::DynamicsTooSpiky,
    ];

    #[test]
    fn test_every_kind_has_complete_text() {
        for kind in ALL_KINDS {
            let template = template_for(kind);
            assert!(!template.title.is_empty());
            assert!(template.summary.starts_with("Why:"));
            assert!(!template.fixes.is_empty());
            for fix in template.fixes {
                let step = fix.to_step();
                assert!(!step.action.is_empty() && !step.how.is_empty() && !step.recheck.is_empty());
            }
        }
    }
}
