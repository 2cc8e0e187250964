use serde::Serialize;

use crate::models::Phase;

use super::mapper::MappedBar;

/// One phase of a construction bar. Offsets are relative to the bar start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseSegment {
    pub phase: Phase,
    pub offset: u32,
    pub length: u32,
}

impl PhaseSegment {
    /// The same segment positioned on the window axis.
    pub fn absolute(&self, bar: &MappedBar) -> PhaseSegment {
        PhaseSegment {
            offset: bar.offset + self.offset,
            ..*self
        }
    }

    pub fn end(&self) -> u32 {
        self.offset + self.length
    }
}

/// Split `length` units into contract, preparation, construction and
/// completion.
///
/// The first three phases each take `ceil(length / 4)` units and completion
/// takes whatever is left, never less than zero. For very short bars the first
/// three phases can therefore run past `length` (five units split as
/// 2, 2, 2, 0); renderers clip to the bar.
pub fn segment_phases(length: u32) -> [PhaseSegment; 4] {
    let quarter = length.div_ceil(4);
    let completion = length.saturating_sub(quarter * 3);

    let mut segments = Phase::ALL.map(|phase| PhaseSegment {
        phase,
        offset: 0,
        length: quarter,
    });
    for (i, segment) in segments.iter_mut().enumerate() {
        segment.offset = quarter * i as u32;
    }
    segments[3].length = completion;
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(segments: &[PhaseSegment; 4]) -> [u32; 4] {
        segments.map(|s| s.length)
    }

    #[test]
    fn labels_are_in_construction_order() {
        let segments = segment_phases(12);
        let phases: Vec<Phase> = segments.iter().map(|s| s.phase).collect();
        assert_eq!(
            phases,
            vec![Phase::Contract, Phase::Preparation, Phase::Construction, Phase::Completion]
        );
    }

    #[test]
    fn even_split() {
        assert_eq!(lengths(&segment_phases(8)), [2, 2, 2, 2]);
    }

    #[test]
    fn remainder_goes_to_completion() {
        assert_eq!(lengths(&segment_phases(18)), [5, 5, 5, 3]);
        assert_eq!(lengths(&segment_phases(31)), [8, 8, 8, 7]);
    }

    #[test]
    fn five_units_overrun_is_reproduced() {
        let segments = segment_phases(5);
        assert_eq!(lengths(&segments), [2, 2, 2, 0]);
        let front: u32 = segments[..3].iter().map(|s| s.length).sum();
        assert_eq!(front, 6);
    }

    #[test]
    fn short_lengths_clamp_completion() {
        for length in 1..=4 {
            let segments = segment_phases(length);
            let quarter = length.div_ceil(4);
            assert!(segments[3].length == 0 || segments[3].length <= quarter);
        }
        assert_eq!(lengths(&segment_phases(1)), [1, 1, 1, 0]);
        assert_eq!(lengths(&segment_phases(2)), [1, 1, 1, 0]);
        assert_eq!(lengths(&segment_phases(3)), [1, 1, 1, 0]);
        assert_eq!(lengths(&segment_phases(4)), [1, 1, 1, 1]);
    }

    #[test]
    fn segments_are_contiguous_from_zero() {
        for length in 0..=40 {
            let segments = segment_phases(length);
            assert_eq!(segments.len(), 4);
            assert_eq!(segments[0].offset, 0);
            for pair in segments.windows(2) {
                assert_eq!(pair[0].end(), pair[1].offset);
            }
            assert_eq!(segments[3].end(), length.max(length.div_ceil(4) * 3));
        }
    }

    #[test]
    fn total_is_conserved_when_quarters_fit() {
        for length in [4, 7, 8, 12, 18, 30, 31] {
            let segments = segment_phases(length);
            assert_eq!(segments.iter().map(|s| s.length).sum::<u32>(), length);
        }
    }

    #[test]
    fn zero_length_yields_empty_segments() {
        assert_eq!(lengths(&segment_phases(0)), [0, 0, 0, 0]);
    }

    #[test]
    fn absolute_shifts_by_bar_offset() {
        let bar = MappedBar {
            project_id: "p".to_string(),
            offset: 6,
            length: 8,
            clipped: false,
        };
        let segments = segment_phases(bar.length);
        let shifted: Vec<u32> = segments.iter().map(|s| s.absolute(&bar).offset).collect();
        assert_eq!(shifted, vec![6, 8, 10, 12]);
        assert_eq!(segments[3].absolute(&bar).end(), bar.end());
    }
}
