//! Reward-eligible block counting.
//!
//! The program pays out over `[start, end)`. An interval that begins before
//! `start` and ends inside the window counts its entry block as well, so
//! `multiplier(start - 10, start)` is `1`. Existing deployments depend on that
//! table, so the entry boundary is kept as is.

/// Number of reward-eligible blocks in `[from, to)` for a program running
/// from `start` to `end`. A reversed interval yields `0`.
pub fn multiplier(from: u32, to: u32, start: u32, end: u32) -> u32 {
    if to <= from {
        return 0;
    }

    if to <= end {
        if from >= start {
            to - from
        } else if to < start {
            0
        } else {
            to - start + 1
        }
    } else if from >= end {
        0
    } else if from < start {
        end - start
    } else {
        end - from
    }
}
