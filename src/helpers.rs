//! Utility functions for shadow slots and JESD204B parameters.

use crate::error::ShadowError;

/// Validates a shadow index against a table of `N` slots.
///
/// Returns the slot as a `usize`, or an error for the sentinel slot 0 and for
/// indices beyond the table.
///
/// # Example
/// ```
/// use ad9250::helpers::shadow_slot;
/// use ad9250::ShadowError;
///
/// assert_eq!(shadow_slot::<15>(7), Ok(7));
/// assert_eq!(shadow_slot::<15>(0), Err(ShadowError::NotShadowed));
/// assert_eq!(shadow_slot::<15>(15), Err(ShadowError::OutOfBounds));
/// ```
pub fn shadow_slot<const N: usize>(index: u8) -> Result<usize, ShadowError> {
    let slot = index as usize;
    if slot == 0 {
        return Err(ShadowError::NotShadowed);
    }
    if slot >= N {
        return Err(ShadowError::OutOfBounds);
    }
    Ok(slot)
}

/// Rounds a frames-per-multiframe count to the nearest multiple of four.
///
/// Remainders of 1 round down, 2 and 3 round up. The result never drops
/// below 4, the smallest multiframe the link supports.
///
/// # Example
/// ```
/// use ad9250::helpers::round_frames;
///
/// assert_eq!(round_frames(17), 16);
/// assert_eq!(round_frames(18), 20);
/// assert_eq!(round_frames(1), 4);
/// ```
pub fn round_frames(k: u8) -> u8 {
    let rounded = match k % 4 {
        0 => k,
        1 => k - 1,
        rem => k + (4 - rem),
    };
    rounded.max(4)
}

#[test]
fn round_frames_edge_cases() {
    assert_eq!(round_frames(0), 4);
    assert_eq!(round_frames(4), 4);
    assert_eq!(round_frames(5), 4);
    assert_eq!(round_frames(6), 8);
    assert_eq!(round_frames(7), 8);
    assert_eq!(round_frames(31), 32);
    assert_eq!(round_frames(32), 32);
}
