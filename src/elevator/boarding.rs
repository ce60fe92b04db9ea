//! Boarding-eligibility filter
//!
//! A car may not board a waiter out of turn if doing so would force it to
//! reverse past a floor where an earlier-queued, opposite-direction waiter is
//! still owed a pickup. The filter scans the assignment queue in order and
//! tracks two running bounds: the smallest origin seen among down-bound
//! waiters (the ceiling an up trip may serve) and the largest origin seen
//! among up-bound waiters (the floor a down trip may not serve below).

use crate::passenger::Passenger;
use crate::types::Direction;

/// Indices into `queue` of the waiters allowed to board at `floor`
///
/// `travel` is the car's current direction (`None` when the stop was entered
/// from idle) and `cab_empty` whether anyone is aboard; an opposite-direction
/// pickup is only ever allowed with an empty cab, because reversing then
/// strands nobody mid-trip. Bounds are updated from every scanned entry after
/// that entry's own check, so earlier waiters constrain later ones but never
/// themselves.
pub(crate) fn eligible_boarders(
    queue: &[Passenger],
    floor: usize,
    travel: Option<Direction>,
    cab_empty: bool,
) -> Vec<usize> {
    let mut eligible = Vec::new();
    // Largest origin seen among up-bound waiters
    let mut up_bound: Option<usize> = None;
    // Smallest origin seen among down-bound waiters
    let mut down_bound: Option<usize> = None;

    for (index, waiter) in queue.iter().enumerate() {
        let wants = waiter.direction();

        if waiter.origin_floor == floor {
            let same_direction = travel.map_or(true, |t| t == wants);
            let allowed = if same_direction {
                match wants {
                    Direction::Up => {
                        down_bound.map_or(true, |bound| waiter.destination_floor <= bound)
                    }
                    Direction::Down => {
                        up_bound.map_or(true, |bound| waiter.destination_floor >= bound)
                    }
                }
            } else {
                cab_empty
                    && match wants {
                        Direction::Up => up_bound.map_or(true, |bound| bound > floor),
                        Direction::Down => down_bound.map_or(true, |bound| bound <= floor),
                    }
            };

            if allowed {
                eligible.push(index);
            }
        }

        match wants {
            Direction::Up => {
                up_bound =
                    Some(up_bound.map_or(waiter.origin_floor, |b| b.max(waiter.origin_floor)));
            }
            Direction::Down => {
                down_bound =
                    Some(down_bound.map_or(waiter.origin_floor, |b| b.min(waiter.origin_floor)));
            }
        }
    }

    eligible
}
