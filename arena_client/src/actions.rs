use arena_schema::{
    ActionKind, GameAction, BENCH_ROW, BENCH_SLOTS, BOARD_HEIGHT, BOARD_WIDTH, SHOP_SLOTS,
};
use thiserror::Error;

/// Local contract violation when constructing an action. Distinct from a
/// server-side rejection, which is expected and never surfaced as an error:
/// the authority simply does not apply the change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionValidationError {
    #[error("{kind:?} action requires a unit id")]
    MissingUnitId { kind: ActionKind },
    #[error("COLLECT_ORB action requires an orb id")]
    MissingOrbId,
    #[error("MOVE action requires both target coordinates")]
    MissingTarget,
    #[error("board target ({x}, {y}) is outside x 0..{BOARD_WIDTH}, y 0..{BOARD_HEIGHT}")]
    BoardTargetOutOfRange { x: i32, y: i32 },
    #[error("bench slot {x} is outside 0..{BENCH_SLOTS}")]
    BenchSlotOutOfRange { x: i32 },
    #[error("BUY action requires a shop index")]
    MissingShopIndex,
    #[error("shop index {index} is outside 0..{SHOP_SLOTS}")]
    ShopIndexOutOfRange { index: u32 },
}

/// Check an action against the authority's contract before submission.
///
/// Out-of-range MOVE targets are rejected, never clamped. A stale BUY index
/// within `0..SHOP_SLOTS` passes here; the shop may have rerolled since the
/// last render, and that rejection belongs to the server.
pub fn validate_action(action: &GameAction) -> Result<(), ActionValidationError> {
    match action.kind {
        ActionKind::Move => {
            if action.unit_id.is_none() {
                return Err(ActionValidationError::MissingUnitId {
                    kind: ActionKind::Move,
                });
            }
            let (Some(x), Some(y)) = (action.target_x, action.target_y) else {
                return Err(ActionValidationError::MissingTarget);
            };
            if y == BENCH_ROW {
                if !(0..BENCH_SLOTS).contains(&x) {
                    return Err(ActionValidationError::BenchSlotOutOfRange { x });
                }
            } else if !(0..BOARD_WIDTH).contains(&x) || !(0..BOARD_HEIGHT).contains(&y) {
                return Err(ActionValidationError::BoardTargetOutOfRange { x, y });
            }
            Ok(())
        }
        ActionKind::Buy => {
            let Some(index) = action.shop_index else {
                return Err(ActionValidationError::MissingShopIndex);
            };
            if index >= SHOP_SLOTS {
                return Err(ActionValidationError::ShopIndexOutOfRange { index });
            }
            Ok(())
        }
        ActionKind::Sell => {
            if action.unit_id.is_none() {
                return Err(ActionValidationError::MissingUnitId {
                    kind: ActionKind::Sell,
                });
            }
            Ok(())
        }
        ActionKind::CollectOrb => {
            if action.orb_id.is_none() {
                return Err(ActionValidationError::MissingOrbId);
            }
            Ok(())
        }
        ActionKind::Reroll | ActionKind::Exp | ActionKind::Lock => Ok(()),
    }
}
