use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order status lifecycle.
///
/// `pending → accept → delivered`, with `pending → cancelled` and
/// `accept → cancelled` also permitted. `delivered` and `cancelled` are
/// terminal. Everything else (including self-transitions) is rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Accept,
    Delivered,
    Cancelled,
}

/// A status transition the state machine does not permit.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid status transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check whether `self -> to` is a legal lifecycle step.
    pub fn validate_transition(self, to: OrderStatus) -> Result<(), InvalidTransition> {
        use OrderStatus::*;

        let ok = matches!(
            (self, to),
            (Pending, Accept) | (Pending, Cancelled) | (Accept, Delivered) | (Accept, Cancelled)
        );

        if ok {
            Ok(())
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accept => "accept",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = lavka_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "accept" => Ok(OrderStatus::Accept),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(lavka_core::DomainError::validation(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_is_legal() {
        OrderStatus::Pending
            .validate_transition(OrderStatus::Accept)
            .unwrap();
        OrderStatus::Accept
            .validate_transition(OrderStatus::Delivered)
            .unwrap();
    }

    #[test]
    fn cancellation_is_legal_until_delivery() {
        OrderStatus::Pending
            .validate_transition(OrderStatus::Cancelled)
            .unwrap();
        OrderStatus::Accept
            .validate_transition(OrderStatus::Cancelled)
            .unwrap();
    }

    #[test]
    fn delivered_cannot_go_back_to_pending() {
        let err = OrderStatus::Delivered
            .validate_transition(OrderStatus::Pending)
            .unwrap_err();
        assert_eq!(err.from, OrderStatus::Delivered);
        assert_eq!(err.to, OrderStatus::Pending);
    }

    #[test]
    fn self_transitions_are_rejected() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Accept,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert!(status.validate_transition(status).is_err());
        }
    }

    #[test]
    fn serde_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&OrderStatus::Accept).unwrap();
        assert_eq!(json, "\"accept\"");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_status() -> impl Strategy<Value = OrderStatus> {
            prop_oneof![
                Just(OrderStatus::Pending),
                Just(OrderStatus::Accept),
                Just(OrderStatus::Delivered),
                Just(OrderStatus::Cancelled),
            ]
        }

        proptest! {
            /// Property: terminal states admit no outgoing transition.
            #[test]
            fn terminal_states_are_absorbing(from in any_status(), to in any_status()) {
                if from.is_terminal() {
                    prop_assert!(from.validate_transition(to).is_err());
                }
            }

            /// Property: every legal transition strictly advances the
            /// lifecycle (no transition ever re-enters `pending`).
            #[test]
            fn pending_is_never_re_entered(from in any_status(), to in any_status()) {
                if from.validate_transition(to).is_ok() {
                    prop_assert!(to != OrderStatus::Pending);
                }
            }
        }
    }
}
